use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::StoreError;
use crate::model::UserRecord;
use crate::storage::KeyValueStore;

const TOKEN_KEY: &str = "authToken";
const USER_KEY: &str = "userData";

/// An auth token together with the user it authenticates.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserRecord,
}

/// Owner of the persisted session: empty at startup, populated on login,
/// cleared on logout. Clones share the same backing store.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn get_token(&self) -> Option<String> {
        match self.backend.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.backend.set(TOKEN_KEY, token)
    }

    pub fn remove_token(&self) -> Result<(), StoreError> {
        self.backend.remove(TOKEN_KEY)
    }

    /// A stored user that no longer parses is treated as absent.
    pub fn get_stored_user(&self) -> Option<UserRecord> {
        let raw = match self.backend.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Failed to read stored user");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Stored user is not valid JSON");
                None
            }
        }
    }

    pub fn set_stored_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let raw = serde_json::to_string(user)?;
        self.backend.set(USER_KEY, &raw)
    }

    pub fn remove_stored_user(&self) -> Result<(), StoreError> {
        self.backend.remove(USER_KEY)
    }

    /// Both halves, or nothing.
    pub fn session(&self) -> Option<Session> {
        let token = self.get_token()?;
        let user = self.get_stored_user()?;
        Some(Session { token, user })
    }

    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        self.set_token(&session.token)?;
        self.set_stored_user(&session.user)?;
        debug!(user_id = session.user.id, "Session stored");
        Ok(())
    }

    /// Removes both keys even when the first removal fails, then reports
    /// the first error.
    pub fn clear(&self) -> Result<(), StoreError> {
        let token = self.remove_token();
        let user = self.remove_stored_user();
        token.and(user)?;
        debug!("Session cleared");
        Ok(())
    }
}
