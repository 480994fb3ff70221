//! Top-level client state: who is logged in, and which screen that implies.

use reqwest::StatusCode;
use tracing::{info, warn};

use crate::api::{ApiClient, AuthApi};
use crate::auth::form::AuthForm;
use crate::auth::session::{Session, SessionStore};
use crate::dashboard::Dashboard;
use crate::errors::{ApiError, AuthError, StoreError};
use crate::model::UserRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

pub struct App {
    store: SessionStore,
    user: Option<UserRecord>,
}

impl App {
    /// Starts logged in only when both the token and the user were persisted.
    pub fn restore(store: SessionStore) -> Self {
        let user = store.session().map(|s| s.user);
        match &user {
            Some(u) => info!(user_id = u.id, "Restored stored session"),
            None => info!("No stored session"),
        }
        Self { store, user }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn screen(&self) -> Screen {
        if self.user.is_some() {
            Screen::Dashboard
        } else {
            Screen::Login
        }
    }

    pub fn session(&self) -> Option<Session> {
        let user = self.user.clone()?;
        let token = self.store.get_token()?;
        Some(Session { token, user })
    }

    pub fn handle_login(&mut self, session: Session) -> Result<(), StoreError> {
        self.store.save(&session)?;
        self.user = Some(session.user);
        Ok(())
    }

    pub fn handle_logout(&mut self) -> Result<(), StoreError> {
        if let Some(user) = self.user.take() {
            info!(user_id = user.id, "Logged out");
        }
        self.store.clear()
    }

    /// Submits `form` and, on success, persists the resulting session.
    pub async fn submit_form<A>(&mut self, form: &mut AuthForm, api: &A) -> Result<(), AuthError>
    where
        A: AuthApi + ?Sized,
    {
        let session = form.submit(api).await?;
        self.handle_login(session)?;
        Ok(())
    }

    /// Checks the stored token against `/users/me`.
    ///
    /// Returns `Ok(false)` after dropping a session the service rejected with
    /// 401 or 403, and refreshes the stored user when it is accepted. Any
    /// other failure is returned as an error and leaves the session alone.
    pub async fn verify_session(&mut self, api: &ApiClient) -> Result<bool, ApiError> {
        let Some(session) = self.session() else {
            return Ok(false);
        };

        match api.get_profile(&session.token).await {
            Ok(user) => {
                if let Err(e) = self.store.set_stored_user(&user) {
                    warn!(error = %e, "Failed to refresh stored user");
                }
                self.user = Some(user);
                Ok(true)
            }
            Err(ApiError::Status { status, message })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                warn!(status = status.as_u16(), %message, "Auth check failed, clearing session");
                if let Err(e) = self.handle_logout() {
                    warn!(error = %e, "Failed to clear session");
                }
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn dashboard(&self) -> Option<Dashboard> {
        self.session().map(Dashboard::new)
    }
}
