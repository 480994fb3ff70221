use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::role::Role;
use super::timestamp;

pub type UserId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    /// Raw role id as sent by the service, which may be null or out of
    /// range. Use [`UserRecord::role`] to branch on it.
    #[serde(default)]
    pub role: Option<i64>,
    #[serde(default)]
    pub role_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(
        default,
        deserialize_with = "timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

impl UserRecord {
    pub fn role(&self) -> Option<Role> {
        self.role
            .and_then(|id| u8::try_from(id).ok())
            .and_then(Role::from_id)
    }

    /// Full name when the user gave one, otherwise the login name.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }

    /// The service's role name, or our own label when it sent none.
    pub fn role_label(&self) -> &str {
        if !self.role_name.is_empty() {
            return &self.role_name;
        }
        self.role().map(Role::label).unwrap_or("Unknown role")
    }
}
