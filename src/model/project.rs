use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp;
use super::user::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub created_by: Option<UserId>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<NaiveDateTime>,
}
