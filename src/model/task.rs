use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp;
use super::user::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    /// `None` for unassigned tasks.
    #[serde(default)]
    pub assigned_to: Option<UserId>,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_by: Option<UserId>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<NaiveDateTime>,
}

impl Task {
    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assigned_to == Some(user_id)
    }
}
