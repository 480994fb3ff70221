use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::UserRecord;

#[derive(Debug, Serialize)]
pub struct LoginReqDto<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterReq {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: UserRecord,
}

/// The service answers a registration with the created user record. Only the
/// id matters to the client: its presence means a follow-up login can run.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
}

impl NewProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            status: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    pub project_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<u64>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, project_id: u64) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: "todo".to_string(),
            priority: "medium".to_string(),
            due_date: None,
            project_id,
            assigned_to: None,
        }
    }
}

/// `skip`/`limit` paging understood by the list endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn is_empty(&self) -> bool {
        self.skip.is_none() && self.limit.is_none()
    }

    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(skip) = self.skip {
            parts.push(format!("skip={skip}"));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={limit}"));
        }
        parts.join("&")
    }
}
