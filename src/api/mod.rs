//! HTTP access to the Business Manager API.
//!
//! [`ApiClient`] owns the request primitive; the resource modules add the
//! fixed method/path/body wrappers on top of it.

pub mod auth;
pub mod client;
pub mod projects;
pub mod tasks;
pub mod users;

use async_trait::async_trait;

pub use client::{ApiClient, AuthRequest, RequestOptions};

use crate::errors::ApiError;
use crate::model::{Project, Task};
use crate::models::{LoginResponse, RegisterReq, RegisterResponse};

/// Unauthenticated calls the login form depends on.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;
    async fn register(&self, req: &RegisterReq) -> Result<RegisterResponse, ApiError>;
}

/// Authenticated list calls the dashboard depends on.
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    async fn projects(&self, token: &str) -> Result<Vec<Project>, ApiError>;
    async fn tasks(&self, token: &str) -> Result<Vec<Task>, ApiError>;
}
