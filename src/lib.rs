//! Command-line client for the Business Manager API.
//!
//! Login and registration, a session persisted between runs, and a
//! dashboard whose content depends on the user's role.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod model;
pub mod models;
pub mod storage;
pub mod utils;

pub use api::ApiClient;
pub use app::{App, Screen};
pub use config::Config;
