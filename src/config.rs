use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,

    // Logging
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            api_url: env::var("BIZMAN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            session_file: env::var("BIZMAN_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_path()),
            log_dir: env::var("BIZMAN_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("logs")),
            log_level: env::var("BIZMAN_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string()),
        }
    }

    pub fn with_overrides(mut self, api_url: Option<String>, session_file: Option<PathBuf>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(path) = session_file {
            self.session_file = path;
        }
        self
    }
}

/// `<config dir>/bizman/session.json`, or `.bizman/session.json` when the
/// platform has no config directory.
pub fn default_session_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("bizman"))
        .unwrap_or_else(|| PathBuf::from(".bizman"))
        .join("session.json")
}
