//! Service configuration: built-in defaults with environment overrides.
//!
//! Note the split: the model pipeline re-resolves its own credentials on
//! every invocation (see [`crate::llm::config`]), while this service-level
//! config is loaded once at startup.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Root directory for generated app artifacts.
    pub data_dir: PathBuf,
    /// Shared secret for `POST /task`; unset leaves the gate open.
    pub secret: Option<String>,
    pub user_name: String,
    pub user_email: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            data_dir: PathBuf::from("generated_apps"),
            secret: None,
            user_name: "Taskforge Agent".to_string(),
            user_email: "agent@example.com".to_string(),
        }
    }
}

impl Config {
    /// Defaults plus environment overrides.
    pub fn load() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("TASKFORGE_DATA_DIR") {
            if !dir.is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(secret) = std::env::var("TASKFORGE_SECRET") {
            if !secret.is_empty() {
                self.secret = Some(secret);
            }
        }
        if let Ok(name) = std::env::var("USER_NAME") {
            if !name.is_empty() {
                self.user_name = name;
            }
        }
        if let Ok(email) = std::env::var("USER_EMAIL") {
            if !email.is_empty() {
                self.user_email = email;
            }
        }
    }
}
