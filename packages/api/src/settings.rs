//! Backend connection settings.
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config.toml`, then `BACKEND_*` environment variables (`BACKEND_URL`,
//! `BACKEND_KEY`, `BACKEND_TIMEOUT`). A `.env` file is loaded first when present.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Base URL of the hosted database project.
    pub url: String,
    /// Public (anon) API key sent with every request.
    pub key: String,
    /// Request timeout in seconds (native builds only).
    pub timeout: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".into(),
            key: String::new(),
            timeout: 15,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_file("config.toml")
    }

    pub fn with_file(path: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("url", "http://localhost:54321")?
            .set_default("key", "")?
            .set_default("timeout", 15)?
            .add_source(File::with_name(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("BACKEND").try_parsing(true))
            .build()?;

        config.try_deserialize()
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}
