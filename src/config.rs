//! Process settings read from the environment.

use std::fmt;
use std::path::PathBuf;

/// Runtime settings for the API process.
///
/// Only `data_path` is consumed by the store; the rest configures the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            data_path: PathBuf::from("./mock_data/db.json"),
            debug: true,
        }
    }
}

impl Settings {
    /// Read `API_HOST`, `API_PORT`, `MOCK_DATA_PATH` and `DEBUG`, falling
    /// back to the defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with the variable source supplied by the caller.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(host) = lookup("API_HOST") {
            settings.host = host;
        }
        if let Some(port) = lookup("API_PORT") {
            settings.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "API_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(path) = lookup("MOCK_DATA_PATH") {
            settings.data_path = PathBuf::from(path);
        }
        if let Some(debug) = lookup("DEBUG") {
            settings.debug = parse_bool(&debug).ok_or(ConfigError::Invalid {
                key: "DEBUG",
                value: debug.clone(),
            })?;
        }

        Ok(settings)
    }

    /// `host:port`, ready for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Error type for settings that are present but malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
