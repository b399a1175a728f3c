//! Client configuration injected by the host.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Backend origin the original deployment listens on.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Generation runs a language model on the backend, so calls can take minutes.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_backend_url")]
    pub backend_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_base_url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    pub fn new(backend_base_url: &str) -> Self {
        Self {
            backend_base_url: backend_base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.backend_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.timeout(), Duration::from_secs(300));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"backend_base_url":"http://mock:9"}"#).unwrap();
        assert_eq!(config.backend_base_url, "http://mock:9");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
