use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    false
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Remote mirror settings. Read once at startup.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RemoteConfig {
    /// Mirror translations to the backend
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; expiry counts as a remote failure
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl RemoteConfig {
    pub fn new() -> Self {
        let enabled = env::var("BANTABA_USE_BACKEND")
            .map(|v| v == "true")
            .unwrap_or_else(|_| default_enabled());

        let base_url = env::var("BANTABA_API_BASE_URL").unwrap_or_else(|_| default_base_url());

        let timeout_ms = env::var("BANTABA_REMOTE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_ms);

        Self {
            enabled,
            base_url,
            timeout_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
