use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTH_URL: &str = "https://auth.canvas-ai.app";

/// Application configuration, loaded from a JSON file next to the
/// executable. Every field has a default so a missing or partial file
/// still yields a working configuration. The vision model API key is
/// deliberately environment-only and never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the hosted authentication provider.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    /// Override for the vision model endpoint; the public Gemini endpoint
    /// when absent. Useful for tests and proxies.
    #[serde(default = "default_gemini_endpoint")]
    pub gemini_endpoint: String,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Enable toast notifications in the UI.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_gemini_endpoint() -> String {
    crate::gemini::DEFAULT_ENDPOINT.to_string()
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    4.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auth_url: default_auth_url(),
            gemini_endpoint: default_gemini_endpoint(),
            debug_logging: false,
            enable_toasts: default_toasts(),
            toast_duration: default_toast_duration(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
