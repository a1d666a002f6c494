use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ShreeError};

/// Top-level configuration for the Shree chat relay and terminal client.
///
/// Loaded from `~/.shree/config.toml` by default. The upstream API key is
/// never stored here, only the name of the environment variable holding it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShreeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub handoff: HandoffConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl ShreeConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ShreeConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ShreeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings for the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
    /// Requests per second accepted on `/api/chat` before answering 429.
    /// 0 disables the limiter.
    pub rate_limit_per_sec: u64,
    /// Browser origins allowed by CORS. Empty allows none.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
            max_body_bytes: 256 * 1024,
            rate_limit_per_sec: 20,
            allowed_origins: vec![
                "http://127.0.0.1:3030".to_string(),
                "http://localhost:3030".to_string(),
            ],
        }
    }
}

/// Upstream generation API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// API root, without trailing slash.
    pub base_url: String,
    /// Model name used in `models/{model}:generateContent`.
    pub model: String,
    /// Environment variable that holds the API key.
    pub api_key_env: String,
    /// Request timeout in seconds; 0 leaves it to the HTTP stack.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-flash-latest".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl UpstreamConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Blank values count as absent.
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Messaging deep link used to hand a qualified lead to a human agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandoffConfig {
    /// Messaging service root, without trailing slash.
    pub base_url: String,
    /// Recipient number in international format, digits only.
    pub recipient: String,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wa.me".to_string(),
            recipient: "917405139990".to_string(),
        }
    }
}

/// Terminal chat client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Root URL of a running relay.
    pub relay_url: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            relay_url: "http://127.0.0.1:3030".to_string(),
        }
    }
}
