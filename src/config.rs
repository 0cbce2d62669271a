use crate::error::{Error, Result};
use crate::llm::Provider;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub credential: CredentialConfig,
}

#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: Provider,
    /// Falls back to the provider's default model when unset.
    pub model: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: None,
            max_tokens: default_max_tokens(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().into())
    }
}

#[derive(Debug, Deserialize)]
pub struct PlannerConfig {
    /// Append JSON format instructions to the travel prompt.
    #[serde(default = "default_true")]
    pub format_instructions: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            format_instructions: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CredentialConfig {
    #[serde(default = "default_key_path")]
    pub path: PathBuf,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            path: default_key_path(),
        }
    }
}

// Defaults
fn default_max_tokens() -> u32 {
    2048
}
fn default_timeout_secs() -> u64 {
    180
}
fn default_true() -> bool {
    true
}
fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}
fn default_key_path() -> PathBuf {
    std::env::var("TRAVEL_PLANNER_KEY_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("key.txt"))
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config {}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| Error::config(format!("Failed to parse config: {e}")))
    }

    /// Load the config if the file exists, otherwise use defaults. A file that
    /// exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.llm.max_tokens == 0 {
            return Err(Error::config("llm.max_tokens must be greater than zero"));
        }
        if self.llm.timeout_secs == 0 {
            return Err(Error::config("llm.timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}
