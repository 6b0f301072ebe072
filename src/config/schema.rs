use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Environment variable overriding `[backend].base_url`, for deployments
/// that point the same binary at different Todo backends.
pub const BACKEND_URL_ENV: &str = "TASKBRIDGE_BACKEND_URL";

const DEFAULT_CONFIG_FILE: &str = "taskbridge.toml";

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Optional LLM presenter. When absent, replies are returned verbatim
    /// from the deterministic dispatcher.
    #[serde(default)]
    pub classifier: Option<ClassifierConfig>,
}

// ── Todo backend ─────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the remote Todo API (default: http://localhost:8000/api)
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    /// Per-call request timeout in seconds (default: 5)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:8000/api".into()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ── Gateway ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway host (default: 127.0.0.1)
    #[serde(default = "default_gateway_host")]
    pub host: String,
    /// Gateway port (default: 8080)
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

fn default_gateway_host() -> String {
    "127.0.0.1".into()
}

fn default_gateway_port() -> u16 {
    8080
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

// ── Optional LLM presenter ───────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// OpenAI-compatible endpoint base URL.
    pub base_url: String,
    /// API key sent as a bearer token. Optional for local endpoints.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model name passed through to the endpoint.
    pub model: String,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist; otherwise `taskbridge.toml` in the
    /// working directory is used when present, else built-in defaults.
    /// `TASKBRIDGE_BACKEND_URL` overrides `[backend].base_url` last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                config.backend.base_url = url.to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        toml::from_str(&raw).map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("backend.base_url is empty".into()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "backend.timeout_secs must be at least 1".into(),
            ));
        }
        if let Some(classifier) = &self.classifier {
            if classifier.base_url.trim().is_empty() || classifier.model.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "classifier requires base_url and model".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:8000/api");
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.gateway.port, 8080);
        assert!(config.classifier.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            base_url = "https://todos.example.com/api"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "https://todos.example.com/api");
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.gateway.port, 8080);
    }

    #[test]
    fn classifier_section_parses() {
        let config: Config = toml::from_str(
            r#"
            [classifier]
            base_url = "https://api.openai.com/v1"
            api_key = "sk-test"
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();
        let classifier = config.classifier.unwrap();
        assert_eq!(classifier.model, "gpt-4o-mini");
        assert_eq!(classifier.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            timeout_secs = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gateway]\nport = 9200").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.gateway.port, 9200);
        assert_eq!(config.backend.timeout_secs, 5);
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let result = Config::load(Some(Path::new("/nonexistent/taskbridge.toml")));
        assert!(result.is_err());
    }
}
