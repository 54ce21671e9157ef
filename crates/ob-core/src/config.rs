//! Configuration management
//!
//! Settings are resolved in this order (later wins):
//! 1. built-in defaults
//! 2. `ob-gateway.toml` in the working directory, if present
//! 3. environment variables
//!
//! `${VAR_NAME}` inside the TOML file is replaced by the variable's value.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::Error;

/// Default configuration file name
pub const CONFIG_FILE: &str = "ob-gateway.toml";

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Model to use
    pub model: String,

    /// Base URL (optional, for custom endpoints)
    pub base_url: Option<String>,

    /// Max tokens per model response
    pub max_tokens: u64,

    /// Sampling temperature
    pub temperature: Option<f64>,

    /// Model calls allowed per chat turn
    pub max_iterations: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: None,
            max_tokens: 4096,
            temperature: Some(0.0),
            max_iterations: 10,
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

/// HTTP API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Port for HTTP API server
    pub port: u16,

    /// Allowed CORS origins. `None` allows any origin.
    pub allowed_origins: Option<Vec<String>>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            allowed_origins: None,
        }
    }
}

/// Where user records and session documents live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// One `{documentNumber}.json` per user
    pub users_dir: PathBuf,

    /// One `{sessionId}.json` per chat session
    pub sessions_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_dir: PathBuf::from("users"),
            sessions_dir: PathBuf::from("sessions"),
        }
    }
}

/// Main configuration for ob-gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Replace `${VAR_NAME}` with the variable's value.
    ///
    /// Unset variables expand to an empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::with_capacity(value.len());
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Parse configuration from TOML text (after env expansion)
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let expanded = Self::expand_env_vars(content);
        toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load from a TOML file, then apply environment overrides
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let mut cfg = Self::from_toml_str(&content)?;
        cfg.apply_env_overrides();
        debug!("Loaded configuration from {}", path.display());
        Ok(cfg)
    }

    /// Load from `ob-gateway.toml` if it exists, otherwise from the environment
    pub fn load() -> crate::Result<Self> {
        if Path::new(CONFIG_FILE).exists() {
            return Self::from_toml_file(CONFIG_FILE);
        }
        Ok(Self::from_env())
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg
    }

    fn apply_env_overrides(&mut self) {
        if let Some(api_key) = non_empty_var("LLM_API_KEY").or_else(|| non_empty_var("CLAUDE_API_KEY")) {
            self.llm.api_key = api_key;
        }

        if let Some(model) = non_empty_var("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(base_url) = non_empty_var("LLM_BASE_URL") {
            self.llm.base_url = Some(base_url);
        }
        if let Some(n) = non_empty_var("LLM_MAX_TOKENS").and_then(|v| v.parse().ok()) {
            self.llm.max_tokens = n;
        }
        if let Some(t) = non_empty_var("LLM_TEMPERATURE").and_then(|v| v.parse().ok()) {
            self.llm.temperature = Some(t);
        }
        if let Some(n) = non_empty_var("LLM_MAX_ITERATIONS").and_then(|v| v.parse().ok()) {
            self.llm.max_iterations = n;
        }

        if let Some(port) = non_empty_var("API_PORT").and_then(|v| v.parse().ok()) {
            self.api.port = port;
        }
        if let Some(origins) = non_empty_var("API_ALLOWED_ORIGINS") {
            self.api.allowed_origins = Some(
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }

        if let Some(dir) = non_empty_var("USERS_DIR") {
            self.storage.users_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty_var("SESSIONS_DIR") {
            self.storage.sessions_dir = PathBuf::from(dir);
        }
    }

    /// Check the settings the server cannot start without
    pub fn validate(&self) -> crate::Result<()> {
        if self.llm.api_key.is_empty() {
            return Err(Error::Config(
                "LLM_API_KEY or CLAUDE_API_KEY not set".to_string(),
            ));
        }
        if self.llm.max_iterations == 0 {
            return Err(Error::Config("llm.max_iterations must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_config_default() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "claude-sonnet-4-20250514");
        assert_eq!(config.temperature, Some(0.0));
        assert_eq!(config.max_iterations, 10);
        assert!(config.api_key.is_empty());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.users_dir, PathBuf::from("users"));
        assert_eq!(config.sessions_dir, PathBuf::from("sessions"));
    }

    #[test]
    fn test_expand_env_vars() {
        unsafe {
            std::env::set_var("OB_GATEWAY_TEST_VAR", "test_value");
        }

        let result = Config::expand_env_vars("prefix_${OB_GATEWAY_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        let result = Config::expand_env_vars("prefix_${OB_GATEWAY_NONEXISTENT}_suffix");
        assert_eq!(result, "prefix__suffix");

        unsafe {
            std::env::remove_var("OB_GATEWAY_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_passthrough() {
        assert_eq!(Config::expand_env_vars("no_vars_here"), "no_vars_here");
        assert_eq!(Config::expand_env_vars("${}_content"), "_content");
        assert_eq!(Config::expand_env_vars("cost: $5"), "cost: $5");
    }

    #[test]
    fn test_toml_config_parsing() {
        let toml_content = r#"
[llm]
model = "claude-3-5-sonnet-20240620"
api_key = "test_key"
temperature = 0.2
max_iterations = 4

[api]
port = 8080
allowed_origins = ["http://localhost:3000"]

[storage]
users_dir = "/var/lib/ob/users"
"#;

        let config = Config::from_toml_str(toml_content).unwrap();
        assert_eq!(config.llm.model, "claude-3-5-sonnet-20240620");
        assert_eq!(config.llm.api_key, "test_key");
        assert_eq!(config.llm.temperature, Some(0.2));
        assert_eq!(config.llm.max_iterations, 4);
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.api.port, 8080);
        assert_eq!(
            config.api.allowed_origins,
            Some(vec!["http://localhost:3000".to_string()])
        );
        assert_eq!(config.storage.users_dir, PathBuf::from("/var/lib/ob/users"));
        // untouched section keeps its default
        assert_eq!(config.storage.sessions_dir, PathBuf::from("sessions"));
    }

    #[test]
    fn test_toml_rejects_bad_types() {
        let err = Config::from_toml_str("[api]\nport = \"eighty\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let toml_content = r#"
[llm]
api_key = "toml_key"

[api]
port = 8080

[storage]
sessions_dir = "/srv/ob/sessions"
"#;

        unsafe {
            std::env::set_var("API_PORT", "9000");
            std::env::set_var("SESSIONS_DIR", "/x");
            std::env::set_var("API_ALLOWED_ORIGINS", "a, ,b");
            std::env::set_var("LLM_API_KEY", "");
            std::env::remove_var("CLAUDE_API_KEY");
        }

        let mut config = Config::from_toml_str(toml_content).unwrap();
        config.apply_env_overrides();

        assert_eq!(config.api.port, 9000);
        assert_eq!(config.storage.sessions_dir, PathBuf::from("/x"));
        assert_eq!(
            config.api.allowed_origins,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        // exported but empty keys do not erase the file's key
        assert_eq!(config.llm.api_key, "toml_key");

        unsafe {
            std::env::set_var("CLAUDE_API_KEY", "claude_key");
        }
        config.apply_env_overrides();
        assert_eq!(config.llm.api_key, "claude_key");

        unsafe {
            std::env::remove_var("API_PORT");
            std::env::remove_var("SESSIONS_DIR");
            std::env::remove_var("API_ALLOWED_ORIGINS");
            std::env::remove_var("LLM_API_KEY");
            std::env::remove_var("CLAUDE_API_KEY");
        }
    }

    #[test]
    fn test_validate_requires_api_key() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config.llm.api_key = "key".to_string();
        assert!(config.validate().is_ok());

        config.llm.max_iterations = 0;
        assert!(config.validate().is_err());
    }
}
