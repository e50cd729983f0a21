//! Configuration management for the `tripsmith` application
//!
//! Handles loading configuration from files and environment variables,
//! and validates all settings, including the three provider credentials
//! the planner cannot run without.

use crate::PlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Root configuration structure for the `tripsmith` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlannerConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Geocoding/routing provider settings
    #[serde(default)]
    pub geo: GeoConfig,
    /// Language-model settings for the agent pipeline
    #[serde(default)]
    pub llm: LlmConfig,
    /// Web-search tool settings for the agent pipeline
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Provider credentials
    #[serde(default)]
    pub keys: ApiKeys,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Geocoding/routing provider settings (OpenRouteService)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Base URL for the geocoding and directions APIs
    #[serde(default = "default_geo_base_url")]
    pub base_url: String,
    /// Number of geocoding candidates to request (only the first is used)
    #[serde(default = "default_geo_candidates")]
    pub candidates: u32,
    /// Request timeout in seconds
    #[serde(default = "default_geo_timeout")]
    pub timeout_seconds: u32,
}

/// Language-model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible chat endpoint
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_llm_temperature")]
    pub temperature: f64,
}

/// Web-search tool settings (Serper)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL for the search API
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    /// Maximum organic results folded into agent context
    #[serde(default = "default_search_max_results")]
    pub max_results: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Provider credentials. All three are required at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeys {
    /// Google key: map embed and the Gemini chat endpoint
    #[serde(default)]
    pub google_api_key: Option<String>,
    /// Serper key: the agents' web-search tool
    #[serde(default)]
    pub serper_api_key: Option<String>,
    /// OpenRouteService key: geocoding and directions
    #[serde(default)]
    pub openroute_api_key: Option<String>,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_geo_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_geo_candidates() -> u32 {
    5
}

fn default_geo_timeout() -> u32 {
    30
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_llm_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_llm_temperature() -> f64 {
    0.5
}

fn default_search_base_url() -> String {
    "https://google.serper.dev".to_string()
}

fn default_search_max_results() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            base_url: default_geo_base_url(),
            candidates: default_geo_candidates(),
            timeout_seconds: default_geo_timeout(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            temperature: default_llm_temperature(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            max_results: default_search_max_results(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let override_path = env::var_os("TRIPSMITH_CONFIG").map(PathBuf::from);
        Self::load_from_path(override_path)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TRIPSMITH_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRIPSMITH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // The canonical credential variables win over nothing, not over the
        // config file: they only fill keys the file/env prefix left unset.
        config.keys.fill_from_env();

        // Validation is a separate step so startup can initialize logging
        // from the loaded settings before reporting missing credentials.
        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripsmith").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate that all required provider credentials are present
    pub fn validate_api_keys(&self) -> Result<()> {
        self.keys.resolve().map(|_| ())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.geo.timeout_seconds == 0 || self.geo.timeout_seconds > 300 {
            return Err(PlannerError::config(
                "Geo provider timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.geo.candidates == 0 || self.geo.candidates > 40 {
            return Err(
                PlannerError::config("Geocoding candidate count must be between 1 and 40").into(),
            );
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(
                PlannerError::config("LLM temperature must be between 0.0 and 2.0").into(),
            );
        }

        if self.search.max_results == 0 || self.search.max_results > 20 {
            return Err(
                PlannerError::config("Search result count must be between 1 and 20").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("geo", &self.geo.base_url),
            ("llm", &self.llm.base_url),
            ("search", &self.search.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PlannerError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

/// Fully-resolved provider credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    pub google_api_key: String,
    pub serper_api_key: String,
    pub openroute_api_key: String,
}

impl ApiKeys {
    /// Require all three credentials, naming every missing one at once
    pub fn resolve(&self) -> Result<Credentials> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("GOOGLE_API_KEY", &self.google_api_key),
            ("SERPER_API_KEY", &self.serper_api_key),
            ("OPENROUTE_API_KEY", &self.openroute_api_key),
        ] {
            if value.as_deref().unwrap_or("").is_empty() {
                missing.push(name);
            }
        }

        if !missing.is_empty() {
            return Err(PlannerError::config(format!(
                "One or more API keys are missing. Please set them in your environment: {}",
                missing.join(", ")
            ))
            .into());
        }

        Ok(Credentials {
            google_api_key: self.google_api_key.clone().unwrap_or_default(),
            serper_api_key: self.serper_api_key.clone().unwrap_or_default(),
            openroute_api_key: self.openroute_api_key.clone().unwrap_or_default(),
        })
    }

    /// Fill unset keys from the canonical environment variables the original
    /// deployment uses: `GOOGLE_API_KEY`, `SERPER_API_KEY`, `OPENROUTE_API_KEY`.
    pub fn fill_from_env(&mut self) {
        if self.google_api_key.is_none() {
            self.google_api_key = env::var("GOOGLE_API_KEY").ok().filter(|v| !v.is_empty());
        }
        if self.serper_api_key.is_none() {
            self.serper_api_key = env::var("SERPER_API_KEY").ok().filter(|v| !v.is_empty());
        }
        if self.openroute_api_key.is_none() {
            self.openroute_api_key = env::var("OPENROUTE_API_KEY").ok().filter(|v| !v.is_empty());
        }
    }

    /// Credentials for test and local use
    #[must_use]
    pub fn from_values(google: &str, serper: &str, openroute: &str) -> Self {
        Self {
            google_api_key: Some(google.to_string()),
            serper_api_key: Some(serper.to_string()),
            openroute_api_key: Some(openroute.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys() -> PlannerConfig {
        PlannerConfig {
            keys: ApiKeys::from_values("google-test-key", "serper-test-key", "ors-test-key"),
            ..PlannerConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.geo.base_url, "https://api.openrouteservice.org");
        assert_eq!(config.geo.timeout_seconds, 30);
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.llm.temperature, 0.5);
        assert_eq!(config.logging.level, "info");
        assert!(config.keys.google_api_key.is_none());
    }

    #[test]
    fn test_config_validation_missing_api_keys() {
        let config = PlannerConfig::default();
        let result = config.validate_api_keys();
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("GOOGLE_API_KEY"));
        assert!(message.contains("SERPER_API_KEY"));
        assert!(message.contains("OPENROUTE_API_KEY"));
    }

    #[test]
    fn test_config_validation_one_missing_key() {
        let mut config = config_with_keys();
        config.keys.serper_api_key = None;
        let result = config.validate_api_keys();
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("SERPER_API_KEY"));
        assert!(!message.contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_config_validation_valid() {
        let config = config_with_keys();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_credentials() {
        let keys = ApiKeys::from_values("g-key", "s-key", "o-key");
        let credentials = keys.resolve().unwrap();
        assert_eq!(credentials.google_api_key, "g-key");
        assert_eq!(credentials.serper_api_key, "s-key");
        assert_eq!(credentials.openroute_api_key, "o-key");
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let keys = ApiKeys::from_values("", "s-key", "o-key");
        let error = keys.resolve().unwrap_err().to_string();
        assert!(error.contains("GOOGLE_API_KEY"));
        assert!(!error.contains("SERPER_API_KEY"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = config_with_keys();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = config_with_keys();
        config.geo.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("timeout must be between")
        );

        let mut config = config_with_keys();
        config.llm.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_base_url() {
        let mut config = config_with_keys();
        config.geo.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = PlannerConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("tripsmith"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
