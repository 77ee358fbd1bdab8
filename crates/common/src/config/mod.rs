//! Configuration management for Socratic services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Provider credential variables (GROQ_API_KEY, YOUTUBE_API_KEY, ...)
//! - Configuration files (config/default.toml, config/{APP_ENV}.toml)
//! - Default values

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat-completion provider used by the tutor
    #[serde(default)]
    pub tutor: TutorConfig,

    /// Third-party search providers
    #[serde(default)]
    pub search: SearchConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum concurrent requests
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TutorConfig {
    /// OpenAI-compatible chat completions endpoint
    #[serde(default = "default_tutor_endpoint")]
    pub endpoint: String,

    /// API key for the chat provider
    pub api_key: Option<String>,

    /// Model to use
    #[serde(default = "default_tutor_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum output tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_tutor_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Per-provider request timeout in seconds
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,

    /// Result count used when the caller gives none
    #[serde(default = "default_num_results")]
    pub default_num_results: u32,

    /// Upper bound accepted for a caller-supplied result count
    #[serde(default = "default_max_num_results")]
    pub max_num_results: u32,

    /// Shared SerpAPI key, used by site-restricted sources without their own key
    pub serpapi_api_key: Option<String>,

    #[serde(default = "default_youtube")]
    pub youtube: ProviderConfig,

    #[serde(default = "default_medium")]
    pub medium: ProviderConfig,

    #[serde(default = "default_geeksforgeeks")]
    pub geeksforgeeks: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// API key for this provider
    pub api_key: Option<String>,

    /// Provider base URL
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for logs
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

/// Conventional provider credential variables and the keys they populate
const CREDENTIAL_VARS: &[(&str, &str)] = &[
    ("GROQ_API_KEY", "tutor.api_key"),
    ("SERPAPI_API_KEY", "search.serpapi_api_key"),
    ("YOUTUBE_API_KEY", "search.youtube.api_key"),
    ("MEDIUM_API_KEY", "search.medium.api_key"),
    ("GEEKSFORGEEKS_API_KEY", "search.geeksforgeeks.api_key"),
];

pub const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com";
pub const SERPAPI_BASE_URL: &str = "https://serpapi.com";

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_request_timeout() -> u64 { 60 }
fn default_max_concurrent() -> usize { 100 }
fn default_tutor_endpoint() -> String { "https://api.groq.com/openai/v1/chat/completions".to_string() }
fn default_tutor_model() -> String { "llama3-70b-8192".to_string() }
fn default_temperature() -> f32 { 0.5 }
fn default_max_tokens() -> u32 { 1024 }
fn default_tutor_timeout() -> u64 { 30 }
fn default_search_timeout() -> u64 { 10 }
fn default_num_results() -> u32 { 5 }
fn default_max_num_results() -> u32 { 50 }
fn default_youtube() -> ProviderConfig { ProviderConfig::new(YOUTUBE_BASE_URL) }
fn default_medium() -> ProviderConfig { ProviderConfig::new(SERPAPI_BASE_URL) }
fn default_geeksforgeeks() -> ProviderConfig { ProviderConfig::new(SERPAPI_BASE_URL) }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "socratic".to_string() }

impl AppConfig {
    /// Load configuration from files, environment and provider credential variables
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let mut builder = base_builder()?
            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__SERVER__PORT=8081
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            );

        for (var, key) in CREDENTIAL_VARS {
            let value = std::env::var(var).ok().filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

/// Builder seeded with the per-provider base URLs, so a section that only sets a key still deserializes
fn base_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("search.youtube.base_url", YOUTUBE_BASE_URL)?
        .set_default("search.medium.base_url", SERPAPI_BASE_URL)?
        .set_default("search.geeksforgeeks.base_url", SERPAPI_BASE_URL)
}

impl TutorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Key for a site-restricted source, falling back to the shared SerpAPI key
    pub fn site_key(&self, provider: &ProviderConfig) -> Option<String> {
        provider
            .api_key
            .clone()
            .or_else(|| self.serpapi_api_key.clone())
    }
}

impl ProviderConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            api_key: None,
            base_url: base_url.to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            max_concurrent_requests: default_max_concurrent(),
        }
    }
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_tutor_endpoint(),
            api_key: None,
            model: default_tutor_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_tutor_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_search_timeout(),
            default_num_results: default_num_results(),
            max_num_results: default_max_num_results(),
            serpapi_api_key: None,
            youtube: default_youtube(),
            medium: default_medium(),
            geeksforgeeks: default_geeksforgeeks(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: default_metrics_port(),
            service_name: default_service_name(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            tutor: TutorConfig::default(),
            search: SearchConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
