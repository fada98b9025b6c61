use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use larder_shopping::semantic::{DEFAULT_HOST, DEFAULT_MODEL};
use larder_shopping::{NormalizerBackend, OllamaSettings};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NormalizerConfig {
    /// "rules" or "ollama"
    #[serde(default)]
    pub backend: NormalizerBackend,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_ollama_host")]
    pub ollama_host: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            backend: NormalizerBackend::default(),
            model: default_model(),
            ollama_host: default_ollama_host(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl NormalizerConfig {
    pub fn ollama_settings(&self) -> OllamaSettings {
        OllamaSettings {
            host: self.ollama_host.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_ollama_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (LLM_BACKEND, LLM_MODEL, OLLAMA_HOST, LLM_TIMEOUT)
    /// 2. Environment variables (LARDER__NORMALIZER__BACKEND, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("normalizer.backend", "rules")?
            .set_default("normalizer.model", DEFAULT_MODEL)?
            .set_default("normalizer.ollama_host", DEFAULT_HOST)?
            .set_default("normalizer.timeout_secs", default_timeout_secs())?
            .set_default("observability.log_level", default_log_level())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored if missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("LARDER")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(backend) = env::var("LLM_BACKEND") {
            builder = builder.set_override("normalizer.backend", legacy_backend(&backend))?;
        }
        if let Ok(model) = env::var("LLM_MODEL") {
            builder = builder.set_override("normalizer.model", model)?;
        }
        if let Ok(host) = env::var("OLLAMA_HOST") {
            builder = builder.set_override("normalizer.ollama_host", host)?;
        }
        if let Ok(timeout) = env::var("LLM_TIMEOUT") {
            builder = builder.set_override("normalizer.timeout_secs", timeout)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.normalizer.timeout_secs == 0 {
            return Err("Normalizer timeout_secs must be greater than 0".to_string());
        }
        if self.normalizer.backend == NormalizerBackend::Ollama {
            if self.normalizer.model.trim().is_empty() {
                return Err("Normalizer model is required for the ollama backend".to_string());
            }
            if self.normalizer.ollama_host.trim().is_empty() {
                return Err("Normalizer ollama_host is required for the ollama backend".to_string());
            }
        }
        Ok(())
    }
}

/// Map a legacy `LLM_BACKEND` value onto a supported backend
///
/// Older deployments also set hosted providers ("openai", "anthropic"); those
/// run on the rule set rather than failing the whole configuration.
fn legacy_backend(value: &str) -> &'static str {
    match value.trim().to_lowercase().as_str() {
        "ollama" => "ollama",
        "rules" | "" => "rules",
        other => {
            tracing::warn!(backend = other, "unsupported LLM_BACKEND, using rules");
            "rules"
        }
    }
}
