//! Configuration management for the Gemini client
//!
//! Configuration is read once at start-up through a `ConfigProvider` and
//! frozen into an immutable `GeminiConfig`, which is then handed to the
//! client and the fallback layer at construction time.

use std::collections::HashMap;
use std::env;
use std::fmt::Debug;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::{Result, ServiceError};
use crate::fallback::CandidateList;

/// Base trait for configuration providers
pub trait ConfigProvider: Send + Sync {
    /// Get a string configuration value
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Extension methods for configuration providers
pub trait ConfigProviderExt: ConfigProvider {
    /// Get an integer configuration value
    fn get_int(&self, key: &str) -> Result<i64> {
        let value = self.get_string(key)?;
        value
            .trim()
            .parse::<i64>()
            .map_err(|e| ServiceError::configuration(format!("Invalid integer for key {}: {}", key, e)))
    }

    /// Get a float configuration value
    fn get_float(&self, key: &str) -> Result<f64> {
        let value = self.get_string(key)?;
        value
            .trim()
            .parse::<f64>()
            .map_err(|e| ServiceError::configuration(format!("Invalid float for key {}: {}", key, e)))
    }

    /// Get a comma-separated list, skipping empty items
    fn get_list(&self, key: &str) -> Result<Vec<String>> {
        let value = self.get_string(key)?;
        Ok(value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }

    fn get_int_or(&self, key: &str, default: i64) -> i64 {
        self.get_int(key).unwrap_or(default)
    }

    fn get_float_or(&self, key: &str, default: f64) -> f64 {
        self.get_float(key).unwrap_or(default)
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProviderExt for T {}

/// Environment variable based configuration provider
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    /// Optional prefix for environment variables
    prefix: Option<String>,
}

impl EnvConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prefix for environment variables
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Format a configuration key as an environment variable
    pub(crate) fn format_key(&self, key: &str) -> String {
        let mut env_key = String::new();

        if let Some(ref prefix) = self.prefix {
            env_key.push_str(prefix);
            env_key.push('_');
        }

        env_key.push_str(&key.to_uppercase().replace(|c: char| !c.is_ascii_alphanumeric(), "_"));

        env_key
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let env_key = self.format_key(key);

        match env::var(&env_key) {
            Ok(value) if value.trim().is_empty() => Err(ServiceError::configuration(format!(
                "Environment variable is empty: {}",
                env_key
            ))),
            Ok(value) => Ok(value),
            Err(env::VarError::NotPresent) => Err(ServiceError::configuration(format!(
                "Environment variable not set: {}",
                env_key
            ))),
            Err(env::VarError::NotUnicode(_)) => Err(ServiceError::configuration(format!(
                "Environment variable is not valid unicode: {}",
                env_key
            ))),
        }
    }
}

/// In-memory config provider for tests or static configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::configuration(format!("Configuration key not found: {}", key)))
    }
}

/// A composite config provider that tries multiple providers in order
#[derive(Debug, Clone)]
pub struct CompositeConfigProvider<P: ConfigProvider> {
    providers: Vec<P>,
}

impl<P: ConfigProvider> CompositeConfigProvider<P> {
    pub fn with_providers(providers: Vec<P>) -> Self {
        Self { providers }
    }
}

impl<P: ConfigProvider> ConfigProvider for CompositeConfigProvider<P> {
    fn get_string(&self, key: &str) -> Result<String> {
        self.providers
            .iter()
            .find_map(|provider| provider.get_string(key).ok())
            .ok_or_else(|| {
                ServiceError::configuration(format!("Configuration key not found in any provider: {}", key))
            })
    }
}

/// Process-wide provider: `SMARTBRIDGE_<KEY>` first, then bare `<KEY>`
pub static DEFAULT_PROVIDER: Lazy<Arc<CompositeConfigProvider<EnvConfigProvider>>> = Lazy::new(|| {
    Arc::new(CompositeConfigProvider::with_providers(vec![
        EnvConfigProvider::new().with_prefix("SMARTBRIDGE"),
        EnvConfigProvider::new(),
    ]))
});

/// Trait for service-specific configuration
pub trait ServiceConfig: Debug + Send + Sync {
    /// Validate this configuration
    fn validate(&self) -> Result<()>;

    /// Service name
    fn service_name(&self) -> &str;
}

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_TRANSLATION_TEMPERATURE: f32 = 0.1;

/// Model identifiers tried in order when none are configured
pub const DEFAULT_MODEL_CANDIDATES: &[&str] = &[
    "gemini-3-flash-preview",
    "gemini-2.5-flash",
    "gemini-1.5-flash",
];

/// Configuration for the Gemini API and the fallback candidate list
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,

    /// Base URL, without the trailing `/models` segment
    pub base_url: String,

    /// Per-call timeout in seconds
    pub timeout_seconds: u64,

    /// Ordered, non-empty list of model identifiers
    pub model_candidates: CandidateList,

    /// Sampling temperature used for plain translation
    pub translation_temperature: f32,
}

impl GeminiConfig {
    /// Config with the given key and every other value at its default
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            model_candidates: CandidateList::default(),
            translation_temperature: DEFAULT_TRANSLATION_TEMPERATURE,
        }
    }

    /// Load configuration from a config provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let api_key = provider.get_string("api_key")?;
        let base_url = provider
            .get_string_or("gemini_base_url", DEFAULT_GEMINI_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let timeout_seconds = provider.get_int_or("gemini_timeout_seconds", DEFAULT_TIMEOUT_SECONDS as i64);
        if timeout_seconds <= 0 {
            return Err(ServiceError::configuration("gemini_timeout_seconds must be positive"));
        }

        let model_candidates = match provider.get_list("model_candidates") {
            Ok(models) => CandidateList::new(models)?,
            Err(_) => CandidateList::default(),
        };

        let translation_temperature = provider
            .get_float_or("translation_temperature", DEFAULT_TRANSLATION_TEMPERATURE as f64)
            as f32;

        let config = Self {
            api_key,
            base_url,
            timeout_seconds: timeout_seconds as u64,
            model_candidates,
            translation_temperature,
        };

        config.validate()?;
        Ok(config)
    }
}

impl ServiceConfig for GeminiConfig {
    fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ServiceError::configuration("Gemini API key is required"));
        }

        if self.base_url.is_empty() {
            return Err(ServiceError::configuration("Gemini base URL is required"));
        }

        if !(0.0..=2.0).contains(&self.translation_temperature) {
            return Err(ServiceError::configuration(format!(
                "translation_temperature must be within 0.0..=2.0, got {}",
                self.translation_temperature
            )));
        }

        Ok(())
    }

    fn service_name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_key_formatting() {
        let provider = EnvConfigProvider::new().with_prefix("SMARTBRIDGE");
        assert_eq!(provider.format_key("api_key"), "SMARTBRIDGE_API_KEY");
        assert_eq!(provider.format_key("model-candidates"), "SMARTBRIDGE_MODEL_CANDIDATES");
        assert_eq!(EnvConfigProvider::new().format_key("api_key"), "API_KEY");
    }

    #[test]
    fn test_with_api_key_uses_defaults() {
        let config = GeminiConfig::with_api_key("k");
        assert_eq!(config.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.model_candidates.len(), DEFAULT_MODEL_CANDIDATES.len());
        assert!(config.validate().is_ok());
    }
}
