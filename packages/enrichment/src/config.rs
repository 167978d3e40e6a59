use std::time::Duration;

use crate::error::{EnrichmentError, Result};
use crate::retry::RetryPolicy;

const DEFAULT_API_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_SPELLCHECK_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_MAX_ATTEMPTS: u32 = 20;
const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the spellcheck and embedding collaborators.
///
/// NOTE: `Debug` is implemented manually so `api_key` is never printed.
#[derive(Clone)]
pub struct EnrichmentConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub spellcheck_model: String,
    pub embedding_model: String,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for EnrichmentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichmentConfig")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("spellcheck_model", &self.spellcheck_model)
            .field("embedding_model", &self.embedding_model)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl EnrichmentConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| EnrichmentError::Config("OPENAI_API_KEY not set".into()))?;

        let api_base_url = lookup("OPENAI_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.into());

        let spellcheck_model =
            lookup("SPELLCHECK_MODEL").unwrap_or_else(|| DEFAULT_SPELLCHECK_MODEL.into());

        let embedding_model =
            lookup("EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.into());

        let max_attempts = lookup("ENRICH_MAX_ATTEMPTS")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);

        let retry_delay_ms = lookup("ENRICH_RETRY_DELAY_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RETRY_DELAY_MS);

        let timeout_secs = lookup("ENRICH_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            api_base_url,
            spellcheck_model,
            embedding_model,
            max_attempts,
            retry_delay_ms,
            timeout_secs,
        })
    }

    /// Retry policy for collaborator calls.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }

    /// Create a config builder for testing.
    pub fn builder(api_key: impl Into<String>) -> EnrichmentConfigBuilder {
        EnrichmentConfigBuilder {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            spellcheck_model: DEFAULT_SPELLCHECK_MODEL.into(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Builder for constructing `EnrichmentConfig` in tests.
pub struct EnrichmentConfigBuilder {
    api_key: String,
    api_base_url: String,
    spellcheck_model: String,
    embedding_model: String,
    max_attempts: u32,
    retry_delay_ms: u64,
    timeout_secs: u64,
}

impl EnrichmentConfigBuilder {
    pub fn api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn spellcheck_model(mut self, model: impl Into<String>) -> Self {
        self.spellcheck_model = model.into();
        self
    }

    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> EnrichmentConfig {
        EnrichmentConfig {
            api_key: self.api_key,
            api_base_url: self.api_base_url,
            spellcheck_model: self.spellcheck_model,
            embedding_model: self.embedding_model,
            max_attempts: self.max_attempts,
            retry_delay_ms: self.retry_delay_ms,
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnrichmentConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();

        assert_eq!(config.api_base_url, "https://api.openai.com");
        assert_eq!(config.max_attempts, 20);
        assert_eq!(config.retry_delay_ms, 1000);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.retry_policy().delay, Duration::from_secs(1));
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = EnrichmentConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, EnrichmentError::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let config = EnrichmentConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_API_BASE_URL", "http://localhost:8080/"),
            ("EMBEDDING_MODEL", "local-embed"),
            ("ENRICH_MAX_ATTEMPTS", "3"),
            ("ENRICH_RETRY_DELAY_MS", "10"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.embedding_model, "local-embed");
        assert_eq!(config.retry_policy(), RetryPolicy::new(3, Duration::from_millis(10)));
    }

    #[test]
    fn test_zero_attempts_falls_back_to_default() {
        let config = EnrichmentConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("ENRICH_MAX_ATTEMPTS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.max_attempts, 20);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = EnrichmentConfig::builder("sk-secret").build();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
