//! Pipeline configuration from the environment or a TOML file.

use std::path::Path;
use std::time::Duration;

use agmarknet_api::{PortalClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::Deserialize;

use crate::error::PipelineError;
use crate::synth::{DEFAULT_DAYS, MAX_DAYS};

/// Settings shared by every strategy in the default chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Portal root, without a trailing slash.
    pub base_url: String,
    /// Bound on each individual GET or POST.
    pub timeout_secs: u64,
    /// Days of history the synthesizer produces. Zero disables the full
    /// synthesizer step so the archive report is tried before the last resort.
    pub fallback_days: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            fallback_days: DEFAULT_DAYS,
        }
    }
}

impl PipelineConfig {
    /// Reads `AGMARKNET_BASE_URL`, `AGMARKNET_TIMEOUT_SECS` and
    /// `AGMARKNET_FALLBACK_DAYS`; unset or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("AGMARKNET_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout_secs: lookup("AGMARKNET_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults.timeout_secs),
            fallback_days: lookup("AGMARKNET_FALLBACK_DAYS")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(defaults.fallback_days),
        }
        .normalized()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, PipelineError> {
        let config: Self = toml::from_str(text)?;
        Ok(config.normalized())
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Overrides the synthesizer history length, capped at [`MAX_DAYS`].
    pub fn with_fallback_days(mut self, days: u32) -> Self {
        self.fallback_days = days.min(MAX_DAYS);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Portal client configured with this base URL and timeout.
    pub fn client(&self) -> PortalClient {
        PortalClient::with_base_url(&self.base_url).with_timeout(self.timeout())
    }

    // A zero timeout would fail every request immediately.
    fn normalized(mut self) -> Self {
        if self.timeout_secs == 0 {
            self.timeout_secs = DEFAULT_TIMEOUT.as_secs();
        }
        self.fallback_days = self.fallback_days.min(MAX_DAYS);
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.base_url, "https://agmarknet.gov.in");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.fallback_days, 7);
    }

    #[test]
    fn env_overrides() {
        let config = PipelineConfig::from_lookup(lookup_from(&[
            ("AGMARKNET_BASE_URL", "http://localhost:9000/"),
            ("AGMARKNET_TIMEOUT_SECS", "5"),
            ("AGMARKNET_FALLBACK_DAYS", "14"),
        ]));
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.fallback_days, 14);
    }

    #[test]
    fn env_garbage_keeps_defaults() {
        let config = PipelineConfig::from_lookup(lookup_from(&[
            ("AGMARKNET_BASE_URL", "  "),
            ("AGMARKNET_TIMEOUT_SECS", "soon"),
            ("AGMARKNET_FALLBACK_DAYS", "-1"),
        ]));
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn zero_timeout_is_replaced() {
        let config = PipelineConfig::from_lookup(lookup_from(&[("AGMARKNET_TIMEOUT_SECS", "0")]));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn toml_partial_file() {
        let config = PipelineConfig::from_toml_str("fallback_days = 3\n").unwrap();
        assert_eq!(config.fallback_days, 3);
        assert_eq!(config.base_url, "https://agmarknet.gov.in");
    }

    #[test]
    fn toml_full_file() {
        let text = r#"
            base_url = "http://127.0.0.1:8080"
            timeout_secs = 10
            fallback_days = 0
        "#;
        let config = PipelineConfig::from_toml_str(text).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.fallback_days, 0);
    }

    #[test]
    fn toml_type_error() {
        let err = PipelineConfig::from_toml_str("timeout_secs = \"ten\"").unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = PipelineConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("not/here.toml"));
    }

    #[test]
    fn client_uses_config() {
        let config = PipelineConfig::from_toml_str("base_url = \"http://example.test/\"").unwrap();
        let client = config.client();
        assert_eq!(client.base_url(), "http://example.test");
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn fallback_days_are_capped() {
        let env = PipelineConfig::from_lookup(lookup_from(&[(
            "AGMARKNET_FALLBACK_DAYS",
            "4294967295",
        )]));
        assert_eq!(env.fallback_days, MAX_DAYS);

        let file = PipelineConfig::from_toml_str("fallback_days = 100000000\n").unwrap();
        assert_eq!(file.fallback_days, MAX_DAYS);

        let overridden = PipelineConfig::default().with_fallback_days(u32::MAX);
        assert_eq!(overridden.fallback_days, MAX_DAYS);
        assert_eq!(PipelineConfig::default().with_fallback_days(0).fallback_days, 0);
    }
}
