use std::time::Duration;

/// How long each year stays on screen during playback.
pub const PLAYBACK_INTERVAL: Duration = Duration::from_millis(1500);

/// Number of leading categories selected when the dashboard opens.
pub const DEFAULT_CATEGORY_COUNT: usize = 5;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for the text-generation service, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    /// `GVA_INSIGHTS_URL`; insights are disabled when unset.
    pub endpoint: Option<String>,
    /// `GVA_INSIGHTS_API_KEY`, sent as a bearer token.
    pub api_key: Option<String>,
    /// `GVA_INSIGHTS_TIMEOUT_SECS`.
    pub timeout: Duration,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl InsightConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            endpoint: non_empty("GVA_INSIGHTS_URL"),
            api_key: non_empty("GVA_INSIGHTS_API_KEY"),
            timeout: Duration::from_secs(
                lookup("GVA_INSIGHTS_TIMEOUT_SECS")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> InsightConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        InsightConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), InsightConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let cfg = config_from(&[
            ("GVA_INSIGHTS_URL", "http://localhost:8080/summarize"),
            ("GVA_INSIGHTS_API_KEY", "secret"),
            ("GVA_INSIGHTS_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(cfg.endpoint.as_deref(), Some("http://localhost:8080/summarize"));
        assert_eq!(cfg.api_key.as_deref(), Some("secret"));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_and_bad_values_fall_back() {
        let cfg = config_from(&[("GVA_INSIGHTS_URL", "  "), ("GVA_INSIGHTS_TIMEOUT_SECS", "soon")]);
        assert_eq!(cfg.endpoint, None);
        assert_eq!(cfg.timeout, Duration::from_secs(60));
    }
}
