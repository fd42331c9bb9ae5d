use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LLM_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_OMDB_BASE_URL: &str = "http://www.omdbapi.com/";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Configuration for the mood movie service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub openrouter_api_key: String,
    pub openrouter_base_url: String,
    pub llm_model: String,
    pub omdb_api_key: String,
    pub omdb_base_url: String,
    /// Applied to both the LLM call and the OMDb call
    pub upstream_timeout: Duration,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openrouter_api_key =
            get("OPENROUTER_API_KEY").ok_or(ConfigError::Missing("OPENROUTER_API_KEY"))?;
        let omdb_api_key = get("OMDB_API_KEY").ok_or(ConfigError::Missing("OMDB_API_KEY"))?;

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let timeout_secs = parse_or(
            "UPSTREAM_TIMEOUT_SECS",
            get("UPSTREAM_TIMEOUT_SECS"),
            DEFAULT_UPSTREAM_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            port,
            openrouter_api_key,
            openrouter_base_url: get("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
            llm_model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            omdb_api_key,
            omdb_base_url: get("OMDB_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OMDB_BASE_URL.to_string()),
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_required_keys() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "or-key"),
            ("OMDB_API_KEY", "omdb-key"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.llm_model, DEFAULT_LLM_MODEL);
        assert_eq!(config.openrouter_base_url, DEFAULT_OPENROUTER_BASE_URL);
        assert_eq!(config.omdb_base_url, DEFAULT_OMDB_BASE_URL);
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
        assert_eq!(config.openrouter_api_key, "or-key");
        assert_eq!(config.omdb_api_key, "omdb-key");
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "or-key"),
            ("OMDB_API_KEY", "omdb-key"),
            ("PORT", "9999"),
            ("LLM_MODEL", "openai/gpt-4o-mini"),
            ("OPENROUTER_BASE_URL", "http://localhost:4321/api/v1"),
            ("OMDB_BASE_URL", "http://localhost:1234/"),
            ("UPSTREAM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9999);
        assert_eq!(config.llm_model, "openai/gpt-4o-mini");
        assert_eq!(config.openrouter_base_url, "http://localhost:4321/api/v1");
        assert_eq!(config.omdb_base_url, "http://localhost:1234/");
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_credentials() {
        let err = ServiceConfig::from_lookup(lookup(&[("OMDB_API_KEY", "omdb-key")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OPENROUTER_API_KEY")));

        // blank counts as unset
        let err = ServiceConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "or-key"),
            ("OMDB_API_KEY", "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OMDB_API_KEY")));
    }

    #[test]
    fn test_invalid_numbers() {
        let err = ServiceConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "or-key"),
            ("OMDB_API_KEY", "omdb-key"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = ServiceConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "or-key"),
            ("OMDB_API_KEY", "omdb-key"),
            ("UPSTREAM_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_SECS",
                ..
            }
        ));
    }
}
