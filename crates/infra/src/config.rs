//! Environment-driven configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use omnistock_ai::{DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, GeminiConfig};
use omnistock_auth::HashingParams;
use omnistock_observability::LogFormat;

pub const DATA_PATH_ENV: &str = "OMNISTOCK_DATA_PATH";
pub const SEED_DEMO_ENV: &str = "OMNISTOCK_SEED_DEMO";
pub const AI_API_KEY_ENV: &str = "OMNISTOCK_AI_API_KEY";
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const AI_MODEL_ENV: &str = "OMNISTOCK_AI_MODEL";
pub const AI_ENDPOINT_ENV: &str = "OMNISTOCK_AI_ENDPOINT";
pub const AI_TIMEOUT_SECS_ENV: &str = "OMNISTOCK_AI_TIMEOUT_SECS";
pub const ARGON2_MEMORY_KIB_ENV: &str = "OMNISTOCK_ARGON2_MEMORY_KIB";
pub const ARGON2_ITERATIONS_ENV: &str = "OMNISTOCK_ARGON2_ITERATIONS";
pub const ARGON2_PARALLELISM_ENV: &str = "OMNISTOCK_ARGON2_PARALLELISM";
pub const LOG_FORMAT_ENV: &str = "OMNISTOCK_LOG_FORMAT";

pub const DEFAULT_DATA_PATH: &str = "omnistock_v4_storage.json";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct OmniStockConfig {
    pub data_path: PathBuf,
    /// Seed the demo tenant when no snapshot exists yet.
    pub seed_demo: bool,
    /// `None` disables the pricing advisor.
    pub ai: Option<GeminiConfig>,
    pub hashing: HashingParams,
    pub log_format: LogFormat,
}

impl Default for OmniStockConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            seed_demo: true,
            ai: None,
            hashing: HashingParams::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl OmniStockConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a custom lookup (tests use a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let data_path = get(DATA_PATH_ENV).map(PathBuf::from).unwrap_or(defaults.data_path);
        let seed_demo = match get(SEED_DEMO_ENV) {
            Some(v) => parse_bool(SEED_DEMO_ENV, &v)?,
            None => defaults.seed_demo,
        };

        let ai = match get(AI_API_KEY_ENV).or_else(|| get(GEMINI_API_KEY_ENV)) {
            Some(api_key) => {
                let timeout_secs = match get(AI_TIMEOUT_SECS_ENV) {
                    Some(v) => parse_value::<u64>(AI_TIMEOUT_SECS_ENV, &v)?,
                    None => DEFAULT_AI_TIMEOUT_SECS,
                };
                Some(GeminiConfig {
                    api_key,
                    model: get(AI_MODEL_ENV).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                    endpoint: get(AI_ENDPOINT_ENV).unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            None => None,
        };

        let mut hashing = defaults.hashing;
        if let Some(v) = get(ARGON2_MEMORY_KIB_ENV) {
            hashing.memory_kib = parse_value(ARGON2_MEMORY_KIB_ENV, &v)?;
        }
        if let Some(v) = get(ARGON2_ITERATIONS_ENV) {
            hashing.iterations = parse_value(ARGON2_ITERATIONS_ENV, &v)?;
        }
        if let Some(v) = get(ARGON2_PARALLELISM_ENV) {
            hashing.parallelism = parse_value(ARGON2_PARALLELISM_ENV, &v)?;
        }

        let log_format = match get(LOG_FORMAT_ENV) {
            Some(v) => parse_value::<LogFormat>(LOG_FORMAT_ENV, &v)?,
            None => defaults.log_format,
        };

        Ok(Self {
            data_path,
            seed_demo,
            ai,
            hashing,
            log_format,
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_value<T: core::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<OmniStockConfig, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        OmniStockConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("omnistock_v4_storage.json"));
        assert!(cfg.seed_demo);
        assert!(cfg.ai.is_none());
        assert_eq!(cfg.hashing, HashingParams::default());
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn ai_is_enabled_by_either_key() {
        let cfg = config(&[(GEMINI_API_KEY_ENV, "g-key")]).unwrap();
        let ai = cfg.ai.unwrap();
        assert_eq!(ai.api_key, "g-key");
        assert_eq!(ai.model, "gemini-3-flash-preview");
        assert_eq!(ai.timeout, Duration::from_secs(15));

        let cfg = config(&[(GEMINI_API_KEY_ENV, "g-key"), (AI_API_KEY_ENV, "o-key")]).unwrap();
        assert_eq!(cfg.ai.unwrap().api_key, "o-key");
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            (DATA_PATH_ENV, "/var/lib/omnistock/state.json"),
            (SEED_DEMO_ENV, "false"),
            (ARGON2_MEMORY_KIB_ENV, "4096"),
            (ARGON2_ITERATIONS_ENV, "3"),
            (ARGON2_PARALLELISM_ENV, "2"),
            (LOG_FORMAT_ENV, "Pretty"),
        ])
        .unwrap();

        assert_eq!(cfg.data_path, PathBuf::from("/var/lib/omnistock/state.json"));
        assert!(!cfg.seed_demo);
        assert_eq!(
            cfg.hashing,
            HashingParams {
                memory_kib: 4096,
                iterations: 3,
                parallelism: 2
            }
        );
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = config(&[(DATA_PATH_ENV, "  "), (GEMINI_API_KEY_ENV, "")]).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert!(cfg.ai.is_none());
    }

    #[test]
    fn invalid_values_are_reported_with_their_key() {
        assert_eq!(
            config(&[(SEED_DEMO_ENV, "maybe")]).unwrap_err(),
            ConfigError::Invalid {
                key: SEED_DEMO_ENV,
                value: "maybe".to_string()
            }
        );
        assert!(config(&[(AI_API_KEY_ENV, "k"), (AI_TIMEOUT_SECS_ENV, "soon")]).is_err());
        assert!(config(&[(ARGON2_ITERATIONS_ENV, "-1")]).is_err());
        assert_eq!(
            config(&[(LOG_FORMAT_ENV, "xml")]).unwrap_err(),
            ConfigError::Invalid {
                key: LOG_FORMAT_ENV,
                value: "xml".to_string()
            }
        );
    }
}
