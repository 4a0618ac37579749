use crate::error::{Error, Result};
use config::{Config, ConfigError, Environment, File as ConfigFile};
use glob::Pattern;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://www.omdbapi.com/";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// OMDb API key. Required.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    /// No timeout on a single request unless set.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Glob patterns matched against top-level folder names; matches are left alone.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: default_api_base_url(),
            retry_attempts: default_retry_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
            request_timeout_secs: None,
            ignore_patterns: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.retry_attempts.max(1),
            delay: Duration::from_secs(self.retry_delay_secs),
        }
    }
}

/// Bounded retry with a fixed pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: default_retry_attempts(),
            delay: Duration::from_secs(default_retry_delay_secs()),
        }
    }
}

/// Load `Config.toml` (optional) overlaid with `MOVIE_SORTER_*` environment variables.
pub fn load_configuration() -> std::result::Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(Environment::with_prefix("MOVIE_SORTER"))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// Everything a pipeline stage needs, passed explicitly from stage to stage.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub root: PathBuf,
    pub config: AppConfig,
    ignore: Vec<Pattern>,
}

impl RunContext {
    /// Validate the root directory and compile the ignore patterns. Nothing on disk is touched.
    pub fn new(root: impl AsRef<Path>, config: AppConfig) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(Error::InvalidRoot(root));
        }

        let ignore = config
            .ignore_patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| Error::Pattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            root,
            config,
            ignore,
        })
    }

    pub fn is_ignored(&self, folder_name: &str) -> bool {
        self.ignore
            .iter()
            .any(|pattern| pattern.matches(folder_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use tempfile::tempdir;

    fn config_from_toml(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(ConfigFile::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_apply_when_keys_missing() {
        let config = config_from_toml(r#"api_key = "abc123""#);
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_delay_secs, 5);
        assert_eq!(config.request_timeout_secs, None);
        assert!(config.ignore_patterns.is_empty());
    }

    #[test]
    fn test_retry_policy_never_drops_below_one_attempt() {
        let config = config_from_toml(
            r#"
            api_key = "k"
            retry_attempts = 0
            retry_delay_secs = 2
            "#,
        );
        let policy = config.retry_policy();
        assert_eq!(policy.attempts, 1);
        assert_eq!(policy.delay, Duration::from_secs(2));
    }

    #[test]
    fn test_context_rejects_missing_root() {
        let tmp = tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let err = RunContext::new(&missing, AppConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidRoot(path) if path == missing));
    }

    #[test]
    fn test_context_rejects_bad_pattern() {
        let tmp = tempdir().unwrap();
        let config = AppConfig {
            ignore_patterns: vec!["[".to_string()],
            ..AppConfig::default()
        };
        let err = RunContext::new(tmp.path(), config).unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }

    #[test]
    fn test_context_ignores_matching_folders() {
        let tmp = tempdir().unwrap();
        let config = AppConfig {
            ignore_patterns: vec!["@*".to_string(), "Extras".to_string()],
            ..AppConfig::default()
        };
        let ctx = RunContext::new(tmp.path(), config).unwrap();
        assert!(ctx.is_ignored("@eaDir"));
        assert!(ctx.is_ignored("Extras"));
        assert!(!ctx.is_ignored("Heat 1080p"));
    }
}
