//! Configuration system using TOML files.
//!
//! Config is optional and stored in the OS-standard config directory:
//! - Windows: %APPDATA%\music-renamer\config.toml
//! - macOS: ~/Library/Application Support/music-renamer/config.toml
//! - Linux: ~/.config/music-renamer/config.toml
//!
//! A different file can be passed with `--config`. Every field has a
//! default, so a partial file (or none at all) is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::recognition::RetryPolicy;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials
    pub credentials: Credentials,

    /// Transport retry settings for the recognition service
    pub retry: RetryConfig,

    /// Fingerprinting and lookup settings
    pub recognition: RecognitionConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// AcoustID API key for fingerprint lookups
    pub acoustid_api_key: Option<String>,
}

/// Exponential backoff settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per request, including the first
    pub attempts: u32,

    /// Delay before the first retry; doubles on every further attempt
    pub initial_delay_ms: u64,

    /// Upper bound for a single backoff delay
    pub max_delay_secs: f64,

    /// HTTP statuses that trigger a retry
    pub statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 12,
            initial_delay_ms: 100,
            max_delay_secs: 204.8,
            statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Build the runtime policy. Nonsensical values are clamped rather than rejected.
    pub fn to_policy(&self) -> RetryPolicy {
        let max_delay = if self.max_delay_secs.is_finite() && self.max_delay_secs > 0.0 {
            Duration::try_from_secs_f64(self.max_delay_secs).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };

        RetryPolicy {
            attempts: self.attempts.max(1),
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay,
            statuses: self.statuses.clone(),
        }
    }
}

/// Fingerprinting and lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Explicit path to the Chromaprint `fpcalc` binary (searched for when unset)
    pub fpcalc_path: Option<PathBuf>,

    /// Per-request timeout for lookups
    pub request_timeout_secs: u64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            fpcalc_path: None,
            request_timeout_secs: 30,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-renamer"))
}

/// Get the full path to the default config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration.
///
/// An explicitly requested file must exist and parse. The default location
/// is best-effort: a missing or broken file logs and falls back to defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_from(path);
    }

    let Some(path) = config_path() else {
        tracing::debug!("Could not determine config directory, using defaults");
        return Ok(Config::default());
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    match load_from(&path) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Ok(Config::default())
        }
    }
}

/// Read and parse a specific config file.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config = toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[retry]"));
        assert!(toml.contains("[recognition]"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[credentials]
acoustid_api_key = "my-key"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.credentials.acoustid_api_key.as_deref(), Some("my-key"));
        assert_eq!(config.retry, RetryConfig::default());
        assert_eq!(config.recognition.request_timeout_secs, 30);
    }

    #[test]
    fn test_retry_defaults_to_policy() {
        let policy = RetryConfig::default().to_policy();

        assert_eq!(policy.attempts, 12);
        assert_eq!(policy.initial_delay, Duration::from_millis(100));
        assert_eq!(policy.max_delay, Duration::from_secs_f64(204.8));
        assert_eq!(policy.statuses, vec![429, 500, 502, 503, 504]);
    }

    #[test]
    fn test_retry_policy_clamps_bad_values() {
        let config = RetryConfig {
            attempts: 0,
            max_delay_secs: -3.0,
            ..Default::default()
        };
        let policy = config.to_policy();

        assert_eq!(policy.attempts, 1);
        assert_eq!(policy.max_delay, Duration::ZERO);

        let nan = RetryConfig {
            max_delay_secs: f64::NAN,
            ..Default::default()
        };
        assert_eq!(nan.to_policy().max_delay, Duration::ZERO);
    }

    #[test]
    fn test_retry_policy_saturates_huge_max_delay() {
        let config: Config = toml::from_str("[retry]\nmax_delay_secs = 1e20\n").unwrap();
        let policy = config.retry.to_policy();

        assert_eq!(policy.max_delay, Duration::MAX);
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[retry]\nattempts = 3\nstatuses = [503]\n").unwrap();

        let config = load(Some(&path)).unwrap();

        assert_eq!(config.retry.attempts, 3);
        assert_eq!(config.retry.statuses, vec![503]);
        assert_eq!(config.retry.initial_delay_ms, 100);
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let result = load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::Read(_, _))));
    }

    #[test]
    fn test_load_explicit_invalid_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[retry\nattempts = ").unwrap();

        assert!(matches!(load(Some(&path)), Err(ConfigError::Parse(_, _))));
    }
}
