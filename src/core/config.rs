use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

pub const DEFAULT_EXCHANGE_RATE_BASE_URL: &str = "https://v6.exchangerate-api.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const MAX_TIMEOUT_SECS: u64 = 300;
pub const API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub exchange_rate: Option<ExchangeRateProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchange_rate: Some(ExchangeRateProviderConfig {
                base_url: DEFAULT_EXCHANGE_RATE_BASE_URL.to_string(),
            }),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_key: None,
            providers: ProvidersConfig::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or falls back to defaults
    /// when no config file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn exchange_rate_base_url(&self) -> &str {
        self.providers
            .exchange_rate
            .as_ref()
            .map_or(DEFAULT_EXCHANGE_RATE_BASE_URL, |p| &p.base_url)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            anyhow::bail!(
                "timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}, got {}",
                self.timeout_secs
            );
        }
        Ok(())
    }

    /// Request timeout, clamped to `1..=MAX_TIMEOUT_SECS` seconds.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.clamp(1, MAX_TIMEOUT_SECS))
    }

    /// The credential for the rate provider: `API_KEY` from the environment,
    /// then `api_key` from the file. Blank values count as missing.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .into_iter()
            .chain(self.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
api_key: "file-key"
providers:
  exchange_rate:
    base_url: "http://example.com/rates"
timeout_secs: 10
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.exchange_rate_base_url(), "http://example.com/rates");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("api_key: ~").expect("Failed to deserialize");
        assert!(config.api_key.is_none());
        assert_eq!(config.exchange_rate_base_url(), DEFAULT_EXCHANGE_RATE_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let default = AppConfig::default();
        assert_eq!(default.exchange_rate_base_url(), DEFAULT_EXCHANGE_RATE_BASE_URL);
        assert_eq!(default.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_missing_provider_section_falls_back_to_default_url() {
        let config: AppConfig =
            serde_yaml::from_str("providers:\n  exchange_rate: ~\n").expect("Failed to deserialize");
        assert_eq!(config.exchange_rate_base_url(), DEFAULT_EXCHANGE_RATE_BASE_URL);
    }

    #[test]
    fn test_api_key_prefers_environment() {
        let config = AppConfig {
            api_key: Some("file-key".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(
            config.api_key_with_env(Some("env-key".to_string())),
            Some("env-key".to_string())
        );
        assert_eq!(config.api_key_with_env(None), Some("file-key".to_string()));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = AppConfig {
            api_key: Some("   ".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.api_key_with_env(Some(String::new())), None);
        assert_eq!(config.api_key_with_env(None), None);

        let config = AppConfig::default();
        assert_eq!(
            config.api_key_with_env(Some(" env-key ".to_string())),
            Some("env-key".to_string())
        );
    }

    #[test]
    fn test_out_of_range_timeout_is_rejected_on_load() {
        let dir = tempfile::TempDir::new().unwrap();
        for value in ["0", "301", "18446744073709551615"] {
            let path = dir.path().join(format!("config-{value}.yaml"));
            fs::write(&path, format!("timeout_secs: {value}\n")).unwrap();

            let err = AppConfig::load_from_path(&path).unwrap_err();
            assert!(err.to_string().contains("Invalid config file"));
            assert!(format!("{err:#}").contains("timeout_secs must be between 1 and 300"));
        }

        let path = dir.path().join("config-ok.yaml");
        fs::write(&path, "timeout_secs: 300\n").unwrap();
        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(300));
    }

    #[test]
    fn test_timeout_is_clamped_when_not_validated() {
        let config = AppConfig {
            timeout_secs: u64::MAX,
            ..AppConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(MAX_TIMEOUT_SECS));

        let config = AppConfig {
            timeout_secs: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("nope.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
