use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Path to the persisted widget settings - computed from home, not serialized
    #[serde(skip)]
    pub settings_path: PathBuf,

    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "sidefetch/0.1".into()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            bail!("http.timeout_secs must be greater than 0");
        }
        if self.http.connect_timeout_secs == 0 {
            bail!("http.connect_timeout_secs must be greater than 0");
        }
        if self.http.user_agent.trim().is_empty() {
            bail!("http.user_agent must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.connect_timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[http]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.user_agent, "sidefetch/0.1");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_user_agent_is_rejected() {
        let mut config = Config::default();
        config.http.user_agent = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn computed_paths_are_not_serialized() {
        let config = Config {
            config_path: PathBuf::from("/tmp/a/config.toml"),
            settings_path: PathBuf::from("/tmp/a/settings.toml"),
            ..Config::default()
        };
        let out = toml::to_string_pretty(&config).unwrap();
        assert!(!out.contains("config_path"));
        assert!(!out.contains("settings_path"));
        assert!(out.contains("timeout_secs"));
    }
}
