// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Target;

/// Root application configuration, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Portal origin and HTTP behavior settings
    pub portal: PortalConfig,

    /// Portal endpoint URLs
    pub apis: ApisConfig,

    /// Credentials and notification key
    pub user: UserConfig,

    /// Earliest time of day the portal accepts orders (informational;
    /// the run itself is scheduled externally)
    #[serde(default)]
    pub earliest_order_time: String,

    /// Desired slots, attempted in order
    #[serde(default)]
    pub targets: Vec<Target>,
}

/// Portal origin settings used to build the fixed request header set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Portal index URL; Host, Origin and Referer headers derive from it
    pub index: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

/// Portal endpoint URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApisConfig {
    /// Login endpoint (form POST)
    pub login: String,

    /// Open-area discovery endpoint (GET)
    pub find_ok_area: String,

    /// Order creation endpoint
    pub order: String,

    /// Order payment endpoint; order payloads are posted here
    pub pay: String,
}

/// User credentials and notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub username: String,
    pub password: String,

    /// Qmsg push key; empty disables notifications
    #[serde(default)]
    pub qmsg_key: String,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.portal.index)
            .map_err(|e| AppError::validation(format!("portal.index is not a valid URL: {e}")))?;
        if self.portal.timeout_secs == 0 {
            return Err(AppError::validation("portal.timeout_secs must be > 0"));
        }
        if self.user.username.trim().is_empty() {
            return Err(AppError::validation("user.username is empty"));
        }
        if self.user.password.trim().is_empty() {
            return Err(AppError::validation("user.password is empty"));
        }
        if self.targets.is_empty() {
            return Err(AppError::validation("No targets defined"));
        }
        for target in &self.targets {
            if target.time > 22 {
                return Err(AppError::validation(format!(
                    "target hour {} out of range (0-22)",
                    target.time
                )));
            }
            if target.number == 0 {
                return Err(AppError::validation("target court number must be >= 1"));
            }
        }
        if !self.earliest_order_time.is_empty()
            && NaiveTime::parse_from_str(&self.earliest_order_time, "%H:%M").is_err()
        {
            return Err(AppError::validation(format!(
                "earliest_order_time '{}' is not HH:MM",
                self.earliest_order_time
            )));
        }
        Ok(())
    }
}

mod defaults {
    pub fn timeout() -> u64 {
        30
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [portal]
        index = "http://ydfwpt.cug.edu.cn/"

        [apis]
        login = "http://ydfwpt.cug.edu.cn/login"
        find_ok_area = "http://ydfwpt.cug.edu.cn/order/show.html"
        order = "http://ydfwpt.cug.edu.cn/order/book.html"
        pay = "http://ydfwpt.cug.edu.cn/order/tobook.html"

        [user]
        username = "20231234"
        password = "secret"

        earliest_order_time = "07:00"

        [[targets]]
        time = 14
        number = 3

        [[targets]]
        time = 15
        number = 3
    "#;

    fn sample_config() -> Config {
        toml::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn parses_sample_and_validates() {
        let config = sample_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.portal.timeout_secs, 30);
        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.targets[0], Target { time: 14, number: 3 });
        assert_eq!(config.user.qmsg_key, "");
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.user.username, "20231234");
    }

    #[test]
    fn load_rejects_missing_file() {
        assert!(Config::load("/nonexistent/config.toml").is_err());
    }

    #[test]
    fn validate_rejects_empty_credentials() {
        let mut config = sample_config();
        config.user.password = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_no_targets() {
        let mut config = sample_config();
        config.targets.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_hour() {
        let mut config = sample_config();
        config.targets[0].time = 23;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_earliest_order_time() {
        let mut config = sample_config();
        config.earliest_order_time = "7 am".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_index_url() {
        let mut config = sample_config();
        config.portal.index = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
