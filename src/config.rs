//! Configuration module
//!
//! Loaded from a TOML file (`~/.config/texnouz-parking/config.toml` by
//! default). Every section is optional and falls back to its defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::FeeSchedule;
use crate::support::errors::ConfigError;

/// Slot pool sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotConfig {
    pub car_slots: u32,
    pub bike_slots: u32,
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            car_slots: 20,
            bike_slots: 10,
        }
    }
}

/// Append-only entry/exit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("parking_logs.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (trace, debug, info, warn, error)
    pub level: String,
    /// `plain` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "plain".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub lot: LotConfig,
    pub fees: FeeSchedule,
    pub audit: AuditConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

/// `<config dir>/texnouz-parking/config.toml`, or `./config.toml` when the
/// platform has no config directory
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("texnouz-parking"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.lot.car_slots, 20);
        assert_eq!(cfg.lot.bike_slots, 10);
        assert_eq!(cfg.fees.minimum_fee, Decimal::from(20));
        assert_eq!(cfg.audit.path, PathBuf::from("parking_logs.txt"));
    }

    #[test]
    fn partial_sections_are_merged_with_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [lot]
            bike_slots = 4

            [fees]
            car_rate_per_hour = 50
            currency = "USD"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.lot.car_slots, 20);
        assert_eq!(cfg.lot.bike_slots, 4);
        assert_eq!(cfg.fees.car_rate_per_hour, Decimal::from(50));
        assert_eq!(cfg.fees.bike_rate_per_hour, Decimal::from(15));
        assert_eq!(cfg.fees.currency, "USD");
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.audit.enabled);
    }

    #[test]
    fn negative_slot_count_is_rejected() {
        let err = AppConfig::from_toml("[lot]\ncar_slots = -1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("texnouz-parking-does-not-exist.toml");
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn default_path_ends_with_config_toml() {
        assert!(default_config_path().ends_with("config.toml"));
    }
}
