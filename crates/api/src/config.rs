use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use flowdeck_core::PlatformId;
use flowdeck_observability::LogFormat;

pub const DEV_JWT_SECRET: &str = "dev-secret";

/// Cloud platform id used when `CLOUD_PLATFORM_ID` is not set.
pub const DEFAULT_CLOUD_PLATFORM_ID: PlatformId =
    PlatformId::from_uuid(Uuid::from_u128(0x0000_0000_0000_7000_8000_00c1_0ad0_0001));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
///
/// | Env Var             | Default                      |
/// |---------------------|------------------------------|
/// | `HOST`              | `0.0.0.0`                    |
/// | `PORT`              | `8080`                       |
/// | `JWT_SECRET`        | `dev-secret` (insecure)      |
/// | `CLOUD_PLATFORM_ID` | [`DEFAULT_CLOUD_PLATFORM_ID`] |
/// | `LOG_FORMAT`        | `json`                       |
/// | `SEED_PATH`         | unset                        |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub cloud_platform_id: PlatformId,
    pub log_format: LogFormat,
    pub seed_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port: u16 = match get("PORT") {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => 8080,
        };

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| DEV_JWT_SECRET.to_string());

        let cloud_platform_id: PlatformId = match get("CLOUD_PLATFORM_ID") {
            Some(raw) => raw.parse().map_err(|e: flowdeck_core::DomainError| ConfigError::Invalid {
                name: "CLOUD_PLATFORM_ID",
                reason: e.to_string(),
            })?,
            None => DEFAULT_CLOUD_PLATFORM_ID,
        };

        let log_format: LogFormat = match get("LOG_FORMAT") {
            Some(raw) => raw.parse().map_err(|e: flowdeck_observability::UnknownLogFormat| {
                ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    reason: e.to_string(),
                }
            })?,
            None => LogFormat::default(),
        };

        let seed_path = get("SEED_PATH").map(PathBuf::from);

        Ok(Self {
            host,
            port,
            jwt_secret,
            cloud_platform_id,
            log_format,
            seed_path,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let c = config(&[]).unwrap();
        assert_eq!(c.bind_addr(), "0.0.0.0:8080");
        assert!(c.uses_dev_secret());
        assert_eq!(c.cloud_platform_id, DEFAULT_CLOUD_PLATFORM_ID);
        assert_eq!(c.log_format, LogFormat::Json);
        assert_eq!(c.seed_path, None);
    }

    #[test]
    fn explicit_values_win() {
        let cloud = PlatformId::new();
        let c = config(&[
            ("PORT", "9000"),
            ("JWT_SECRET", "s3cret"),
            ("CLOUD_PLATFORM_ID", &cloud.to_string()),
            ("LOG_FORMAT", "pretty"),
            ("SEED_PATH", "/tmp/seed.json"),
        ])
        .unwrap();
        assert_eq!(c.port, 9000);
        assert!(!c.uses_dev_secret());
        assert_eq!(c.cloud_platform_id, cloud);
        assert_eq!(c.log_format, LogFormat::Pretty);
        assert_eq!(c.seed_path, Some(PathBuf::from("/tmp/seed.json")));
    }

    #[test]
    fn invalid_values_are_reported_by_name() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));

        let err = config(&[("CLOUD_PLATFORM_ID", "cloud")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "CLOUD_PLATFORM_ID", .. }));
    }

    #[test]
    fn blank_values_count_as_unset() {
        assert_eq!(config(&[("HOST", "  ")]).unwrap().host, "0.0.0.0");
    }
}
