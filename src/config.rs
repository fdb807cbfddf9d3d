use std::{env, ops::RangeInclusive, str::FromStr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SECRET_LEN: usize = 32;
const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365 * 100;
// bcrypt rejects costs outside this range
const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    /// `None` issues tokens without an `exp` claim.
    pub jwt_expiration_hours: Option<i64>,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Self {
            mongo_conn_string: required("MONGO_URL")?,
            mongo_db_name: lookup("MONGO_DB_NAME").unwrap_or_else(|| "course-market".to_string()),
            web_server_host: lookup("WEB_SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            web_server_port: parse_optional(&lookup, "WEB_SERVER_PORT")?.unwrap_or(3000),
            jwt_secret: SecretString::from(required("JWT_SECRET")?),
            jwt_expiration_hours: parse_in_range(
                &lookup,
                "JWT_EXPIRATION_HOURS",
                1..=MAX_JWT_EXPIRATION_HOURS,
            )?,
            bcrypt_cost: parse_in_range(&lookup, "BCRYPT_COST", BCRYPT_COST_RANGE)?
                .unwrap_or(bcrypt::DEFAULT_COST),
        })
    }

    /// Logs a warning for settings that are acceptable locally but weak in production.
    pub fn warn_if_insecure(&self) {
        let secret_len = self.jwt_secret.expose_secret().len();
        if secret_len < MIN_SECRET_LEN {
            log::warn!(
                "JWT_SECRET is only {} characters; use at least {} in production",
                secret_len,
                MIN_SECRET_LEN
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "course-market-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 3000,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: None,
            bcrypt_cost: 4,
        }
    }
}

fn parse_optional<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn parse_in_range<F, T>(
    lookup: &F,
    name: &'static str,
    range: RangeInclusive<T>,
) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + ToString,
{
    match parse_optional(lookup, name)? {
        Some(value) if !range.contains(&value) => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
        parsed => Ok(parsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_config_with_required_vars_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("MONGO_URL", "mongodb://db:27017"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.mongo_conn_string, "mongodb://db:27017");
        assert_eq!(config.mongo_db_name, "course-market");
        assert_eq!(config.web_server_port, 3000);
        assert_eq!(config.jwt_expiration_hours, None);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn test_config_missing_secret() {
        let result = Config::from_lookup(lookup_from(&[("MONGO_URL", "mongodb://db:27017")]));
        assert!(matches!(result, Err(ConfigError::Missing("JWT_SECRET"))));
    }

    #[test]
    fn test_config_missing_mongo_url() {
        let result = Config::from_lookup(lookup_from(&[("JWT_SECRET", "secret")]));
        assert!(matches!(result, Err(ConfigError::Missing("MONGO_URL"))));
    }

    #[test]
    fn test_config_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[
            ("MONGO_URL", "mongodb://db:27017"),
            ("JWT_SECRET", "secret"),
            ("WEB_SERVER_PORT", "eighty"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "WEB_SERVER_PORT", .. })
        ));
    }

    #[test]
    fn test_config_optional_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MONGO_URL", "mongodb://db:27017"),
            ("JWT_SECRET", "secret"),
            ("JWT_EXPIRATION_HOURS", "12"),
            ("BCRYPT_COST", "6"),
            ("WEB_SERVER_PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.jwt_expiration_hours, Some(12));
        assert_eq!(config.bcrypt_cost, 6);
        assert_eq!(config.web_server_port, 8080);
    }

    #[test]
    fn test_config_rejects_out_of_range_expiry() {
        for hours in ["0", "-3", "3000000000"] {
            let result = Config::from_lookup(lookup_from(&[
                ("MONGO_URL", "mongodb://db:27017"),
                ("JWT_SECRET", "secret"),
                ("JWT_EXPIRATION_HOURS", hours),
            ]));
            assert!(
                matches!(
                    result,
                    Err(ConfigError::Invalid { name: "JWT_EXPIRATION_HOURS", .. })
                ),
                "expiry {} should be rejected",
                hours
            );
        }
    }

    #[test]
    fn test_config_rejects_unsupported_bcrypt_cost() {
        for cost in ["2", "40"] {
            let result = Config::from_lookup(lookup_from(&[
                ("MONGO_URL", "mongodb://db:27017"),
                ("JWT_SECRET", "secret"),
                ("BCRYPT_COST", cost),
            ]));
            assert!(
                matches!(result, Err(ConfigError::Invalid { name: "BCRYPT_COST", .. })),
                "cost {} should be rejected",
                cost
            );
        }
    }

    #[test]
    fn test_config_accepts_range_limits() {
        let config = Config::from_lookup(lookup_from(&[
            ("MONGO_URL", "mongodb://db:27017"),
            ("JWT_SECRET", "secret"),
            ("JWT_EXPIRATION_HOURS", "1"),
            ("BCRYPT_COST", "31"),
        ]))
        .unwrap();

        assert_eq!(config.jwt_expiration_hours, Some(1));
        assert_eq!(config.bcrypt_cost, 31);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();
        assert_eq!(config.mongo_db_name, "course-market-test");
        assert_eq!(config.bcrypt_cost, 4);
    }
}
