//! Settings types as they appear in `config/app.yml`.

use crate::error::ConfigError;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Deployment profile, selected with `GAME_CATALOG_ENV`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Name of the YAML section holding this profile's settings.
    pub fn key(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Environment::Development => 5000,
            Environment::Production => 8080,
        }
    }

    /// Used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "game_catalog=debug,tower_http=debug",
            Environment::Production => "game_catalog=info,tower_http=info",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local tables; nothing survives a restart.
    Memory,
}

/// One environment section of the settings file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EnvironmentSettings {
    /// Connection URL template with `{user}` and `{password}` placeholders.
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_request_body_limit")]
    pub request_body_limit: usize,
    #[serde(default)]
    pub storage: StorageBackend,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_request_body_limit() -> usize {
    1024 * 1024
}

/// Database credentials. `DB_ROOT_USER` / `DB_ROOT_PASSWORD` win over the
/// `additional_config` section of the file.
#[derive(Clone, Default, Deserialize)]
pub struct DbCredentials {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub db_root_user: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub db_root_password: Option<String>,
}

/// Unquoted YAML such as `db_root_password: 12345` arrives as a number.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}

impl fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbCredentials")
            .field("db_root_user", &self.db_root_user)
            .field("db_root_password", &self.db_root_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Fully resolved settings for the selected environment.
#[derive(Clone)]
pub struct Settings {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub request_body_limit: usize,
    pub storage: StorageBackend,
    /// Rendered URL with credentials; `None` for the memory backend.
    pub database_url: Option<String>,
}

impl Settings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Defaults for the given environment with the memory backend.
    pub fn in_memory(environment: Environment) -> Self {
        Self {
            environment,
            host: default_host(),
            port: environment.default_port(),
            max_connections: default_max_connections(),
            request_body_limit: default_request_body_limit(),
            storage: StorageBackend::Memory,
            database_url: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("environment", &self.environment)
            .field("bind_address", &self.bind_address())
            .field("max_connections", &self.max_connections)
            .field("request_body_limit", &self.request_body_limit)
            .field("storage", &self.storage)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_known_names() {
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(" Dev ".parse::<Environment>().unwrap(), Environment::Development);
        assert!(matches!(
            "staging".parse::<Environment>(),
            Err(ConfigError::UnknownEnvironment(_))
        ));
    }

    #[test]
    fn debug_output_hides_credentials() {
        let mut settings = Settings::in_memory(Environment::Production);
        settings.database_url = Some("postgres://root:hunter2@db/games".into());
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("0.0.0.0:8080"));
    }
}
