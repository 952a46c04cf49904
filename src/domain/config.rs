use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the data service address
pub const ADDRESS_ENV: &str = "ELOS_DB_ADDR";
/// Environment variable holding the public half of the per-call credential
pub const PUBLIC_CREDENTIAL_ENV: &str = "ELOS_PUBLIC_CRED";
/// Environment variable holding the private half of the per-call credential
pub const PRIVATE_CREDENTIAL_ENV: &str = "ELOS_PRIVATE_CRED";

/// Task client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Data service connection
    #[serde(default)]
    pub connection: ConnectionConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Connection settings for the data service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Service address, `host:port` or a full URI
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_credential")]
    pub public_credential: String,
    #[serde(default = "default_credential")]
    pub private_credential: String,
    /// Per-request timeout in milliseconds; unset means no timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds; unset leaves it to the transport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,
}

// Default value functions
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_address() -> String {
    "localhost:4444".to_string()
}

fn default_credential() -> String {
    "p".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            public_credential: default_credential(),
            private_credential: default_credential(),
            timeout_ms: None,
            connect_timeout_ms: None,
        }
    }
}

impl ConnectionConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// A variable overrides its field only when it is set to a non-empty value.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(address) = set(ADDRESS_ENV) {
            self.address = address;
        }
        if let Some(public) = set(PUBLIC_CREDENTIAL_ENV) {
            self.public_credential = public;
        }
        if let Some(private) = set(PRIVATE_CREDENTIAL_ENV) {
            self.private_credential = private;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_connection_defaults() {
        let config = ConnectionConfig::default();
        assert_eq!(config.address, "localhost:4444");
        assert_eq!(config.public_credential, "p");
        assert_eq!(config.private_credential, "p");
        assert!(config.timeout().is_none());
        assert!(config.connect_timeout().is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ConnectionConfig::default();
        config.apply_env(lookup_from(&[
            (ADDRESS_ENV, "host:1234"),
            (PUBLIC_CREDENTIAL_ENV, "pub"),
            (PRIVATE_CREDENTIAL_ENV, "priv"),
        ]));

        assert_eq!(config.address, "host:1234");
        assert_eq!(config.public_credential, "pub");
        assert_eq!(config.private_credential, "priv");
    }

    #[test]
    fn test_empty_env_keeps_value() {
        let mut config = ConnectionConfig::default();
        config.apply_env(lookup_from(&[(ADDRESS_ENV, ""), (PUBLIC_CREDENTIAL_ENV, "pub")]));

        assert_eq!(config.address, "localhost:4444");
        assert_eq!(config.public_credential, "pub");
        assert_eq!(config.private_credential, "p");
    }

    #[test]
    fn test_config_serialization() {
        let config = ClientConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: ClientConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_file() {
        let config: ClientConfig = toml::from_str(
            r#"
            [connection]
            address = "db.internal:4444"
            timeout_ms = 2500
            "#,
        )
        .unwrap();

        assert_eq!(config.global.log_level, "warn");
        assert_eq!(config.connection.address, "db.internal:4444");
        assert_eq!(config.connection.public_credential, "p");
        assert_eq!(config.connection.timeout(), Some(Duration::from_millis(2500)));
    }
}
