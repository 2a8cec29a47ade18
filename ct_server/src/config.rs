//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use card_table::{
    TableConfig,
    hub::{DEFAULT_INBOX_CAPACITY, DEFAULT_MAILBOX_CAPACITY},
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Seat limits for the single table
    pub table: TableConfig,
    /// Capacity of each connection's outbound mailbox
    pub session_mailbox_capacity: usize,
    /// Capacity of the hub inbox
    pub hub_inbox_capacity: usize,
    /// Optional Prometheus scrape listener
    pub metrics_bind: Option<SocketAddr>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional full bind address (from `--bind`)
    /// * `port_override` - Optional port (from `--port`), ignored when a bind
    ///   address is given
    ///
    /// # Errors
    ///
    /// Returns error if a variable is present but cannot be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        port_override: Option<u16>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => {
                let host: IpAddr = parse_env_strict("SERVER_HOST")?
                    .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
                let port = match port_override {
                    Some(port) => port,
                    None => parse_env_strict("PORT")?.unwrap_or(DEFAULT_PORT),
                };
                SocketAddr::new(host, port)
            }
        };

        let defaults = TableConfig::default();
        let table = TableConfig {
            name: std::env::var("TABLE_NAME").unwrap_or(defaults.name),
            max_seats: parse_env_or("TABLE_MAX_SEATS", defaults.max_seats),
            min_buy_in: parse_env_or("TABLE_MIN_BUY_IN", defaults.min_buy_in),
            max_buy_in: parse_env_or("TABLE_MAX_BUY_IN", defaults.max_buy_in),
        };

        let metrics_bind = parse_env_strict("METRICS_BIND")?;

        Ok(ServerConfig {
            bind,
            table,
            session_mailbox_capacity: parse_env_or(
                "SESSION_MAILBOX_CAPACITY",
                DEFAULT_MAILBOX_CAPACITY,
            ),
            hub_inbox_capacity: parse_env_or("HUB_INBOX_CAPACITY", DEFAULT_INBOX_CAPACITY),
            metrics_bind,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(reason) = self.table.validate() {
            return Err(ConfigError::Invalid {
                var: "TABLE_*".to_string(),
                reason,
            });
        }

        if self.session_mailbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_MAILBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.hub_inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "HUB_INBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Must differ from the server address ({})", self.bind),
            });
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            table: TableConfig::default(),
            session_mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            hub_inbox_capacity: DEFAULT_INBOX_CAPACITY,
            metrics_bind: None,
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Like [`parse_env_or`], but a set and unparseable variable is an error.
/// Used for addresses, where silently falling back would bind elsewhere.
fn parse_env_strict<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map(Some)
                .map_err(|e: T::Err| ConfigError::Invalid {
                    var: key.to_string(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            var: "PORT".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("PORT"));
        assert!(msg.contains("invalid digit"));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.session_mailbox_capacity, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_override_wins() {
        let bind: SocketAddr = "127.0.0.1:9999".parse().unwrap();
        let config = ServerConfig::from_env(Some(bind), Some(1234)).unwrap();
        assert_eq!(config.bind, bind);
    }

    #[test]
    fn test_config_validation_inverted_buy_in() {
        let config = ServerConfig {
            table: TableConfig {
                min_buy_in: 500,
                max_buy_in: 100, // Invalid: below minimum
                ..TableConfig::default()
            },
            ..ServerConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_config_validation_zero_mailbox() {
        let config = ServerConfig {
            session_mailbox_capacity: 0,
            ..ServerConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("SESSION_MAILBOX_CAPACITY"));
    }

    #[test]
    fn test_config_validation_metrics_collides_with_server() {
        let config = ServerConfig {
            metrics_bind: Some(ServerConfig::default().bind),
            ..ServerConfig::default()
        };

        assert!(config.validate().is_err());
    }
}
