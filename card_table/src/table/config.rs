//! Table configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SEATS: u8 = 10;
pub const DEFAULT_MIN_BUY_IN: i64 = 100;
pub const DEFAULT_MAX_BUY_IN: i64 = 10_000;

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name
    pub name: String,

    /// Number of seats, numbered `1..=max_seats`
    pub max_seats: u8,

    /// Smallest accepted buy-in in chips (inclusive)
    pub min_buy_in: i64,

    /// Largest accepted buy-in in chips (inclusive)
    pub max_buy_in: i64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Main Table".to_string(),
            max_seats: DEFAULT_MAX_SEATS,
            min_buy_in: DEFAULT_MIN_BUY_IN,
            max_buy_in: DEFAULT_MAX_BUY_IN,
        }
    }
}

impl TableConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_seats == 0 {
            return Err("Max seats must be at least 1".to_string());
        }

        if self.min_buy_in <= 0 {
            return Err("Min buy-in must be positive".to_string());
        }

        if self.max_buy_in < self.min_buy_in {
            return Err("Max buy-in must not be below min buy-in".to_string());
        }

        Ok(())
    }

    /// Whether `buy_in` falls inside the accepted range.
    pub fn accepts_buy_in(&self, buy_in: i64) -> bool {
        (self.min_buy_in..=self.max_buy_in).contains(&buy_in)
    }

    /// Whether `seat` is a seat number at this table.
    pub fn has_seat(&self, seat: u8) -> bool {
        (1..=self.max_seats).contains(&seat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = TableConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.accepts_buy_in(99));
        assert!(config.accepts_buy_in(100));
        assert!(config.accepts_buy_in(10_000));
        assert!(!config.accepts_buy_in(10_001));
        assert!(!config.has_seat(0));
        assert!(config.has_seat(10));
        assert!(!config.has_seat(11));
    }

    #[test]
    fn test_validate_rejects_inverted_buy_in() {
        let config = TableConfig {
            min_buy_in: 500,
            max_buy_in: 400,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_seats() {
        let config = TableConfig {
            max_seats: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
