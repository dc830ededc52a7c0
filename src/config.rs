// =====================================================================
// File: config.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 6, 2025
//
// Description:
//   Defaults and validated settings shared by the index, the bulk
//   loader, and the itemset miner. The binary maps its CLI flags onto
//   these types; library callers construct them directly.
// =====================================================================

use std::fmt;

use crate::error::ConfigError;

/// Order used when none is given.
pub const DEFAULT_ORDER: usize = 4;

/// Smallest order that still leaves both halves of an internal split non-empty.
pub const MIN_ORDER: usize = 3;

/// Field separator for dictionary files.
pub const DEFAULT_DELIMITER: char = ',';

/// Support threshold used by the miner when none is given.
pub const DEFAULT_MIN_SUPPORT: usize = 2;


/// Maximum number of keys a node may hold before it must split.
///
/// # Example
/// ```
/// use dictree::config::Order;
/// assert_eq!(Order::new(4).unwrap().get(), 4);
/// assert!(Order::new(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order(usize);

impl Order {
    pub fn new(order: usize) -> Result<Self, ConfigError> {
        if order < MIN_ORDER {
            return Err(ConfigError::InvalidOrder(order));
        }
        Ok(Self(order))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Order {
    fn default() -> Self {
        Self(DEFAULT_ORDER)
    }
}

impl TryFrom<usize> for Order {
    type Error = ConfigError;

    fn try_from(order: usize) -> Result<Self, Self::Error> {
        Self::new(order)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// How the bulk loader splits and cleans each record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Records are split at the first occurrence of this character.
    pub delimiter: char,
    /// Strip surrounding whitespace from keys and values.
    pub trim: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            trim: true,
        }
    }
}


/// Settings for the frequent-itemset miner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinerConfig {
    min_support: usize,
}

impl MinerConfig {
    pub fn new(min_support: usize) -> Result<Self, ConfigError> {
        if min_support == 0 {
            return Err(ConfigError::InvalidMinSupport(min_support));
        }
        Ok(Self { min_support })
    }

    pub fn min_support(&self) -> usize {
        self.min_support
    }
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_rejects_below_minimum() {
        assert_eq!(Order::new(0), Err(ConfigError::InvalidOrder(0)));
        assert_eq!(Order::new(2), Err(ConfigError::InvalidOrder(2)));
        assert_eq!(Order::new(MIN_ORDER).map(Order::get), Ok(3));
    }

    #[test]
    fn test_order_default_and_try_from() {
        assert_eq!(Order::default().get(), DEFAULT_ORDER);
        let order: Order = 7usize.try_into().unwrap();
        assert_eq!(order.to_string(), "7");
    }

    #[test]
    fn test_loader_defaults() {
        let cfg = LoaderConfig::default();
        assert_eq!(cfg.delimiter, ',');
        assert!(cfg.trim);
    }

    #[test]
    fn test_miner_rejects_zero_support() {
        assert_eq!(MinerConfig::new(0), Err(ConfigError::InvalidMinSupport(0)));
        assert_eq!(MinerConfig::new(3).unwrap().min_support(), 3);
        assert_eq!(MinerConfig::default().min_support(), DEFAULT_MIN_SUPPORT);
    }
}
