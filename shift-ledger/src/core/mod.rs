//! Core module - configuration
//!
//! - [`Config`] - process configuration loaded from the environment
//! - [`LedgerConfig`] - the subset the ledger engine depends on
//! - [`MileageRates`] - standard mileage rate per tax year

pub mod config;

pub use config::{Config, ConfigError, DEFAULT_MILEAGE_RATE, LedgerConfig, MileageRates};
