//! Fuel gauge model
//!
//! The gauge is recorded in eighths of a tank: 0 is empty (`E`), 8 is full
//! (`F`). Labels and levels map one-to-one; anything outside the scale is an
//! error, never clamped.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Highest gauge position (full tank)
pub const TANK_LEVEL_MAX: u8 = 8;

const LABELS: [&str; 9] = ["E", "1/8", "1/4", "3/8", "1/2", "5/8", "3/4", "7/8", "F"];

/// Gauge value outside the eighths scale
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTankLevel {
    #[error("tank level {0} is outside 0-8")]
    OutOfRange(i64),

    #[error("unknown tank gauge label: {0:?}")]
    UnknownLabel(String),
}

/// Fuel level in eighths of a tank, always within 0..=8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TankLevel(u8);

impl TankLevel {
    pub const EMPTY: TankLevel = TankLevel(0);
    pub const FULL: TankLevel = TankLevel(TANK_LEVEL_MAX);

    /// Build a level from a raw gauge position
    pub fn new(eighths: i64) -> Result<Self, InvalidTankLevel> {
        if (0..=TANK_LEVEL_MAX as i64).contains(&eighths) {
            Ok(Self(eighths as u8))
        } else {
            Err(InvalidTankLevel::OutOfRange(eighths))
        }
    }

    /// Parse a gauge label (`E`, `1/8` ... `F`)
    pub fn from_label(label: &str) -> Result<Self, InvalidTankLevel> {
        let trimmed = label.trim();
        LABELS
            .iter()
            .position(|l| l.eq_ignore_ascii_case(trimmed))
            .map(|idx| Self(idx as u8))
            .ok_or_else(|| InvalidTankLevel::UnknownLabel(label.to_string()))
    }

    pub fn eighths(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        LABELS[self.0 as usize]
    }

    pub fn is_full(self) -> bool {
        self == Self::FULL
    }

    /// Fill ratio as a fraction of one tank
    pub fn fraction(self) -> Decimal {
        Decimal::from(self.0) / Decimal::from(TANK_LEVEL_MAX)
    }
}

impl TryFrom<u8> for TankLevel {
    type Error = InvalidTankLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as i64)
    }
}

impl From<TankLevel> for u8 {
    fn from(level: TankLevel) -> Self {
        level.0
    }
}

impl fmt::Display for TankLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Conversions between gauge positions and their display labels
pub struct TankGauge;

impl TankGauge {
    /// Display label for a gauge position
    pub fn label_for(level: i64) -> Result<&'static str, InvalidTankLevel> {
        TankLevel::new(level).map(TankLevel::label)
    }

    /// Gauge position for a display label
    pub fn level_for(label: &str) -> Result<u8, InvalidTankLevel> {
        TankLevel::from_label(label).map(TankLevel::eighths)
    }

    /// All labels from empty to full, for pickers
    pub fn labels() -> &'static [&'static str] {
        &LABELS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for n in 0..=8 {
            let label = TankGauge::label_for(n).unwrap();
            assert_eq!(TankGauge::level_for(label).unwrap() as i64, n);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(TankGauge::label_for(0).unwrap(), "E");
        assert_eq!(TankGauge::label_for(4).unwrap(), "1/2");
        assert_eq!(TankGauge::label_for(8).unwrap(), "F");
        assert_eq!(TankGauge::labels().len(), 9);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert_eq!(
            TankGauge::label_for(9),
            Err(InvalidTankLevel::OutOfRange(9))
        );
        assert_eq!(
            TankGauge::label_for(-1),
            Err(InvalidTankLevel::OutOfRange(-1))
        );
        assert!(TankGauge::level_for("2/8").is_err());
        assert!(TankGauge::level_for("").is_err());
    }

    #[test]
    fn test_label_parsing_is_lenient_on_case_and_space() {
        assert_eq!(TankGauge::level_for(" f ").unwrap(), 8);
        assert_eq!(TankGauge::level_for("e").unwrap(), 0);
    }

    #[test]
    fn test_fraction_and_full() {
        assert!(TankLevel::FULL.is_full());
        assert_eq!(TankLevel::new(2).unwrap().fraction(), Decimal::new(25, 2));
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let level: TankLevel = serde_json::from_str("6").unwrap();
        assert_eq!(level.label(), "3/4");
        assert!(serde_json::from_str::<TankLevel>("12").is_err());
        assert_eq!(serde_json::to_string(&TankLevel::FULL).unwrap(), "8");
    }
}
