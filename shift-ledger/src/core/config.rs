use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Weekday;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::PhotoTypes;
use thiserror::Error;

/// Standard mileage rate used when no rate is configured (USD per mile)
pub const DEFAULT_MILEAGE_RATE: Decimal = Decimal::from_parts(67, 0, 0, false, 2);

/// Configuration value that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid time zone {0:?}")]
    InvalidTimezone(String),

    #[error("Invalid week start day {0:?}")]
    InvalidWeekday(String),

    #[error("Invalid mileage rate {value:?} in {var}")]
    InvalidMileageRate { var: &'static str, value: String },

    #[error("Invalid boolean {value:?} in {var}")]
    InvalidBool { var: &'static str, value: String },
}

impl ConfigError {
    /// 出错的环境变量名
    pub fn var(&self) -> &'static str {
        match self {
            ConfigError::InvalidTimezone(_) => "TIMEZONE",
            ConfigError::InvalidWeekday(_) => "WEEK_START",
            ConfigError::InvalidMileageRate { var, .. }
            | ConfigError::InvalidBool { var, .. } => *var,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::with_message(ErrorCode::ConfigError, err.to_string())
            .with_detail("var", err.var())
    }
}

/// Standard mileage rate with per-year overrides
///
/// The IRS rate changes most years, so a multi-year summary needs the
/// rate of each tax year. Years without an override use the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MileageRates {
    default: Decimal,
    by_year: BTreeMap<i32, Decimal>,
}

impl MileageRates {
    pub fn new(default: Decimal) -> Self {
        Self {
            default,
            by_year: BTreeMap::new(),
        }
    }

    pub fn with_year(mut self, year: i32, rate: Decimal) -> Self {
        self.by_year.insert(year, rate);
        self
    }

    pub fn rate_for(&self, year: i32) -> Decimal {
        self.by_year.get(&year).copied().unwrap_or(self.default)
    }

    pub fn default_rate(&self) -> Decimal {
        self.default
    }

    /// Parse `YEAR=RATE` pairs separated by commas (`2023=0.655,2024=0.67`)
    pub fn parse_overrides(value: &str) -> Result<BTreeMap<i32, Decimal>, ConfigError> {
        let invalid = || ConfigError::InvalidMileageRate {
            var: "MILEAGE_RATES",
            value: value.to_string(),
        };

        let mut overrides = BTreeMap::new();
        for pair in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (year, rate) = pair.split_once('=').ok_or_else(invalid)?;
            let year: i32 = year.trim().parse().map_err(|_| invalid())?;
            let rate = parse_rate(rate.trim()).ok_or_else(invalid)?;
            overrides.insert(year, rate);
        }
        Ok(overrides)
    }
}

impl Default for MileageRates {
    fn default() -> Self {
        Self::new(DEFAULT_MILEAGE_RATE)
    }
}

fn parse_rate(value: &str) -> Option<Decimal> {
    value
        .parse::<Decimal>()
        .ok()
        .filter(|rate| !rate.is_sign_negative())
}

/// Settings the ledger engine itself depends on
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Zone used to map timestamps to calendar days, weeks and years
    pub timezone: Tz,
    /// First day of a ledger week
    pub week_start: Weekday,
    pub photo_types: PhotoTypes,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            week_start: Weekday::Mon,
            photo_types: PhotoTypes::default(),
        }
    }
}

/// 账本配置 - 所有配置项都可以通过环境变量覆盖
///
/// # 环境变量
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./shift-ledger-data | Data directory (database, logs) |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Log level (RUST_LOG overrides) |
/// | LOG_JSON | false | JSON log output |
/// | TIMEZONE | UTC | IANA zone for calendar days |
/// | WEEK_START | monday | First day of the week |
/// | MILEAGE_RATE | 0.67 | Default standard mileage rate |
/// | MILEAGE_RATES | | Per-year rates, `2023=0.655,2024=0.67` |
/// | PHOTO_TYPES | Gas Pump,Dashboard,App Screenshot,Receipt,Odometer,Other | Photo categories |
///
/// # Example
///
/// ```ignore
/// TIMEZONE=America/Chicago WEEK_START=sunday shift-ledger summary 2024
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory holding the database and log files
    pub work_dir: String,
    /// Runtime environment: development | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub timezone: Tz,
    pub week_start: Weekday,
    pub mileage_rates: MileageRates,
    pub photo_types: PhotoTypes,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 无法解析的值记录警告后回退到默认值。
    pub fn from_env() -> Self {
        match Self::load(|key| std::env::var(key).ok(), false) {
            Ok(config) => config,
            // lenient loading never reports errors
            Err(_) => Self::defaults(),
        }
    }

    /// 从环境变量加载配置，遇到非法值直接报错
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::load(|key| std::env::var(key).ok(), true)
    }

    /// Load configuration from an arbitrary key lookup, rejecting bad values
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load(lookup, true)
    }

    fn defaults() -> Self {
        let ledger = LedgerConfig::default();
        Self {
            work_dir: "./shift-ledger-data".into(),
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            timezone: ledger.timezone,
            week_start: ledger.week_start,
            mileage_rates: MileageRates::default(),
            photo_types: ledger.photo_types,
        }
    }

    fn load<F>(lookup: F, strict: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::defaults();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let log_json = match get("LOG_JSON") {
            Some(v) => fallback(
                v.parse::<bool>().map_err(|_| ConfigError::InvalidBool {
                    var: "LOG_JSON",
                    value: v.clone(),
                }),
                defaults.log_json,
                strict,
            )?,
            None => defaults.log_json,
        };

        let timezone = match get("TIMEZONE") {
            Some(v) => fallback(
                v.parse::<Tz>()
                    .map_err(|_| ConfigError::InvalidTimezone(v.clone())),
                defaults.timezone,
                strict,
            )?,
            None => defaults.timezone,
        };

        let week_start = match get("WEEK_START") {
            Some(v) => fallback(
                v.parse::<Weekday>()
                    .map_err(|_| ConfigError::InvalidWeekday(v.clone())),
                defaults.week_start,
                strict,
            )?,
            None => defaults.week_start,
        };

        let default_rate = match get("MILEAGE_RATE") {
            Some(v) => fallback(
                parse_rate(&v).ok_or_else(|| ConfigError::InvalidMileageRate {
                    var: "MILEAGE_RATE",
                    value: v.clone(),
                }),
                DEFAULT_MILEAGE_RATE,
                strict,
            )?,
            None => DEFAULT_MILEAGE_RATE,
        };

        let overrides = match get("MILEAGE_RATES") {
            Some(v) => fallback(MileageRates::parse_overrides(&v), BTreeMap::new(), strict)?,
            None => BTreeMap::new(),
        };
        let mileage_rates = overrides
            .into_iter()
            .fold(MileageRates::new(default_rate), |rates, (year, rate)| {
                rates.with_year(year, rate)
            });

        let photo_types = get("PHOTO_TYPES")
            .map(|v| PhotoTypes::new(v.split(',')))
            .unwrap_or(defaults.photo_types);

        Ok(Self {
            work_dir: get("WORK_DIR").unwrap_or(defaults.work_dir),
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json,
            timezone,
            week_start,
            mileage_rates,
            photo_types,
        })
    }

    /// Engine-facing subset
    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            timezone: self.timezone,
            week_start: self.week_start,
            photo_types: self.photo_types.clone(),
        }
    }

    /// Path of the shift database file
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("shifts.redb")
    }

    /// Directory for rotating log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn fallback<T>(parsed: Result<T, ConfigError>, default: T, strict: bool) -> Result<T, ConfigError> {
    match parsed {
        Ok(value) => Ok(value),
        Err(e) if strict => Err(e),
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to default configuration value");
            Ok(default)
        }
    }
}
