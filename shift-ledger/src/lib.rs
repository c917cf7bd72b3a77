//! Shift Ledger - shift lifecycle and financial ledger engine
//!
//! # Overview
//!
//! Records rideshare driving shifts: each shift is started (odometer, fuel,
//! time) and later completed (odometer, fuel, trips, earnings, expenses).
//! The engine validates every gate, keeps the authoritative shift list,
//! edits completed shifts through copy-on-edit sessions, and produces
//! yearly tax summaries under the standard mileage and actual expense
//! methods.
//!
//! # Module Layout
//!
//! ```text
//! shift-ledger/src/
//! ├── core/          # Config (env-driven), LedgerConfig, mileage rates
//! ├── validation/    # Start/end/record gates, input filters
//! ├── ledger/        # ShiftLedger, EditSession, redb storage
//! ├── tax/           # TaxSummaryAggregator, period totals
//! └── utils/         # Logger, time zone helpers, text limits
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use shared::models::{ShiftEndInput, ShiftStartInput};
//! use shift_ledger::{LedgerConfig, MileageRates, ShiftLedger, TaxSummaryAggregator};
//!
//! let ledger = ShiftLedger::new(LedgerConfig::default());
//! let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//!
//! let shift = ledger
//!     .create(ShiftStartInput {
//!         start_date: Some(date),
//!         start_time: NaiveTime::from_hms_opt(8, 0, 0),
//!         start_mileage: Some("1000".parse().unwrap()),
//!         has_full_tank_at_start: true,
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! ledger
//!     .complete(
//!         shift.id,
//!         ShiftEndInput {
//!             end_date: Some(date),
//!             end_time: NaiveTime::from_hms_opt(12, 0, 0),
//!             end_mileage: Some("1100".parse().unwrap()),
//!             trip_count: Some(8),
//!             net_fare: Some("120.00".parse().unwrap()),
//!             ..Default::default()
//!         },
//!     )
//!     .unwrap();
//!
//! let summary = TaxSummaryAggregator::new(ledger, MileageRates::default()).summarize(2024);
//! assert_eq!(summary.mileage_deduction.to_string(), "67.00");
//! ```

pub mod core;
pub mod ledger;
pub mod tax;
pub mod utils;
pub mod validation;

// Re-export public types
pub use core::{Config, ConfigError, LedgerConfig, MileageRates};
pub use ledger::{EditSession, LedgerError, LedgerResult, ShiftLedger, ShiftStorage};
pub use tax::{DeductionMethod, PeriodTotals, TaxSummary, TaxSummaryAggregator};
pub use validation::{Field, MessageKind, ValidationMessage, ValidationReport};

pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};
