//! Validation report types

use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::error::{AppError, ErrorCode};
use std::fmt;

/// Kind of a single validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A value the gate needs is missing
    Required,
    /// Value outside its field domain (negative amount, bad gauge position)
    InvalidInput,
    /// Cross-field rule not satisfied
    ValidationFailed,
}

/// Form field a message is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    StartDate,
    StartTime,
    StartMileage,
    StartTankLevel,
    EndDate,
    EndTime,
    EndMileage,
    EndTankLevel,
    TripCount,
    NetFare,
    Tips,
    Promotions,
    Tolls,
    TollsReimbursed,
    ParkingFees,
    MiscFees,
    GallonsFilled,
    FuelCost,
    Notes,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::StartDate => "start_date",
            Field::StartTime => "start_time",
            Field::StartMileage => "start_mileage",
            Field::StartTankLevel => "start_tank_level",
            Field::EndDate => "end_date",
            Field::EndTime => "end_time",
            Field::EndMileage => "end_mileage",
            Field::EndTankLevel => "end_tank_level",
            Field::TripCount => "trip_count",
            Field::NetFare => "net_fare",
            Field::Tips => "tips",
            Field::Promotions => "promotions",
            Field::Tolls => "tolls",
            Field::TollsReimbursed => "tolls_reimbursed",
            Field::ParkingFees => "parking_fees",
            Field::MiscFees => "misc_fees",
            Field::GallonsFilled => "gallons_filled",
            Field::FuelCost => "fuel_cost",
            Field::Notes => "notes",
        }
    }

    /// Human-readable label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Field::StartDate => "Start date",
            Field::StartTime => "Start time",
            Field::StartMileage => "Start mileage",
            Field::StartTankLevel => "Start tank level",
            Field::EndDate => "End date",
            Field::EndTime => "End time",
            Field::EndMileage => "End mileage",
            Field::EndTankLevel => "End tank level",
            Field::TripCount => "Trip count",
            Field::NetFare => "Net fare",
            Field::Tips => "Tips",
            Field::Promotions => "Promotions",
            Field::Tolls => "Tolls",
            Field::TollsReimbursed => "Tolls reimbursed",
            Field::ParkingFees => "Parking fees",
            Field::MiscFees => "Misc fees",
            Field::GallonsFilled => "Gallons filled",
            Field::FuelCost => "Fuel cost",
            Field::Notes => "Notes",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field-attributed finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    pub kind: MessageKind,
    pub field: Field,
    pub message: String,
}

/// Result of evaluating a gate: pass/fail plus every finding
///
/// The gate passes exactly when there are no messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    messages: Vec<ValidationMessage>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: MessageKind, field: Field, message: impl Into<String>) {
        self.messages.push(ValidationMessage {
            kind,
            field,
            message: message.into(),
        });
    }

    pub(crate) fn required(&mut self, field: Field) {
        self.push(
            MessageKind::Required,
            field,
            format!("{} is required", field.label()),
        );
    }

    pub(crate) fn invalid(&mut self, field: Field, message: impl Into<String>) {
        self.push(MessageKind::InvalidInput, field, message);
    }

    pub(crate) fn failed(&mut self, field: Field, message: impl Into<String>) {
        self.push(MessageKind::ValidationFailed, field, message);
    }

    /// Gate state: true when the action may be enabled
    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(move |m| m.field == field)
    }

    pub fn has_message(&self, field: Field, kind: MessageKind) -> bool {
        self.for_field(field).any(|m| m.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True when some value lies outside its field domain
    pub fn has_invalid_input(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.kind == MessageKind::InvalidInput)
    }

    /// Error code for the whole report
    ///
    /// Out-of-domain values win over rule violations, so a negative
    /// mileage reports as invalid input even when other fields are missing.
    pub fn code(&self) -> ErrorCode {
        if let Some(invalid) = self
            .messages
            .iter()
            .find(|m| m.kind == MessageKind::InvalidInput)
        {
            return invalid_input_code(invalid.field);
        }
        match self
            .messages
            .iter()
            .find(|m| m.kind == MessageKind::ValidationFailed)
        {
            Some(failed) => validation_code(failed.field),
            None if self.messages.is_empty() => ErrorCode::ValidationFailed,
            None => ErrorCode::RequiredField,
        }
    }

    /// Uniform error carrying every message as structured details
    pub fn to_app_error(&self) -> AppError {
        let code = self.code();
        let summary = self
            .messages
            .iter()
            .map(|m| m.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        let fields: Vec<_> = self
            .messages
            .iter()
            .map(|m| json!({ "field": m.field, "kind": m.kind, "message": m.message }))
            .collect();
        AppError::with_message(code, summary).with_detail("messages", fields)
    }
}

fn invalid_input_code(field: Field) -> ErrorCode {
    match field {
        Field::StartTankLevel | Field::EndTankLevel => ErrorCode::InvalidTankLevel,
        Field::StartMileage | Field::EndMileage => ErrorCode::InvalidMileage,
        Field::TripCount => ErrorCode::ValueOutOfRange,
        Field::NetFare
        | Field::Tips
        | Field::Promotions
        | Field::Tolls
        | Field::TollsReimbursed
        | Field::ParkingFees
        | Field::MiscFees
        | Field::GallonsFilled
        | Field::FuelCost => ErrorCode::NegativeAmount,
        _ => ErrorCode::InvalidInput,
    }
}

fn validation_code(field: Field) -> ErrorCode {
    match field {
        Field::EndMileage => ErrorCode::EndMileageNotGreater,
        Field::EndTime => ErrorCode::EndBeforeStart,
        _ => ErrorCode::ValidationFailed,
    }
}
