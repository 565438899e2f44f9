//! Extracted record and line item models.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};

/// A header field recognized by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    InvoiceNumber,
    Date,
    Sender,
    Receiver,
    TrackingNumber,
    TotalWeight,
    TotalAmount,
    Currency,
}

impl Field {
    /// Every field, in output order.
    pub const ALL: [Field; 8] = [
        Field::InvoiceNumber,
        Field::Date,
        Field::Sender,
        Field::Receiver,
        Field::TotalWeight,
        Field::TotalAmount,
        Field::Currency,
        Field::TrackingNumber,
    ];

    /// Fields whose absence fails validation.
    pub const KEY_FIELDS: [Field; 5] = [
        Field::InvoiceNumber,
        Field::Date,
        Field::Sender,
        Field::Receiver,
        Field::TotalAmount,
    ];

    /// Fields whose absence only produces a warning.
    pub const OPTIONAL_FIELDS: [Field; 2] = [Field::TrackingNumber, Field::TotalWeight];

    /// Field name as it appears in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::InvoiceNumber => "invoice_number",
            Field::Date => "date",
            Field::Sender => "sender",
            Field::Receiver => "receiver",
            Field::TrackingNumber => "tracking_number",
            Field::TotalWeight => "total_weight",
            Field::TotalAmount => "total_amount",
            Field::Currency => "currency",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header fields extracted from a document.
///
/// Every field is always serialized; a field that was not found is `null`.
/// Values are never empty strings, so "found empty" cannot be confused with
/// "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub invoice_number: Option<String>,
    pub date: Option<String>,
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub total_weight: Option<String>,
    pub total_amount: Option<String>,
    pub currency: Option<String>,
    pub tracking_number: Option<String>,
}

impl ExtractedRecord {
    /// Create a record with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field value.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Set a field value. Blank values are stored as absent.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        *self.slot_mut(field) = value;
    }

    /// Check whether a field has a value.
    pub fn has(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Iterate over all fields and their values in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&str>)> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::InvoiceNumber => &self.invoice_number,
            Field::Date => &self.date,
            Field::Sender => &self.sender,
            Field::Receiver => &self.receiver,
            Field::TrackingNumber => &self.tracking_number,
            Field::TotalWeight => &self.total_weight,
            Field::TotalAmount => &self.total_amount,
            Field::Currency => &self.currency,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::InvoiceNumber => &mut self.invoice_number,
            Field::Date => &mut self.date,
            Field::Sender => &mut self.sender,
            Field::Receiver => &mut self.receiver,
            Field::TrackingNumber => &mut self.tracking_number,
            Field::TotalWeight => &mut self.total_weight,
            Field::TotalAmount => &mut self.total_amount,
            Field::Currency => &mut self.currency,
        }
    }
}

/// A single row of the items table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free-text description.
    pub description: String,

    /// Quantity, always positive.
    #[serde(serialize_with = "serialize_quantity")]
    pub quantity: Decimal,

    /// Price per unit.
    pub unit_price: Decimal,

    /// Stated total for the row.
    pub line_total: Decimal,
}

impl LineItem {
    /// Quantity multiplied by unit price, `None` on overflow.
    pub fn computed_total(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.unit_price)
    }
}

/// Quantities are JSON numbers: integers when whole, floats otherwise.
fn serialize_quantity<S: Serializer>(quantity: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    if quantity.fract().is_zero() {
        if let Some(whole) = quantity.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    match quantity.to_f64() {
        Some(value) => serializer.serialize_f64(value),
        None => serializer.collect_str(quantity),
    }
}

/// Header fields plus line items, as emitted under `extracted_data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedData {
    #[serde(flatten)]
    pub record: ExtractedRecord,
    pub items: Vec<LineItem>,
}
