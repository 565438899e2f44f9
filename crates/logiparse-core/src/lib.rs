//! Core library for logistics invoice and waybill parsing.
//!
//! This crate provides:
//! - Rule-based field extraction (invoice number, date, parties, tracking
//!   number, weight, total amount, line items)
//! - Consistency validation with a PASS/WARN/FAIL report
//! - Configuration and output models

pub mod error;
pub mod models;
pub mod extract;
pub mod validate;
pub mod pipeline;

pub use error::{LogiParseError, Result};
pub use models::config::{
    DateOrder, ExtractionConfig, LogiParseConfig, ValidationConfig, DEFAULT_CURRENCY,
};
pub use models::record::{ExtractedData, ExtractedRecord, Field, LineItem};
pub use models::report::{Severity, Status, ValidationReport};
pub use extract::{DocumentExtractor, ExtractionMatch, FieldExtractor};
pub use validate::Validator;
pub use pipeline::{Pipeline, ProcessingOutput};

/// Extract the record and line items from document text with default settings.
pub fn extract(text: &str) -> (ExtractedRecord, Vec<LineItem>) {
    DocumentExtractor::new().extract(text)
}

/// Validate a record and its line items with default settings.
pub fn validate(record: &ExtractedRecord, items: &[LineItem]) -> ValidationReport {
    Validator::new().validate(record, items)
}

/// Extract and validate with default settings.
pub fn process(text: &str) -> ProcessingOutput {
    Pipeline::new().process(text)
}
