//! Consistency checks over an extracted record and its line items.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use crate::extract::rules::interpret_date;
use crate::models::config::{DateOrder, ValidationConfig};
use crate::models::record::{ExtractedRecord, Field, LineItem};
use crate::models::report::{Severity, ValidationReport};

/// Validates extracted records.
///
/// Validation never fails. Every problem ends up in the returned report as an
/// issue or a warning.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

/// Issues and warnings collected while running the checks.
#[derive(Default)]
struct Findings {
    issues: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    fn push(&mut self, severity: Severity, message: String) {
        match severity {
            Severity::Issue => self.issues.push(message),
            Severity::Warning => self.warnings.push(message),
        }
    }
}

impl Validator {
    /// Create a validator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator from configuration.
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Set the tolerance used for arithmetic comparisons.
    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.config.amount_tolerance = tolerance;
        self
    }

    /// Set how a line item sum / total amount mismatch is reported.
    pub fn with_sum_mismatch_severity(mut self, severity: Severity) -> Self {
        self.config.sum_mismatch_severity = severity;
        self
    }

    /// Set the order used to read numeric dates.
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.config.date_order = order;
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Run all checks and build the report.
    pub fn validate(&self, record: &ExtractedRecord, items: &[LineItem]) -> ValidationReport {
        let mut findings = Findings::default();

        let present = self.check_key_fields(record, &mut findings);
        self.check_optional_fields(record, &mut findings);
        let total_amount = self.check_total_amount(record, &mut findings);
        self.check_line_items(items, &mut findings);
        if let Some(total_amount) = total_amount {
            self.check_items_sum(items, total_amount, &mut findings);
        }
        self.check_date(record, &mut findings);

        let report = ValidationReport::new(
            findings.issues,
            findings.warnings,
            present,
            Field::KEY_FIELDS.len(),
        );

        debug!(
            "Validation {} with {} issues and {} warnings (coverage {})",
            report.status,
            report.issues.len(),
            report.warnings.len(),
            report.field_coverage
        );

        report
    }

    /// Returns the number of key fields present.
    fn check_key_fields(&self, record: &ExtractedRecord, findings: &mut Findings) -> usize {
        let mut present = 0;
        for field in Field::KEY_FIELDS {
            if record.has(field) {
                present += 1;
            } else {
                findings.issues.push(format!("Missing: {}", field));
            }
        }
        present
    }

    fn check_optional_fields(&self, record: &ExtractedRecord, findings: &mut Findings) {
        for field in Field::OPTIONAL_FIELDS {
            if !record.has(field) {
                findings.warnings.push(format!("Missing (optional): {}", field));
            }
        }
    }

    /// Returns the total amount when it is a valid positive decimal.
    fn check_total_amount(&self, record: &ExtractedRecord, findings: &mut Findings) -> Option<Decimal> {
        let raw = record.get(Field::TotalAmount)?;

        match Decimal::from_str(raw) {
            Ok(amount) if amount > Decimal::ZERO => Some(amount),
            Ok(amount) => {
                findings.issues.push(format!(
                    "Invalid {}: {} is zero or negative",
                    Field::TotalAmount,
                    amount
                ));
                None
            }
            Err(_) => {
                findings.issues.push(format!(
                    "Invalid {}: '{}' is not a valid number",
                    Field::TotalAmount,
                    raw
                ));
                None
            }
        }
    }

    fn check_line_items(&self, items: &[LineItem], findings: &mut Findings) {
        for (i, item) in items.iter().enumerate() {
            let Some((computed, diff)) = item
                .computed_total()
                .and_then(|computed| Some((computed, computed.checked_sub(item.line_total)?)))
            else {
                findings.issues.push(format!(
                    "Line item {} '{}': arithmetic overflow",
                    i + 1,
                    item.description
                ));
                continue;
            };

            if diff.abs() > self.config.amount_tolerance {
                findings.issues.push(format!(
                    "Line item {} '{}': quantity × unit_price ({:.2}) does not match line_total ({:.2})",
                    i + 1,
                    item.description,
                    computed,
                    item.line_total
                ));
            }
        }
    }

    fn check_items_sum(&self, items: &[LineItem], total_amount: Decimal, findings: &mut Findings) {
        if items.is_empty() {
            return;
        }

        let sum = items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total));
        let Some((sum, diff)) = sum.and_then(|sum| Some((sum, sum.checked_sub(total_amount)?))) else {
            findings.issues.push("Line item totals: arithmetic overflow".to_string());
            return;
        };

        if diff.abs() > self.config.amount_tolerance {
            findings.push(
                self.config.sum_mismatch_severity,
                format!(
                    "Line item totals sum to {:.2} but {} is {:.2}",
                    sum,
                    Field::TotalAmount,
                    total_amount
                ),
            );
        }
    }

    fn check_date(&self, record: &ExtractedRecord, findings: &mut Findings) {
        let Some(date) = record.get(Field::Date) else {
            return;
        };

        if interpret_date(date, self.config.date_order).is_none() {
            let order = match self.config.date_order {
                DateOrder::DayFirst => "day-first",
                DateOrder::MonthFirst => "month-first",
            };
            findings.warnings.push(format!(
                "Date '{}' is not a valid calendar date ({} order)",
                date, order
            ));
        }
    }
}
