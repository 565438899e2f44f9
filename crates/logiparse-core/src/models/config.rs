//! Configuration structures for the extraction pipeline.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::report::Severity;
use crate::error::{LogiParseError, Result};

/// Currency assumed when an amount is found without a currency token.
///
/// The target corpus is Philippine logistics paperwork.
pub const DEFAULT_CURRENCY: &str = "PHP";

/// Main configuration for the logiparse pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogiParseConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Validation configuration.
    pub validation: ValidationConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Currency code used when an amount carries no currency token.
    pub default_currency: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Order of day and month in purely numeric dates such as `02/03/2024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `DD/MM/YYYY`, the convention of the target locale.
    #[default]
    DayFirst,
    /// `MM/DD/YYYY`.
    MonthFirst,
}

/// Validation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Absolute tolerance for arithmetic comparisons.
    pub amount_tolerance: Decimal,

    /// Severity of a mismatch between the sum of line totals and the total amount.
    pub sum_mismatch_severity: Severity,

    /// How numeric dates are read when checking that the date is a real calendar date.
    pub date_order: DateOrder,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            amount_tolerance: Decimal::new(1, 2),
            sum_mismatch_severity: Severity::Issue,
            date_order: DateOrder::DayFirst,
        }
    }
}

impl LogiParseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn check(&self) -> Result<()> {
        if self.extraction.default_currency.trim().is_empty() {
            return Err(LogiParseError::Config(
                "extraction.default_currency must not be empty".to_string(),
            ));
        }
        if self.validation.amount_tolerance.is_sign_negative() {
            return Err(LogiParseError::Config(format!(
                "validation.amount_tolerance must not be negative, got {}",
                self.validation.amount_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = LogiParseConfig::default();
        assert_eq!(config.extraction.default_currency, "PHP");
        assert_eq!(config.validation.amount_tolerance, Decimal::new(1, 2));
        assert_eq!(config.validation.sum_mismatch_severity, Severity::Issue);
        assert_eq!(config.validation.date_order, DateOrder::DayFirst);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LogiParseConfig =
            serde_json::from_str(r#"{"validation": {"sum_mismatch_severity": "warning"}}"#)
                .unwrap();
        assert_eq!(config.validation.sum_mismatch_severity, Severity::Warning);
        assert_eq!(config.extraction.default_currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LogiParseConfig::default();
        config.extraction.default_currency = "USD".to_string();
        config.validation.date_order = DateOrder::MonthFirst;
        config.save(&path).unwrap();

        let loaded = LogiParseConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_rejects_empty_currency() {
        let mut config = LogiParseConfig::default();
        config.extraction.default_currency = " ".to_string();
        assert!(matches!(config.check(), Err(LogiParseError::Config(_))));
    }
}
