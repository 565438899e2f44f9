//! Extraction followed by validation.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::extract::DocumentExtractor;
use crate::models::config::LogiParseConfig;
use crate::models::record::ExtractedData;
use crate::models::report::ValidationReport;
use crate::validate::Validator;

/// Combined output of one processing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingOutput {
    pub extracted_data: ExtractedData,
    pub validation_report: ValidationReport,
}

impl ProcessingOutput {
    /// Serialize as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs a [`DocumentExtractor`] and a [`Validator`] over document text.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    extractor: DocumentExtractor,
    validator: Validator,
}

impl Pipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline from configuration.
    pub fn with_config(config: &LogiParseConfig) -> Self {
        Self {
            extractor: DocumentExtractor::with_config(config.extraction.clone()),
            validator: Validator::with_config(config.validation.clone()),
        }
    }

    pub fn extractor(&self) -> &DocumentExtractor {
        &self.extractor
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Extract and validate.
    pub fn process(&self, text: &str) -> ProcessingOutput {
        let extracted_data = self.extractor.extract_data(text);
        let validation_report = self
            .validator
            .validate(&extracted_data.record, &extracted_data.items);

        info!(
            "Processed document: {} ({} items, coverage {})",
            validation_report.status,
            extracted_data.items.len(),
            validation_report.field_coverage
        );

        ProcessingOutput {
            extracted_data,
            validation_report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{Severity, Status};

    const MISMATCH: &str = "\
Invoice No: INV-7
Date: 2024-03-01
From: North Depot
To: South Store
Tracking No: 778899
Total Weight: 10 kg
Items:
Crate 2 10.00 20.00
Total Amount: 25.00";

    #[test]
    fn test_default_pipeline_fails_on_sum_mismatch() {
        let output = Pipeline::new().process(MISMATCH);
        assert_eq!(output.validation_report.status, Status::Fail);
    }

    #[test]
    fn test_configured_pipeline() {
        let mut config = LogiParseConfig::default();
        config.validation.sum_mismatch_severity = Severity::Warning;
        config.extraction.default_currency = "USD".to_string();

        let pipeline = Pipeline::with_config(&config);
        assert_eq!(pipeline.extractor().config().default_currency, "USD");
        assert_eq!(pipeline.validator().config().sum_mismatch_severity, Severity::Warning);

        let output = pipeline.process(MISMATCH);
        assert_eq!(output.validation_report.status, Status::Warn);
        assert_eq!(output.extracted_data.record.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_json_shape() {
        let json = Pipeline::new().process("").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["extracted_data"]["items"].as_array().unwrap().is_empty());
        assert_eq!(value["validation_report"]["status"], "FAIL");
        assert_eq!(value["validation_report"]["field_coverage"], "0/5");
    }
}
