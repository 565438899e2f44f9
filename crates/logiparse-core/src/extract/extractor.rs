//! Document extractor combining the per-field rule sets.

use std::borrow::Cow;

use tracing::{debug, info};

use super::rules::{
    AmountExtractor, DateExtractor, ExtractionMatch, FieldExtractor, InvoiceNumberExtractor,
    LineItemExtractor, PartyExtractor, TrackingExtractor, WeightExtractor,
};
use crate::models::config::ExtractionConfig;
use crate::models::record::{ExtractedData, ExtractedRecord, Field, LineItem};

/// Extracts header fields and line items from a whole document.
///
/// Stateless apart from its configuration; one instance can serve any number
/// of documents, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor {
    config: ExtractionConfig,
}

impl DocumentExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor from configuration.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Set the currency used when an amount has no currency token.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.config.default_currency = currency.into();
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract the record and line items from document text.
    ///
    /// Never fails: fields that cannot be found are left absent.
    pub fn extract(&self, text: &str) -> (ExtractedRecord, Vec<LineItem>) {
        let text = normalize_line_endings(text);
        let text = text.as_ref();

        info!("Extracting fields from {} characters of text", text.len());

        let mut record = ExtractedRecord::new();

        record.set(
            Field::InvoiceNumber,
            found(Field::InvoiceNumber, InvoiceNumberExtractor::new().extract(text)),
        );
        record.set(Field::Date, found(Field::Date, DateExtractor::new().extract(text)));
        record.set(Field::Sender, found(Field::Sender, PartyExtractor::sender().extract(text)));
        record.set(
            Field::Receiver,
            found(Field::Receiver, PartyExtractor::receiver().extract(text)),
        );
        record.set(
            Field::TrackingNumber,
            found(Field::TrackingNumber, TrackingExtractor::new().extract(text)),
        );
        record.set(
            Field::TotalWeight,
            found(Field::TotalWeight, WeightExtractor::new().extract(text)),
        );

        if let Some(m) = AmountExtractor::new().extract(text) {
            debug!("{} matched by rule {}: {:?}", Field::TotalAmount, m.rule, m.source);
            let currency = m
                .value
                .currency
                .unwrap_or_else(|| self.config.default_currency.clone());
            record.set(Field::TotalAmount, Some(m.value.amount));
            record.set(Field::Currency, Some(currency));
        } else {
            debug!("{} not found", Field::TotalAmount);
        }

        let items = LineItemExtractor::new().extract_all(text);

        debug!(
            "Extracted {} header fields and {} line items",
            record.iter().filter(|(_, v)| v.is_some()).count(),
            items.len()
        );

        (record, items)
    }

    /// Extract into the combined `extracted_data` shape.
    pub fn extract_data(&self, text: &str) -> ExtractedData {
        let (record, items) = self.extract(text);
        ExtractedData { record, items }
    }
}

fn found(field: Field, m: Option<ExtractionMatch<String>>) -> Option<String> {
    match m {
        Some(m) => {
            debug!("{} matched by rule {}: {:?}", field, m.rule, m.source);
            Some(m.value)
        }
        None => {
            debug!("{} not found", field);
            None
        }
    }
}

fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
LOGISTICS INVOICE
Invoice No: INV-2024-00892
Date: February 20, 2024
Tracking No: TRK-PH-44821

From: ABC Warehousing Corp., Mandaue City, Cebu
To: XYZ Retail Store, Makati City, Metro Manila

Items:
Industrial Fan Motor     2    1500.00    3000.00
Conveyor Belt Segment    5     800.00    4000.00
Safety Gloves (box)     10     250.00    2500.00

Total Weight: 45.5 kg
Total Amount: PHP 9,500.00";

    #[test]
    fn test_extract_sample_document() {
        let (record, items) = DocumentExtractor::new().extract(SAMPLE);

        assert_eq!(
            record,
            ExtractedRecord {
                invoice_number: Some("INV-2024-00892".to_string()),
                date: Some("February 20, 2024".to_string()),
                sender: Some("ABC Warehousing Corp., Mandaue City, Cebu".to_string()),
                receiver: Some("XYZ Retail Store, Makati City, Metro Manila".to_string()),
                total_weight: Some("45.5 kg".to_string()),
                total_amount: Some("9500.00".to_string()),
                currency: Some("PHP".to_string()),
                tracking_number: Some("TRK-PH-44821".to_string()),
            }
        );
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].description, "Safety Gloves (box)");
    }

    #[test]
    fn test_crlf_input() {
        let text = SAMPLE.replace('\n', "\r\n");
        let (record, items) = DocumentExtractor::new().extract(&text);
        assert_eq!(record.sender.as_deref(), Some("ABC Warehousing Corp., Mandaue City, Cebu"));
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_default_currency_applies_only_with_amount() {
        let extractor = DocumentExtractor::new();
        let (record, _) = extractor.extract("Total Amount: 1,000.00");
        assert_eq!(record.currency.as_deref(), Some("PHP"));

        let (record, _) = extractor.extract("Invoice No: ABC-123");
        assert_eq!(record.currency, None);
        assert_eq!(record.total_amount, None);
    }

    #[test]
    fn test_configured_default_currency() {
        let extractor = DocumentExtractor::new().with_default_currency("USD");
        let (record, _) = extractor.extract("Grand Total: 75.00");
        assert_eq!(record.currency.as_deref(), Some("USD"));

        let (record, _) = extractor.extract("Grand Total: ₱75.00");
        assert_eq!(record.currency.as_deref(), Some("PHP"));
    }

    #[test]
    fn test_empty_input() {
        let (record, items) = DocumentExtractor::new().extract("");
        assert_eq!(record, ExtractedRecord::new());
        assert!(items.is_empty());
    }
}
