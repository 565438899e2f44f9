//! Invoice number extraction.

use lazy_static::lazy_static;
use regex::Captures;

use super::patterns::{INVOICE_NUMBER_BARE, INVOICE_NUMBER_LABELED};
use super::{ExtractionMatch, FieldExtractor, Rule, RuleSet};

/// Shorter tokens are usually stray digits, not invoice numbers.
const MIN_INVOICE_NUMBER_LEN: usize = 3;

lazy_static! {
    pub static ref INVOICE_NUMBER_RULES: RuleSet<String> = RuleSet::new(vec![
        Rule {
            name: "invoice_number_labeled",
            pattern: &*INVOICE_NUMBER_LABELED,
            capture: capture_invoice_token,
        },
        Rule {
            name: "invoice_number_bare",
            pattern: &*INVOICE_NUMBER_BARE,
            capture: capture_invoice_token,
        },
    ]);
}

fn capture_invoice_token(caps: &Captures<'_>) -> Option<String> {
    let token = caps.get(1)?.as_str().trim_end_matches(['-', '/']);
    if token.chars().count() < MIN_INVOICE_NUMBER_LEN {
        return None;
    }
    Some(token.to_string())
}

/// Invoice number extractor.
pub struct InvoiceNumberExtractor;

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        INVOICE_NUMBER_RULES.first_match(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        INVOICE_NUMBER_RULES.all_matches(text)
    }
}
