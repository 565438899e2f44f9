//! Field extraction from logistics invoice and waybill text.

mod extractor;
pub mod rules;

pub use extractor::DocumentExtractor;
pub use rules::{ExtractionMatch, FieldExtractor, Rule, RuleSet};
