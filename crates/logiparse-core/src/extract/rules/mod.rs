//! Rule-based field extractors for logistics invoices and waybills.
//!
//! Each field owns an ordered [`RuleSet`]. Rules are tried most specific
//! first and the first accepted capture wins.

pub mod amounts;
pub mod dates;
pub mod invoice_number;
pub mod line_items;
pub mod parties;
pub mod patterns;
pub mod tracking;
pub mod weight;

pub use amounts::{AmountExtractor, AmountMatch, AMOUNT_RULES, normalize_amount, normalize_currency};
pub use dates::{DateExtractor, DATE_RULES, interpret_date};
pub use invoice_number::{InvoiceNumberExtractor, INVOICE_NUMBER_RULES};
pub use line_items::{LineItemExtractor, LINE_ITEM_RULES, items_region, parse_line_item};
pub use parties::{PartyExtractor, PartyRole, RECEIVER_RULES, SENDER_RULES};
pub use tracking::{TrackingExtractor, TRACKING_RULES};
pub use weight::{WeightExtractor, WEIGHT_RULES};

use regex::{Captures, Regex};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value accepted by a rule, with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that produced the value.
    pub rule: &'static str,
    /// Byte range of the whole match in the searched text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// One pattern plus the function that turns its captures into a value.
///
/// The capture function may reject a match by returning `None`; the rule then
/// moves on to the next match of its pattern.
pub struct Rule<T> {
    pub name: &'static str,
    pub pattern: &'static Regex,
    pub capture: fn(&Captures<'_>) -> Option<T>,
}

impl<T> Rule<T> {
    /// First accepted match in document order.
    pub fn first(&self, text: &str) -> Option<ExtractionMatch<T>> {
        self.pattern
            .captures_iter(text)
            .find_map(|caps| self.accept(&caps))
    }

    /// Every accepted match in document order.
    pub fn all(&self, text: &str) -> Vec<ExtractionMatch<T>> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| self.accept(&caps))
            .collect()
    }

    fn accept(&self, caps: &Captures<'_>) -> Option<ExtractionMatch<T>> {
        let value = (self.capture)(caps)?;
        let whole = caps.get(0)?;
        Some(
            ExtractionMatch::new(value, self.name, whole.as_str())
                .with_position(whole.start(), whole.end()),
        )
    }
}

/// Ordered list of rules for one field.
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleSet<T> {
    pub fn new(rules: Vec<Rule<T>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    /// Look up a rule by name.
    pub fn rule(&self, name: &str) -> Option<&Rule<T>> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Result of the first rule that accepts anything.
    pub fn first_match(&self, text: &str) -> Option<ExtractionMatch<T>> {
        self.rules.iter().find_map(|rule| rule.first(text))
    }

    /// Accepted matches of every rule, grouped by rule order.
    pub fn all_matches(&self, text: &str) -> Vec<ExtractionMatch<T>> {
        self.rules.iter().flat_map(|rule| rule.all(text)).collect()
    }
}

/// Trimmed text of a numbered capture group, if it is non-empty.
pub(crate) fn group(caps: &Captures<'_>, index: usize) -> Option<String> {
    caps.get(index)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}
