//! Total amount and currency extraction.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Captures;
use rust_decimal::Decimal;

use super::patterns::{AMOUNT_LABELED, AMOUNT_TOTAL};
use super::{ExtractionMatch, FieldExtractor, Rule, RuleSet};

/// A stated total with the currency token found next to it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountMatch {
    /// Plain decimal string, thousands separators removed.
    pub amount: String,
    /// ISO currency code, when a currency token was present.
    pub currency: Option<String>,
}

lazy_static! {
    pub static ref AMOUNT_RULES: RuleSet<AmountMatch> = RuleSet::new(vec![
        Rule {
            name: "amount_labeled_total",
            pattern: &*AMOUNT_LABELED,
            capture: capture_amount,
        },
        Rule {
            name: "amount_bare_total",
            pattern: &*AMOUNT_TOTAL,
            capture: capture_amount,
        },
    ]);
}

fn capture_amount(caps: &Captures<'_>) -> Option<AmountMatch> {
    let amount = normalize_amount(caps.name("amount")?.as_str())?;
    let currency = ["cur_label", "cur_pre", "cur_post"]
        .iter()
        .find_map(|name| caps.name(name))
        .map(|m| normalize_currency(m.as_str()));

    Some(AmountMatch { amount, currency })
}

/// Strip thousands separators, e.g. `"9,500.00"` → `"9500.00"`.
///
/// Returns `None` when the result is not a decimal number.
pub fn normalize_amount(s: &str) -> Option<String> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()?;
    Some(cleaned)
}

/// Map a currency token to its ISO code (`₱` → `PHP`, `$` → `USD`).
pub fn normalize_currency(token: &str) -> String {
    match token.trim() {
        "₱" => "PHP".to_string(),
        "$" => "USD".to_string(),
        other => other.to_uppercase(),
    }
}

/// Total amount extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<AmountMatch>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        AMOUNT_RULES.first_match(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT_RULES.all_matches(text)
    }
}
