//! Total weight extraction.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Captures;
use rust_decimal::Decimal;

use super::patterns::{WEIGHT_ANYWHERE, WEIGHT_LABELED};
use super::{ExtractionMatch, FieldExtractor, Rule, RuleSet};

lazy_static! {
    pub static ref WEIGHT_RULES: RuleSet<String> = RuleSet::new(vec![
        Rule {
            name: "weight_labeled",
            pattern: &*WEIGHT_LABELED,
            capture: capture_weight,
        },
        Rule {
            name: "weight_anywhere",
            pattern: &*WEIGHT_ANYWHERE,
            capture: capture_weight,
        },
    ]);
}

/// `"<decimal> <unit>"`, thousands separators dropped and the unit as written.
fn capture_weight(caps: &Captures<'_>) -> Option<String> {
    let value = Decimal::from_str(&caps.get(1)?.as_str().replace(',', "")).ok()?;
    let unit = caps.get(2)?.as_str();
    Some(format!("{} {}", value, unit))
}

/// Weight field extractor.
pub struct WeightExtractor;

impl WeightExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WeightExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for WeightExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        WEIGHT_RULES.first_match(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        WEIGHT_RULES.all_matches(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<String> {
        WeightExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_labeled_weight() {
        assert_eq!(extract("Total Weight: 45.5 kg"), Some("45.5 kg".to_string()));
        assert_eq!(extract("Gross weight - 1,250 KGS"), Some("1250 KGS".to_string()));
        assert_eq!(extract("Weight: 12lbs"), Some("12 lbs".to_string()));
    }

    #[test]
    fn test_label_preferred_over_earlier_bare_weight() {
        let text = "Rice sack 25 kg x 4\nTotal Weight: 100 kg";
        let found = WeightExtractor::new().extract(text).unwrap();
        assert_eq!(found.value, "100 kg");
        assert_eq!(found.rule, "weight_labeled");
    }

    #[test]
    fn test_unit_required() {
        assert_eq!(extract("Total Weight: 45.5"), None);
        assert_eq!(extract("Weight: 45.5 tons"), None);
        assert_eq!(extract("500 grams of spice"), None);
    }

    #[test]
    fn test_bare_weight_fallback() {
        assert_eq!(extract("Package: 3.2kg"), Some("3.2 kg".to_string()));
    }
}
