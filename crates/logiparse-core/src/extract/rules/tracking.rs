//! Tracking / waybill number extraction.

use lazy_static::lazy_static;
use regex::Captures;

use super::patterns::{TRACKING_LABELED, WAYBILL_LABELED};
use super::{ExtractionMatch, FieldExtractor, Rule, RuleSet};

lazy_static! {
    pub static ref TRACKING_RULES: RuleSet<String> = RuleSet::new(vec![
        Rule {
            name: "tracking_labeled",
            pattern: &*TRACKING_LABELED,
            capture: capture_tracking_token,
        },
        Rule {
            name: "waybill_labeled",
            pattern: &*WAYBILL_LABELED,
            capture: capture_tracking_token,
        },
    ]);
}

fn capture_tracking_token(caps: &Captures<'_>) -> Option<String> {
    let token = caps.get(1)?.as_str().trim_matches('-');
    if token.len() < 3 {
        return None;
    }
    Some(token.to_string())
}

/// Tracking number extractor.
pub struct TrackingExtractor;

impl TrackingExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrackingExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TrackingExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        TRACKING_RULES.first_match(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        TRACKING_RULES.all_matches(text)
    }
}
