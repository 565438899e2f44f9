//! Sender and receiver extraction.
//!
//! A party is a keyword line ("From:", "Consignee", ...) plus the address
//! lines under it. The block ends at a blank line or at the next line that
//! starts with a recognized keyword. Lines are joined with `", "`.

use lazy_static::lazy_static;
use regex::Captures;

use super::patterns::{
    KEYWORD_LINE, RECEIVER_KEYWORD, RECEIVER_WITH_COLON, SENDER_KEYWORD, SENDER_WITH_COLON,
};
use super::{ExtractionMatch, FieldExtractor, Rule, RuleSet};

lazy_static! {
    pub static ref SENDER_RULES: RuleSet<String> = RuleSet::new(vec![
        Rule {
            name: "sender_with_colon",
            pattern: &*SENDER_WITH_COLON,
            capture: capture_block,
        },
        Rule {
            name: "sender_keyword",
            pattern: &*SENDER_KEYWORD,
            capture: capture_block,
        },
    ]);

    pub static ref RECEIVER_RULES: RuleSet<String> = RuleSet::new(vec![
        Rule {
            name: "receiver_with_colon",
            pattern: &*RECEIVER_WITH_COLON,
            capture: capture_block,
        },
        Rule {
            name: "receiver_keyword",
            pattern: &*RECEIVER_KEYWORD,
            capture: capture_block,
        },
    ]);
}

fn capture_block(caps: &Captures<'_>) -> Option<String> {
    let block = caps.get(1)?.as_str();
    let mut lines = block.split('\n');
    let mut parts = Vec::new();

    // Remainder of the keyword line itself
    if let Some(first) = lines.next().map(clean_line) {
        if !first.is_empty() {
            parts.push(first);
        }
    }

    for line in lines {
        let line = clean_line(line);
        if line.is_empty() || KEYWORD_LINE.is_match(line) {
            break;
        }
        parts.push(line);
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn clean_line(line: &str) -> &str {
    line.trim()
        .trim_start_matches([':', '-'])
        .trim_end_matches(',')
        .trim()
}

/// Which side of the shipment a party is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    Sender,
    Receiver,
}

/// Party block extractor for one role.
pub struct PartyExtractor {
    role: PartyRole,
}

impl PartyExtractor {
    pub fn new(role: PartyRole) -> Self {
        Self { role }
    }

    pub fn sender() -> Self {
        Self::new(PartyRole::Sender)
    }

    pub fn receiver() -> Self {
        Self::new(PartyRole::Receiver)
    }

    fn rules(&self) -> &'static RuleSet<String> {
        match self.role {
            PartyRole::Sender => &SENDER_RULES,
            PartyRole::Receiver => &RECEIVER_RULES,
        }
    }
}

impl FieldExtractor for PartyExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.rules().first_match(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.rules().all_matches(text)
    }
}
