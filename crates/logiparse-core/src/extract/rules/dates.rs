//! Date extraction for logistics documents.
//!
//! Dates are returned exactly as written. [`interpret_date`] reads such a
//! string as a calendar date when a caller needs one.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Captures;

use super::patterns::{
    DATE_ANYWHERE, DATE_DAY_FIRST, DATE_LABELED, DATE_MONTH_FIRST, DATE_NUMERIC, DATE_YMD,
};
use super::{group, ExtractionMatch, FieldExtractor, Rule, RuleSet};
use crate::models::config::DateOrder;

lazy_static! {
    pub static ref DATE_RULES: RuleSet<String> = RuleSet::new(vec![
        Rule {
            name: "date_labeled",
            pattern: &*DATE_LABELED,
            capture: capture_date,
        },
        Rule {
            name: "date_anywhere",
            pattern: &*DATE_ANYWHERE,
            capture: capture_date,
        },
    ]);
}

fn capture_date(caps: &Captures<'_>) -> Option<String> {
    group(caps, 1)
}

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DATE_RULES.first_match(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_RULES.all_matches(text)
    }
}

/// Read an extracted date string as a calendar date.
///
/// ISO and month-name dates are unambiguous. Purely numeric dates such as
/// `02/03/2024` are read according to `order`.
pub fn interpret_date(value: &str, order: DateOrder) -> Option<NaiveDate> {
    let value = value.trim();

    if let Some(caps) = DATE_YMD.captures(value) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_NUMERIC.captures(value) {
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let year = parse_year(&caps[3])?;
        let (day, month) = match order {
            DateOrder::DayFirst => (first, second),
            DateOrder::MonthFirst => (second, first),
        };
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_MONTH_FIRST.captures(value) {
        let month = month_to_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_DAY_FIRST.captures(value) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_to_number(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() == 2 {
        // Two-digit year: 00-50 → 2000s, 51-99 → 1900s
        Some(if year <= 50 { 2000 + year } else { 1900 + year })
    } else {
        Some(year)
    }
}

fn month_to_number(month: &str) -> Option<u32> {
    let month = month.to_lowercase();
    let number = match month.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}
