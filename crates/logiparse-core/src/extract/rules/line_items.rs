//! Line item extraction from the items table.
//!
//! Rows are only read between an items header ("Items:", "Description  Qty
//! ...") and the end of the table. The table ends at the first total marker,
//! or at a labeled line ("Remarks:", "Payment terms", ...) that follows a
//! blank line; without either it runs to the end of the document. Lines
//! inside that region that do not have the description / quantity / unit
//! price / line total shape are skipped without complaint; they are usually
//! column headers or rules.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Captures;
use rust_decimal::Decimal;
use tracing::trace;

use super::patterns::{
    ITEMS_END, ITEMS_HEADER, KEYWORD_LINE, LINE_ITEM_COLUMNS, LINE_ITEM_MULTIPLICATION,
};
use super::{FieldExtractor, Rule, RuleSet};
use crate::models::record::LineItem;

lazy_static! {
    pub static ref LINE_ITEM_RULES: RuleSet<LineItem> = RuleSet::new(vec![
        Rule {
            name: "row_columns",
            pattern: &*LINE_ITEM_COLUMNS,
            capture: capture_row,
        },
        Rule {
            name: "row_multiplication",
            pattern: &*LINE_ITEM_MULTIPLICATION,
            capture: capture_row,
        },
    ]);
}

fn capture_row(caps: &Captures<'_>) -> Option<LineItem> {
    let description = caps
        .name("description")?
        .as_str()
        .trim()
        .trim_end_matches('|')
        .trim()
        .to_string();
    let quantity = parse_decimal(caps.name("quantity")?.as_str())?;
    if quantity <= Decimal::ZERO {
        return None;
    }

    Some(LineItem {
        description,
        quantity,
        unit_price: parse_decimal(caps.name("unit_price")?.as_str())?,
        line_total: parse_decimal(caps.name("line_total")?.as_str())?,
    })
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', "")).ok()
}

/// Trim whitespace and table borders from a line.
fn strip_row(line: &str) -> &str {
    line.trim().trim_start_matches('|').trim()
}

/// Non-blank lines of the items table.
///
/// Empty when the document has no recognizable items header.
pub fn items_region(text: &str) -> Vec<&str> {
    let mut region = Vec::new();
    let mut in_table = false;
    let mut after_blank = false;

    for line in text.lines() {
        let line = strip_row(line);

        if !in_table {
            in_table = ITEMS_HEADER.is_match(line);
            continue;
        }

        if ITEMS_END.is_match(line) {
            break;
        }

        if line.is_empty() {
            after_blank = true;
            continue;
        }

        // A new section after a gap, but not a column header row.
        if after_blank && KEYWORD_LINE.is_match(line) && !ITEMS_HEADER.is_match(line) {
            break;
        }

        after_blank = false;
        region.push(line);
    }

    region
}

/// Parse one table row.
pub fn parse_line_item(line: &str) -> Option<LineItem> {
    LINE_ITEM_RULES
        .first_match(strip_row(line))
        .map(|m| m.value)
}

/// Line item extractor.
pub struct LineItemExtractor;

impl LineItemExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LineItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LineItemExtractor {
    type Output = LineItem;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        items_region(text)
            .into_iter()
            .filter_map(|line| {
                let item = parse_line_item(line);
                if item.is_none() {
                    trace!("Skipping non-item row: {:?}", line);
                }
                item
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(description: &str, quantity: &str, unit_price: &str, line_total: &str) -> LineItem {
        LineItem {
            description: description.to_string(),
            quantity: dec(quantity),
            unit_price: dec(unit_price),
            line_total: dec(line_total),
        }
    }

    #[test]
    fn test_space_separated_table() {
        let text = "\
Items:
Industrial Fan Motor     2    1500.00    3000.00
Conveyor Belt Segment    5     800.00    4000.00
Safety Gloves (box)     10     250.00    2500.00

Total Weight: 45.5 kg
";
        let items = LineItemExtractor::new().extract_all(text);
        assert_eq!(
            items,
            vec![
                item("Industrial Fan Motor", "2", "1500.00", "3000.00"),
                item("Conveyor Belt Segment", "5", "800.00", "4000.00"),
                item("Safety Gloves (box)", "10", "250.00", "2500.00"),
            ]
        );
    }

    #[test]
    fn test_pipe_table_with_header_row() {
        let text = "\
| Description        | Qty | Unit Price | Amount    |
|--------------------|-----|------------|-----------|
| Pallet wrap        | 3   | 1,200.00   | 3,600.00  |
| Forklift rental    | 1.5 | PHP 800.00 | PHP 1,200.00 |
| Total              |     |            | 4,800.00  |
| Ghost row          | 1   | 1.00       | 1.00      |
";
        let items = LineItemExtractor::new().extract_all(text);
        assert_eq!(
            items,
            vec![
                item("Pallet wrap", "3", "1200.00", "3600.00"),
                item("Forklift rental", "1.5", "800.00", "1200.00"),
            ]
        );
    }

    #[test]
    fn test_rows_outside_region_are_ignored() {
        let text = "\
Reference 12 500.00 6000.00
Items:
Carton box 4 25.00 100.00
TOTAL: 100.00
Stray row 1 9.00 9.00
";
        let items = LineItemExtractor::new().extract_all(text);
        assert_eq!(items, vec![item("Carton box", "4", "25.00", "100.00")]);
    }

    #[test]
    fn test_labeled_section_after_gap_ends_table() {
        let text = "\
Items:
Carton box 4 25.00 100.00

Remarks: spare part 1 9.00 9.00
Notes
Fragile 2 5.00 10.00
";
        let items = LineItemExtractor::new().extract_all(text);
        assert_eq!(items, vec![item("Carton box", "4", "25.00", "100.00")]);
        assert_eq!(
            LineItemExtractor::new().extract(text),
            Some(item("Carton box", "4", "25.00", "100.00"))
        );
    }

    #[test]
    fn test_column_header_after_gap_keeps_table() {
        let text = "\
Items:

Description   Qty   Price   Total
Carton box 4 25.00 100.00
";
        let items = LineItemExtractor::new().extract_all(text);
        assert_eq!(items, vec![item("Carton box", "4", "25.00", "100.00")]);
    }

    #[test]
    fn test_no_header_no_items() {
        let text = "Industrial Fan Motor     2    1500.00    3000.00";
        assert!(LineItemExtractor::new().extract_all(text).is_empty());
    }

    #[test]
    fn test_row_shapes() {
        assert_eq!(
            parse_line_item("1. Tarpaulin 6x8 ft   2 pcs   350.00   700.00"),
            Some(item("Tarpaulin 6x8 ft", "2", "350.00", "700.00"))
        );
        assert_eq!(
            parse_line_item("Shrink film 3 x 120.00 = 360.00"),
            Some(item("Shrink film", "3", "120.00", "360.00"))
        );
        assert_eq!(parse_line_item("Description   Qty   Price   Total"), None);
        assert_eq!(parse_line_item("Returned crate  0  50.00  0.00"), None);
        assert_eq!(parse_line_item("-----------------------------"), None);
    }
}
