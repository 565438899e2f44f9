//! Common regex patterns for logistics invoice and waybill extraction.
//!
//! Label patterns only look across spaces and tabs between a keyword and its
//! value, so a keyword never pairs with a value on a different line.

use lazy_static::lazy_static;
use regex::Regex;

/// Plain decimal, optionally with comma thousands separators.
const NUMBER: &str = r"\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?";

/// Currency tokens recognized in front of or after an amount.
const CURRENCY: &str = r"PHP|USD|₱|\$";

/// Calendar date shapes: ISO, month name first, day first with month name, numeric.
const DATE_VALUE: &str = concat!(
    r"\d{4}[-/.]\d{1,2}[-/.]\d{1,2}",
    r"|(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?[ \t]+\d{1,2}(?:st|nd|rd|th)?,?[ \t]+\d{4}",
    r"|\d{1,2}(?:st|nd|rd|th)?[ \t]+(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?,?[ \t]+\d{4}",
    r"|\d{1,2}[-/.]\d{1,2}[-/.](?:\d{4}|\d{2})",
);

const SENDER_LABEL: &str =
    r"(?:from|shipper|sender|consignor|shipped[ \t]+by|pick[ \t]*up[ \t]+from)(?:'s)?(?:[ \t]+(?:name|details|info))?";

const RECEIVER_LABEL: &str = r"(?:to|consignee|receiver|recipient|ship[ \t]+to|deliver(?:ed)?[ \t]+to|bill(?:ed)?[ \t]+to|sold[ \t]+to)(?:'s)?(?:[ \t]+(?:name|details|info))?";

/// Rest of the label line plus every following non-blank line.
const BLOCK: &str = r"(.*(?:\n[ \t]*\S.*)*)";

lazy_static! {
    // Invoice number
    pub static ref INVOICE_NUMBER_LABELED: Regex = Regex::new(
        r"(?i)\b(?:invoice|inv)\b\.?[ \t]*(?:no\b\.?|number\b|num\b\.?|#)[ \t]*[:#.\-]?[ \t]*([A-Z0-9][A-Z0-9/\-]*)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_BARE: Regex = Regex::new(
        r"(?i)\binvoice\b[ \t]*[:#][ \t]*([A-Z0-9][A-Z0-9/\-]*)"
    ).unwrap();

    // Dates
    pub static ref DATE_LABELED: Regex = Regex::new(&format!(
        r"(?i)\b(?:date|dated|issued(?:[ \t]+on)?)\b[ \t]*[:\-]?[ \t]*({})\b",
        DATE_VALUE
    )).unwrap();

    pub static ref DATE_ANYWHERE: Regex = Regex::new(&format!(
        r"(?i)\b({})\b",
        DATE_VALUE
    )).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})$"
    ).unwrap();

    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4}|\d{2})$"
    ).unwrap();

    pub static ref DATE_MONTH_FIRST: Regex = Regex::new(
        r"(?i)^([a-z]+)\.?[ \t]+(\d{1,2})(?:st|nd|rd|th)?,?[ \t]+(\d{4})$"
    ).unwrap();

    pub static ref DATE_DAY_FIRST: Regex = Regex::new(
        r"(?i)^(\d{1,2})(?:st|nd|rd|th)?[ \t]+([a-z]+)\.?,?[ \t]+(\d{4})$"
    ).unwrap();

    // Parties
    pub static ref SENDER_WITH_COLON: Regex = Regex::new(&format!(
        r"(?im)^[ \t]*{}[ \t]*:[ \t]*{}",
        SENDER_LABEL, BLOCK
    )).unwrap();

    pub static ref SENDER_KEYWORD: Regex = Regex::new(&format!(
        r"(?im)^[ \t]*(?:shipper|sender|consignor)\b[ \t]*-?[ \t]*{}",
        BLOCK
    )).unwrap();

    pub static ref RECEIVER_WITH_COLON: Regex = Regex::new(&format!(
        r"(?im)^[ \t]*{}[ \t]*:[ \t]*{}",
        RECEIVER_LABEL, BLOCK
    )).unwrap();

    pub static ref RECEIVER_KEYWORD: Regex = Regex::new(&format!(
        r"(?im)^[ \t]*(?:consignee|receiver|recipient)\b[ \t]*-?[ \t]*{}",
        BLOCK
    )).unwrap();

    /// A line that starts a new labeled section and therefore ends a party block.
    pub static ref KEYWORD_LINE: Regex = Regex::new(
        r"(?i)^(?:invoice|inv\b|date\b|dated\b|issued\b|tracking|waybill|air[ \t]*waybill|awb\b|from[ \t]*:|to[ \t]*:|shipper|sender|consignor|consignee|receiver|recipient|ship[ \t]+to|deliver(?:ed)?[ \t]+to|bill(?:ed)?[ \t]+to|sold[ \t]+to|shipped[ \t]+by|pick[ \t]*up[ \t]+from|total|grand[ \t]+total|sub[ \t]*total|amount\b|balance\b|weight\b|gross[ \t]+weight|items?\b|line[ \t]+items|description\b|particulars\b|qty\b|quantity\b|payment\b|terms\b|remarks\b|notes?\b)"
    ).unwrap();

    // Tracking number
    pub static ref TRACKING_LABELED: Regex = Regex::new(
        r"(?i)\btracking\b[ \t]*(?:no\b\.?|number\b|num\b\.?|#|id\b|code\b)?[ \t]*[:#\-]?[ \t]*([A-Z0-9\-]*\d[A-Z0-9\-]*)"
    ).unwrap();

    pub static ref WAYBILL_LABELED: Regex = Regex::new(
        r"(?i)\b(?:air[ \t]*)?(?:waybill|way[ \t]+bill|awb)\b[ \t]*(?:no\b\.?|number\b|num\b\.?|#)?[ \t]*[:#\-]?[ \t]*([A-Z0-9\-]*\d[A-Z0-9\-]*)"
    ).unwrap();

    // Weight
    pub static ref WEIGHT_LABELED: Regex = Regex::new(
        r"(?i)\bweight\b[^\n\d]*?(\d(?:[\d,]*\d)?(?:\.\d+)?)[ \t]*(kgs|kg|lbs|lb|g)\b"
    ).unwrap();

    pub static ref WEIGHT_ANYWHERE: Regex = Regex::new(
        r"(?i)\b(\d(?:[\d,]*\d)?(?:\.\d+)?)[ \t]*(kgs|kg|lbs|lb|g)\b"
    ).unwrap();

    // Total amount
    pub static ref AMOUNT_LABELED: Regex = Regex::new(&format!(
        r"(?i)\b(?:grand[ \t]+total|total[ \t]+amount(?:[ \t]+due)?|amount[ \t]+due|total[ \t]+due|balance[ \t]+due|total[ \t]+charges)\b[ \t]*(?:\([ \t]*(?P<cur_label>{cur})[ \t]*\))?[ \t]*[:\-]?[ \t]*(?:(?P<cur_pre>{cur})[ \t]*)?(?P<amount>{num})(?:[ \t]*(?P<cur_post>PHP|USD)\b)?",
        cur = CURRENCY, num = NUMBER
    )).unwrap();

    pub static ref AMOUNT_TOTAL: Regex = Regex::new(&format!(
        r"(?im)^[ \t|]*total\b[ \t]*(?:\([ \t]*(?P<cur_label>{cur})[ \t]*\))?[ \t]*[:\-]?[ \t]*(?:(?P<cur_pre>{cur})[ \t]*)?(?P<amount>{num})(?:[ \t]*(?P<cur_post>PHP|USD)\b)?",
        cur = CURRENCY, num = NUMBER
    )).unwrap();

    // Line items
    pub static ref ITEMS_HEADER: Regex = Regex::new(
        r"(?i)^(?:(?:line[ \t]+)?items?|particulars|goods|description[ \t]+of[ \t]+goods)[ \t]*:?[ \t]*$|^(?:no\b|item|description|particulars).*\b(?:qty|quantity)\b"
    ).unwrap();

    pub static ref ITEMS_END: Regex = Regex::new(
        r"(?i)^(?:sub[ \t]*total|grand[ \t]+total|total|amount[ \t]+due|balance[ \t]+due)\b"
    ).unwrap();

    pub static ref LINE_ITEM_COLUMNS: Regex = Regex::new(&format!(
        r"(?i)^(?:\d{{1,3}}[.)]?[ \t|]+)?(?P<description>\p{{L}}.*?)[ \t|]+(?P<quantity>\d+(?:\.\d+)?)(?:[ \t]*(?:pcs|pc|units?|boxes|box|ea|sets?|rolls?|ctns?)\b)?[ \t|]+(?:(?:{cur})[ \t]*)?(?P<unit_price>{num})[ \t|]+(?:(?:{cur})[ \t]*)?(?P<line_total>{num})[ \t|]*$",
        cur = CURRENCY, num = NUMBER
    )).unwrap();

    pub static ref LINE_ITEM_MULTIPLICATION: Regex = Regex::new(&format!(
        r"(?i)^(?P<description>\p{{L}}.*?)[ \t]+(?P<quantity>\d+(?:\.\d+)?)[ \t]*[x×@][ \t]*(?:(?:{cur})[ \t]*)?(?P<unit_price>{num})[ \t]*=[ \t]*(?:(?:{cur})[ \t]*)?(?P<line_total>{num})$",
        cur = CURRENCY, num = NUMBER
    )).unwrap();
}
