//! fr-CA display formatting for roll values.
//!
//! Every function here is total: unparsable input never panics and never
//! produces the "Non disponible" placeholder. Missing values come out as the
//! empty string.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const GROUP_SEPARATOR: char = '\u{a0}';
const DECIMAL_SEPARATOR: char = ',';
const UNIT_SEPARATOR: char = '\u{a0}';
const CURRENCY_SYMBOL: &str = "$";
const MAX_FRACTION_DIGITS: u32 = 3;
const CURRENCY_FRACTION_DIGITS: u32 = 2;
const UNAVAILABLE_PLACEHOLDER: &str = "non disponible";

const DATETIME_INPUT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
const DATE_OUTPUT_FORMAT: &str = "%d/%m/%Y";

/// Trims `value` and blanks the "Non disponible" placeholder.
pub fn sanitize_display(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.to_lowercase() == UNAVAILABLE_PLACEHOLDER {
        return String::new();
    }
    trimmed.to_string()
}

/// Canadian-dollar amount, e.g. `1 516 700,00 $`. Empty and unparsable
/// amounts are blank, as are amounts that round to zero cents.
pub fn currency(raw: &str) -> String {
    let Some(amount) = parse_decimal(raw) else {
        return String::new();
    };
    let cents = amount.round_dp_with_strategy(
        CURRENCY_FRACTION_DIGITS,
        RoundingStrategy::MidpointAwayFromZero,
    );
    if cents.is_zero() {
        return String::new();
    }
    format!(
        "{}{UNIT_SEPARATOR}{CURRENCY_SYMBOL}",
        group_decimal(cents, CURRENCY_FRACTION_DIGITS, CURRENCY_FRACTION_DIGITS)
    )
}

/// `dd/mm/yyyy`. Values that do not parse as a date are kept as given.
pub fn date(raw: &str) -> String {
    let cleaned = sanitize_display(raw);
    if cleaned.is_empty() {
        return cleaned;
    }

    match parse_date(&cleaned) {
        Some(parsed) => parsed.format(DATE_OUTPUT_FORMAT).to_string(),
        None => cleaned,
    }
}

/// Surface in square metres, e.g. `5 055,8 m²`.
pub fn area(raw: &str) -> String {
    measure(raw, "m²")
}

/// Linear frontage in metres, e.g. `77,58 m`.
pub fn frontage(raw: &str) -> String {
    measure(raw, "m")
}

/// Locale-formatted plain number. Non-numeric input passes through the
/// display sanitizer unchanged.
pub fn number(raw: &str) -> String {
    match parse_decimal(raw) {
        Some(value) => group_decimal(value, 0, MAX_FRACTION_DIGITS),
        None => sanitize_display(raw),
    }
}

fn measure(raw: &str, unit: &str) -> String {
    match parse_decimal(raw) {
        Some(value) if value.is_zero() => String::new(),
        Some(value) => format!(
            "{}{UNIT_SEPARATOR}{unit}",
            group_decimal(value, 0, MAX_FRACTION_DIGITS)
        ),
        None => sanitize_display(raw),
    }
}

/// Parses roll numerals: surrounding or grouping whitespace (including
/// no-break spaces) is ignored and a comma is accepted as decimal separator.
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == DECIMAL_SEPARATOR { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    if let Some(dt) = DATETIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(dt.date());
    }

    DATE_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

fn group_decimal(value: Decimal, min_fraction: u32, max_fraction: u32) -> String {
    let rounded =
        value.round_dp_with_strategy(max_fraction, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();

    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, fraction.trim_end_matches('0')),
        None => (digits.as_str(), ""),
    };

    let mut fraction = fraction.to_string();
    while (fraction.len() as u32) < min_fraction {
        fraction.push('0');
    }

    let mut output = String::with_capacity(digits.len() + 4);
    if negative {
        output.push('-');
    }
    output.push_str(&group_integer(integer));
    if !fraction.is_empty() {
        output.push(DECIMAL_SEPARATOR);
        output.push_str(&fraction);
    }
    output
}

fn group_integer(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }
    grouped
}
