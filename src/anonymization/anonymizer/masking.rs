//! Value-level masking, rounding, banding, and date shifting
//!
//! Pure functions: none of these touch the token vault.

use crate::anonymization::models::sheet::format_number;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

/// Date written when a date cannot be kept
pub const PLACEHOLDER_DATE: &str = "1900-01-01";

/// Replacement for every detected credit-card number
pub const MASKED_CARD: &str = "****-****-****-1234";

/// Replacement for zip / postal codes
pub const MASKED_ZIP: &str = "00000";

/// Output format for shifted dates
const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";

/// Full-string date layouts tried in order
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y%m%d",
];

/// Date-time layouts tried after the plain date layouts
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// A labeled compensation bucket, `[lower, upper)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryBand {
    /// Inclusive lower bound
    pub lower: f64,
    /// Exclusive upper bound; `None` for the open-ended top band
    pub upper: Option<f64>,
    /// Label written to the cell
    pub label: &'static str,
}

/// Compensation bands used in range mode
pub const SALARY_BANDS: [SalaryBand; 6] = [
    SalaryBand {
        lower: 0.0,
        upper: Some(50_000.0),
        label: "$30,000 - $50,000",
    },
    SalaryBand {
        lower: 50_000.0,
        upper: Some(75_000.0),
        label: "$50,000 - $75,000",
    },
    SalaryBand {
        lower: 75_000.0,
        upper: Some(100_000.0),
        label: "$75,000 - $100,000",
    },
    SalaryBand {
        lower: 100_000.0,
        upper: Some(150_000.0),
        label: "$100,000 - $150,000",
    },
    SalaryBand {
        lower: 150_000.0,
        upper: Some(200_000.0),
        label: "$150,000 - $200,000",
    },
    SalaryBand {
        lower: 200_000.0,
        upper: None,
        label: "$200,000+",
    },
];

/// Label for amounts below zero in range mode
pub const NEGATIVE_BAND: &str = "$***,***";

/// Every ASCII digit in `value`, in order
pub fn extract_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Last four digits, left-padded with zeros when fewer are present
fn last_four(digits: &str) -> String {
    let tail = &digits[digits.len().saturating_sub(4)..];
    format!("{tail:0>4}")
}

/// `***-**-<last4>`
pub fn mask_ssn(value: &str) -> String {
    format!("***-**-{}", last_four(&extract_digits(value)))
}

/// `***-***-<last4>`, fully masked when fewer than four digits are present
pub fn mask_phone(value: &str) -> String {
    let digits = extract_digits(value);
    if digits.len() < 4 {
        return "***-***-****".to_string();
    }
    format!("***-***-{}", last_four(&digits))
}

/// Parse a monetary or numeric amount
///
/// Thousands separators, currency symbols, percent signs, and whitespace are
/// stripped. The longest leading numeric prefix is used, so `"85000 USD"`
/// parses while `"n/a"` does not.
pub fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '%' | '€' | '£' | '¥') && !c.is_whitespace())
        .collect();

    leading_number(&cleaned)
}

/// Longest prefix of `s` that parses as a finite number
fn leading_number(s: &str) -> Option<f64> {
    let ends: Vec<usize> = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .collect();

    ends.into_iter().rev().find_map(|end| {
        let prefix = &s[..end];
        // Rust accepts "inf"/"nan" spellings that are not numbers in a sheet
        if !prefix.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.')) {
            return None;
        }
        prefix.parse::<f64>().ok().filter(|n| n.is_finite())
    })
}

/// Round half up, the way spreadsheet formulas and JS `Math.round` do
pub fn round_half_up(n: f64) -> f64 {
    let rounded = (n + 0.5).floor();
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Round to the nearest multiple of `step`
pub fn round_to_step(n: f64, step: f64) -> f64 {
    let rounded = round_half_up(n / step) * step;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Render a rounded amount with a fixed number of decimals (0 means integer text)
pub fn format_amount(n: f64, decimals: usize) -> String {
    if decimals == 0 {
        format_number(n)
    } else {
        format!("{n:.decimals$}")
    }
}

/// Range-mode label for a compensation amount
pub fn salary_band(amount: f64) -> &'static str {
    if amount < 0.0 {
        return NEGATIVE_BAND;
    }
    SALARY_BANDS
        .iter()
        .find(|band| band.upper.map(|upper| amount < upper).unwrap_or(true))
        .map(|band| band.label)
        .unwrap_or(NEGATIVE_BAND)
}

/// Parse a date in any of the accepted layouts
///
/// Values that start with an ISO date (e.g. `2024-03-15T08:00:00Z`) are
/// accepted by their date prefix.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.date_naive());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.date());
    }

    value
        .get(..10)
        .filter(|_| has_iso_date_prefix(value))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Shift a date by `days`, rendered as `YYYY-MM-DD`
pub fn shift_date(date: NaiveDate, days: i64) -> Option<String> {
    date.checked_add_signed(Duration::days(days))
        .map(|shifted| shifted.format(DATE_OUTPUT_FORMAT).to_string())
}

/// Parse and shift; `None` when the value is not a recognizable date
pub fn shift_date_text(value: &str, days: i64) -> Option<String> {
    parse_date(value).and_then(|date| shift_date(date, days))
}

/// `YYYY-MM-DD...` or `MM/DD/YYYY...`
pub fn is_date_shaped(value: &str) -> bool {
    has_iso_date_prefix(value) || has_us_date_prefix(value)
}

fn has_iso_date_prefix(value: &str) -> bool {
    digit_layout(value, "dddd-dd-dd")
}

fn has_us_date_prefix(value: &str) -> bool {
    digit_layout(value, "dd/dd/dddd")
}

/// `layout` uses `d` for any ASCII digit; other characters match literally
fn digit_layout(value: &str, layout: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= layout.len()
        && layout.bytes().zip(bytes).all(|(expected, actual)| match expected {
            b'd' => actual.is_ascii_digit(),
            literal => literal == *actual,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("123-45-6789", "***-**-6789" ; "formatted")]
    #[test_case("123456789", "***-**-6789" ; "digits only")]
    #[test_case("12", "***-**-0012" ; "short padded")]
    #[test_case("unknown", "***-**-0000" ; "no digits")]
    fn test_mask_ssn(input: &str, expected: &str) {
        assert_eq!(mask_ssn(input), expected);
    }

    #[test_case("(555) 123-4567", "***-***-4567" ; "us format")]
    #[test_case("+44 20 7946 0958", "***-***-0958" ; "international")]
    #[test_case("123", "***-***-****" ; "too short")]
    #[test_case("", "***-***-****" ; "empty")]
    fn test_mask_phone(input: &str, expected: &str) {
        assert_eq!(mask_phone(input), expected);
    }

    #[test_case("$87,000", Some(87000.0) ; "currency")]
    #[test_case("12.5%", Some(12.5) ; "percent")]
    #[test_case("85000 USD", Some(85000.0) ; "trailing text")]
    #[test_case("-1,200.50", Some(-1200.5) ; "negative")]
    #[test_case("n/a", None ; "not a number")]
    #[test_case("", None ; "empty")]
    #[test_case("inf", None ; "infinity spelling")]
    fn test_parse_amount(input: &str, expected: Option<f64>) {
        assert_eq!(parse_amount(input), expected);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to_step(87_049.0, 100.0), 87_000.0);
        assert_eq!(round_to_step(87_050.0, 100.0), 87_100.0);
        assert_eq!(round_to_step(12_345.67, 100.0), 12_300.0);
        assert_eq!(round_to_step(44.0, 10.0), 40.0);
        assert_eq!(round_to_step(-0.2, 1.0), 0.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(format_amount(round_to_step(-20.0, 100.0), 0), "0");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(87_000.0, 0), "87000");
        assert_eq!(format_amount(13.0, 2), "13.00");
    }

    #[test_case(0.0, "$30,000 - $50,000" ; "zero")]
    #[test_case(49_999.99, "$30,000 - $50,000" ; "below fifty")]
    #[test_case(50_000.0, "$50,000 - $75,000" ; "fifty lower bound")]
    #[test_case(87_000.0, "$75,000 - $100,000" ; "eighty seven")]
    #[test_case(149_999.0, "$100,000 - $150,000" ; "below one fifty")]
    #[test_case(199_999.0, "$150,000 - $200,000" ; "below two hundred")]
    #[test_case(200_000.0, "$200,000+" ; "top band")]
    #[test_case(-5.0, "$***,***" ; "negative")]
    fn test_salary_band(amount: f64, expected: &str) {
        assert_eq!(salary_band(amount), expected);
    }

    #[test_case("2024-03-15", Some("2024-04-14") ; "iso")]
    #[test_case("03/15/2024", Some("2024-04-14") ; "us")]
    #[test_case("2024-03-15T08:30:00Z", Some("2024-04-14") ; "rfc3339")]
    #[test_case("2024-03-15 08:30:00", Some("2024-04-14") ; "datetime")]
    #[test_case("March 15, 2024", Some("2024-04-14") ; "long month")]
    #[test_case("not a date", None ; "garbage")]
    #[test_case("2024-13-45", None ; "invalid calendar date")]
    fn test_shift_date_text(input: &str, expected: Option<&str>) {
        assert_eq!(shift_date_text(input, 30).as_deref(), expected);
    }

    #[test]
    fn test_shift_date_crosses_year() {
        assert_eq!(shift_date_text("1985-12-01", 90).as_deref(), Some("1986-03-01"));
    }

    #[test_case("2024-03-15", true ; "iso")]
    #[test_case("2024-03-15 extra", true ; "iso prefix")]
    #[test_case("03/15/2024", true ; "us")]
    #[test_case("3/15/2024", false ; "unpadded us")]
    #[test_case("Q1 2024", false ; "text")]
    fn test_is_date_shaped(input: &str, expected: bool) {
        assert_eq!(is_date_shaped(input), expected);
    }
}
