//! Money and date formatting for tables and detail views.
//!
//! Everything here is pure: no signals, no DOM.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Groups the integer digits with `separator` every three positions from the right
fn group_thousands(digits: &str, separator: char) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(separator);
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Formats an amount as `$1,234.56`.
///
/// Negative values carry the sign before the symbol (`-$100.00`);
/// `NaN` and infinities are shown as `$0.00`.
pub fn format_money(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let formatted = format!("{:.2}", value.abs());
    let (integer_part, decimal_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    // -0.001 rounds to 0.00 and must not keep its sign
    let negative = value < 0.0 && formatted != "0.00";
    format!(
        "{}${}.{}",
        if negative { "-" } else { "" },
        group_thousands(integer_part, ','),
        decimal_part
    )
}

/// `$1,234.56 USD`
pub fn format_money_with_currency(value: f64, currency: &str) -> String {
    format!("{} {}", format_money(value), currency)
}

/// Amount typed by a user: `"1,250.50"`, `"$300"`. Blank is 0, junk is `NaN`.
pub fn parse_amount(text: &str) -> f64 {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | ' '))
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse().unwrap_or(f64::NAN)
}

fn parse_any(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// ISO date or datetime → `DD/MM/YYYY`. Unparseable input is returned unchanged.
pub fn format_date(value: &str) -> String {
    parse_any(value)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// ISO datetime → `DD/MM/YYYY HH:MM`. Unparseable input is returned unchanged.
pub fn format_datetime(value: &str) -> String {
    parse_any(value)
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Same as [`format_date`] for optional API fields, `-` when absent
pub fn format_date_opt(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map(format_date)
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "$1,234.56");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(999.999), "$1,000.00");
        assert_eq!(format_money(12.5), "$12.50");
    }

    #[test]
    fn test_format_money_negative_and_invalid() {
        assert_eq!(format_money(-100.0), "-$100.00");
        assert_eq!(format_money(-1234.5), "-$1,234.50");
        assert_eq!(format_money(-0.001), "$0.00");
        assert_eq!(format_money(f64::NAN), "$0.00");
        assert_eq!(format_money(f64::INFINITY), "$0.00");
    }

    #[test]
    fn test_format_money_with_currency() {
        assert_eq!(format_money_with_currency(50.0, "USD"), "$50.00 USD");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250.50"), 1250.5);
        assert_eq!(parse_amount(" $300 "), 300.0);
        assert_eq!(parse_amount(""), 0.0);
        assert!(parse_amount("doce").is_nan());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26"), "15/03/2024");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-12-31T23:59:59Z"), "31/12/2024 23:59");
        assert_eq!(format_datetime("2024-12-31 08:05:00"), "31/12/2024 08:05");
    }

    #[test]
    fn test_invalid_dates_pass_through() {
        assert_eq!(format_date("mañana"), "mañana");
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date_opt(None), "-");
        assert_eq!(format_date_opt(Some("")), "-");
    }
}
