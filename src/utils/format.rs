//! Display formatting for amounts and dates
//!
//! Amounts are shown in whole currency units; dates are shown as local
//! calendar dates.

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{Local, TimeZone};

use crate::types::Timestamp;

/// Symbol (or code followed by a space) used in front of an amount
fn currency_prefix(currency: &str) -> String {
    match currency {
        "INR" => "₹".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        other => format!("{} ", other),
    }
}

/// Insert digit separators: Indian lakh/crore grouping for INR, thousands otherwise
fn group_digits(digits: &str, indian: bool) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let step = if indian { 2 } else { 3 };

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Format an amount as whole-unit currency, e.g. `₹1,23,457` for INR
///
/// Halves round away from zero.
pub fn format_currency(amount: &BigDecimal, currency: &str) -> String {
    let (units, _) = amount
        .with_scale_round(0, RoundingMode::HalfUp)
        .into_bigint_and_exponent();
    let text = units.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };

    format!(
        "{}{}{}",
        sign,
        currency_prefix(currency),
        group_digits(digits, currency == "INR")
    )
}

/// Format a timestamp as a calendar date in the given time zone, e.g. `5 Jan 2024`
pub fn format_date_in<Tz: TimeZone>(timestamp: Timestamp, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_millis_opt(timestamp).earliest() {
        Some(dt) => dt.format("%-d %b %Y").to_string(),
        None => "-".to_string(),
    }
}

/// Format a timestamp as a local calendar date
pub fn format_date(timestamp: Timestamp) -> String {
    format_date_in(timestamp, &Local)
}

/// Format a timestamp as a wall-clock time in the given time zone, e.g. `03:45 PM`
pub fn format_time_in<Tz: TimeZone>(timestamp: Timestamp, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_millis_opt(timestamp).earliest() {
        Some(dt) => dt.format("%I:%M %p").to_string(),
        None => "-".to_string(),
    }
}

/// Format a timestamp as a local wall-clock time
pub fn format_time(timestamp: Timestamp) -> String {
    format_time_in(timestamp, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    #[test]
    fn inr_uses_indian_grouping() {
        let amount = BigDecimal::from_str("123456.6").unwrap();
        assert_eq!(format_currency(&amount, "INR"), "₹1,23,457");
        assert_eq!(format_currency(&BigDecimal::from(999), "INR"), "₹999");
        assert_eq!(
            format_currency(&BigDecimal::from(10_000_000), "INR"),
            "₹1,00,00,000"
        );
    }

    #[test]
    fn other_currencies_use_thousands() {
        assert_eq!(
            format_currency(&BigDecimal::from(1_234_567), "USD"),
            "$1,234,567"
        );
        assert_eq!(format_currency(&BigDecimal::from(1500), "NPR"), "NPR 1,500");
    }

    #[test]
    fn halves_round_away_from_zero() {
        let half = |s: &str| BigDecimal::from_str(s).unwrap();
        assert_eq!(format_currency(&half("2.5"), "INR"), "₹3");
        assert_eq!(format_currency(&half("0.5"), "INR"), "₹1");
        assert_eq!(format_currency(&half("-2.5"), "INR"), "-₹3");
        assert_eq!(format_currency(&half("2.49"), "INR"), "₹2");
    }

    #[test]
    fn negative_amounts_keep_their_sign() {
        assert_eq!(format_currency(&BigDecimal::from(-2500), "INR"), "-₹2,500");
    }

    #[test]
    fn dates_render_as_calendar_dates() {
        // 2024-01-05T10:00:00Z
        assert_eq!(format_date_in(1_704_448_800_000, &Utc), "5 Jan 2024");
    }

    #[test]
    fn times_render_on_a_twelve_hour_clock() {
        // 2024-01-05T15:45:00Z
        assert_eq!(format_time_in(1_704_469_500_000, &Utc), "03:45 PM");
        assert_eq!(format_time_in(i64::MAX, &Utc), "-");
        assert!(!format_time(1_704_469_500_000).is_empty());
    }
}
