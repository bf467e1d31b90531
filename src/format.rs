//! Display helpers for money, rates and durations.
//!
//! Amounts are rounded through `rust_decimal` so that cent rounding is
//! half-away-from-zero rather than subject to binary floating-point noise.

use rust_decimal::prelude::*;

/// Converts an `f64` into a `Decimal` rounded to `decimals` places.
///
/// Returns `None` for NaN, infinities and values outside `Decimal`'s range.
pub fn to_decimal(value: f64, decimals: u32) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
}

/// Rounds a monetary amount to whole cents, always carrying two decimals.
pub fn round_cents(value: f64) -> Decimal {
    let mut cents = to_decimal(value, 2).unwrap_or_default();
    cents.rescale(2);
    cents
}

/// Formats a number with thousands separators and a fixed number of decimals.
pub fn format_number(value: f64, decimals: u32) -> String {
    let Some(rounded) = to_decimal(value, decimals) else {
        return value.to_string();
    };
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.prec$}", rounded.abs(), prec = decimals as usize);
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

fn currency_prefix(code: &str) -> String {
    let code = code.trim().to_ascii_uppercase();
    match code.as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        "INR" => "₹".to_string(),
        "CAD" => "CA$".to_string(),
        "AUD" => "A$".to_string(),
        _ => format!("{code} "),
    }
}

/// Formats an amount in the given ISO currency, always with two decimals.
///
/// `(1234.5, "USD")` becomes `$1,234.50`, negatives are `-$1.00`. Codes
/// without a known symbol are used as the prefix, as in `CHF 1.00`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let formatted = format_number(amount, 2);
    let prefix = currency_prefix(currency);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-{prefix}{rest}"),
        None => format!("{prefix}{formatted}"),
    }
}

/// Formats a rate given in percent, `6.5` becomes `6.50%`.
pub fn format_percentage(rate: f64, decimals: u32) -> String {
    format!("{}%", format_number(rate, decimals))
}

/// Human-readable duration such as `2 years, 6 months`.
pub fn format_duration(months: u32) -> String {
    fn plural(n: u32, unit: &str) -> String {
        if n == 1 {
            format!("{n} {unit}")
        } else {
            format!("{n} {unit}s")
        }
    }

    if months < 12 {
        return plural(months, "month");
    }
    let years = months / 12;
    let remaining = months % 12;
    if remaining == 0 {
        plural(years, "year")
    } else {
        format!("{}, {}", plural(years, "year"), plural(remaining, "month"))
    }
}

/// Parses user-typed currency text, ignoring `$`, commas and whitespace.
pub fn parse_currency(text: &str) -> Option<f64> {
    let clean: String = text
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    if clean.is_empty() {
        return None;
    }
    clean.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5, "USD"), "$1,234.50");
        assert_eq!(format_currency(0.0, "USD"), "$0.00");
        assert_eq!(format_currency(536.8216230121398, "USD"), "$536.82");
        assert_eq!(format_currency(10_000_000.0, "USD"), "$10,000,000.00");
        assert_eq!(format_currency(-1.0, "USD"), "-$1.00");
    }

    #[test]
    fn test_format_currency_uses_code() {
        assert_eq!(format_currency(1234.5, "EUR"), "€1,234.50");
        assert_eq!(format_currency(1234.5, "gbp"), "£1,234.50");
        assert_eq!(format_currency(-2.0, "CAD"), "-CA$2.00");
        assert_eq!(format_currency(99.999, "CHF"), "CHF 100.00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1_000_000.0, 0), "1,000,000");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1234.5678, 2), "1,234.57");
        assert_eq!(format_number(f64::NAN, 2), "NaN");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(6.5, 2), "6.50%");
        assert_eq!(format_percentage(0.0, 1), "0.0%");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(1), "1 month");
        assert_eq!(format_duration(6), "6 months");
        assert_eq!(format_duration(12), "1 year");
        assert_eq!(format_duration(18), "1 year, 6 months");
        assert_eq!(format_duration(25), "2 years, 1 month");
        assert_eq!(format_duration(360), "30 years");
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("$1,234.56"), Some(1234.56));
        assert_eq!(parse_currency(" 100 "), Some(100.0));
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("abc"), None);
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(536.8216230121398), dec!(536.82));
        assert_eq!(round_cents(0.125), dec!(0.13));
        assert_eq!(round_cents(f64::INFINITY), Decimal::ZERO);
        assert_eq!(round_cents(1000.0).to_string(), "1000.00");
    }
}
