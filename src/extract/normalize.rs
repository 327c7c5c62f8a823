//! Rate unit coercion and base-symbol canonicalization.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::str::FromStr;

/// Largest plausible hourly funding magnitude (50%/h).
/// Anything above is assumed to be a misclassified field.
pub const MAX_HOURLY_RATE: Decimal = dec!(0.5);

const PERCENT_CEILING: Decimal = dec!(100);

/// Parse a JSON scalar (number or numeric string) into a decimal.
///
/// Booleans, nulls and containers are not numeric and yield `None`.
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal_str(&n.to_string())
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Value::String(s) => parse_decimal_str(s.trim()),
        _ => None,
    }
}

fn parse_decimal_str(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Coerce a raw value into an hourly funding fraction.
///
/// Values with magnitude in (1, 100] are read as percentages and divided by
/// 100. A magnitude of exactly 1 is left as-is. After scaling, magnitudes
/// above [`MAX_HOURLY_RATE`] are rejected.
pub fn coerce_rate(value: &Value) -> Option<Decimal> {
    let mut rate = parse_decimal(value)?;

    let magnitude = rate.abs();
    if magnitude > Decimal::ONE && magnitude <= PERCENT_CEILING {
        rate /= PERCENT_CEILING;
    }

    if rate.abs() > MAX_HOURLY_RATE {
        return None;
    }
    Some(rate)
}

/// Canonical base asset of a market symbol.
///
/// Upper-cases, splits on `-`, `/` and `__`, and returns the first non-empty
/// token. Returns `"?"` when there is none.
pub fn base_from_symbol(symbol: &str) -> String {
    let upper = symbol.to_uppercase().replace("__", "-").replace('/', "-");
    upper
        .split('-')
        .map(str::trim)
        .find(|token| !token.is_empty())
        .unwrap_or("?")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_percentages_are_scaled() {
        assert_eq!(coerce_rate(&json!(3.2)), Some(dec!(0.032)));
        assert_eq!(coerce_rate(&json!("1.5")), Some(dec!(0.015)));
        assert_eq!(coerce_rate(&json!(-2)), Some(dec!(-0.02)));
        assert_eq!(coerce_rate(&json!(50)), Some(dec!(0.5)));
    }

    #[test]
    fn test_fractions_pass_through() {
        assert_eq!(coerce_rate(&json!(0.015)), Some(dec!(0.015)));
        assert_eq!(coerce_rate(&json!("-0.0000125")), Some(dec!(-0.0000125)));
        assert_eq!(coerce_rate(&json!(0)), Some(Decimal::ZERO));
        assert_eq!(coerce_rate(&json!("1e-5")), Some(dec!(0.00001)));
    }

    #[test]
    fn test_implausible_magnitudes_rejected() {
        // 60% per hour after scaling
        assert_eq!(coerce_rate(&json!(60)), None);
        assert_eq!(coerce_rate(&json!(250)), None);
        assert_eq!(coerce_rate(&json!(0.75)), None);
        // Exactly 1 stays a fraction, then fails the plausibility guard
        assert_eq!(coerce_rate(&json!(1.0)), None);
    }

    #[test]
    fn test_non_numeric_values_rejected() {
        assert_eq!(coerce_rate(&json!("n/a")), None);
        assert_eq!(coerce_rate(&json!("")), None);
        assert_eq!(coerce_rate(&json!(null)), None);
        assert_eq!(coerce_rate(&json!(true)), None);
        assert_eq!(coerce_rate(&json!({"rate": 0.1})), None);
    }

    #[test]
    fn test_base_from_symbol() {
        assert_eq!(base_from_symbol("BTC/USDT"), "BTC");
        assert_eq!(base_from_symbol("eth-perp"), "ETH");
        assert_eq!(base_from_symbol("A__B-C"), "A");
        assert_eq!(base_from_symbol("-sol-usd"), "SOL");
        assert_eq!(base_from_symbol(""), "?");
        assert_eq!(base_from_symbol("--"), "?");
    }
}
