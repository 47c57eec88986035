//! Number rendering and rounding
//!
//! Values are displayed the way a browser prints a number: shortest
//! round-trip digits, no trailing `.0`, exponent notation outside
//! `[1e-6, 1e21)`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Largest number of decimal places a value can be rounded to
pub const MAX_DECIMAL_PLACES: u32 = 28;

/// Format a number in default decimal form.
///
/// ```rust
/// use formulary_core::format_number;
///
/// assert_eq!(format_number(2508.0), "2508");
/// assert_eq!(format_number(4.18), "4.18");
/// assert_eq!(format_number(1e-7), "1e-7");
/// assert_eq!(format_number(f64::INFINITY), "Infinity");
/// ```
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Covers -0.0 as well
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{}", n);
    }

    // `{:e}` yields `1e21` / `1.5e-7`; positive exponents carry an explicit sign
    let s = format!("{:e}", n);
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => s,
    }
}

/// Round half away from zero on the exact binary value of `value`.
///
/// `1.005` is stored as `1.00499999999999989...`, so it rounds to `1.0` at
/// two places. Non-finite values are returned unchanged.
///
/// ```rust
/// use formulary_core::round_to;
///
/// assert_eq!(round_to(140.35087719298245, 4), 140.3509);
/// assert_eq!(round_to(-2.5, 0), -3.0);
/// ```
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let places = places.min(MAX_DECIMAL_PLACES);

    match Decimal::from_f64_retain(value) {
        // Go through the decimal text so the result is the f64 nearest to it
        Some(exact) => exact
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
            .to_string()
            .parse()
            .unwrap_or(value),
        // Outside the decimal range the value has no fractional digits to drop
        None if value.abs() >= 1.0 => value,
        None => {
            let factor = 10f64.powi(places as i32);
            (value * factor).round() / factor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_have_no_fraction() {
        assert_eq!(format_number(2508.0), "2508");
        assert_eq!(format_number(-20.0), "-20");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_number(4.18), "4.18");
        assert_eq!(format_number(140.3509), "140.3509");
        assert_eq!(format_number(0.001), "0.001");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(2.5e-8), "2.5e-8");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-1.5e22), "-1.5e+22");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to(140.35087719298245, 4), 140.3509);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(0.00005, 4), 0.0001);
        assert_eq!(round_to(-0.00005, 4), -0.0001);
        assert_eq!(round_to(1.23456789, 2), 1.23);
    }

    #[test]
    fn test_round_uses_exact_binary_value() {
        assert_eq!(round_to(1.005, 2), 1.0);
    }

    #[test]
    fn test_round_non_finite_and_large() {
        assert_eq!(round_to(f64::INFINITY, 4), f64::INFINITY);
        assert_eq!(round_to(f64::NEG_INFINITY, 4), f64::NEG_INFINITY);
        assert!(round_to(f64::NAN, 4).is_nan());
        assert_eq!(round_to(1e30, 4), 1e30);
        assert_eq!(round_to(2508.0, 4), 2508.0);
    }
}
