//! Field normalization: raw cell values to comparison-ready forms.
//!
//! Pure functions; a value that cannot be parsed is `Quantity::Missing`,
//! never an error and never zero.

use crate::model::Quantity;

/// Known consumption scale divisors. Any other divisor value leaves the
/// quantity unscaled.
const DIVISOR_SCALES: [f64; 3] = [1.0, 100.0, 1000.0];

/// Decimal places quantities are rounded to after normalization.
const QUANTITY_DECIMALS: i32 = 4;

/// Parse a numeric-looking cell into a quantity. Thousands separators are
/// stripped first; blank or non-numeric input is `Missing`.
pub fn parse_quantity(raw: &str) -> Quantity {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return Quantity::Missing;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Quantity::Value(v),
        _ => Quantity::Missing,
    }
}

/// Scale a consumption quantity by a whitelisted divisor.
///
/// The result is rounded to a fixed precision whether or not the divisor
/// applied, so both paths agree on representation.
pub fn normalize_consumption(quantity: Quantity, divisor: Quantity) -> Quantity {
    let Quantity::Value(q) = quantity else {
        return Quantity::Missing;
    };
    let scaled = match divisor {
        Quantity::Value(d) if d != 0.0 && DIVISOR_SCALES.contains(&d) => q / d,
        _ => q,
    };
    Quantity::Value(round_dp(scaled, QUANTITY_DECIMALS))
}

/// Round to `places` decimal places.
pub fn round_dp(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
