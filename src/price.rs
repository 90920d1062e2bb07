//! Price text for the label's price block.
//!
//! Prices are converted to integer cents once, so `79.9` splits as `79` and
//! `.90` rather than whatever the float prints as.

use std::fmt;

use crate::settings::DecimalStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceDisplay {
    pub symbol: String,
    /// Whole units, with a leading `-` for negative prices.
    pub integer: String,
    /// `".90"` in split-decimal mode when the price has cents.
    pub decimal: Option<String>,
}

impl fmt::Display for PriceDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.symbol, self.integer, self.decimal.as_deref().unwrap_or(""))
    }
}

/// Nearest cent, half away from zero. Non-finite input is zero.
pub fn to_cents(raw: f64) -> i64 {
    if !raw.is_finite() {
        return 0;
    }
    (raw * 100.0).round() as i64
}

pub fn format_price(raw: f64, style: DecimalStyle, symbol: &str) -> PriceDisplay {
    let cents = to_cents(raw);
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let (integer, decimal) = match style {
        DecimalStyle::Rounded => ((abs + 50) / 100, None),
        DecimalStyle::SplitDecimal => {
            let frac = abs % 100;
            (abs / 100, (frac != 0).then(|| format!(".{frac:02}")))
        }
    };
    let sign = if integer == 0 && decimal.is_none() { "" } else { sign };
    PriceDisplay {
        symbol: symbol.to_string(),
        integer: format!("{sign}{integer}"),
        decimal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_drops_decimals() {
        let p = format_price(79.9, DecimalStyle::Rounded, "$");
        assert_eq!(p.integer, "80");
        assert_eq!(p.decimal, None);
        assert_eq!(p.to_string(), "$80");
        assert_eq!(format_price(12.49, DecimalStyle::Rounded, "$").integer, "12");
        assert_eq!(format_price(12.5, DecimalStyle::Rounded, "$").integer, "13");
    }

    #[test]
    fn split_decimal_keeps_cents_apart() {
        let p = format_price(79.9, DecimalStyle::SplitDecimal, "$");
        assert_eq!(p.integer, "79");
        assert_eq!(p.decimal.as_deref(), Some(".90"));
        assert_eq!(p.to_string(), "$79.90");
    }

    #[test]
    fn split_decimal_whole_price_has_no_fraction() {
        let p = format_price(25.0, DecimalStyle::SplitDecimal, "$");
        assert_eq!(p.integer, "25");
        assert_eq!(p.decimal, None);
    }

    #[test]
    fn float_noise_does_not_leak() {
        // 0.1 + 0.2
        let p = format_price(0.30000000000000004, DecimalStyle::SplitDecimal, "");
        assert_eq!(p.to_string(), "0.30");
        assert_eq!(format_price(19.99, DecimalStyle::SplitDecimal, "").decimal.as_deref(), Some(".99"));
    }

    #[test]
    fn zero_and_garbage() {
        assert_eq!(format_price(0.0, DecimalStyle::Rounded, "$").to_string(), "$0");
        assert_eq!(format_price(f64::NAN, DecimalStyle::SplitDecimal, "$").to_string(), "$0");
        assert_eq!(format_price(-0.2, DecimalStyle::Rounded, "$").to_string(), "$0");
    }

    #[test]
    fn negative_prices_keep_sign() {
        assert_eq!(format_price(-3.25, DecimalStyle::SplitDecimal, "$").to_string(), "$-3.25");
    }
}
