//! Locale-aware currency formatting and parsing.
//!
//! The platform transmits prices as canonical numeric strings (`"1234.56"`);
//! operators see and type locale-formatted strings (`"1.234,56"` in pt-BR).
//! [`CurrencyFormat`] converts between the two. Formatting always emits
//! exactly 2 fraction digits, and `parse(format(x)) == x` holds for every
//! non-negative canonical value with 2 fraction digits.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while parsing operator-entered or displayed prices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The input contained no digits at all.
    #[error("price contains no digits")]
    Empty,

    /// The input could not be read as a decimal amount.
    #[error("invalid price: {0:?}")]
    Invalid(String),
}

/// Locale parameters for price display.
///
/// Formatting emits only the number (grouped integer digits plus 2 fraction
/// digits); the currency symbol is kept separate so callers can prefix it
/// where the UI wants it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// Currency symbol for display contexts (not included in `format` output).
    pub symbol: &'static str,
    /// Separator between groups of three integer digits.
    pub thousands_separator: char,
    /// Separator before the fraction digits.
    pub decimal_separator: char,
}

impl CurrencyFormat {
    /// Brazilian real, pt-BR separators (`1.234,56`).
    pub const BRL: Self = Self {
        symbol: "R$",
        thousands_separator: '.',
        decimal_separator: ',',
    };

    /// US dollar, en-US separators (`1,234.56`).
    pub const USD: Self = Self {
        symbol: "$",
        thousands_separator: ',',
        decimal_separator: '.',
    };

    /// Format an amount for display with fixed 2 fraction digits and
    /// locale grouping.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let canonical = canonical_string(amount);
        let (sign, unsigned) = canonical
            .strip_prefix('-')
            .map_or(("", canonical.as_str()), |rest| ("-", rest));
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

        let digit_count = int_part.len();
        let mut grouped = String::with_capacity(digit_count + digit_count / 3);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (digit_count - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(digit);
        }

        format!("{sign}{grouped}{}{frac_part}", self.decimal_separator)
    }

    /// Parse a displayed price back to its canonical decimal value.
    ///
    /// Currency symbols and grouping separators are dropped; the locale
    /// decimal separator maps to `.`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Empty`] when no digits remain after stripping,
    /// or [`PriceError::Invalid`] when the residue is not a decimal number.
    pub fn parse(&self, display: &str) -> Result<Decimal, PriceError> {
        let mut canonical = String::with_capacity(display.len());
        for c in display.chars() {
            if c.is_ascii_digit() || c == '-' {
                canonical.push(c);
            } else if c == self.decimal_separator {
                canonical.push('.');
            }
        }

        if !canonical.chars().any(|c| c.is_ascii_digit()) {
            return Err(PriceError::Empty);
        }

        Decimal::from_str(&canonical).map_err(|_| PriceError::Invalid(display.to_string()))
    }

    /// Interpret raw operator input as minor currency units.
    ///
    /// All non-digit characters are stripped and the remaining digits are
    /// divided by 100, so typing digits left-to-right behaves like a cash
    /// register: `"1234"` becomes `12.34`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Empty`] when the input holds no digits, or
    /// [`PriceError::Invalid`] when the digit string is too long to
    /// represent.
    pub fn from_minor_units(&self, raw: &str) -> Result<Decimal, PriceError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(PriceError::Empty);
        }

        let minor_units: i64 = digits
            .parse()
            .map_err(|_| PriceError::Invalid(raw.to_string()))?;

        Ok(Decimal::new(minor_units, 2))
    }
}

/// Canonical numeric string for transmission: fixed scale of 2, `.` as the
/// decimal separator, no grouping (e.g., `"50.00"`).
#[must_use]
pub fn canonical_string(amount: Decimal) -> String {
    let mut rescaled = amount;
    rescaled.rescale(2);
    rescaled.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn format_brl_groups_thousands() {
        let amount = Decimal::from_str("1234567.89").unwrap();
        assert_eq!(CurrencyFormat::BRL.format(amount), "1.234.567,89");
    }

    #[test]
    fn format_usd_groups_thousands() {
        let amount = Decimal::from_str("1234567.89").unwrap();
        assert_eq!(CurrencyFormat::USD.format(amount), "1,234,567.89");
    }

    #[test]
    fn format_pads_to_two_fraction_digits() {
        assert_eq!(CurrencyFormat::BRL.format(Decimal::from_str("7").unwrap()), "7,00");
        assert_eq!(CurrencyFormat::BRL.format(Decimal::from_str("7.5").unwrap()), "7,50");
    }

    #[test]
    fn parse_strips_symbols_and_grouping() {
        let parsed = CurrencyFormat::BRL.parse("R$ 1.234,56").unwrap();
        assert_eq!(parsed.to_string(), "1234.56");

        let parsed = CurrencyFormat::USD.parse("$1,234.56").unwrap();
        assert_eq!(parsed.to_string(), "1234.56");
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(CurrencyFormat::BRL.parse("R$ "), Err(PriceError::Empty));
        assert_eq!(CurrencyFormat::BRL.parse(""), Err(PriceError::Empty));
    }

    #[test]
    fn parse_format_round_trips_canonical_values() {
        for canonical in ["0.00", "0.01", "9.99", "12.34", "999.99", "1234.56", "1234567.89"] {
            let amount = Decimal::from_str(canonical).unwrap();
            for format in [CurrencyFormat::BRL, CurrencyFormat::USD] {
                let display = format.format(amount);
                assert_eq!(format.parse(&display).unwrap(), amount, "via {display:?}");
            }
        }
    }

    #[test]
    fn minor_units_behave_like_a_cash_register() {
        let format = CurrencyFormat::BRL;
        assert_eq!(format.from_minor_units("1234").unwrap().to_string(), "12.34");
        assert_eq!(format.from_minor_units("5000").unwrap().to_string(), "50.00");
        assert_eq!(format.from_minor_units("7").unwrap().to_string(), "0.07");
    }

    #[test]
    fn minor_units_strip_non_digits() {
        let format = CurrencyFormat::BRL;
        assert_eq!(format.from_minor_units("R$ 12,34").unwrap().to_string(), "12.34");
        assert_eq!(format.from_minor_units("abc"), Err(PriceError::Empty));
    }

    #[test]
    fn canonical_string_uses_fixed_scale() {
        assert_eq!(canonical_string(Decimal::from_str("50").unwrap()), "50.00");
        assert_eq!(canonical_string(Decimal::from_str("12.3").unwrap()), "12.30");
    }
}
