//! Locale-style cell formatting

use serde::{Deserialize, Serialize};

use crate::browser::{CellFormatter, Value};

/// Number, money and date conventions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleFormat {
    pub decimal_separator: char,
    /// Empty disables grouping
    pub thousands_separator: String,
    pub currency_symbol: String,
    /// Place the currency symbol after the amount ("1.234,50 €")
    pub symbol_after: bool,
    pub money_decimals: usize,
    /// Maximum decimals for plain numbers; trailing zeros are dropped
    pub number_decimals: usize,
    /// chrono format string
    pub date_format: String,
}

impl Default for LocaleFormat {
    fn default() -> Self {
        Self {
            decimal_separator: ',',
            thousands_separator: ".".to_string(),
            currency_symbol: "€".to_string(),
            symbol_after: true,
            money_decimals: 2,
            number_decimals: 2,
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

/// Formats cell values according to a [`LocaleFormat`]
#[derive(Debug, Clone, Default)]
pub struct LocaleFormatter {
    locale: LocaleFormat,
}

impl LocaleFormatter {
    pub fn new(locale: LocaleFormat) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> &LocaleFormat {
        &self.locale
    }

    pub fn integer(&self, value: i64) -> String {
        let grouped = group_digits(
            &value.unsigned_abs().to_string(),
            &self.locale.thousands_separator,
        );
        if value < 0 {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    pub fn number(&self, value: f64) -> String {
        let fixed = self.fixed(value, self.locale.number_decimals);
        if !fixed.contains(self.locale.decimal_separator) {
            return fixed;
        }
        fixed
            .trim_end_matches('0')
            .trim_end_matches(self.locale.decimal_separator)
            .to_string()
    }

    pub fn money(&self, value: f64) -> String {
        let amount = self.fixed(value, self.locale.money_decimals);
        let symbol = &self.locale.currency_symbol;
        if symbol.is_empty() {
            amount
        } else if self.locale.symbol_after {
            format!("{} {}", amount, symbol)
        } else if let Some(magnitude) = amount.strip_prefix('-') {
            format!("-{}{}", symbol, magnitude)
        } else {
            format!("{}{}", symbol, amount)
        }
    }

    fn fixed(&self, value: f64, decimals: usize) -> String {
        let text = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (text.as_str(), None),
        };

        let mut out = group_digits(int_part, &self.locale.thousands_separator);
        if let Some(frac) = frac_part {
            out.push(self.locale.decimal_separator);
            out.push_str(frac);
        }

        // No "-0,00"
        let is_zero = text.chars().all(|c| c == '0' || c == '.');
        if value < 0.0 && !is_zero {
            out.insert(0, '-');
        }
        out
    }
}

impl CellFormatter for LocaleFormatter {
    fn format(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Bool(true) => "yes".to_string(),
            Value::Bool(false) => "no".to_string(),
            Value::Int(n) => self.integer(*n),
            Value::Float(n) => self.number(*n),
            Value::Money(n) => self.money(*n),
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.format(&self.locale.date_format).to_string(),
        }
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    if separator.is_empty() || digits.len() <= 3 {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn en() -> LocaleFormatter {
        LocaleFormatter::new(LocaleFormat {
            decimal_separator: '.',
            thousands_separator: ",".to_string(),
            currency_symbol: "$".to_string(),
            symbol_after: false,
            date_format: "%Y-%m-%d".to_string(),
            ..LocaleFormat::default()
        })
    }

    #[test]
    fn groups_thousands() {
        let f = LocaleFormatter::default();
        assert_eq!(f.integer(999), "999");
        assert_eq!(f.integer(1000), "1.000");
        assert_eq!(f.integer(-1234567), "-1.234.567");
        assert_eq!(en().integer(1234567), "1,234,567");
    }

    #[test]
    fn money_places_symbol() {
        assert_eq!(LocaleFormatter::default().money(1234.5), "1.234,50 €");
        assert_eq!(en().money(1234.5), "$1,234.50");
        assert_eq!(en().money(-3.2), "-$3.20");
        assert_eq!(LocaleFormatter::default().money(-3.2), "-3,20 €");
    }

    #[test]
    fn negative_zero_is_plain_zero() {
        assert_eq!(en().money(-0.001), "$0.00");
    }

    #[test]
    fn numbers_drop_trailing_zeros() {
        let f = LocaleFormatter::default();
        assert_eq!(f.number(23.0), "23");
        assert_eq!(f.number(2.5), "2,5");
        assert_eq!(f.number(1500.126), "1.500,13");
    }

    #[test]
    fn dates_and_bools() {
        let f = LocaleFormatter::default();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(f.format(&Value::Date(date)), "09/03/2024");
        assert_eq!(en().format(&Value::Date(date)), "2024-03-09");
        assert_eq!(f.format(&Value::Bool(true)), "yes");
        assert_eq!(f.format(&Value::Null), "");
    }

    #[test]
    fn no_grouping_when_separator_empty() {
        let f = LocaleFormatter::new(LocaleFormat {
            thousands_separator: String::new(),
            ..LocaleFormat::default()
        });
        assert_eq!(f.integer(1234567), "1234567");
    }
}
