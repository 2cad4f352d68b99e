//! Price normalization.
//!
//! Amounts are kept as exact decimals. Both `1,299.00` and `1.299,00` styles
//! are accepted: the last separator is decimal when one or two digits follow
//! it, otherwise every separator groups thousands.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use super::{NormalizedValue, Rejection};

/// Spaces only group thousands (`1 234,50`); otherwise the number runs over
/// digits and separators, so `19.99 2-pack` stops before the pack size.
static AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,3}(?:[\s\u{00a0}]\d{3})+(?:[.,]\d{1,2})?|\d[\d.,]*\d|\d").unwrap()
});

static ISO_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z]{3})\b").unwrap());

static SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:Mex|[A-Z]{1,2})?[$€£¥₹₩₽]").unwrap());

/// Display symbols for ISO 4217 codes.
const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CAD", "C$"),
    ("AUD", "A$"),
    ("INR", "₹"),
    ("CNY", "¥"),
    ("MXN", "Mex$"),
    ("BRL", "R$"),
    ("SGD", "S$"),
];

pub fn symbol_for_code(code: &str) -> Option<&'static str> {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, symbol)| *symbol)
}

/// Normalize a price. `qualifier` is a currency code found next to the
/// amount; when absent the currency is read from the text itself.
pub fn normalize(text: &str, qualifier: Option<&str>) -> Result<NormalizedValue, Rejection> {
    let amount_match = AMOUNT
        .find(text)
        .ok_or_else(|| Rejection::NoNumber(text.to_string()))?;
    let amount =
        parse_amount(amount_match.as_str()).ok_or_else(|| Rejection::NoNumber(text.to_string()))?;

    if amount <= Decimal::ZERO {
        return Err(Rejection::NonPositive(amount));
    }

    Ok(NormalizedValue::Money {
        amount,
        currency_symbol: currency(text, qualifier),
    })
}

/// Parse the numeric part of a price, tolerating grouping separators and spaces.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let cleaned = cleaned.trim_matches(|c: char| c == ',' || c == '.');

    let normalized = match cleaned.rfind(|c: char| c == ',' || c == '.') {
        Some(pos) if (1..=2).contains(&(cleaned.len() - pos - 1)) => {
            let integer: String = cleaned[..pos].chars().filter(char::is_ascii_digit).collect();
            format!("{}.{}", integer, &cleaned[pos + 1..])
        }
        _ => cleaned.chars().filter(char::is_ascii_digit).collect(),
    };

    Decimal::from_str(&normalized).ok()
}

fn currency(text: &str, qualifier: Option<&str>) -> Option<String> {
    if let Some(code) = qualifier.map(str::trim).filter(|c| !c.is_empty()) {
        return Some(symbol_for_code(code).unwrap_or(code).to_string());
    }

    let known_code = ISO_CODE
        .captures_iter(text)
        .find_map(|caps| symbol_for_code(&caps[1]));
    if let Some(symbol) = known_code {
        return Some(symbol.to_string());
    }

    SYMBOL.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn money(amount: &str, symbol: Option<&str>) -> NormalizedValue {
        NormalizedValue::Money {
            amount: dec(amount),
            currency_symbol: symbol.map(String::from),
        }
    }

    #[test]
    fn test_symbol_in_text() {
        assert_eq!(normalize("$19.99", None), Ok(money("19.99", Some("$"))));
        assert_eq!(normalize("£ 7", None), Ok(money("7", Some("£"))));
        assert_eq!(normalize("C$ 1,299.00", None), Ok(money("1299.00", Some("C$"))));
    }

    #[test]
    fn test_code_qualifier() {
        assert_eq!(normalize("25.00", Some("EUR")), Ok(money("25.00", Some("€"))));
        assert_eq!(normalize("25.00", Some("CHF")), Ok(money("25.00", Some("CHF"))));
    }

    #[test]
    fn test_code_in_text() {
        assert_eq!(normalize("BRL 10,50", None), Ok(money("10.50", Some("R$"))));
    }

    #[test]
    fn test_no_currency() {
        assert_eq!(normalize("12.49", None), Ok(money("12.49", None)));
    }

    #[test]
    fn test_parse_amount_styles() {
        assert_eq!(parse_amount("1,299.00"), Some(dec("1299.00")));
        assert_eq!(parse_amount("1.299,00"), Some(dec("1299.00")));
        assert_eq!(parse_amount("1 234,5"), Some(dec("1234.5")));
        assert_eq!(parse_amount("1,000"), Some(dec("1000")));
        assert_eq!(parse_amount("19."), Some(dec("19")));
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_trailing_numbers_not_joined() {
        assert_eq!(normalize("$19.99 2-pack", None), Ok(money("19.99", Some("$"))));
        assert_eq!(normalize("£4.50 750 ml", None), Ok(money("4.50", Some("£"))));
        assert_eq!(normalize("1 234,50 €", None), Ok(money("1234.50", Some("€"))));
        assert_eq!(normalize("12 999 $", None), Ok(money("12999", Some("$"))));
    }

    #[test]
    fn test_exact_decimal() {
        match normalize("$0.10", None).unwrap() {
            NormalizedValue::Money { amount, .. } => {
                assert_eq!(amount + dec("0.20"), dec("0.30"));
            }
            other => panic!("unexpected value: {:?}", other),
        }
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            normalize("Currently unavailable", None),
            Err(Rejection::NoNumber("Currently unavailable".to_string()))
        );
        assert_eq!(normalize("$0.00", None), Err(Rejection::NonPositive(dec("0.00"))));
    }
}
