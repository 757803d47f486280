//! Monetary token parsing.
//!
//! Statements print amounts as digit groups with optional thousands
//! separators and exactly two fraction digits (`1,411.99`, `20.09`).
//! Anything else is rejected so the caller can drop the row.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

static AMOUNT_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}$").expect("amount shape regex")
});

/// Parse an unsigned amount token such as `1,411.99`.
pub fn parse_amount(token: &str) -> Option<Decimal> {
    let token = token.trim();
    if !AMOUNT_SHAPE.is_match(token) {
        return None;
    }
    Decimal::from_str(&token.replace(',', "")).ok()
}

/// Parse a running-balance token.
///
/// Overdrafts are printed differently per bank: `1,234.56-`, `-1,234.56`
/// or `(1,234.56)`. All three come back negative.
pub fn parse_balance(token: &str) -> Option<Decimal> {
    let token = token.trim();
    let (body, negative) = if let Some(inner) = token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
    {
        (inner, true)
    } else if let Some(body) = token.strip_suffix('-') {
        (body, true)
    } else if let Some(body) = token.strip_prefix('-') {
        (body, true)
    } else {
        (token, false)
    };

    let value = parse_amount(body.trim())?;
    if negative && !value.is_zero() {
        Some(-value)
    } else {
        Some(value)
    }
}

/// Parse one cell of a two-column debit/credit layout. An empty cell or a
/// lone `-` means nothing was booked in that column.
pub fn parse_column_amount(token: &str) -> Option<Decimal> {
    let token = token.trim();
    if token.is_empty() || token == "-" {
        return Some(Decimal::new(0, 2));
    }
    parse_amount(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,411.99"), Some(dec!(1411.99)));
        assert_eq!(parse_amount("20.09"), Some(dec!(20.09)));
        assert_eq!(parse_amount("1234567.00"), Some(dec!(1234567.00)));
        assert_eq!(parse_amount(" 0.50 "), Some(dec!(0.50)));
    }

    #[test]
    fn test_parse_amount_rejects_bad_shapes() {
        assert_eq!(parse_amount("1,41.99"), None);
        assert_eq!(parse_amount("1411.9"), None);
        assert_eq!(parse_amount("1411"), None);
        assert_eq!(parse_amount(",411.99"), None);
        assert_eq!(parse_amount("12,3456.00"), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_parse_balance_overdraft_forms() {
        assert_eq!(parse_balance("2,780.16"), Some(dec!(2780.16)));
        assert_eq!(parse_balance("1,234.56-"), Some(dec!(-1234.56)));
        assert_eq!(parse_balance("-1,234.56"), Some(dec!(-1234.56)));
        assert_eq!(parse_balance("(1,234.56)"), Some(dec!(-1234.56)));
        assert_eq!(parse_balance("0.00-"), Some(dec!(0.00)));
        assert_eq!(parse_balance("1,2.00-"), None);
    }

    #[test]
    fn test_parse_column_amount_placeholder() {
        assert_eq!(parse_column_amount("-"), Some(dec!(0.00)));
        assert_eq!(parse_column_amount(""), Some(dec!(0.00)));
        assert_eq!(parse_column_amount("78.00"), Some(dec!(78.00)));
        assert_eq!(parse_column_amount("7 8.00"), None);
    }
}
