use std::str::FromStr;
use std::sync::OnceLock;

use fin_core::Money;
use regex::Regex;
use rust_decimal::Decimal;

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([\d,]+\.\d{2})-?").unwrap())
}

/// Extracts a money amount from a fixed-width column. A trailing `-` is a
/// marker only (column identity, not the minus sign, determines whether the
/// amount is a debit or a credit) so it is stripped, never applied as a
/// sign flip.
pub fn extract_amount(column_text: &str) -> Option<Money> {
    let captures = amount_pattern().captures(column_text)?;
    let raw = captures.get(1)?.as_str().replace(',', "");
    let decimal = Decimal::from_str(&raw).ok()?;
    Some(Money::from_decimal(decimal))
}
