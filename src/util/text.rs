use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// 千分位符號
const NUMBER_ESCAPE_CHAR: &[char] = &[','];

/// Unicode minus sign (U+2212)，部份網站用它取代 ASCII 的 '-'
const UNICODE_MINUS: char = '\u{2212}';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("value is empty")]
    EmptyValue,
    #[error("'{0}' is not a decimal number")]
    InvalidNumber(String),
}

/// Converts the visible text of a price element into an exact `Decimal`.
///
/// The text is trimmed, the unicode minus sign becomes `-`, one leading `+`
/// is dropped and thousands separators are removed. What remains must be a
/// plain decimal literal: an optional `-`, digits and at most one `.`.
///
/// # Example
///
/// ```ignore
/// use rust_decimal_macros::dec;
///
/// let price = to_decimal(Some("2,345.67")).unwrap();
/// assert_eq!(price, dec!(2345.67));
/// ```
pub fn to_decimal(raw: Option<&str>) -> Result<Decimal, NumberError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(NumberError::EmptyValue);
    }

    let signed = trimmed.replace(UNICODE_MINUS, "-");
    let unsigned = signed.strip_prefix('+').unwrap_or(&signed);
    let cleaned = clean_escape_chars(unsigned);
    let invalid = || NumberError::InvalidNumber(trimmed.to_string());

    let scale = fraction_digits(&cleaned).ok_or_else(invalid)?;
    let value = Decimal::from_str(&cleaned).map_err(|_| invalid())?;

    // 超過 Decimal 能保存的位數時 from_str 會直接四捨五入，scale 因此變小
    if value.scale() as usize != scale {
        return Err(invalid());
    }

    Ok(value)
}

/// 回傳小數位數，不是單純的十進位數字時回傳 `None`
///
/// `Decimal::from_str` 也接受底線等字元，這裡先限定格式
fn fraction_digits(s: &str) -> Option<usize> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut parts = digits.splitn(2, '.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();

    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());

    if (integer.is_empty() && fraction.is_empty()) || !all_digits(integer) || !all_digits(fraction)
    {
        return None;
    }

    Some(fraction.len())
}

/// 移除千分位符號
fn clean_escape_chars(s: &str) -> String {
    s.chars().filter(|c| !NUMBER_ESCAPE_CHAR.contains(c)).collect()
}
