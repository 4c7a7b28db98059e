//! Interpretation of the quantity literals upstream nodes send.
//!
//! The godwoken and CKB RPCs are inconsistent about number encoding: the
//! same field may arrive as `"42"` or `"0x2a"` depending on the service
//! and method. Everything integral crossing the RPC boundary goes through
//! here; a literal that fits neither base is an error, never a zero.

use crate::error::ConversionError;

/// Interpret `literal` as an integer: base 10 first, then base 16 with or
/// without the `0x` prefix.
pub fn convert_int(literal: &str) -> Result<u128, ConversionError> {
    if let Ok(value) = literal.parse::<u128>() {
        return Ok(value);
    }

    let digits = literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))
        .unwrap_or(literal);

    u128::from_str_radix(digits, 16).map_err(|_| ConversionError {
        literal: literal.to_owned(),
    })
}

/// [`convert_int`] narrowed to `u64`; a value past `u64::MAX` is treated
/// as unparseable.
pub fn convert_u64(literal: &str) -> Result<u64, ConversionError> {
    let value = convert_int(literal)?;

    u64::try_from(value).map_err(|_| ConversionError {
        literal: literal.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decimal_literals_parse_as_base_10() {
        assert_eq!(convert_int("0").unwrap(), 0);
        assert_eq!(convert_int("42").unwrap(), 42);
        // Digits valid in both bases resolve as decimal.
        assert_eq!(convert_int("10").unwrap(), 10);
    }

    #[test]
    fn hex_literals_parse_as_base_16() {
        assert_eq!(convert_int("0x2a").unwrap(), 42);
        assert_eq!(convert_int("0X2A").unwrap(), 42);
        // Prefix-tolerant: bare hex digits fall through to base 16.
        assert_eq!(convert_int("ff").unwrap(), 255);
    }

    #[test]
    fn garbage_is_an_error_naming_the_literal() {
        let err = convert_int("not_a_number").unwrap_err();
        assert_eq!(err.literal, "not_a_number");

        assert!(convert_int("").is_err());
        assert!(convert_int("0x").is_err());
    }

    #[test]
    fn narrowing_rejects_values_past_u64() {
        assert_eq!(convert_u64("0x2a").unwrap(), 42);
        assert!(convert_u64("0xffffffffffffffffff").is_err());
    }
}
