// ABOUTME: Hex text codec for colours, as shown in the selector's edit field.
// ABOUTME: Formats RRGGBB / AARRGGBB and parses them back.

use std::fmt;
use std::str::FromStr;

use crate::DeepColour;

/// Characters an editable hex field should accept.
pub const HEX_DIGITS: &str = "0123456789ABCDEFabcdef";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("empty colour string")]
    Empty,

    #[error("expected 6 or 8 hex digits, got {0}")]
    InvalidLength(usize),

    #[error("invalid hex digit '{0}'")]
    InvalidDigit(char),
}

/// Longest text a hex field may hold: 8 digits with alpha, 6 without.
pub fn max_hex_len(include_alpha: bool) -> usize {
    if include_alpha {
        8
    } else {
        6
    }
}

/// Upper-case hex, `AARRGGBB` with alpha or `RRGGBB` without.
pub fn to_display_string(colour: &DeepColour, include_alpha: bool) -> String {
    let argb = colour.to_argb();
    if include_alpha {
        format!("{argb:08X}")
    } else {
        format!("{:06X}", argb & 0x00ff_ffff)
    }
}

/// Parse `RRGGBB` (opaque) or `AARRGGBB`.
///
/// Surrounding whitespace and a leading `#` or `0x` are ignored.
pub fn parse_hex(text: &str) -> Result<DeepColour, HexError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(HexError::Empty);
    }

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidDigit(bad));
    }

    let value = u32::from_str_radix(digits, 16).map_err(|_| HexError::InvalidLength(digits.len()))?;

    match digits.len() {
        6 => Ok(DeepColour::from_argb(0xff00_0000 | value)),
        8 => Ok(DeepColour::from_argb(value)),
        len => Err(HexError::InvalidLength(len)),
    }
}

impl FromStr for DeepColour {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

impl fmt::Display for DeepColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_display_string(self, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_and_without_alpha() {
        let c = DeepColour::from_argb(0x80ff8100);
        assert_eq!(to_display_string(&c, true), "80FF8100");
        assert_eq!(to_display_string(&c, false), "FF8100");
        assert_eq!(c.to_string(), "80FF8100");
    }

    #[test]
    fn six_digits_are_opaque() {
        let c = parse_hex("ff8100").unwrap();
        assert_eq!(c.to_argb(), 0xffff8100);
    }

    #[test]
    fn eight_digits_carry_alpha() {
        let c: DeepColour = "#00FF8100".parse().unwrap();
        assert_eq!(c.alpha(), 0.0);
        assert_eq!(c.to_argb(), 0x00ff8100);
    }

    #[test]
    fn prefixes_and_whitespace_are_ignored() {
        assert_eq!(parse_hex("  0x336699 ").unwrap().to_argb(), 0xff336699);
        assert_eq!(parse_hex("#336699").unwrap().to_argb(), 0xff336699);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_hex(""), Err(HexError::Empty));
        assert_eq!(parse_hex("#"), Err(HexError::Empty));
        assert_eq!(parse_hex("fff"), Err(HexError::InvalidLength(3)));
        assert_eq!(parse_hex("12345g"), Err(HexError::InvalidDigit('g')));
        assert_eq!(parse_hex("123456789"), Err(HexError::InvalidLength(9)));
    }

    #[test]
    fn max_len_follows_alpha() {
        assert_eq!(max_hex_len(true), 8);
        assert_eq!(max_hex_len(false), 6);
    }
}
