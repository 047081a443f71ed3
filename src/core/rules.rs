//! Velocity rule constants and configuration
//!
//! Limit values are fixed. Only the two optional rules (prime-id and Monday
//! doubling) can be switched off, and only when the engine is built.

use crate::types::Cents;

/// Maximum effective amount a customer may load per UTC day ($5,000.00)
pub const DAILY_LIMIT_CENTS: Cents = 500_000;

/// Maximum effective amount a customer may load per ISO week ($20,000.00)
pub const WEEKLY_LIMIT_CENTS: Cents = 2_000_000;

/// Maximum number of accepted loads per customer per UTC day
pub const DAILY_COUNT_LIMIT: u32 = 3;

/// Maximum effective amount of a prime-id load ($9,999.00)
pub const PRIME_AMOUNT_MAX_CENTS: Cents = 999_900;

/// Which optional rules the engine enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleConfig {
    /// Prime-id loads: one per day across all customers, capped amount
    pub enable_prime_rule: bool,

    /// Loads on a UTC Monday count double towards every check
    pub enable_monday_rule: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enable_prime_rule: true,
            enable_monday_rule: true,
        }
    }
}

impl RuleConfig {
    pub fn new(enable_prime_rule: bool, enable_monday_rule: bool) -> Self {
        Self {
            enable_prime_rule,
            enable_monday_rule,
        }
    }
}

/// Whether a load id is a prime number
///
/// The id is read as an integer literal: surrounding whitespace and a sign
/// are allowed, `0x`, `0b`, `0o` and `0d` prefixes select the radix, a bare
/// leading `0` means octal, and single underscores may separate digits. Ids
/// that are not such a literal, and integers below 2, are simply not prime.
pub fn is_prime_id(id: &str) -> bool {
    parse_integer_id(id).is_some_and(is_prime)
}

/// Parse an id as a non-negative integer literal
///
/// Negative values and values beyond `u64` yield `None`.
fn parse_integer_id(id: &str) -> Option<u64> {
    let literal = id.trim();
    if literal.starts_with('-') {
        return None;
    }
    parse_unsigned_literal(literal.strip_prefix('+').unwrap_or(literal))
}

fn parse_unsigned_literal(literal: &str) -> Option<u64> {
    let bytes = literal.as_bytes();
    let (radix, digits) = match bytes {
        [b'0', b'x' | b'X', ..] => (16, &literal[2..]),
        [b'0', b'b' | b'B', ..] => (2, &literal[2..]),
        [b'0', b'o' | b'O', ..] => (8, &literal[2..]),
        [b'0', b'd' | b'D', ..] => (10, &literal[2..]),
        [b'0', _, ..] => (8, literal),
        _ => (10, literal),
    };
    parse_digits(digits, radix)
}

/// Digits in `radix` with single underscores allowed between them
fn parse_digits(digits: &str, radix: u32) -> Option<u64> {
    if digits.is_empty() {
        return None;
    }

    let mut value: u64 = 0;
    for group in digits.split('_') {
        if group.is_empty() {
            return None;
        }
        for c in group.chars() {
            let digit = c.to_digit(radix)?;
            value = value
                .checked_mul(u64::from(radix))?
                .checked_add(u64::from(digit))?;
        }
    }
    Some(value)
}

/// Trial division up to the square root
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    // Remaining candidates are of the form 6k ± 1
    let mut i: u64 = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(1, false)]
    #[case(2, true)]
    #[case(3, true)]
    #[case(4, false)]
    #[case(13, true)]
    #[case(25, false)]
    #[case(29, true)]
    #[case(49, false)]
    #[case(7919, true)]
    #[case(7921, false)] // 89^2
    #[case(1_000_000_007, true)]
    #[case(u64::MAX, false)]
    fn test_is_prime(#[case] n: u64, #[case] expected: bool) {
        assert_eq!(is_prime(n), expected);
    }

    #[rstest]
    #[case::prime("13", true)]
    #[case::composite("15", false)]
    #[case::padded(" 17 ", true)]
    #[case::plus_sign("+19", true)]
    #[case::negative("-7", false)]
    #[case::octal_leading_zero("0017", false)] // 15
    #[case::octal_prime("015", true)] // 13
    #[case::invalid_octal_digit("0019", false)]
    #[case::single_zero("0", false)]
    #[case::hex("0x1D", true)] // 29
    #[case::hex_upper_prefix("0X1d", true)]
    #[case::hex_lowercase_digit("0x1f", true)] // 31
    #[case::hex_composite("0x21", false)] // 33
    #[case::signed_hex("+0x1D", true)]
    #[case::binary("0b111", true)] // 7
    #[case::binary_invalid_digit("0b102", false)]
    #[case::explicit_octal("0o15", true)] // 13
    #[case::explicit_decimal("0d0019", true)] // 19
    #[case::underscore("1_3", true)]
    #[case::octal_underscore("0_15", true)] // 13
    #[case::double_underscore("1__3", false)]
    #[case::leading_underscore("_13", false)]
    #[case::trailing_underscore("13_", false)]
    #[case::bare_prefix("0x", false)]
    #[case::sign_after_prefix("0x+1D", false)]
    #[case::negative_hex("-0x1D", false)]
    #[case::inner_space("1 3", false)]
    #[case::alphabetic("abc", false)]
    #[case::mixed("13a", false)]
    #[case::decimal("13.0", false)]
    #[case::empty("", false)]
    #[case::too_large("99999999999999999999999", false)]
    fn test_is_prime_id(#[case] id: &str, #[case] expected: bool) {
        assert_eq!(is_prime_id(id), expected);
    }

    #[test]
    fn test_default_config_enables_all_rules() {
        let config = RuleConfig::default();
        assert!(config.enable_prime_rule);
        assert!(config.enable_monday_rule);
        assert_eq!(RuleConfig::new(true, true), config);
    }
}
