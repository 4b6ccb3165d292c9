//! Identifier format rules.
//!
//! | Identifier       | Shape                                        |
//! |------------------|----------------------------------------------|
//! | Identity         | exactly 12 ASCII decimal digits              |
//! | Account address  | optional `0x` + 40 hex digits, any case      |

use soroban_sdk::String;

/// Number of digits in a national identity number.
pub const IDENTITY_LEN: usize = 12;

/// Number of hex digits in an account address, without the `0x` prefix.
pub const ACCOUNT_HEX_LEN: usize = 40;

/// Prefix accepted (and emitted in canonical form) in front of an account address.
pub const ACCOUNT_PREFIX: &str = "0x";

/// Returns `true` when `raw` is exactly [`IDENTITY_LEN`] ASCII digits.
pub fn is_identity(raw: &[u8]) -> bool {
    raw.len() == IDENTITY_LEN && raw.iter().all(u8::is_ascii_digit)
}

/// Strips a leading `0x` or `0X` from `raw`.
pub fn strip_account_prefix(raw: &[u8]) -> &[u8] {
    match raw {
        [b'0', b'x' | b'X', rest @ ..] => rest,
        _ => raw,
    }
}

/// Returns `true` when `raw` is an optional `0x` followed by
/// [`ACCOUNT_HEX_LEN`] hex digits of either case.
pub fn is_account_address(raw: &[u8]) -> bool {
    let digits = strip_account_prefix(raw);
    digits.len() == ACCOUNT_HEX_LEN && digits.iter().all(u8::is_ascii_hexdigit)
}

/// Returns `true` for a well-formed address whose digits are all zero.
///
/// Ledgers built on fixed-width address slots report "no binding" this way.
pub fn is_zero_account(raw: &[u8]) -> bool {
    is_account_address(raw) && strip_account_prefix(raw).iter().all(|b| *b == b'0')
}

/// Contract-side variant of [`is_identity`] for a Soroban string.
pub fn is_identity_string(value: &String) -> bool {
    if value.len() as usize != IDENTITY_LEN {
        return false;
    }
    let mut buf = [0u8; IDENTITY_LEN];
    value.copy_into_slice(&mut buf);
    is_identity(&buf)
}

/// Returns `true` when a Soroban string is non-empty and at most `max_len` bytes.
pub fn is_bounded_text(value: &String, max_len: u32) -> bool {
    !value.is_empty() && value.len() <= max_len
}
