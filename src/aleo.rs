//! Aleo address and literal helpers
//!
//! Address checks here are syntactic only: prefix and length. No checksum or
//! bech32 decoding is attempted.

use sha2::{Digest, Sha256};

/// Human-readable prefix of every Aleo account address
pub const ADDRESS_PREFIX: &str = "aleo1";

/// Length in characters of an Aleo account address
pub const ADDRESS_LENGTH: usize = 63;

/// Check that `address` looks like an Aleo account address
///
/// True iff the string starts with `aleo1` and is exactly 63 characters long.
pub fn validate(address: &str) -> bool {
    if address.is_empty() {
        return false;
    }
    if !address.starts_with(ADDRESS_PREFIX) {
        return false;
    }
    address.chars().count() == ADDRESS_LENGTH
}

/// Render an amount as an Aleo `u64` literal, e.g. `5000u64`
pub fn format_u64(amount: u64) -> String {
    format!("{}u64", amount)
}

/// Fingerprint a document as an Aleo `field` literal
///
/// The first eight bytes of the SHA-256 digest, read big-endian, printed in
/// decimal with the `field` suffix. Deterministic for identical input.
pub fn content_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    format!("{}field", u64::from_be_bytes(head))
}

/// Shorten an address for display: `aleo1q...wxyz`
///
/// Addresses of 10 characters or fewer are returned unchanged.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
