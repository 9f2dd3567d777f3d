//! Address Validator Tests
//!
//! `validate(s)` must be true exactly when `s` starts with `aleo1` and is 63
//! characters long.
//!
//! Run with: cargo test --test address_validator_test

use aleo_quotes::validate;

// ============================================================================
// Helper Functions
// ============================================================================

/// Build an address-shaped string of the given total length
fn with_prefix(prefix: &str, total_len: usize) -> String {
    let fill = total_len.saturating_sub(prefix.len());
    format!("{}{}", prefix, "q".repeat(fill))
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_accepts_canonical_shape() {
    let address = with_prefix("aleo1", 63);
    assert_eq!(address.len(), 63);
    assert!(validate(&address));
}

#[test]
fn test_rejects_empty() {
    assert!(!validate(""));
}

#[test]
fn test_rejects_wrong_length() {
    for len in [5, 10, 62, 64, 100] {
        let address = with_prefix("aleo1", len);
        assert!(!validate(&address), "length {} should be rejected", len);
    }
}

#[test]
fn test_rejects_wrong_prefix() {
    for prefix in ["aleo", "ALEO1", "aleo2", "xaleo1", " aleo1"] {
        let address = with_prefix(prefix, 63);
        assert_eq!(address.len(), 63);
        assert!(!validate(&address), "prefix {:?} should be rejected", prefix);
    }
}

#[test]
fn test_no_charset_check_beyond_prefix() {
    // Syntactic filter only: any characters after the prefix pass
    let address = format!("aleo1{}", "#".repeat(58));
    assert!(validate(&address));
}

#[test]
fn test_matches_rule_exhaustively_over_lengths() {
    for len in 0..80 {
        for prefix in ["aleo1", "aleo0", ""] {
            let s = with_prefix(prefix, len);
            let expected = s.starts_with("aleo1") && s.chars().count() == 63;
            assert_eq!(validate(&s), expected, "input {:?}", s);
        }
    }
}
