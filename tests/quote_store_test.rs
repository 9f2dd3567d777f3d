//! Quote Store Integration Tests
//!
//! Run with: cargo test --test quote_store_test

use std::collections::HashSet;

use aleo_quotes::{ParseError, QuoteStatus, QuoteStore, UNKNOWN_CLIENT};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

// ============================================================================
// Helper Functions
// ============================================================================

fn test_address() -> String {
    format!("aleo1{}", "q".repeat(58))
}

fn fixed_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_create_prepends_pending_quote_dated_today() {
    // Arrange
    let mut store = QuoteStore::new();
    store.create(&test_address(), "100", "Older Co").unwrap();

    // Act
    let quote = store.create(&test_address(), "5000", "Nebula Corp").unwrap();

    // Assert
    assert_eq!(quote.status, QuoteStatus::Pending);
    assert_eq!(quote.amount, Decimal::from(5000));
    assert_eq!(quote.client_name, "Nebula Corp");
    assert_eq!(quote.client_address, test_address());
    assert_eq!(quote.date, Local::now().date_naive());
    assert_eq!(store.len(), 2);
    assert_eq!(store.list()[0], quote);
    assert_eq!(store.list()[1].client_name, "Older Co");
}

#[test]
fn test_blank_name_becomes_unknown_client() {
    let mut store = QuoteStore::with_clock(fixed_day);

    let empty = store.create(&test_address(), "10", "").unwrap();
    let spaces = store.create(&test_address(), "10", "   ").unwrap();

    assert_eq!(empty.client_name, UNKNOWN_CLIENT);
    assert_eq!(spaces.client_name, "Unknown Client");
}

#[test]
fn test_decimal_amounts_are_kept_exactly() {
    let mut store = QuoteStore::with_clock(fixed_day);

    let quote = store.create(&test_address(), "1250.75", "Acme").unwrap();
    assert_eq!(quote.amount.to_string(), "1250.75");

    let zero = store.create(&test_address(), "0", "Free Tier").unwrap();
    assert!(zero.amount.is_zero());
}

#[test]
fn test_non_numeric_amount_is_rejected_and_nothing_stored() {
    // Arrange
    let mut store = QuoteStore::with_clock(fixed_day);
    store.create(&test_address(), "5", "Existing").unwrap();
    let before = store.list().to_vec();

    // Act + Assert
    for bad in ["abc", "", "12,500", "1e", "$100"] {
        let result = store.create(&test_address(), bad, "Nope");
        assert!(
            matches!(result, Err(ParseError::InvalidAmount(_))),
            "{:?} should be rejected",
            bad
        );
    }
    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn test_negative_amount_is_rejected_and_nothing_stored() {
    let mut store = QuoteStore::with_clock(fixed_day);

    let result = store.create(&test_address(), "-5", "Refund Co");

    assert!(matches!(result, Err(ParseError::NegativeAmount(_))));
    assert!(store.is_empty());
}

#[test]
fn test_ids_are_unique() {
    let mut store = QuoteStore::with_clock(fixed_day);
    for i in 0..300 {
        store.create(&test_address(), &i.to_string(), "Bulk").unwrap();
    }

    let ids: HashSet<&str> = store.list().iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids.len(), 300);
    assert!(store.list().iter().all(|q| !q.id.is_empty()));
}

#[test]
fn test_most_recent_first_order() {
    let mut store = QuoteStore::with_clock(fixed_day);
    for name in ["first", "second", "third"] {
        store.create(&test_address(), "1", name).unwrap();
    }

    let names: Vec<&str> = store.list().iter().map(|q| q.client_name.as_str()).collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[test]
fn test_get_by_id() {
    let mut store = QuoteStore::with_clock(fixed_day);
    let quote = store.create(&test_address(), "42", "Lookup Ltd").unwrap();

    assert_eq!(store.get(&quote.id), Some(&quote));
    assert_eq!(store.get("missing"), None);
}
