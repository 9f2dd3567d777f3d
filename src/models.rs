//! Data models for quotes and contacts

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used when a quote is created without a client name
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LENGTH: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteStatus {
    Pending,
    Paid,
    Rejected,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "Pending",
            QuoteStatus::Paid => "Paid",
            QuoteStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub client_name: String,
    pub client_address: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: QuoteStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub address: String,
}

/// Generate a short random identifier (9 lowercase base-36 characters)
///
/// Callers are responsible for rejecting collisions within their collection.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Generate an identifier not yet present according to `taken`
pub fn fresh_id<F>(taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = generate_id();
        if !taken(&id) {
            return id;
        }
        log::debug!("Identifier collision on {}, regenerating", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), 9);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_fresh_id_skips_taken() {
        let first = generate_id();
        let id = fresh_id(|candidate| candidate == first);
        assert_ne!(id, first);
    }

    #[test]
    fn test_status_serializes_as_name() {
        let json = serde_json::to_string(&QuoteStatus::Rejected).unwrap();
        assert_eq!(json, "\"Rejected\"");
        assert_eq!(QuoteStatus::Paid.to_string(), "Paid");
    }
}
