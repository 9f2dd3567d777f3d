//! In-memory quote ledger
//!
//! Quotes are append-only: created, listed, never edited or removed. They live
//! only as long as the store does.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ParseError;
use crate::models::{fresh_id, Quote, QuoteStatus, UNKNOWN_CLIENT};

type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

pub struct QuoteStore {
    quotes: Vec<Quote>,
    today: Clock,
}

impl QuoteStore {
    /// Empty store dated by the local system clock
    pub fn new() -> Self {
        Self::with_clock(|| Local::now().date_naive())
    }

    /// Empty store with a custom date source (for testing)
    pub fn with_clock<F>(today: F) -> Self
    where
        F: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        Self {
            quotes: Vec::new(),
            today: Box::new(today),
        }
    }

    /// Store pre-populated with `quotes`, already ordered most-recent-first
    pub fn seeded(quotes: Vec<Quote>) -> Self {
        let mut store = Self::new();
        for quote in quotes {
            if store.get(&quote.id).is_some() {
                log::warn!("Skipping seed quote with duplicate id {}", quote.id);
                continue;
            }
            store.quotes.push(quote);
        }
        store
    }

    /// Quotes ordered most-recent-first
    pub fn list(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn get(&self, id: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Create a pending quote dated today and put it at the front
    ///
    /// `amount` is decimal text such as `"5000"` or `"1250.75"`. Non-numeric
    /// or negative input is rejected and nothing is stored. A blank
    /// `client_name` becomes "Unknown Client".
    pub fn create(
        &mut self,
        client_address: &str,
        amount: &str,
        client_name: &str,
    ) -> Result<Quote, ParseError> {
        let amount = parse_amount(amount)?;

        let client_name = match client_name.trim() {
            "" => UNKNOWN_CLIENT.to_string(),
            name => name.to_string(),
        };

        let quote = Quote {
            id: fresh_id(|id| self.get(id).is_some()),
            client_name,
            client_address: client_address.trim().to_string(),
            amount,
            date: (self.today)(),
            status: QuoteStatus::Pending,
        };

        self.quotes.insert(0, quote.clone());
        log::info!(
            "Quote {} created for {} ({} USDC)",
            quote.id,
            quote.client_name,
            quote.amount
        );
        Ok(quote)
    }
}

impl Default for QuoteStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a non-negative decimal amount from form text
pub fn parse_amount(text: &str) -> Result<Decimal, ParseError> {
    let trimmed = text.trim();
    let amount = Decimal::from_str(trimmed)
        .map_err(|_| ParseError::InvalidAmount(text.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ParseError::NegativeAmount(trimmed.to_string()));
    }
    Ok(amount.normalize())
}

/// The five demonstration quotes the dashboard ships with
pub fn sample_quotes() -> Vec<Quote> {
    let sample = |id: &str, name: &str, amount: i64, date: (i32, u32, u32), status| Quote {
        id: id.to_string(),
        client_name: name.to_string(),
        client_address: "aleo1...".to_string(),
        amount: Decimal::from(amount),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or(NaiveDate::MIN),
        status,
    };

    vec![
        sample("1", "Nebula Corp", 5000, (2024, 1, 4), QuoteStatus::Pending),
        sample("2", "Starlight Inc", 12500, (2024, 1, 3), QuoteStatus::Paid),
        sample("3", "Void Systems", 3200, (2024, 1, 2), QuoteStatus::Rejected),
        sample("4", "Astro Mining", 18000, (2023, 12, 28), QuoteStatus::Paid),
        sample("5", "Quantum Weave", 750, (2023, 12, 20), QuoteStatus::Pending),
    ]
}
