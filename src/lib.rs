//! Aleo Quotes: commercial quotes with an Aleo address book
//!
//! This crate keeps a ledger of commercial quotes and an address book of
//! Aleo accounts, and exports quotes as CSV or as styled PDF invoices.
//!
//! # Architecture
//!
//! - **Address validation**: syntactic `aleo1...` checks and literal helpers
//! - **Contact store**: named addresses persisted through a `KeyValueStore`
//! - **Quote store**: append-only, most-recent-first, in memory
//! - **Export pipeline**: CSV text and PDF invoices with a logo fallback
//! - **View controller**: dashboard projections and user intents
//! - **HTTP API**: axum routes over the view controller
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use aleo_quotes::{ContactStore, MemoryStore, QuoteStore, to_csv};
//!
//! let mut contacts = ContactStore::load(Arc::new(MemoryStore::new()));
//! let alice = contacts.add("Alice", "aleo1...")?;
//!
//! let mut quotes = QuoteStore::new();
//! quotes.create(&alice.address, "5000", "Nebula Corp")?;
//!
//! let csv = to_csv(quotes.list())?;
//! ```

// Public modules
pub mod aleo;
pub mod api;
pub mod config;
pub mod contacts;
pub mod controller;
pub mod error;
pub mod export;
pub mod models;
pub mod quotes;
pub mod storage;
pub mod wallet;

// Re-exports for convenience
pub use aleo::{content_hash, format_u64, truncate_address, validate};
pub use config::QuotesConfig;
pub use contacts::{ContactStore, CONTACTS_KEY};
pub use controller::{Download, QuoteForm, View, ViewController, ViewModel};
pub use error::{
    AssetFetchError, ExportError, ParseError, QuoteError, StorageError, ValidationError,
    WalletError,
};
pub use export::{
    amount_literal, invoice_filename, render_pdf, to_csv, AssetFetcher, FileAssetFetcher, HttpAssetFetcher,
    InvoiceLayout, InvoiceRenderer, InvoiceTemplate, LogoImage, RenderedInvoice, CSV_FILENAME,
};
pub use models::{Contact, Quote, QuoteStatus, UNKNOWN_CLIENT};
pub use quotes::{parse_amount, sample_quotes, QuoteStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use wallet::{StaticWalletProvider, WalletEntry, WalletProvider};

// Common result type
pub type Result<T> = std::result::Result<T, QuoteError>;
