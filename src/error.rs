//! Error types for quote, contact and export operations
//!
//! `QuoteError` is the service-level error; the narrower enums are what the
//! individual stores and serializers return.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Rejected user input; the requested operation made no state change
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid Aleo address format (must start with aleo1 and be 63 chars): {0}")]
    InvalidAddress(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Amount is not a number: {0:?}")]
    InvalidAmount(String),

    #[error("Amount must not be negative: {0}")]
    NegativeAmount(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Please connect your wallet first")]
    NotConnected,

    #[error("No wallet selected")]
    NoWalletSelected,

    #[error("Unknown wallet adapter: {0}")]
    UnknownAdapter(String),

    #[error("Wallet {0} has no public key available")]
    NoPublicKey(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Logo fetch failures; always recovered inside the invoice renderer
#[derive(Error, Debug)]
pub enum AssetFetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Timed out after {0} ms")]
    Timeout(u64),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invoice generation cancelled")]
    Cancelled,
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        let status = match &self {
            QuoteError::Validation(_) => StatusCode::BAD_REQUEST,
            QuoteError::Parse(_) => StatusCode::BAD_REQUEST,
            QuoteError::Wallet(WalletError::NotConnected) => StatusCode::CONFLICT,
            QuoteError::Wallet(_) => StatusCode::BAD_REQUEST,
            QuoteError::NotFound(_) => StatusCode::NOT_FOUND,
            QuoteError::Export(ExportError::Cancelled) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
