//! Invoice document generation
//!
//! Fetches the logo (bounded by a timeout and a cancellation token), lays out
//! the invoice and renders it to PDF. Logo problems never fail the invoice;
//! the layout falls back to the text wordmark.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::assets::{AssetFetcher, LogoImage};
use super::layout::{InvoiceLayout, InvoiceTemplate};
use super::pdf::render_pdf;
use crate::aleo::{content_hash, format_u64};
use crate::error::{AssetFetchError, ExportError};
use crate::models::Quote;

pub const DEFAULT_LOGO_PATH: &str = "/logo.png";
pub const DEFAULT_LOGO_TIMEOUT: Duration = Duration::from_secs(5);

/// Download name of the invoice for `quote_id`
pub fn invoice_filename(quote_id: &str) -> String {
    format!("invoice_{}.pdf", quote_id)
}

#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
    /// Whether the logo image made it into the document
    pub has_logo: bool,
    /// `field` literal fingerprinting `bytes`
    pub content_hash: String,
    /// Amount as a `u64` literal; `None` for fractional or out-of-range amounts
    pub amount_literal: Option<String>,
}

/// On-chain `u64` literal for a whole, non-negative amount
pub fn amount_literal(amount: Decimal) -> Option<String> {
    if !amount.fract().is_zero() {
        return None;
    }
    amount.to_u64().map(format_u64)
}

pub struct InvoiceRenderer {
    fetcher: Arc<dyn AssetFetcher>,
    logo_path: String,
    timeout: Duration,
    template: InvoiceTemplate,
}

impl InvoiceRenderer {
    pub fn new(fetcher: Arc<dyn AssetFetcher>) -> Self {
        Self {
            fetcher,
            logo_path: DEFAULT_LOGO_PATH.to_string(),
            timeout: DEFAULT_LOGO_TIMEOUT,
            template: InvoiceTemplate::default(),
        }
    }

    pub fn with_logo_path(mut self, path: impl Into<String>) -> Self {
        self.logo_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_template(mut self, template: InvoiceTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn template(&self) -> &InvoiceTemplate {
        &self.template
    }

    /// Produce the PDF invoice for `quote`
    ///
    /// Only cancellation aborts; every logo failure degrades to the text-only
    /// header.
    pub async fn render(
        &self,
        quote: &Quote,
        cancel: &CancellationToken,
    ) -> Result<RenderedInvoice, ExportError> {
        let logo = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::info!("Invoice generation for quote {} cancelled", quote.id);
                return Err(ExportError::Cancelled);
            }
            result = self.fetch_logo() => match result {
                Ok(logo) => Some(logo),
                Err(e) => {
                    log::warn!("Logo unavailable ({}), using text wordmark", e);
                    None
                }
            },
        };

        let layout = InvoiceLayout::build(quote, logo, &self.template);
        let bytes = render_pdf(&layout)?;

        log::info!(
            "Invoice generated for quote {} ({} pages, {} bytes)",
            quote.id,
            layout.pages.len(),
            bytes.len()
        );

        Ok(RenderedInvoice {
            filename: invoice_filename(&quote.id),
            page_count: layout.pages.len(),
            has_logo: layout.logo.is_some(),
            content_hash: content_hash(&bytes),
            amount_literal: amount_literal(quote.amount),
            bytes,
        })
    }

    async fn fetch_logo(&self) -> Result<LogoImage, AssetFetchError> {
        let bytes = tokio::time::timeout(self.timeout, self.fetcher.fetch(&self.logo_path))
            .await
            .map_err(|_| AssetFetchError::Timeout(self.timeout.as_millis() as u64))??;
        LogoImage::from_png(&bytes)
    }
}
