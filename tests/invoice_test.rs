//! Invoice Export Integration Tests
//!
//! Tests PDF invoice generation end to end: logo fetch, fallback header,
//! timeout and cancellation handling, and multi-page layout.
//!
//! These tests are self-contained and do not require network access.
//!
//! Run with: cargo test --test invoice_test -- --nocapture

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use aleo_quotes::export::layout::{status_color, DrawCommand};
use aleo_quotes::{
    content_hash, invoice_filename, AssetFetchError, AssetFetcher, ExportError, FileAssetFetcher,
    InvoiceLayout, InvoiceRenderer, InvoiceTemplate, LogoImage, Quote, QuoteStatus,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

// ============================================================================
// Helper Functions
// ============================================================================

fn test_quote(status: QuoteStatus) -> Quote {
    Quote {
        id: "k3j9x0abc".to_string(),
        client_name: "Nebula Corp".to_string(),
        client_address: format!("aleo1{}", "n".repeat(58)),
        amount: Decimal::from(12500),
        date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        status,
    }
}

fn tiny_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([255, 204, 0]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    bytes.into_inner()
}

/// Fetcher that always reports the asset missing
struct MissingFetcher;

#[async_trait]
impl AssetFetcher for MissingFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetFetchError> {
        Err(AssetFetchError::NotFound(path.to_string()))
    }
}

/// Fetcher that never resolves
struct HangingFetcher;

#[async_trait]
impl AssetFetcher for HangingFetcher {
    async fn fetch(&self, _path: &str) -> Result<Vec<u8>, AssetFetchError> {
        std::future::pending().await
    }
}

/// Fetcher serving fixed bytes and counting requests
struct StaticFetcher {
    bytes: Vec<u8>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AssetFetcher for StaticFetcher {
    async fn fetch(&self, _path: &str) -> Result<Vec<u8>, AssetFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.bytes.clone())
    }
}

fn text_x(layout: &InvoiceLayout, needle: &str) -> f32 {
    match layout.find_text(needle) {
        Some(DrawCommand::Text { x, .. }) => *x,
        other => panic!("text {:?} not found: {:?}", needle, other),
    }
}

// ============================================================================
// Renderer Tests
// ============================================================================

#[tokio::test]
async fn test_missing_logo_still_produces_pdf() {
    // Arrange
    let renderer = InvoiceRenderer::new(Arc::new(MissingFetcher));
    let quote = test_quote(QuoteStatus::Pending);

    // Act
    let rendered = renderer
        .render(&quote, &CancellationToken::new())
        .await
        .expect("invoice should render without a logo");

    // Assert
    assert!(!rendered.has_logo);
    assert_eq!(rendered.filename, "invoice_k3j9x0abc.pdf");
    assert_eq!(rendered.page_count, 1);
    assert!(rendered.bytes.starts_with(b"%PDF-"));

    let doc = lopdf::Document::load_mem(&rendered.bytes).expect("valid PDF");
    assert_eq!(doc.get_pages().len(), 1);

    // On-chain literals derived from the document and the amount
    assert_eq!(rendered.content_hash, content_hash(&rendered.bytes));
    assert!(rendered.content_hash.ends_with("field"));
    assert_eq!(rendered.amount_literal.as_deref(), Some("12500u64"));
}

#[tokio::test]
async fn test_fractional_amount_has_no_u64_literal() {
    let renderer = InvoiceRenderer::new(Arc::new(MissingFetcher));
    let quote = Quote {
        amount: Decimal::new(125075, 2),
        ..test_quote(QuoteStatus::Pending)
    };

    let rendered = renderer.render(&quote, &CancellationToken::new()).await.unwrap();

    assert_eq!(rendered.amount_literal, None);
    assert!(!rendered.content_hash.is_empty());
}

#[tokio::test]
async fn test_logo_is_embedded_when_available() {
    // Arrange
    let fetcher = Arc::new(StaticFetcher::new(tiny_png()));
    let renderer = InvoiceRenderer::new(fetcher.clone());

    // Act
    let rendered = renderer
        .render(&test_quote(QuoteStatus::Paid), &CancellationToken::new())
        .await
        .unwrap();

    // Assert
    assert!(rendered.has_logo);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    let doc = lopdf::Document::load_mem(&rendered.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
    assert!(rendered
        .bytes
        .windows(b"/Im1 Do".len())
        .any(|w| w == b"/Im1 Do"));
}

#[tokio::test]
async fn test_undecodable_logo_falls_back() {
    let renderer = InvoiceRenderer::new(Arc::new(StaticFetcher::new(b"not a png".to_vec())));

    let rendered = renderer
        .render(&test_quote(QuoteStatus::Pending), &CancellationToken::new())
        .await
        .unwrap();

    assert!(!rendered.has_logo);
    assert!(lopdf::Document::load_mem(&rendered.bytes).is_ok());
}

#[tokio::test]
async fn test_hanging_fetch_times_out_to_fallback() {
    let renderer = InvoiceRenderer::new(Arc::new(HangingFetcher))
        .with_timeout(Duration::from_millis(50));

    let rendered = tokio::time::timeout(
        Duration::from_secs(5),
        renderer.render(&test_quote(QuoteStatus::Pending), &CancellationToken::new()),
    )
    .await
    .expect("render must not hang")
    .unwrap();

    assert!(!rendered.has_logo);
    assert!(!rendered.bytes.is_empty());
}

#[tokio::test]
async fn test_cancelled_token_aborts_render() {
    let renderer = InvoiceRenderer::new(Arc::new(HangingFetcher))
        .with_timeout(Duration::from_secs(60));
    let token = CancellationToken::new();
    token.cancel();

    let result = renderer.render(&test_quote(QuoteStatus::Pending), &token).await;

    assert!(matches!(result, Err(ExportError::Cancelled)));
}

#[tokio::test]
async fn test_cancel_during_fetch_aborts_render() {
    let renderer = Arc::new(
        InvoiceRenderer::new(Arc::new(HangingFetcher)).with_timeout(Duration::from_secs(60)),
    );
    let token = CancellationToken::new();

    let task = {
        let renderer = renderer.clone();
        let token = token.clone();
        tokio::spawn(async move {
            renderer
                .render(&test_quote(QuoteStatus::Pending), &token)
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    token.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("cancellation must end the render")
        .unwrap();
    assert!(matches!(result, Err(ExportError::Cancelled)));
}

#[tokio::test]
async fn test_file_fetcher_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("logo.png"), tiny_png()).unwrap();

    let with_logo = InvoiceRenderer::new(Arc::new(FileAssetFetcher::new(temp_dir.path())));
    let without_logo = InvoiceRenderer::new(Arc::new(FileAssetFetcher::new(temp_dir.path())))
        .with_logo_path("/missing.png");

    let quote = test_quote(QuoteStatus::Rejected);
    let token = CancellationToken::new();

    assert!(with_logo.render(&quote, &token).await.unwrap().has_logo);
    assert!(!without_logo.render(&quote, &token).await.unwrap().has_logo);
}

#[tokio::test]
async fn test_long_description_spans_pages() {
    // Arrange
    let template = InvoiceTemplate {
        item_description: "Consultation on zero-knowledge circuit design. ".repeat(200),
        ..InvoiceTemplate::default()
    };
    let renderer = InvoiceRenderer::new(Arc::new(MissingFetcher)).with_template(template);

    // Act
    let rendered = renderer
        .render(&test_quote(QuoteStatus::Pending), &CancellationToken::new())
        .await
        .unwrap();

    // Assert
    assert!(rendered.page_count > 1);
    let doc = lopdf::Document::load_mem(&rendered.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), rendered.page_count);
}

// ============================================================================
// Layout Tests
// ============================================================================

#[test]
fn test_wordmark_moves_left_without_logo() {
    let quote = test_quote(QuoteStatus::Pending);
    let template = InvoiceTemplate::default();
    let logo = LogoImage::from_png(&tiny_png()).unwrap();

    let with_logo = InvoiceLayout::build(&quote, Some(logo), &template);
    let fallback = InvoiceLayout::build(&quote, None, &template);

    assert_eq!(text_x(&with_logo, "A&A"), 35.0);
    assert_eq!(text_x(&fallback, "A&A"), 15.0);
    assert_eq!(text_x(&with_logo, "Secure Commercial Quotes"), 35.0);
    assert_eq!(text_x(&fallback, "Secure Commercial Quotes"), 35.0);
    assert!(with_logo.pages[0]
        .commands
        .iter()
        .any(|c| matches!(c, DrawCommand::Logo { .. })));
    assert!(!fallback.pages[0]
        .commands
        .iter()
        .any(|c| matches!(c, DrawCommand::Logo { .. })));
}

#[test]
fn test_layout_contains_quote_details() {
    let quote = test_quote(QuoteStatus::Paid);
    let layout = InvoiceLayout::build(&quote, None, &InvoiceTemplate::default());

    for needle in [
        "FROM:",
        "BILL TO:",
        "Nebula Corp",
        "A&A Inc.",
        "k3j9x0abc",
        "2024-01-03",
        "Subtotal:",
        "Tax (0%):",
        "$0",
        "Total:",
    ] {
        assert!(layout.find_text(needle).is_some(), "missing {:?}", needle);
    }
    // Unit price, line total, subtotal and total all show the amount
    let amounts = layout
        .texts()
        .filter(|c| matches!(c, DrawCommand::Text { text, .. } if text == "$12,500"))
        .count();
    assert!(amounts >= 3);
}

#[test]
fn test_status_label_uppercase_and_coloured() {
    for status in [QuoteStatus::Pending, QuoteStatus::Paid, QuoteStatus::Rejected] {
        let layout = InvoiceLayout::build(&test_quote(status), None, &InvoiceTemplate::default());
        let label = status.as_str().to_uppercase();

        match layout.find_text(&label) {
            Some(DrawCommand::Text { color, .. }) => assert_eq!(*color, status_color(status)),
            other => panic!("status label {} not found: {:?}", label, other),
        }
    }
    assert_ne!(
        status_color(QuoteStatus::Rejected),
        status_color(QuoteStatus::Paid)
    );
}

#[test]
fn test_address_is_truncated_in_bill_to() {
    let quote = test_quote(QuoteStatus::Pending);
    let layout = InvoiceLayout::build(&quote, None, &InvoiceTemplate::default());

    assert!(layout.find_text("aleo1n...nnnn").is_some());
    assert!(layout.find_text(&quote.client_address).is_none());
}

#[test]
fn test_footer_on_every_page() {
    let template = InvoiceTemplate {
        item_description: "word ".repeat(3000),
        ..InvoiceTemplate::default()
    };
    let layout = InvoiceLayout::build(&test_quote(QuoteStatus::Pending), None, &template);
    assert!(layout.pages.len() > 1);

    for note in &template.footer_notes {
        let count = layout
            .texts()
            .filter(|c| matches!(c, DrawCommand::Text { text, .. } if text == note))
            .count();
        assert_eq!(count, layout.pages.len(), "footer {:?} per page", note);
    }
}

#[test]
fn test_invoice_filename() {
    assert_eq!(invoice_filename("abc"), "invoice_abc.pdf");
}
