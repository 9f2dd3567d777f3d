//! Export pipeline
//!
//! - `csv` - quote list as CSV text
//! - `layout` - invoice drawing commands
//! - `pdf` - drawing commands to PDF bytes
//! - `invoice` - logo fetch + layout + render for one quote
//! - `assets` - logo fetchers
//! - `format` - currency formatting

pub mod assets;
pub mod csv;
pub mod format;
pub mod invoice;
pub mod layout;
pub mod pdf;

pub use self::assets::{AssetFetcher, FileAssetFetcher, HttpAssetFetcher, LogoImage};
pub use self::csv::{to_csv, CSV_FILENAME, CSV_HEADER};
pub use self::format::{format_currency, format_grouped};
pub use self::invoice::{amount_literal, invoice_filename, InvoiceRenderer, RenderedInvoice};
pub use self::layout::{DrawCommand, InvoiceLayout, InvoiceTemplate};
pub use self::pdf::render_pdf;
