//! Invoice page layout
//!
//! Builds a device-independent list of drawing commands for one quote. All
//! coordinates are millimetres on an A4 page with the origin at the top-left
//! corner; text `y` is the baseline. The PDF renderer consumes this.

use rust_decimal::Decimal;

use super::assets::LogoImage;
use super::format::format_currency;
use crate::aleo::truncate_address;
use crate::models::{Quote, QuoteStatus};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

const MARGIN_X: f32 = 15.0;
const TOP_MARGIN: f32 = 20.0;
/// Content must end above this line; the footer lives below it
const CONTENT_LIMIT: f32 = PAGE_HEIGHT - 45.0;

const HEADER_BAND_HEIGHT: f32 = 40.0;
const LOGO_SIZE: f32 = 15.0;
const WORDMARK_X_WITH_LOGO: f32 = 35.0;
const WORDMARK_X_FALLBACK: f32 = 15.0;
const SUBTITLE_X: f32 = 35.0;

const TABLE_TOP: f32 = 120.0;
const TABLE_HEAD_HEIGHT: f32 = 10.0;
const TABLE_ROW_MIN_HEIGHT: f32 = 10.0;
const CELL_PADDING: f32 = 3.0;
const LINE_HEIGHT: f32 = 5.0;
/// Description, Qty, Unit Price, Total
const COLUMN_WIDTHS: [f32; 4] = [100.0, 20.0, 30.0, 30.0];

const TOTALS_LABEL_X: f32 = 140.0;
const TOTALS_VALUE_X: f32 = 195.0;
const BILL_TO_X: f32 = 120.0;
const BILL_TO_WIDTH: f32 = 75.0;
const BILL_TO_MAX_LINES: usize = 4;

const PT_TO_MM: f32 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY: Rgb = Rgb(100, 100, 100);
    pub const LIGHT_GRAY: Rgb = Rgb(150, 150, 150);
    pub const GRID: Rgb = Rgb(200, 200, 200);
    pub const BODY_TEXT: Rgb = Rgb(50, 50, 50);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        line_width: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        line_width: f32,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        /// Font size in points
        size: f32,
        style: FontStyle,
        color: Rgb,
        align: Align,
    },
    /// Draw the layout's logo image
    Logo {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub commands: Vec<DrawCommand>,
}

/// Static branding and wording of the invoice
#[derive(Debug, Clone)]
pub struct InvoiceTemplate {
    pub wordmark: String,
    pub subtitle: String,
    pub sender_name: String,
    pub sender_network: String,
    pub item_description: String,
    pub footer_notes: Vec<String>,
    pub header_color: Rgb,
    pub accent_color: Rgb,
}

impl Default for InvoiceTemplate {
    fn default() -> Self {
        Self {
            wordmark: "A&A".to_string(),
            subtitle: "Secure Commercial Quotes".to_string(),
            sender_name: "A&A Inc.".to_string(),
            sender_network: "Aleo Blockchain Network".to_string(),
            item_description: "Commercial Service / Consultation".to_string(),
            footer_notes: vec![
                "This quote is cryptographically secured on the Aleo Testnet Beta.".to_string(),
                "Immutability guaranteed by Zero-Knowledge Proofs.".to_string(),
            ],
            header_color: Rgb(20, 24, 33),
            accent_color: Rgb(255, 204, 0),
        }
    }
}

/// Colour the status label is drawn in
pub fn status_color(status: QuoteStatus) -> Rgb {
    match status {
        QuoteStatus::Pending | QuoteStatus::Paid => Rgb(0, 180, 0),
        QuoteStatus::Rejected => Rgb(200, 30, 30),
    }
}

#[derive(Debug, Clone)]
pub struct InvoiceLayout {
    pub pages: Vec<Page>,
    pub logo: Option<LogoImage>,
}

impl InvoiceLayout {
    /// Lay out the invoice for `quote`
    ///
    /// Without a logo the wordmark takes the logo's place at the left margin.
    pub fn build(quote: &Quote, logo: Option<LogoImage>, template: &InvoiceTemplate) -> Self {
        let mut builder = LayoutBuilder::new(template);

        builder.header(logo.is_some());
        builder.parties(quote);
        builder.metadata(quote);
        builder.line_items(quote.amount);
        builder.totals(quote.amount);

        Self {
            pages: builder.finish(),
            logo,
        }
    }

    /// Every text command on every page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> {
        self.pages
            .iter()
            .flat_map(|p| p.commands.iter())
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
    }

    /// First text command whose content equals `needle`
    pub fn find_text(&self, needle: &str) -> Option<&DrawCommand> {
        self.texts()
            .find(|c| matches!(c, DrawCommand::Text { text, .. } if text == needle))
    }
}

struct LayoutBuilder<'a> {
    template: &'a InvoiceTemplate,
    pages: Vec<Page>,
    cursor: f32,
}

impl<'a> LayoutBuilder<'a> {
    fn new(template: &'a InvoiceTemplate) -> Self {
        Self {
            template,
            pages: vec![Page::default()],
            cursor: TOP_MARGIN,
        }
    }

    fn push(&mut self, command: DrawCommand) {
        if let Some(page) = self.pages.last_mut() {
            page.commands.push(command);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        x: f32,
        y: f32,
        text: impl Into<String>,
        size: f32,
        style: FontStyle,
        color: Rgb,
        align: Align,
    ) {
        self.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            size,
            style,
            color,
            align,
        });
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = TOP_MARGIN;
    }

    /// Start a new page unless `height` more millimetres fit on this one
    fn ensure_space(&mut self, height: f32) {
        if self.cursor + height > CONTENT_LIMIT {
            self.new_page();
        }
    }

    fn header(&mut self, has_logo: bool) {
        let t = self.template;
        self.push(DrawCommand::FillRect {
            x: 0.0,
            y: 0.0,
            width: PAGE_WIDTH,
            height: HEADER_BAND_HEIGHT,
            color: t.header_color,
        });

        let wordmark_x = if has_logo {
            self.push(DrawCommand::Logo {
                x: MARGIN_X,
                y: 10.0,
                width: LOGO_SIZE,
                height: LOGO_SIZE,
            });
            WORDMARK_X_WITH_LOGO
        } else {
            WORDMARK_X_FALLBACK
        };

        self.text(wordmark_x, 20.0, t.wordmark.clone(), 26.0, FontStyle::Bold, t.accent_color, Align::Left);
        // Only the wordmark shifts when the logo is missing
        self.text(SUBTITLE_X, 28.0, t.subtitle.clone(), 10.0, FontStyle::Normal, Rgb::WHITE, Align::Left);
    }

    fn parties(&mut self, quote: &Quote) {
        let t = self.template;

        self.text(MARGIN_X, 60.0, "FROM:", 9.0, FontStyle::Normal, Rgb::GRAY, Align::Left);
        self.text(MARGIN_X, 66.0, t.sender_name.clone(), 11.0, FontStyle::Bold, Rgb::BLACK, Align::Left);
        self.text(MARGIN_X, 72.0, t.sender_network.clone(), 11.0, FontStyle::Normal, Rgb::BLACK, Align::Left);

        self.text(BILL_TO_X, 60.0, "BILL TO:", 9.0, FontStyle::Normal, Rgb::GRAY, Align::Left);

        let mut name_lines = wrap_text(&quote.client_name, 11.0, BILL_TO_WIDTH);
        if name_lines.len() > BILL_TO_MAX_LINES - 1 {
            name_lines.truncate(BILL_TO_MAX_LINES - 1);
            if let Some(last) = name_lines.last_mut() {
                last.push_str("...");
            }
        }

        let mut y = 66.0;
        for line in name_lines {
            self.text(BILL_TO_X, y, line, 11.0, FontStyle::Bold, Rgb::BLACK, Align::Left);
            y += LINE_HEIGHT;
        }
        self.text(
            BILL_TO_X,
            y + 1.0,
            truncate_address(&quote.client_address),
            10.0,
            FontStyle::Normal,
            Rgb::GRAY,
            Align::Left,
        );
    }

    fn metadata(&mut self, quote: &Quote) {
        let start_y = 90.0;
        let rows = [
            ("Invoice ID:", quote.id.clone()),
            ("Date:", quote.date.format("%Y-%m-%d").to_string()),
        ];

        let mut y = start_y;
        for (label, value) in rows {
            self.text(MARGIN_X, y, label, 9.0, FontStyle::Normal, Rgb::GRAY, Align::Left);
            self.text(40.0, y, value, 9.0, FontStyle::Normal, Rgb::BLACK, Align::Left);
            y += 6.0;
        }

        self.text(MARGIN_X, y, "Status:", 9.0, FontStyle::Normal, Rgb::GRAY, Align::Left);
        self.text(
            40.0,
            y,
            quote.status.as_str().to_uppercase(),
            9.0,
            FontStyle::Bold,
            status_color(quote.status),
            Align::Left,
        );

        self.cursor = TABLE_TOP;
    }

    fn table_head(&mut self) {
        let t = self.template;
        let top = self.cursor;
        let labels = ["Description", "Qty", "Unit Price", "Total"];

        let mut x = MARGIN_X;
        for (label, width) in labels.iter().zip(COLUMN_WIDTHS) {
            self.push(DrawCommand::FillRect {
                x,
                y: top,
                width,
                height: TABLE_HEAD_HEIGHT,
                color: t.header_color,
            });
            self.push(DrawCommand::StrokeRect {
                x,
                y: top,
                width,
                height: TABLE_HEAD_HEIGHT,
                color: Rgb::GRID,
                line_width: 0.1,
            });
            self.text(
                x + CELL_PADDING,
                top + 6.5,
                *label,
                10.0,
                FontStyle::Bold,
                t.accent_color,
                Align::Left,
            );
            x += width;
        }

        self.cursor += TABLE_HEAD_HEIGHT;
    }

    /// Single line item; a description too long for one page continues on the
    /// next one under a repeated table head
    fn line_items(&mut self, amount: Decimal) {
        let description_width = COLUMN_WIDTHS[0] - 2.0 * CELL_PADDING;
        let lines = wrap_text(&self.template.item_description, 10.0, description_width);
        let price = format_currency(amount);

        let mut remaining: &[String] = &lines;
        let mut first_chunk = true;
        loop {
            self.ensure_space(TABLE_HEAD_HEIGHT + TABLE_ROW_MIN_HEIGHT);
            self.table_head();

            let available = CONTENT_LIMIT - self.cursor - 2.0 * CELL_PADDING;
            let capacity = ((available / LINE_HEIGHT).floor() as usize).max(1);
            let take = capacity.min(remaining.len());
            let (chunk, rest) = remaining.split_at(take);

            let height = (chunk.len() as f32 * LINE_HEIGHT + 2.0 * CELL_PADDING)
                .max(TABLE_ROW_MIN_HEIGHT);
            self.table_row(chunk, first_chunk.then_some(price.as_str()), height);

            remaining = rest;
            first_chunk = false;
            if remaining.is_empty() {
                break;
            }
            self.new_page();
        }
    }

    fn table_row(&mut self, description: &[String], price: Option<&str>, height: f32) {
        let top = self.cursor;
        let mut x = MARGIN_X;
        for width in COLUMN_WIDTHS {
            self.push(DrawCommand::StrokeRect {
                x,
                y: top,
                width,
                height,
                color: Rgb::GRID,
                line_width: 0.1,
            });
            x += width;
        }

        let baseline = top + CELL_PADDING + 3.5;
        for (i, line) in description.iter().enumerate() {
            self.text(
                MARGIN_X + CELL_PADDING,
                baseline + i as f32 * LINE_HEIGHT,
                line.clone(),
                10.0,
                FontStyle::Normal,
                Rgb::BODY_TEXT,
                Align::Left,
            );
        }

        if let Some(price) = price {
            let qty_center = MARGIN_X + COLUMN_WIDTHS[0] + COLUMN_WIDTHS[1] / 2.0;
            let unit_right = MARGIN_X + COLUMN_WIDTHS[0] + COLUMN_WIDTHS[1] + COLUMN_WIDTHS[2] - CELL_PADDING;
            let total_right = unit_right + COLUMN_WIDTHS[3];

            self.text(qty_center, baseline, "1", 10.0, FontStyle::Normal, Rgb::BODY_TEXT, Align::Center);
            self.text(unit_right, baseline, price, 10.0, FontStyle::Normal, Rgb::BODY_TEXT, Align::Right);
            self.text(total_right, baseline, price, 10.0, FontStyle::Normal, Rgb::BODY_TEXT, Align::Right);
        }

        self.cursor += height;
    }

    fn totals(&mut self, amount: Decimal) {
        self.ensure_space(26.0);
        let y = self.cursor + 10.0;
        let total = format_currency(amount);

        self.text(TOTALS_LABEL_X, y, "Subtotal:", 10.0, FontStyle::Normal, Rgb::GRAY, Align::Left);
        self.text(TOTALS_VALUE_X, y, total.clone(), 10.0, FontStyle::Normal, Rgb::GRAY, Align::Right);
        self.text(TOTALS_LABEL_X, y + 6.0, "Tax (0%):", 10.0, FontStyle::Normal, Rgb::GRAY, Align::Left);
        self.text(
            TOTALS_VALUE_X,
            y + 6.0,
            format_currency(Decimal::ZERO),
            10.0,
            FontStyle::Normal,
            Rgb::GRAY,
            Align::Right,
        );
        self.text(TOTALS_LABEL_X, y + 16.0, "Total:", 14.0, FontStyle::Bold, Rgb::BLACK, Align::Left);
        self.text(TOTALS_VALUE_X, y + 16.0, total, 14.0, FontStyle::Bold, Rgb::BLACK, Align::Right);

        self.cursor = y + 16.0;
    }

    /// Footer divider and notes go on every page
    fn finish(mut self) -> Vec<Page> {
        let notes = self.template.footer_notes.clone();
        for page in &mut self.pages {
            page.commands.push(DrawCommand::Line {
                x1: 14.0,
                y1: PAGE_HEIGHT - 40.0,
                x2: 196.0,
                y2: PAGE_HEIGHT - 40.0,
                color: Rgb::GRID,
                line_width: 0.2,
            });
            for (i, note) in notes.iter().enumerate() {
                page.commands.push(DrawCommand::Text {
                    x: PAGE_WIDTH / 2.0,
                    y: PAGE_HEIGHT - 30.0 + i as f32 * 5.0,
                    text: note.clone(),
                    size: 9.0,
                    style: FontStyle::Italic,
                    color: Rgb::LIGHT_GRAY,
                    align: Align::Center,
                });
            }
        }
        self.pages
    }
}

/// Advance widths of Helvetica for ASCII 32..=126, in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Approximate rendered width of `text` in millimetres
///
/// Uses regular Helvetica metrics for every style; bold runs slightly wider.
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                HELVETICA_WIDTHS[(code - 32) as usize] as u32
            } else {
                556
            }
        })
        .sum();
    units as f32 / 1000.0 * size * PT_TO_MM
}

/// Greedy word wrap to `max_width` millimetres
///
/// Words wider than a line are split by character.
pub fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        for c in word.chars() {
            current.push(c);
            if text_width(&current, size) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
