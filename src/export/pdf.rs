//! PDF rendering of invoice layouts
//!
//! Converts millimetre, top-left-origin drawing commands into PDF content
//! streams (points, bottom-left origin) using the standard Helvetica faces.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::Write;

use super::assets::LogoImage;
use super::layout::{text_width, Align, DrawCommand, FontStyle, InvoiceLayout, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use crate::error::ExportError;

const MM_TO_PT: f32 = 72.0 / 25.4;
const LOGO_RESOURCE: &str = "Im1";

fn pt(mm: f32) -> Object {
    Object::Real(mm * MM_TO_PT)
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn color_operands(color: Rgb) -> Vec<Object> {
    vec![
        real(color.0 as f32 / 255.0),
        real(color.1 as f32 / 255.0),
        real(color.2 as f32 / 255.0),
    ]
}

fn font_resource(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Normal => "F1",
        FontStyle::Bold => "F2",
        FontStyle::Italic => "F3",
    }
}

/// Characters WinAnsi places in 0x80..=0x9F instead of the C1 controls
const WIN_ANSI_EXTRAS: [(char, u8); 27] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('•', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

/// Encode one character for a WinAnsi font; unencodable characters become `?`
fn win_ansi_byte(c: char) -> u8 {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
        _ => WIN_ANSI_EXTRAS
            .iter()
            .find(|(extra, _)| *extra == c)
            .map(|(_, byte)| *byte)
            .unwrap_or(b'?'),
    }
}

fn win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn page_operations(commands: &[DrawCommand]) -> Vec<Operation> {
    let mut ops = Vec::new();

    for command in commands {
        match command {
            DrawCommand::FillRect { x, y, width, height, color } => {
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new(
                    "re",
                    vec![pt(*x), pt(PAGE_HEIGHT - y - height), pt(*width), pt(*height)],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawCommand::StrokeRect { x, y, width, height, color, line_width } => {
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new("w", vec![pt(*line_width)]));
                ops.push(Operation::new(
                    "re",
                    vec![pt(*x), pt(PAGE_HEIGHT - y - height), pt(*width), pt(*height)],
                ));
                ops.push(Operation::new("S", vec![]));
            }
            DrawCommand::Line { x1, y1, x2, y2, color, line_width } => {
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new("w", vec![pt(*line_width)]));
                ops.push(Operation::new("m", vec![pt(*x1), pt(PAGE_HEIGHT - y1)]));
                ops.push(Operation::new("l", vec![pt(*x2), pt(PAGE_HEIGHT - y2)]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawCommand::Text { x, y, text, size, style, color, align } => {
                let left = match align {
                    Align::Left => *x,
                    Align::Center => x - text_width(text, *size) / 2.0,
                    Align::Right => x - text_width(text, *size),
                };
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new(
                    "Tf",
                    vec![font_resource(*style).into(), real(*size)],
                ));
                ops.push(Operation::new("Td", vec![pt(left), pt(PAGE_HEIGHT - y)]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(win_ansi(text), lopdf::StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawCommand::Logo { x, y, width, height } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        pt(*width),
                        real(0.0),
                        real(0.0),
                        pt(*height),
                        pt(*x),
                        pt(PAGE_HEIGHT - y - height),
                    ],
                ));
                ops.push(Operation::new("Do", vec![LOGO_RESOURCE.into()]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }

    ops
}

fn image_stream(logo: &LogoImage) -> Result<Stream, ExportError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&logo.rgb)?;
    let compressed = encoder.finish()?;

    Ok(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => logo.width as i64,
            "Height" => logo.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        compressed,
    ))
}

/// Render a layout to PDF bytes, one PDF page per layout page
pub fn render_pdf(layout: &InvoiceLayout) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for (resource, base_font) in [
        ("F1", "Helvetica"),
        ("F2", "Helvetica-Bold"),
        ("F3", "Helvetica-Oblique"),
    ] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base_font,
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(resource, font_id);
    }

    let mut resources = dictionary! {
        "Font" => fonts,
    };
    if let Some(logo) = &layout.logo {
        let image_id = doc.add_object(image_stream(logo)?);
        resources.set(
            "XObject",
            dictionary! {
                LOGO_RESOURCE => image_id,
            },
        );
    }
    let resources_id = doc.add_object(resources);

    let mut kids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = Content {
            operations: page_operations(&page.commands),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![real(0.0), real(0.0), pt(PAGE_WIDTH), pt(PAGE_HEIGHT)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}
