use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use thiserror::Error;

use super::layout::{FontFace, Mark, Page};
use super::metrics::win_ansi;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode content stream: {0}")]
    Content(String),

    #[error("failed to serialize document: {0}")]
    Serialize(String),
}

fn operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();

    for mark in &page.marks {
        match mark {
            Mark::Rect {
                x,
                y,
                width,
                height,
                line_width,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("w", vec![(*line_width).into()]));
                ops.push(Operation::new(
                    "re",
                    vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()],
                ));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            Mark::Text {
                text,
                x,
                y,
                size,
                face,
                color,
            } => {
                let font = match face {
                    FontFace::Regular => REGULAR_FONT,
                    FontFace::Bold => BOLD_FONT,
                };
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "rg",
                    vec![color.0.into(), color.1.into(), color.2.into()],
                ));
                ops.push(Operation::new("Tf", vec![font.into(), (*size).into()]));
                ops.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }

    ops
}

/// Serializes a laid-out page into a single-page PDF.
pub fn render(page: &Page, title: &str) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => font_regular,
            BOLD_FONT => font_bold,
        },
    });

    let content = Content {
        operations: operations(page),
    };
    let encoded = content
        .encode()
        .map_err(|e| RenderError::Content(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.0_f32.into(), 0.0_f32.into(), page.width.into(), page.height.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => Object::Integer(1),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal("enrollment-certificates"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Serialize(e.to_string()))?;
    Ok(bytes)
}
