//! Fixed certificate layout.
//!
//! Positions are computed top-down from the page's upper-left corner, the way
//! the page is designed, and converted to PDF user space (origin bottom-left,
//! `y` at the text baseline) when a [`Mark`] is created.

use chrono::{DateTime, Utc};

use super::metrics::{text_width, wrap};
use super::request::{long_date, Certificate};
use crate::config::Branding;

pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 50.0;
const TEXT_WIDTH: f32 = A4_WIDTH - 2.0 * MARGIN;
/// Smallest scale applied to an over-wide centered line before it wraps.
const MIN_SHRINK: f32 = 0.75;

const OUTER_BORDER_INSET: f32 = 20.0;
const INNER_BORDER_INSET: f32 = 30.0;

/// Line advance as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.2;
/// Helvetica ascender, used to go from the top of a line to its baseline.
const ASCENT: f32 = 0.718;

const FIELD_CONTAINER_WIDTH: f32 = 400.0;
const FIELD_VALUE_OFFSET: f32 = 150.0;
const FIELD_VALUE_SIZE: f32 = 12.0;
pub const FIELD_ROW_SPACING: f32 = 30.0;

const FOOTER_BOTTOM_OFFSET: f32 = 100.0;
const ISSUE_DATE_RISE: f32 = 40.0;
const SIGNATURE_CAPTION_DROP: f32 = 20.0;
const SIGNATURE_COLUMNS: [f32; 2] = [150.0, 350.0];
const SIGNATURE_LINE: &str = "_________________________";

pub const TITLE: &str = "ENROLLMENT CERTIFICATE";
pub const INTRO: &str = "This is to certify that:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub fn hex(code: u32) -> Self {
        Self(
            ((code >> 16) & 0xff) as f32 / 255.0,
            ((code >> 8) & 0xff) as f32 / 255.0,
            (code & 0xff) as f32 / 255.0,
        )
    }
}

const NAVY: u32 = 0x1a365d;
const SLATE: u32 = 0x4a5568;
const INK: u32 = 0x2d3748;
const MUTED: u32 = 0x718096;

/// One drawing primitive, in PDF user space.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        face: FontFace,
        color: Rgb,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub marks: Vec<Mark>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Text { text, .. } => Some(text.as_str()),
            Mark::Rect { .. } => None,
        })
    }

    /// The text mark whose content is exactly `needle`.
    pub fn find_text(&self, needle: &str) -> Option<&Mark> {
        self.marks
            .iter()
            .find(|m| matches!(m, Mark::Text { text, .. } if text == needle))
    }
}

/// `CERT-` followed by the last six digits of the issue instant's epoch millis.
pub fn certificate_number(issued_at: DateTime<Utc>) -> String {
    let millis = issued_at.timestamp_millis().unsigned_abs();
    format!("CERT-{:06}", millis % 1_000_000)
}

/// Top-down text placement on a fixed-size page.
struct Cursor {
    page_height: f32,
    top: f32,
    marks: Vec<Mark>,
}

impl Cursor {
    fn text_at(&mut self, text: &str, x: f32, top: f32, size: f32, face: FontFace, color: u32) {
        self.marks.push(Mark::Text {
            text: text.to_string(),
            x,
            y: self.page_height - top - size * ASCENT,
            size,
            face,
            color: Rgb::hex(color),
        });
    }

    /// Centers `text` between the margins starting at `top` and returns the
    /// height used. Text too wide for one line is first shrunk, down to
    /// `MIN_SHRINK` of `size`, then wrapped.
    fn centered_at(&mut self, text: &str, top: f32, size: f32, face: FontFace, color: u32) -> f32 {
        let natural = text_width(text, face, size);
        let size = if natural > TEXT_WIDTH {
            (size * TEXT_WIDTH / natural).max(size * MIN_SHRINK)
        } else {
            size
        };

        let lines = wrap(text, face, size, TEXT_WIDTH);
        for (i, line) in lines.iter().enumerate() {
            let x = (A4_WIDTH - text_width(line, face, size)) / 2.0;
            self.text_at(line, x, top + i as f32 * size * LINE_HEIGHT, size, face, color);
        }
        lines.len() as f32 * size * LINE_HEIGHT
    }

    /// Centers `text` at the cursor, then advances past it plus `gap_lines`.
    fn centered_line(&mut self, text: &str, size: f32, face: FontFace, color: u32, gap_lines: f32) {
        let used = self.centered_at(text, self.top, size, face, color);
        self.top += used + size * LINE_HEIGHT * gap_lines;
    }

    /// Regular body text wrapped to `max_width`; returns the number of lines.
    fn wrapped_at(&mut self, text: &str, x: f32, top: f32, max_width: f32, size: f32) -> usize {
        let lines = wrap(text, FontFace::Regular, size, max_width);
        for (i, line) in lines.iter().enumerate() {
            let line_top = top + i as f32 * size * LINE_HEIGHT;
            self.text_at(line, x, line_top, size, FontFace::Regular, INK);
        }
        lines.len()
    }

    fn rect_inset(&mut self, inset: f32, line_width: f32) {
        self.marks.push(Mark::Rect {
            x: inset,
            y: inset,
            width: A4_WIDTH - 2.0 * inset,
            height: self.page_height - 2.0 * inset,
            line_width,
        });
    }
}

/// Lays out one certificate. Deterministic for a given request and instant.
pub fn layout(certificate: &Certificate, branding: &Branding, issued_at: DateTime<Utc>) -> Page {
    let mut cursor = Cursor {
        page_height: A4_HEIGHT,
        top: MARGIN,
        marks: Vec::new(),
    };

    cursor.rect_inset(OUTER_BORDER_INSET, 3.0);
    cursor.rect_inset(INNER_BORDER_INSET, 1.0);

    cursor.centered_line(&branding.organization, 28.0, FontFace::Bold, NAVY, 0.5);
    cursor.centered_line(&branding.office, 16.0, FontFace::Regular, SLATE, 1.0);
    cursor.centered_line(TITLE, 24.0, FontFace::Bold, INK, 1.5);
    cursor.centered_line(
        &format!("Certificate Number: {}", certificate_number(issued_at)),
        12.0,
        FontFace::Regular,
        MUTED,
        1.0,
    );
    cursor.centered_line(INTRO, 14.0, FontFace::Regular, INK, 2.0);

    let label_x = (A4_WIDTH - FIELD_CONTAINER_WIDTH) / 2.0;
    let value_x = label_x + FIELD_VALUE_OFFSET;
    let value_width = A4_WIDTH - MARGIN - value_x;
    let mut top = cursor.top;
    let fields = [
        ("Student Name:", certificate.student_name.clone()),
        ("Date of Birth:", long_date(certificate.date_of_birth)),
        ("Program Name:", certificate.program_name.clone()),
        ("Enrollment Date:", long_date(certificate.enrollment_date)),
        ("Expected Graduation:", long_date(certificate.expected_graduation_date)),
    ];
    for (label, value) in &fields {
        cursor.text_at(label, label_x, top, 14.0, FontFace::Bold, INK);
        let lines = cursor.wrapped_at(value, value_x, top, value_width, FIELD_VALUE_SIZE);
        // Rows stay 30pt apart unless a wrapped value needs more room.
        top += FIELD_ROW_SPACING.max(lines as f32 * FIELD_VALUE_SIZE * LINE_HEIGHT);
    }

    // Footer is anchored to the page bottom, independent of the body.
    let footer_top = A4_HEIGHT - FOOTER_BOTTOM_OFFSET;
    let issue_date = format!("Issue Date: {}", long_date(issued_at.date_naive()));
    cursor.centered_at(&issue_date, footer_top - ISSUE_DATE_RISE, 12.0, FontFace::Regular, INK);
    for x in SIGNATURE_COLUMNS {
        cursor.text_at(SIGNATURE_LINE, x, footer_top, 12.0, FontFace::Regular, INK);
    }
    for (x, caption) in SIGNATURE_COLUMNS.iter().zip(["Registrar Signature", "Dean Signature"]) {
        cursor.text_at(
            caption,
            *x,
            footer_top + SIGNATURE_CAPTION_DROP,
            10.0,
            FontFace::Regular,
            INK,
        );
    }

    Page {
        width: A4_WIDTH,
        height: A4_HEIGHT,
        marks: cursor.marks,
    }
}
