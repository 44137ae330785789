//! WinAnsi encoding and advance widths of the standard-14 Helvetica faces,
//! in 1/1000 em. Used to center and wrap text without embedding fonts.

use super::layout::FontFace;

const FIRST: u32 = 32;
const FALLBACK_WIDTH: u16 = 556;
const REPLACEMENT: u8 = b'?';

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// The Windows-1252 block 0x80..=0x9f: code point, then Helvetica and
/// Helvetica-Bold widths. 0x81, 0x8d, 0x8f, 0x90 and 0x9d are unassigned.
#[rustfmt::skip]
const WIN_ANSI_HIGH: [(u8, char, u16, u16); 27] = [
    (0x80, '\u{20ac}', 556, 556),   // euro
    (0x82, '\u{201a}', 222, 278),   // quotesinglbase
    (0x83, '\u{0192}', 556, 556),   // florin
    (0x84, '\u{201e}', 333, 500),   // quotedblbase
    (0x85, '\u{2026}', 1000, 1000), // ellipsis
    (0x86, '\u{2020}', 556, 556),   // dagger
    (0x87, '\u{2021}', 556, 556),   // daggerdbl
    (0x88, '\u{02c6}', 333, 333),   // circumflex
    (0x89, '\u{2030}', 1000, 1000), // perthousand
    (0x8a, '\u{0160}', 667, 667),   // Scaron
    (0x8b, '\u{2039}', 333, 333),   // guilsinglleft
    (0x8c, '\u{0152}', 1000, 1000), // OE
    (0x8e, '\u{017d}', 611, 611),   // Zcaron
    (0x91, '\u{2018}', 222, 278),   // quoteleft
    (0x92, '\u{2019}', 222, 278),   // quoteright
    (0x93, '\u{201c}', 333, 500),   // quotedblleft
    (0x94, '\u{201d}', 333, 500),   // quotedblright
    (0x95, '\u{2022}', 350, 350),   // bullet
    (0x96, '\u{2013}', 556, 556),   // endash
    (0x97, '\u{2014}', 1000, 1000), // emdash
    (0x98, '\u{02dc}', 333, 333),   // tilde
    (0x99, '\u{2122}', 1000, 1000), // trademark
    (0x9a, '\u{0161}', 500, 556),   // scaron
    (0x9b, '\u{203a}', 333, 333),   // guilsinglright
    (0x9c, '\u{0153}', 944, 944),   // oe
    (0x9e, '\u{017e}', 500, 500),   // zcaron
    (0x9f, '\u{0178}', 667, 667),   // Ydieresis
];

/// WinAnsi byte for `c`, if the encoding has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7e | 0xa0..=0xff => Some(c as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(_, ch, _, _)| *ch == c)
            .map(|(byte, _, _, _)| *byte),
    }
}

/// Encodes `text` for a standard-14 font's WinAnsi encoding. Characters the
/// encoding cannot represent become `?`.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(REPLACEMENT))
        .collect()
}

fn glyph_width(byte: u8, face: FontFace) -> u16 {
    let table = match face {
        FontFace::Regular => &HELVETICA,
        FontFace::Bold => &HELVETICA_BOLD,
    };
    if let Some(width) = (byte as u32).checked_sub(FIRST).and_then(|i| table.get(i as usize)) {
        return *width;
    }
    WIN_ANSI_HIGH
        .iter()
        .find(|(b, _, _, _)| *b == byte)
        .map(|(_, _, regular, bold)| match face {
            FontFace::Regular => *regular,
            FontFace::Bold => *bold,
        })
        .unwrap_or(FALLBACK_WIDTH)
}

/// Width of `text` in points when set in `face` at `size`, measured as it
/// will be encoded.
pub fn text_width(text: &str, face: FontFace, size: f32) -> f32 {
    let units: u32 = win_ansi(text)
        .into_iter()
        .map(|b| glyph_width(b, face) as u32)
        .sum();
    units as f32 * size / 1000.0
}

/// Breaks `text` into lines no wider than `max_width`, at spaces where
/// possible and inside a word only when the word alone is too wide.
pub fn wrap(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let fits = |s: &str| text_width(s, face, size) <= max_width;
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if fits(&candidate) {
            line = candidate;
            continue;
        }
        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        for c in word.chars() {
            line.push(c);
            if !fits(&line) && line.chars().count() > 1 {
                line.pop();
                lines.push(std::mem::take(&mut line));
                line.push(c);
            }
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_widths() {
        // "A" is 667 units in Helvetica, 722 in Helvetica-Bold.
        assert!((text_width("A", FontFace::Regular, 10.0) - 6.67).abs() < 1e-4);
        assert!((text_width("A", FontFace::Bold, 10.0) - 7.22).abs() < 1e-4);
        assert_eq!(text_width("", FontFace::Regular, 12.0), 0.0);
    }

    #[test]
    fn bold_is_wider() {
        let text = "ENROLLMENT CERTIFICATE";
        assert!(text_width(text, FontFace::Bold, 24.0) > text_width(text, FontFace::Regular, 24.0));
    }

    #[test]
    fn windows_1252_punctuation_widths() {
        assert!((text_width("\u{2019}", FontFace::Regular, 1000.0) - 222.0).abs() < 1e-3);
        assert!((text_width("\u{2014}", FontFace::Bold, 1000.0) - 1000.0).abs() < 1e-3);
        // Unencodable characters are measured as the `?` that gets printed.
        assert!((text_width("李", FontFace::Regular, 1000.0) - 556.0).abs() < 1e-3);
        assert!((text_width("李", FontFace::Bold, 1000.0) - 611.0).abs() < 1e-3);
    }

    #[test]
    fn latin1_without_table_entry_uses_fallback() {
        assert!((text_width("é", FontFace::Regular, 1000.0) - 556.0).abs() < 1e-3);
    }

    #[test]
    fn every_high_block_entry_round_trips() {
        for (byte, c, _, _) in WIN_ANSI_HIGH {
            assert_eq!(win_ansi_byte(c), Some(byte));
        }
        assert_eq!(win_ansi_byte('\u{0081}'), None);
    }

    #[test]
    fn wrap_breaks_at_spaces() {
        let text = "Bachelor of Science in Mechanical and Aerospace Engineering (Honours)";
        let lines = wrap(text, FontFace::Regular, 12.0, 297.64);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_width(l, FontFace::Regular, 12.0) <= 297.64));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_splits_overlong_words() {
        let word = "Pneumonoultramicroscopicsilicovolcanoconiosis".repeat(2);
        let lines = wrap(&word, FontFace::Regular, 12.0, 100.0);
        assert!(lines.len() > 2);
        assert!(lines.iter().all(|l| text_width(l, FontFace::Regular, 12.0) <= 100.0));
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn wrap_keeps_short_text_whole() {
        assert_eq!(wrap("Jane Doe", FontFace::Regular, 12.0, 300.0), vec!["Jane Doe"]);
    }
}
