//! FIGfont (.flf) parsing
//!
//! A FIGfont is a text file: one header line, a comment block, then one
//! glyph (a stack of `height` art rows, each terminated by an endmark
//! character) for every printable ASCII character, optionally followed by
//! the seven German characters and code-tagged extras.

use std::collections::HashMap;

use thiserror::Error;

/// Smush mode bits, shared by the header decoder and the renderer
pub(crate) mod layout {
    pub const EQUAL: u32 = 1;
    pub const LOWLINE: u32 = 2;
    pub const HIERARCHY: u32 = 4;
    pub const PAIR: u32 = 8;
    pub const BIGX: u32 = 16;
    pub const HARDBLANK: u32 = 32;
    pub const KERN: u32 = 64;
    pub const SMUSH: u32 = 128;
}

/// Errors that can occur while parsing font data
#[derive(Error, Debug)]
pub enum FontParseError {
    #[error("not a FIGfont: missing flf2a signature")]
    BadSignature,

    #[error("malformed font header: {reason}")]
    BadHeader { reason: String },

    #[error("font data ends before all required glyphs are defined")]
    Truncated,

    #[error("malformed code tag line: {line}")]
    BadCodeTag { line: String },
}

/// The art rows for one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    rows: Vec<String>,
    width: usize,
}

impl Glyph {
    fn new(mut rows: Vec<String>) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        for row in &mut rows {
            let len = row.chars().count();
            row.extend(std::iter::repeat(' ').take(width - len));
        }
        Glyph { rows, width }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

/// A parsed font: layout settings plus the glyph table.
///
/// Immutable once parsed; resolved anew for every banner invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigFont {
    pub height: usize,
    pub baseline: usize,
    pub hardblank: char,
    smush_mode: u32,
    glyphs: HashMap<char, Glyph>,
}

/// Code points for the optional German glyph block, in file order
const DEUTSCH: [u32; 7] = [196, 214, 220, 228, 246, 252, 223];

impl FigFont {
    /// Parse a font from the contents of an .flf file
    pub fn parse(data: &str) -> Result<Self, FontParseError> {
        let mut lines = data.lines();
        let header = lines.next().ok_or(FontParseError::BadSignature)?;
        let (height, baseline, hardblank, smush_mode, comment_lines) = parse_header(header)?;

        for _ in 0..comment_lines {
            lines.next().ok_or(FontParseError::Truncated)?;
        }

        let mut lines = lines.peekable();
        let mut glyphs = HashMap::new();

        for cp in 32u32..=126 {
            let ch = char::from_u32(cp).expect("printable ASCII");
            glyphs.insert(ch, read_glyph(&mut lines, height)?);
        }

        for cp in DEUTSCH {
            if lines.peek().is_none() {
                break;
            }
            let glyph = read_glyph(&mut lines, height)?;
            if let Some(ch) = char::from_u32(cp) {
                glyphs.insert(ch, glyph);
            }
        }

        while let Some(tag) = lines.next() {
            if tag.trim().is_empty() {
                continue;
            }
            let cp = parse_code_tag(tag)?;
            let glyph = read_glyph(&mut lines, height)?;
            if let Some(ch) = char::from_u32(cp) {
                glyphs.insert(ch, glyph);
            }
        }

        Ok(FigFont {
            height,
            baseline,
            hardblank,
            smush_mode,
            glyphs,
        })
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub(crate) fn smush_mode(&self) -> u32 {
        self.smush_mode
    }
}

fn parse_header(header: &str) -> Result<(usize, usize, char, u32, usize), FontParseError> {
    let rest = header
        .strip_prefix("flf2a")
        .ok_or(FontParseError::BadSignature)?;
    let hardblank = rest.chars().next().ok_or(FontParseError::BadSignature)?;

    let fields: Vec<&str> = rest[hardblank.len_utf8()..].split_whitespace().collect();
    if fields.len() < 5 {
        return Err(FontParseError::BadHeader {
            reason: format!("expected at least 5 header fields, found {}", fields.len()),
        });
    }

    let number = |idx: usize, name: &str| -> Result<i64, FontParseError> {
        fields[idx].parse().map_err(|_| FontParseError::BadHeader {
            reason: format!("{} is not a number: {}", name, fields[idx]),
        })
    };

    let height = number(0, "height")?;
    let baseline = number(1, "baseline")?;
    // fields[2] is max_length, informational only
    let old_layout = number(3, "old layout")?;
    let comment_lines = number(4, "comment count")?;
    let full_layout = match fields.get(6) {
        Some(_) => Some(number(6, "full layout")?),
        None => None,
    };

    if height <= 0 || comment_lines < 0 {
        return Err(FontParseError::BadHeader {
            reason: "height and comment count must be positive".to_string(),
        });
    }

    Ok((
        height as usize,
        baseline.clamp(0, height) as usize,
        hardblank,
        smush_mode(old_layout, full_layout),
        comment_lines as usize,
    ))
}

/// Derive the effective smush mode from the header layout fields.
///
/// The full-layout field wins when present; otherwise the old-layout value
/// maps as: -1 full width, 0 kerning, >0 smushing with that rule set.
fn smush_mode(old_layout: i64, full_layout: Option<i64>) -> u32 {
    match full_layout {
        Some(full) => full.max(0) as u32,
        None => {
            if old_layout < 0 {
                0
            } else if old_layout == 0 {
                layout::KERN
            } else {
                (old_layout as u32 & 63) | layout::SMUSH
            }
        }
    }
}

fn read_glyph<'a, I>(lines: &mut I, height: usize) -> Result<Glyph, FontParseError>
where
    I: Iterator<Item = &'a str>,
{
    let mut rows = Vec::with_capacity(height);
    for _ in 0..height {
        let line = lines.next().ok_or(FontParseError::Truncated)?;
        rows.push(strip_endmark(line));
    }
    Ok(Glyph::new(rows))
}

/// Remove the endmark from a glyph row.
///
/// The endmark is whatever character the row ends with; every trailing
/// occurrence is removed, so both `...@` and `...@@` terminators work.
fn strip_endmark(line: &str) -> String {
    match line.chars().last() {
        Some(mark) => line.trim_end_matches(mark).to_string(),
        None => String::new(),
    }
}

fn parse_code_tag(line: &str) -> Result<u32, FontParseError> {
    let token = line
        .split_whitespace()
        .next()
        .ok_or_else(|| FontParseError::BadCodeTag {
            line: line.to_string(),
        })?;
    let parsed = if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        token.parse()
    };
    parsed.map_err(|_| FontParseError::BadCodeTag {
        line: line.to_string(),
    })
}
