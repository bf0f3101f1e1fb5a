//! Terminal color support for widget output
//!
//! Widgets recognize a closed set of color names: seven solid foreground
//! colors plus "rainbow", a flowing left-to-right gradient. Painting is
//! purely cosmetic and never changes the column layout of the text.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors that can occur when resolving a color name
#[derive(Error, Debug)]
pub enum ColorError {
    #[error("invalid color '{name}'; valid values are {valid}", valid = valid_names().join(", "))]
    Unknown { name: String },
}

/// A recognized output color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// Flowing multi-color gradient, assigned by column position
    Rainbow,
}

/// All recognized color names, in display order
pub fn valid_names() -> Vec<&'static str> {
    vec![
        "red", "green", "yellow", "blue", "magenta", "cyan", "white", "rainbow",
    ]
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "blue" => Ok(Color::Blue),
            "magenta" => Ok(Color::Magenta),
            "cyan" => Ok(Color::Cyan),
            "white" => Ok(Color::White),
            "rainbow" => Ok(Color::Rainbow),
            _ => Err(ColorError::Unknown { name: s.to_string() }),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::Rainbow => "rainbow",
        };
        f.write_str(name)
    }
}

impl Color {
    /// SGR foreground code for solid colors
    fn sgr(self) -> Option<u8> {
        match self {
            Color::Red => Some(31),
            Color::Green => Some(32),
            Color::Yellow => Some(33),
            Color::Blue => Some(34),
            Color::Magenta => Some(35),
            Color::Cyan => Some(36),
            Color::White => Some(37),
            Color::Rainbow => None,
        }
    }
}

/// Paint `text` with the given color.
///
/// When `enabled` is false the text is returned untouched, which is how the
/// `--no-color` flag propagates to every widget.
pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    match color.sgr() {
        Some(code) => format!("\x1b[{}m{}\x1b[0m", code, text),
        None => rainbow(text),
    }
}

/// Angular frequency of the rainbow gradient, in radians per column
const RAINBOW_FREQ: f64 = 0.1;

/// Stream `text` through a left-to-right truecolor gradient.
///
/// Color is a function of the column index alone, so every row of a glyph
/// block gets the same vertical color bands. Whitespace passes through
/// unpainted.
fn rainbow(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 4);
    for line in split_keeping_newlines(text) {
        if line == "\n" {
            out.push('\n');
            continue;
        }
        let mut painted = false;
        for (col, ch) in line.chars().enumerate() {
            if ch.is_whitespace() {
                out.push(ch);
                continue;
            }
            let (r, g, b) = wheel(col);
            out.push_str(&format!("\x1b[38;2;{};{};{}m{}", r, g, b, ch));
            painted = true;
        }
        if painted {
            out.push_str("\x1b[0m");
        }
    }
    out
}

/// RGB value for a column position on the gradient
fn wheel(col: usize) -> (u8, u8, u8) {
    use std::f64::consts::PI;
    let x = RAINBOW_FREQ * col as f64;
    let chan = |phase: f64| (x + phase).sin().mul_add(127.0, 128.0) as u8;
    (chan(0.0), chan(2.0 * PI / 3.0), chan(4.0 * PI / 3.0))
}

fn split_keeping_newlines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n').flat_map(|part| {
        if let Some(body) = part.strip_suffix('\n') {
            vec![body, "\n"].into_iter()
        } else {
            vec![part].into_iter()
        }
    })
}
