//! Font resolution: an ordered source chain with a resilience fallback
//!
//! Lookup order: the embedded font set, then the system font directory for
//! relative names, then the filesystem for absolute paths. A name that
//! resolves nowhere falls back to the embedded "standard" font with a
//! warning instead of failing the banner; the warning travels back in the
//! [`Resolution`] so the caller decides where to report it. Only an
//! unloadable standard font is fatal.

use std::path::Path;

use thiserror::Error;

use super::font::{FigFont, FontParseError};

/// Directory searched for fonts addressed by a relative name
pub const SYSTEM_FONT_DIR: &str = "/usr/share/salute/fonts";

/// Font used when none is requested, and as the fallback target
pub const DEFAULT_FONT: &str = "standard";

/// Fonts compiled into the binary
const EMBEDDED: &[(&str, &str)] = &[
    ("small", include_str!("fonts/small.flf")),
    ("standard", include_str!("fonts/standard.flf")),
];

/// Errors that can occur while resolving a font
#[derive(Error, Debug)]
pub enum FontError {
    #[error("font '{name}' not found")]
    NotFound { name: String },

    #[error("font '{name}' is not a valid FIGfont: {source}")]
    Invalid {
        name: String,
        source: FontParseError,
    },

    #[error("failed to load standard font: {source}")]
    StandardUnavailable { source: Box<FontError> },
}

/// A resolved font plus any non-fatal diagnostics produced on the way
#[derive(Debug)]
pub struct Resolution {
    pub font: FigFont,
    pub warnings: Vec<String>,
}

/// Resolve a font name or path to a parsed font.
///
/// An empty name means "standard". Any failure for a non-standard request
/// retries the chain with "standard" and records one warning; the result is
/// an error only when the standard font itself cannot be loaded.
pub fn resolve(name_or_path: &str) -> Result<Resolution, FontError> {
    let requested = if name_or_path.is_empty() {
        DEFAULT_FONT
    } else {
        name_or_path
    };

    match attempt(requested) {
        Ok(font) => Ok(Resolution {
            font,
            warnings: Vec::new(),
        }),
        Err(err) if requested == DEFAULT_FONT => Err(err),
        Err(_) => {
            let warnings = vec![format!(
                "font '{}' not found, falling back to {} font",
                requested, DEFAULT_FONT
            )];
            match attempt(DEFAULT_FONT) {
                Ok(font) => Ok(Resolution { font, warnings }),
                Err(err) => Err(FontError::StandardUnavailable {
                    source: Box::new(err),
                }),
            }
        }
    }
}

/// One pass through the source chain, without the standard fallback
fn attempt(name: &str) -> Result<FigFont, FontError> {
    let file_name = with_extension(name);

    if let Some((_, data)) = EMBEDDED
        .iter()
        .find(|(embedded, _)| format!("{}.flf", embedded) == file_name)
    {
        return parse(name, data);
    }

    let path = Path::new(name);
    if path.is_absolute() {
        if let Ok(data) = std::fs::read_to_string(path) {
            return parse(name, &data);
        }
    } else {
        let system = Path::new(SYSTEM_FONT_DIR).join(&file_name);
        if let Ok(data) = std::fs::read_to_string(system) {
            return parse(name, &data);
        }
    }

    Err(FontError::NotFound {
        name: name.to_string(),
    })
}

fn parse(name: &str, data: &str) -> Result<FigFont, FontError> {
    FigFont::parse(data).map_err(|source| FontError::Invalid {
        name: name.to_string(),
        source,
    })
}

fn with_extension(name: &str) -> String {
    if Path::new(name).extension().is_none() {
        format!("{}.flf", name)
    } else {
        name.to_string()
    }
}

/// Names of all fonts the banner widget can reach by name, sorted
pub fn available_fonts() -> Vec<String> {
    let mut names: Vec<String> = EMBEDDED.iter().map(|(name, _)| name.to_string()).collect();
    if let Ok(entries) = std::fs::read_dir(SYSTEM_FONT_DIR) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "flf") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
    }
    names.sort();
    names.dedup();
    names
}
