//! Loading captured CLV regions from disk.
//!
//! Inputs are either raw bytes or a hex dump. Hex dumps may separate octets
//! with whitespace, ':' or '-', and may carry `#` comments to end of line.

use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Hex for `.hex` / `.txt` files, raw bytes otherwise.
    #[default]
    Auto,
    Hex,
    Binary,
}

impl InputFormat {
    fn resolve(self, path: &Path) -> InputFormat {
        if self != InputFormat::Auto {
            return self;
        }
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "hex" | "txt" => InputFormat::Hex,
            _ => InputFormat::Binary,
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),
}

pub fn read_region_file(path: &Path, format: InputFormat) -> Result<Vec<u8>, SourceError> {
    match format.resolve(path) {
        InputFormat::Hex => parse_hex_text(&fs::read_to_string(path)?),
        _ => Ok(fs::read(path)?),
    }
}

pub fn parse_hex_text(text: &str) -> Result<Vec<u8>, SourceError> {
    let digits: String = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(str::chars)
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();
    Ok(hex::decode(digits)?)
}
