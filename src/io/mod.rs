//! Delimited-text persistence for TEM tables.
//!
//! Tables are read with [`read_table`] and reduction results are written with
//! [`write_data`], [`write_measurements`], and [`write_summary`]. Output is
//! always comma-separated; input may be separated by commas, semicolons, or tabs.

use std::fmt;

pub mod error;

mod reader;
mod writer;

pub use error::Error;
pub use reader::read_table;
pub use writer::{write_data, write_measurements, write_summary};

/// Column names accepted for the pixel length, matched case-insensitively.
pub const PIXEL_LENGTH_COLUMNS: &[&str] = &["length", "pixel_length", "pixels"];

/// Column names accepted for the scale bar value.
pub const SCALE_COLUMNS: &[&str] = &["scale", "scale_nm"];

/// Column names accepted for the image identifier.
pub const IMAGE_COLUMNS: &[&str] = &["img", "image", "image_id"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
}

impl Delimiter {
    /// Picks the delimiter of a header line: tab, then semicolon, else comma.
    pub fn detect(header: &str) -> Self {
        if header.contains('\t') {
            Delimiter::Tab
        } else if header.contains(';') {
            Delimiter::Semicolon
        } else {
            Delimiter::Comma
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma-separated"),
            Delimiter::Semicolon => write!(f, "semicolon-separated"),
            Delimiter::Tab => write!(f, "tab-separated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_delimiter_from_header() {
        assert_eq!(Delimiter::detect("img\tscale\tlength"), Delimiter::Tab);
        assert_eq!(Delimiter::detect("img;scale;length"), Delimiter::Semicolon);
        assert_eq!(Delimiter::detect("img,scale,length"), Delimiter::Comma);
        assert_eq!(Delimiter::detect("length"), Delimiter::Comma);
    }
}
