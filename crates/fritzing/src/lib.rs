// Fritzing document codec: .fzp (part) and .fz (sketch) XML in both directions
mod parse;
pub mod types;
pub mod view;
mod write;

pub use types::*;

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FritzingError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Expected root element '{expected}', found '{found}'")]
    UnexpectedRoot { expected: &'static str, found: String },

    #[error("Missing required element: {0}")]
    MissingElement(&'static str),

    #[error("Missing required attribute '{attr}' on element '{element}'")]
    MissingAttribute {
        element: &'static str,
        attr: &'static str,
    },

    #[error("Invalid attribute value: {0}")]
    InvalidAttribute(String),

    #[error("XML write error: {0}")]
    Write(String),
}

pub type Result<T> = std::result::Result<T, FritzingError>;

impl Part {
    /// Parse a part definition from `.fzp` XML text.
    pub fn parse(xml: &str) -> Result<Self> {
        parse::part::parse_part(xml)
    }

    /// Parse a part definition from a `.fzp` file.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    /// Serialize back to `.fzp` XML text.
    pub fn serialize(&self) -> Result<String> {
        write::part::write_part(self)
    }
}

impl Sketch {
    /// Parse a sketch (project) from `.fz` XML text.
    pub fn parse(xml: &str) -> Result<Self> {
        parse::sketch::parse_sketch(xml)
    }

    /// Parse a sketch from a `.fz` file.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    /// Serialize back to `.fz` XML text.
    pub fn serialize(&self) -> Result<String> {
        write::sketch::write_sketch(self)
    }
}
