// ZIP container layer over the fritzing document codec.
//
// A "bin" (.fzb) is a flat named collection of parts; a "bundle"
// (.fzz/.fzpz/.fzbz) pairs primary documents, reparsed into typed objects,
// with auxiliary entries kept as opaque byte blobs. Archive parsing is
// all-or-nothing: one bad entry fails the whole operation and no partial
// result escapes.

mod bin;
mod bundle;
mod zipio;

pub use bin::PartBin;
pub use bundle::{
    Bundle, BundleKind, PartBinBundle, PartBinKind, PartBundle, PartKind, SketchBundle, SketchKind,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive entry '{name}' is empty")]
    EmptyEntry { name: String },

    #[error("Invalid archive entry name: '{0}'")]
    InvalidEntryName(String),

    #[error("Archive entry '{name}' is not valid UTF-8")]
    Utf8 { name: String },

    #[error("Failed to parse archive entry '{name}': {source}")]
    Document {
        name: String,
        #[source]
        source: fritzing::FritzingError,
    },
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
