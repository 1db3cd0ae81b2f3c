//! Bundles: archives pairing primary documents with auxiliary blobs.
//!
//! A bundle kind supplies three operations: parse-one, serialize-one, and
//! the primary-entry classification (a literal suffix match on the entry
//! name). Everything that is not primary is carried verbatim as bytes, so
//! images and firmware sources survive a round trip untouched.

use crate::{ArchiveError, PartBin, Result, zipio};
use fritzing::{Part, Sketch};
use std::path::Path;

pub trait BundleKind {
    type Document;

    /// Entry-name suffix marking a primary document (`.fz`, `.fzp`, `.fzb`).
    const PRIMARY_SUFFIX: &'static str;

    fn parse(entry_name: &str, bytes: &[u8]) -> Result<Self::Document>;
    fn serialize(entry_name: &str, document: &Self::Document) -> Result<Vec<u8>>;
}

/// An archive of primary documents plus auxiliary byte blobs, both keyed by
/// entry name in insertion order.
pub struct Bundle<K: BundleKind> {
    primary: Vec<(String, K::Document)>,
    auxiliary: Vec<(String, Vec<u8>)>,
}

pub type SketchBundle = Bundle<SketchKind>;
pub type PartBundle = Bundle<PartKind>;
pub type PartBinBundle = Bundle<PartBinKind>;

impl<K: BundleKind> Default for Bundle<K> {
    fn default() -> Self {
        Self {
            primary: Vec::new(),
            auxiliary: Vec::new(),
        }
    }
}

impl<K: BundleKind> Bundle<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_primary(entry_name: &str) -> bool {
        entry_name.ends_with(K::PRIMARY_SUFFIX)
    }

    pub fn insert_primary(&mut self, name: impl Into<String>, document: K::Document) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(ArchiveError::InvalidEntryName(name));
        }
        match self.primary.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = document,
            None => self.primary.push((name, document)),
        }
        Ok(())
    }

    pub fn insert_auxiliary(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(ArchiveError::InvalidEntryName(name));
        }
        match self.auxiliary.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = bytes,
            None => self.auxiliary.push((name, bytes)),
        }
        Ok(())
    }

    pub fn primary(&self, name: &str) -> Option<&K::Document> {
        self.primary
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, doc)| doc)
    }

    pub fn auxiliary(&self, name: &str) -> Option<&[u8]> {
        self.auxiliary
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bytes)| bytes.as_slice())
    }

    pub fn primaries(&self) -> impl Iterator<Item = (&str, &K::Document)> {
        self.primary.iter().map(|(n, doc)| (n.as_str(), doc))
    }

    pub fn auxiliaries(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.auxiliary
            .iter()
            .map(|(n, bytes)| (n.as_str(), bytes.as_slice()))
    }

    pub fn primary_count(&self) -> usize {
        self.primary.len()
    }

    pub fn auxiliary_count(&self) -> usize {
        self.auxiliary.len()
    }

    /// Packs primaries through the kind's serializer and auxiliaries
    /// verbatim, all under their original entry names.
    pub fn to_zip(&self) -> Result<Vec<u8>> {
        let mut writer = zipio::EntryWriter::new();
        for (name, document) in &self.primary {
            writer.add(name, &K::serialize(name, document)?)?;
        }
        for (name, bytes) in &self.auxiliary {
            writer.add(name, bytes)?;
        }
        writer.finish()
    }

    /// Enumerates entries and routes each by the suffix classification.
    /// All-or-nothing: any entry failure (empty content, bad UTF-8, bad
    /// document) fails the whole parse.
    pub fn from_zip(bytes: &[u8]) -> Result<Self> {
        let mut bundle = Bundle::new();
        for (name, content) in zipio::read_entries(bytes)? {
            if Self::is_primary(&name) {
                tracing::debug!(entry = %name, "primary bundle entry");
                let document = K::parse(&name, &content)?;
                bundle.insert_primary(name, document)?;
            } else {
                tracing::debug!(entry = %name, "auxiliary bundle entry");
                bundle.insert_auxiliary(name, content)?;
            }
        }
        Ok(bundle)
    }

    pub fn from_zip_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_zip(&std::fs::read(path)?)
    }

    pub fn to_zip_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_zip()?)?;
        Ok(())
    }
}

/// `.fzz`: primaries are sketches.
pub enum SketchKind {}

impl BundleKind for SketchKind {
    type Document = Sketch;
    const PRIMARY_SUFFIX: &'static str = ".fz";

    fn parse(entry_name: &str, bytes: &[u8]) -> Result<Sketch> {
        let text = zipio::entry_text(entry_name, bytes)?;
        Sketch::parse(text).map_err(|source| ArchiveError::Document {
            name: entry_name.to_string(),
            source,
        })
    }

    fn serialize(entry_name: &str, document: &Sketch) -> Result<Vec<u8>> {
        document
            .serialize()
            .map(String::into_bytes)
            .map_err(|source| ArchiveError::Document {
                name: entry_name.to_string(),
                source,
            })
    }
}

/// `.fzpz`: primaries are parts.
pub enum PartKind {}

impl BundleKind for PartKind {
    type Document = Part;
    const PRIMARY_SUFFIX: &'static str = ".fzp";

    fn parse(entry_name: &str, bytes: &[u8]) -> Result<Part> {
        let text = zipio::entry_text(entry_name, bytes)?;
        Part::parse(text).map_err(|source| ArchiveError::Document {
            name: entry_name.to_string(),
            source,
        })
    }

    fn serialize(entry_name: &str, document: &Part) -> Result<Vec<u8>> {
        document
            .serialize()
            .map(String::into_bytes)
            .map_err(|source| ArchiveError::Document {
                name: entry_name.to_string(),
                source,
            })
    }
}

/// `.fzbz`: primaries are part bins, themselves nested ZIP archives.
pub enum PartBinKind {}

impl BundleKind for PartBinKind {
    type Document = PartBin;
    const PRIMARY_SUFFIX: &'static str = ".fzb";

    fn parse(_entry_name: &str, bytes: &[u8]) -> Result<PartBin> {
        PartBin::from_zip(bytes)
    }

    fn serialize(_entry_name: &str, document: &PartBin) -> Result<Vec<u8>> {
        document.to_zip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_classification_is_exact() {
        assert!(SketchBundle::is_primary("project.fz"));
        assert!(!SketchBundle::is_primary("project.fzz"));
        assert!(!SketchBundle::is_primary("breadboard.svg"));
        assert!(PartBundle::is_primary("led.fzp"));
        assert!(!PartBundle::is_primary("led.fz"));
        assert!(PartBinBundle::is_primary("core.fzb"));
    }

    #[test]
    fn insert_primary_replaces_by_name() {
        let mut bundle = SketchBundle::new();
        bundle.insert_primary("a.fz", Sketch::default()).unwrap();
        bundle
            .insert_primary(
                "a.fz",
                Sketch {
                    fritzing_version: Some("0.9.3".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(bundle.primary_count(), 1);
        assert_eq!(
            bundle.primary("a.fz").unwrap().fritzing_version.as_deref(),
            Some("0.9.3")
        );
    }
}
