//! Part bin (`.fzb`): a flat named collection of parts.

use crate::{ArchiveError, Result, zipio};
use fritzing::Part;
use std::path::Path;

/// Insertion-ordered mapping from file-name-without-extension to [`Part`].
/// Keys must be non-empty; inserting an existing key replaces the part in
/// place without changing its position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartBin {
    entries: Vec<(String, Part)>,
}

impl PartBin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, part: Part) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(ArchiveError::InvalidEntryName(name));
        }
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = part,
            None => self.entries.push((name, part)),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Part> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, part)| part)
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Part)> {
        self.entries.iter().map(|(n, part)| (n.as_str(), part))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Packs every part into a `<name>.fzp` entry via the part codec.
    pub fn to_zip(&self) -> Result<Vec<u8>> {
        let mut writer = zipio::EntryWriter::new();
        for (name, part) in &self.entries {
            let xml = part.serialize().map_err(|source| ArchiveError::Document {
                name: name.clone(),
                source,
            })?;
            writer.add(&format!("{name}.fzp"), xml.as_bytes())?;
        }
        writer.finish()
    }

    /// Parses a `.fzb` archive; entry names lose their extension to become
    /// the bin keys.
    pub fn from_zip(bytes: &[u8]) -> Result<Self> {
        let mut bin = PartBin::new();
        for (entry_name, content) in zipio::read_entries(bytes)? {
            let name = strip_extension(&entry_name);
            let text = zipio::entry_text(&entry_name, &content)?;
            let part = Part::parse(text).map_err(|source| ArchiveError::Document {
                name: entry_name.clone(),
                source,
            })?;
            bin.insert(name, part)?;
        }
        Ok(bin)
    }

    pub fn from_zip_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_zip(&std::fs::read(path)?)
    }

    pub fn to_zip_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_zip()?)?;
        Ok(())
    }
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_rejects_empty_key() {
        let mut bin = PartBin::new();
        assert!(matches!(
            bin.insert("", Part::new("m1")),
            Err(ArchiveError::InvalidEntryName(_))
        ));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut bin = PartBin::new();
        bin.insert("led", Part::new("led_v1")).unwrap();
        bin.insert("resistor", Part::new("r1")).unwrap();
        bin.insert("led", Part::new("led_v2")).unwrap();

        let keys: Vec<_> = bin.iter().map(|(n, _)| n).collect();
        assert_eq!(keys, vec!["led", "resistor"]);
        assert_eq!(bin.get("led").unwrap().module_id, "led_v2");
    }

    #[test]
    fn extension_stripping() {
        assert_eq!(strip_extension("led.fzp"), "led");
        assert_eq!(strip_extension("noext"), "noext");
        assert_eq!(strip_extension("dotted.name.fzp"), "dotted.name");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }
}
