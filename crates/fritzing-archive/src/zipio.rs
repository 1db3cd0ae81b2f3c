//! Thin helpers over in-memory ZIP reading and writing.

use crate::{ArchiveError, Result};
use std::io::{Cursor, Read, Write};
use zip::{ZipArchive, ZipWriter};

/// Reads every file entry, in archive order. A zero-length decompressed
/// entry fails the whole read; partially collected entries are discarded.
pub(crate) fn read_entries(bytes: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        if content.is_empty() {
            return Err(ArchiveError::EmptyEntry { name });
        }
        tracing::debug!(entry = %name, bytes = content.len(), "read archive entry");
        entries.push((name, content));
    }

    Ok(entries)
}

pub(crate) fn entry_text<'a>(name: &str, bytes: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|_| ArchiveError::Utf8 {
        name: name.to_string(),
    })
}

pub(crate) struct EntryWriter {
    inner: ZipWriter<Cursor<Vec<u8>>>,
}

impl EntryWriter {
    pub(crate) fn new() -> Self {
        Self {
            inner: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    pub(crate) fn add(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.inner
            .start_file(name, zip::write::FileOptions::<()>::default())?;
        self.inner.write_all(bytes)?;
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<Vec<u8>> {
        Ok(self.inner.finish()?.into_inner())
    }
}
