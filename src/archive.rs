//! In-memory zip container

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::walker::WalkEntry;

/// Separator used in archive-relative names
pub const SEPARATOR: char = '/';

const FILE_PERMISSIONS: u32 = 0o644;
const DIR_PERMISSIONS: u32 = 0o755;

/// Represents a single file or directory in a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Archive-relative name, `/` separated. Directories end with `/`.
    pub name: String,
    /// Uncompressed contents (empty for directories)
    pub data: Vec<u8>,
    /// Whether this is a directory entry
    pub is_dir: bool,
}

impl Entry {
    /// Create a file entry with the given name and data
    pub fn file(name: &str, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: normalize_name(name, false),
            data: data.into(),
            is_dir: false,
        }
    }

    /// Create a directory entry
    pub fn directory(name: &str) -> Self {
        Self {
            name: normalize_name(name, true),
            data: Vec::new(),
            is_dir: true,
        }
    }
}

/// Convert a name to archive form: forward slashes, no leading slash,
/// and a trailing slash for directories.
pub fn normalize_name(name: &str, is_dir: bool) -> String {
    let name = name.replace('\\', "/");
    let mut name = name.trim_start_matches(SEPARATOR).to_string();
    if is_dir && !name.ends_with(SEPARATOR) {
        name.push(SEPARATOR);
    }
    name
}

/// Builds a zip container in memory, one entry at a time.
///
/// The byte sequence only becomes a readable container once
/// [`ArchiveBuilder::finish`] has written the central directory.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    names: HashSet<String>,
    compression: CompressionMethod,
}

impl ArchiveBuilder {
    /// Create a builder that deflates file contents
    pub fn new() -> Self {
        Self::with_compression(CompressionMethod::Deflated)
    }

    /// Create a builder using the given compression method for files
    pub fn with_compression(compression: CompressionMethod) -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: HashSet::new(),
            compression,
        }
    }

    /// Number of entries added so far
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no entries have been added
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Add a file entry with its full contents
    /// Returns an error if an entry with the same name already exists
    pub fn add_file(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let name = normalize_name(name, false);
        if name.is_empty() || name.ends_with(SEPARATOR) {
            bail!("Invalid file name: '{}'", name);
        }
        self.claim(&name)?;

        let options = SimpleFileOptions::default()
            .compression_method(self.compression)
            .unix_permissions(FILE_PERMISSIONS);

        self.writer
            .start_file(name.as_str(), options)
            .with_context(|| format!("Failed to start entry: {}", name))?;
        self.writer
            .write_all(data)
            .with_context(|| format!("Failed to write entry: {}", name))?;

        log::debug!("added file {} ({} bytes)", name, data.len());
        Ok(())
    }

    /// Add a directory entry
    pub fn add_directory(&mut self, name: &str) -> Result<()> {
        let name = normalize_name(name, true);
        if name == "/" {
            bail!("Invalid directory name: '{}'", name);
        }
        self.claim(&name)?;

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(DIR_PERMISSIONS);

        self.writer
            .add_directory(name.as_str(), options)
            .with_context(|| format!("Failed to add directory: {}", name))?;

        log::debug!("added directory {}", name);
        Ok(())
    }

    /// Add a prepared entry
    pub fn add_entry(&mut self, entry: &Entry) -> Result<()> {
        if entry.is_dir {
            self.add_directory(&entry.name)
        } else {
            self.add_file(&entry.name, &entry.data)
        }
    }

    /// Write the central directory and return the container bytes
    pub fn finish(self) -> Result<Vec<u8>> {
        let count = self.names.len();
        let cursor = self
            .writer
            .finish()
            .context("Failed to finalize zip container")?;
        let data = cursor.into_inner();

        log::info!("built container with {} entries ({} bytes)", count, data.len());
        Ok(data)
    }

    fn claim(&mut self, name: &str) -> Result<()> {
        if !self.names.insert(name.to_string()) {
            bail!("Duplicate entry: {}", name);
        }
        Ok(())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a container from walked entries, reading each file in full
pub fn build_archive(entries: &[WalkEntry]) -> Result<Vec<u8>> {
    let mut builder = ArchiveBuilder::new();

    for entry in entries {
        if entry.is_dir {
            builder.add_directory(&entry.name)?;
        } else {
            let data = fs::read(&entry.path)
                .with_context(|| format!("Failed to read file: {}", entry.path.display()))?;
            builder.add_file(&entry.name, &data)?;
        }
    }

    builder.finish()
}

/// Open container bytes and read every entry, in container order
pub fn read_entries(data: &[u8]) -> Result<Vec<Entry>> {
    let mut archive = ZipArchive::new(Cursor::new(data)).context("Invalid zip container")?;
    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .with_context(|| format!("Failed to open entry #{}", index))?;

        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .with_context(|| format!("Failed to read entry: {}", file.name()))?;

        entries.push(Entry {
            name: file.name().to_string(),
            is_dir: file.is_dir(),
            data: content,
        });
    }

    Ok(entries)
}

/// Names of the entries in a container, in container order
pub fn list_entries(data: &[u8]) -> Result<Vec<String>> {
    let archive = ZipArchive::new(Cursor::new(data)).context("Invalid zip container")?;
    Ok(archive.file_names().map(str::to_string).collect())
}
