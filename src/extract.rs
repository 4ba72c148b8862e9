//! Extraction of a container back to the file system
//!
//! This is the algorithm the generated `unzip` routine carries as source
//! text. Entries are processed in container order and the first error
//! aborts; entries written before it stay on disk.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;
use zip::ZipArchive;

use crate::encoder::Scheme;

/// Permissions for directories created during extraction
pub const DIR_MODE: u32 = 0o755;

/// Configuration for extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Replace files that already exist at the destination
    pub replace: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { replace: true }
    }
}

/// What an extraction did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Directory entries created
    pub directories: usize,
    /// Files written
    pub files: usize,
    /// Files left untouched because they already existed
    pub skipped: usize,
}

/// Extract container bytes into `dest`
pub fn extract(data: &[u8], dest: &Path, config: &ExtractConfig) -> Result<ExtractSummary> {
    let mut archive = ZipArchive::new(Cursor::new(data)).context("Invalid zip container")?;
    let mut summary = ExtractSummary::default();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("Failed to open entry #{}", index))?;

        let name = entry
            .enclosed_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid entry name: {}", entry.name()))?;
        let target = dest.join(name);

        if entry.is_dir() {
            create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
            log::debug!("created {}", target.display());
            summary.directories += 1;
            continue;
        }

        if let Some(parent) = target.parent() {
            create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Existing files are kept unless replacing
        if !config.replace && target.exists() {
            log::debug!("skipped existing {}", target.display());
            summary.skipped += 1;
            continue;
        }

        let mut file = fs::File::create(&target)
            .with_context(|| format!("Failed to create: {}", target.display()))?;
        io::copy(&mut entry, &mut file)
            .with_context(|| format!("Failed to write: {}", target.display()))?;

        log::debug!("extracted {}", target.display());
        summary.files += 1;
    }

    log::info!(
        "extracted {} files and {} directories into {} ({} skipped)",
        summary.files,
        summary.directories,
        dest.display(),
        summary.skipped
    );
    Ok(summary)
}

/// Decode an encoded literal with `scheme`, then extract it into `dest`
pub fn extract_literal(
    literal: &str,
    scheme: Scheme,
    dest: &Path,
    config: &ExtractConfig,
) -> Result<ExtractSummary> {
    let data = scheme.decode(literal)?;
    extract(&data, dest, config)
}

fn create_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path)
}
