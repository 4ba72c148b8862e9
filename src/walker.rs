//! Directory traversal

use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::archive::normalize_name;

/// How a root path that is a plain file is named inside the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootName {
    /// Use the file's base name (`dir/logo.png` becomes `logo.png`)
    #[default]
    BaseName,
    /// Use the path as given on the command line (`dir/logo.png`)
    FullPath,
}

/// Configuration for directory traversal
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Naming of a root that is a single file
    pub root_name: RootName,
    /// Whether to emit an entry for each subdirectory
    pub directory_entries: bool,
    /// Base names of files and directories to skip
    pub exclude: Vec<String>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            root_name: RootName::BaseName,
            directory_entries: true,
            exclude: Vec::new(),
        }
    }
}

impl WalkConfig {
    /// Whether a file or directory with this base name is skipped
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }
}

/// A path found during traversal, paired with its archive-relative name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Location on disk
    pub path: PathBuf,
    /// Name inside the container
    pub name: String,
    /// Whether this is a directory
    pub is_dir: bool,
}

impl WalkEntry {
    fn file(path: &Path, name: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            name: normalize_name(name, false),
            is_dir: false,
        }
    }

    fn directory(path: &Path, name: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            name: normalize_name(name, true),
            is_dir: true,
        }
    }
}

/// Enumerate `root` depth-first in directory-listing order.
///
/// A directory's entry comes before its contents. The first error aborts
/// the walk.
pub fn walk(root: &Path, config: &WalkConfig) -> Result<Vec<WalkEntry>> {
    let metadata =
        fs::metadata(root).with_context(|| format!("Failed to stat: {}", root.display()))?;

    if !metadata.is_dir() {
        let name = root_file_name(root, config.root_name)?;
        log::debug!("walking single file {} as {}", root.display(), name);
        return Ok(vec![WalkEntry::file(root, &name)]);
    }

    let mut entries = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !config.is_excluded(&e.file_name().to_string_lossy()));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk: {}", root.display()))?;
        let path = entry.path();

        let relative_path = path
            .strip_prefix(root)
            .map_err(|_| anyhow::anyhow!("Failed to get relative path: {}", path.display()))?;
        let name = relative_path.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_dir() {
            if config.directory_entries {
                entries.push(WalkEntry::directory(path, &name));
            }
        } else {
            entries.push(WalkEntry::file(path, &name));
        }
    }

    log::debug!("walked {} entries under {}", entries.len(), root.display());
    Ok(entries)
}

fn root_file_name(root: &Path, root_name: RootName) -> Result<String> {
    match root_name {
        RootName::BaseName => {
            let name = root
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid filename: {}", root.display()))?;
            Ok(name.to_string_lossy().to_string())
        }
        RootName::FullPath => {
            let mut parts = Vec::new();
            for component in root.components() {
                match component {
                    Component::Normal(part) => parts.push(part.to_string_lossy().to_string()),
                    // Extraction refuses names that leave the target directory
                    Component::ParentDir => anyhow::bail!(
                        "Path leaves the archive root, use the base name instead: {}",
                        root.display()
                    ),
                    Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
                }
            }
            if parts.is_empty() {
                anyhow::bail!("Invalid filename: {}", root.display());
            }
            Ok(parts.join("/"))
        }
    }
}
