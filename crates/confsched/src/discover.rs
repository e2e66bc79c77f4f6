//! Item discovery in the working directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::error::ConfschedError;

/// A single item (abstract) document found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFile {
    path: PathBuf,
    file_name: String,
    stem: String,
}

impl ItemFile {
    /// Describe the item at `path`.
    ///
    /// Returns `None` when the path has no UTF-8 file name or no stem.
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_str()?.to_string();
        let stem = path.file_stem()?.to_str()?.to_string();
        Some(Self {
            path,
            file_name,
            stem,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name including the `.tex` extension.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// File name without extension; the job name of the item's own document.
    pub fn stem(&self) -> &str {
        &self.stem
    }
}

/// List every `*.tex` file directly inside `dir`, sorted by file name.
///
/// Files whose names appear in `exclude` (typically the program document) are
/// skipped, as are subdirectories.
///
/// # Errors
///
/// Returns [`ConfschedError::MissingInput`] if `dir` cannot be listed.
pub fn discover_items(dir: &Path, exclude: &[&str]) -> Result<Vec<ItemFile>, ConfschedError> {
    let missing = |source| ConfschedError::MissingInput {
        path: dir.to_path_buf(),
        source,
    };

    let mut items = Vec::new();
    for entry in fs::read_dir(dir).map_err(missing)? {
        let path = entry.map_err(missing)?.path();
        if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("tex") {
            continue;
        }

        let Some(item) = ItemFile::new(&path) else {
            warn!(path = path.display().to_string(); "Skipping item with a non UTF-8 name");
            continue;
        };
        if exclude.contains(&item.file_name()) {
            continue;
        }
        items.push(item);
    }

    items.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    debug!(dir = dir.display().to_string(), count = items.len(); "Discovered items");
    Ok(items)
}
