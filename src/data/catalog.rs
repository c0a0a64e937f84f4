use std::path::{Path, PathBuf};

use super::error::CatalogError;

/// File extension of volume files.
pub const VOLUME_EXTENSION: &str = "npy";

// ---------------------------------------------------------------------------
// Catalog – the volumes available for browsing
// ---------------------------------------------------------------------------

/// Ordered, non-empty list of volume files, fixed at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    paths: Vec<PathBuf>,
}

impl Catalog {
    /// List every `*.npy` file in `dir`, in directory listing order.
    ///
    /// Hidden files are skipped, as a shell glob would. Fails when nothing
    /// matches: the viewer cannot run without at least one volume.
    pub fn scan(dir: &Path) -> Result<Self, CatalogError> {
        let listing_error = |source| CatalogError::Listing {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(listing_error)? {
            let path = entry.map_err(listing_error)?.path();
            if is_volume_file(&path) {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(CatalogError::Empty(dir.to_path_buf()));
        }
        log::info!("Found {} volumes in {}", paths.len(), dir.display());
        Ok(Self { paths })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Index of the last volume.
    pub fn last_index(&self) -> usize {
        self.paths.len() - 1
    }

    /// Path of the volume at `index`; `index` must be at most [`Self::last_index`].
    pub fn path(&self, index: usize) -> &Path {
        &self.paths[index]
    }
}

fn is_volume_file(path: &Path) -> bool {
    let visible = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| !n.starts_with('.'));
    visible && path.extension().is_some_and(|e| e == VOLUME_EXTENSION) && path.is_file()
}
