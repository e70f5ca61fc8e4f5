use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const REFERENCE_DIR: &str = "reference";
pub const CURRENT_DIR: &str = "current";
pub const DIFFERENCE_DIR: &str = "difference";

/// Normalize a string for filter comparison: lowercase + treat `_` and ` ` as equivalent.
pub(crate) fn normalize_for_filter(s: &str) -> String {
    s.to_lowercase().replace('_', " ")
}

/// Case-insensitive substring match of `pattern` against a snapshot id.
/// A trailing `.png` on the pattern is ignored.
pub(crate) fn matches_filter(id: &str, pattern: Option<&str>) -> bool {
    pattern.is_none_or(|pat| {
        let pat = pat.strip_suffix(".png").unwrap_or(pat);
        normalize_for_filter(id).contains(&normalize_for_filter(pat))
    })
}

/// Snapshot directory layout under a root (normally `.rembrandt/`):
/// `reference/<id>.png`, `current/<id>.png`, `difference/<id>.png`.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn write_file(path: &Path, png: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, png).with_context(|| format!("Failed to write {}", path.display()))
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self, subdir: &str) -> PathBuf {
        self.root.join(subdir)
    }

    pub fn file_path(&self, subdir: &str, id: &str) -> PathBuf {
        self.dir(subdir).join(format!("{id}.png"))
    }

    /// Write a reference and drop the now-stale current/difference files for `id`.
    pub fn write_reference(&self, id: &str, png: &[u8]) -> Result<()> {
        write_file(&self.file_path(REFERENCE_DIR, id), png)?;
        let _ = std::fs::remove_file(self.file_path(CURRENT_DIR, id));
        self.clean_difference(id);
        Ok(())
    }

    #[cfg(test)]
    pub fn write_current(&self, id: &str, png: &[u8]) -> Result<()> {
        write_file(&self.file_path(CURRENT_DIR, id), png)
    }

    pub fn write_difference(&self, id: &str, png: &[u8]) -> Result<()> {
        write_file(&self.file_path(DIFFERENCE_DIR, id), png)
    }

    pub fn read_reference(&self, id: &str) -> Option<Vec<u8>> {
        std::fs::read(self.file_path(REFERENCE_DIR, id)).ok()
    }

    pub fn read_current(&self, id: &str) -> Result<Vec<u8>> {
        let path = self.file_path(CURRENT_DIR, id);
        std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    pub fn clean_difference(&self, id: &str) {
        let _ = std::fs::remove_file(self.file_path(DIFFERENCE_DIR, id));
    }

    pub fn has_reference(&self, id: &str) -> bool {
        self.file_path(REFERENCE_DIR, id).exists()
    }

    pub fn has_difference(&self, id: &str) -> bool {
        self.file_path(DIFFERENCE_DIR, id).exists()
    }

    pub fn list_current_ids(&self) -> BTreeSet<String> {
        self.list_ids(CURRENT_DIR)
    }

    pub fn list_reference_ids(&self) -> BTreeSet<String> {
        self.list_ids(REFERENCE_DIR)
    }

    pub fn list_difference_ids(&self) -> BTreeSet<String> {
        self.list_ids(DIFFERENCE_DIR)
    }

    fn list_ids(&self, subdir: &str) -> BTreeSet<String> {
        let dir = self.dir(subdir);
        let mut ids = BTreeSet::new();
        collect_png_ids(&dir, &dir, &mut ids);
        ids
    }
}

/// Recursively walk a directory, collecting all `.png` files as IDs
/// (relative path without the `.png` extension, `/`-separated).
fn collect_png_ids(base: &Path, dir: &Path, ids: &mut BTreeSet<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_png_ids(base, &path, ids);
        } else if path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("png"))
            && let Ok(rel) = path.strip_prefix(base)
        {
            let id = rel.with_extension("");
            let parts: Vec<String> = id
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            ids.insert(parts.join("/"));
        }
    }
}
