//! Scratch and reference directories used by the checks

use std::path::{Path, PathBuf};

/// Scratch output directory: test/tmp
pub const TMP_DIR: &str = "test/tmp";

/// Reference fixtures directory: test/data
pub const DATA_DIR: &str = "test/data";

/// Where a run writes its output and where the expected output lives.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixtures {
    pub tmp_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Fixtures {
    pub fn new(tmp_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            tmp_dir: tmp_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Standard layout under `root`.
    pub fn under(root: &Path) -> Self {
        Self::new(root.join(TMP_DIR), root.join(DATA_DIR))
    }

    /// Path to `name` inside the scratch directory.
    pub fn tmp_path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.tmp_dir.join(name)
    }

    /// Path to `name` inside the reference directory.
    pub fn data_path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.data_dir.join(name)
    }

    /// Create the scratch directory if it does not exist.
    pub fn ensure_tmp(&self) -> std::io::Result<()> {
        if !self.tmp_dir.is_dir() {
            std::fs::create_dir_all(&self.tmp_dir)?;
            tracing::debug!("Created scratch directory {}", self.tmp_dir.display());
        }
        Ok(())
    }

    /// Empty the scratch directory, keeping the directory itself.
    pub fn clear_tmp(&self) -> std::io::Result<()> {
        clear_folder(&self.tmp_dir)
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::new(TMP_DIR, DATA_DIR)
    }
}

/// Remove every file and subdirectory of `dir`, keeping `dir`.
///
/// A missing directory is left missing.
pub fn clear_folder(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            std::fs::remove_dir_all(&path)?;
        } else {
            std::fs::remove_file(&path)?;
        }
    }
    tracing::debug!("Cleared {}", dir.display());
    Ok(())
}
