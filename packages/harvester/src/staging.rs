//! Staging-area layout for raw (bronze) and cleaned (silver) files.
//!
//! The staging root is an explicit value passed into every component at
//! construction time, scoped to a single pipeline run. Nothing walks
//! parent directories looking for marker folders.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Directory layout under a staging root:
///
/// ```text
/// <root>/bronze/facts/         raw observation files
/// <root>/bronze/dimensions/    raw dimension code lists
/// <root>/silver/facts/         cleaned observation tables
/// <root>/silver/dimensions/    cleaned dimension tables
/// ```
#[derive(Debug, Clone)]
pub struct Staging {
    root: PathBuf,
}

impl Staging {
    /// Create a staging area rooted at `root`. No directories are created
    /// until [`Staging::ensure_layout`] is called.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The staging root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Raw observation files directory.
    #[must_use]
    pub fn facts_dir(&self) -> PathBuf {
        self.root.join("bronze").join("facts")
    }

    /// Raw dimension code-list directory.
    #[must_use]
    pub fn dimensions_dir(&self) -> PathBuf {
        self.root.join("bronze").join("dimensions")
    }

    /// Cleaned observation tables directory.
    #[must_use]
    pub fn clean_facts_dir(&self) -> PathBuf {
        self.root.join("silver").join("facts")
    }

    /// Cleaned dimension tables directory.
    #[must_use]
    pub fn clean_dimensions_dir(&self) -> PathBuf {
        self.root.join("silver").join("dimensions")
    }

    /// Create the full directory tree, if missing.
    pub fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(self.facts_dir())?;
        fs::create_dir_all(self.dimensions_dir())?;
        fs::create_dir_all(self.clean_facts_dir())?;
        fs::create_dir_all(self.clean_dimensions_dir())?;
        Ok(())
    }

    /// Path for a staged observation file: `<dataset_id>_<version>.csv`.
    #[must_use]
    pub fn observation_path(&self, dataset_id: &str, version: u64) -> PathBuf {
        self.facts_dir().join(format!("{dataset_id}_{version}.csv"))
    }

    /// Path for a staged dimension code list: `<name>.csv`.
    #[must_use]
    pub fn dimension_path(&self, name: &str) -> PathBuf {
        self.dimensions_dir().join(format!("{name}.csv"))
    }
}
