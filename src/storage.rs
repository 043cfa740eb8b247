//! Filesystem persistence for generated app artifacts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Root directory holding one `app_<timestamp>` folder per generating
/// request.
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a per-request artifact directory under the root. Callers only
    /// ask for one when a task actually writes files.
    pub fn create_app_dir(&self) -> Result<PathBuf> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let dir = self.root.join(format!("app_{stamp}"));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating artifact directory {}", dir.display()))?;
        Ok(dir)
    }
}

/// Write one artifact file, returning its path.
pub fn write_app_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(filename);
    std::fs::write(&path, content).with_context(|| format!("writing artifact {}", path.display()))?;
    Ok(path)
}
