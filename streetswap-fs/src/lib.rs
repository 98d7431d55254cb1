use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Base directory for application data.
///
/// Resolves to `$XDG_DATA_HOME/streetswap` on Linux, the equivalent
/// platform-specific location elsewhere.
pub fn system_data_dir() -> Result<PathBuf> {
    directories_next::ProjectDirs::from("", "", "streetswap")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .context("Could not generate default system data dir")
}

pub fn ensure_directory_exists(file: &Path) -> Result<(), std::io::Error> {
    if let Some(path) = file.parent() {
        if !path.exists() {
            tracing::info!(
                "Parent directory does not exist, creating recursively: {}",
                file.display()
            );
            return std::fs::create_dir_all(path);
        }
    }
    Ok(())
}
