/// Location of the database and photo directory on this device

use std::path::{Path, PathBuf};

/// Database file name inside the data directory
pub const DATABASE_FILE: &str = "lockedin.db";

/// Resolved on-device paths for the tracker's data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// SQLite database file
    pub database: PathBuf,
    /// Root directory for persisted progress photos
    pub photo_dir: PathBuf,
}

impl AppPaths {
    /// Paths rooted at a single data directory
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            database: data_dir.join(DATABASE_FILE),
            photo_dir: data_dir.to_path_buf(),
        }
    }

    /// Resolve paths from an optional explicit data directory
    ///
    /// An explicit directory is created if needed and used as-is. Otherwise
    /// the first writable default location wins.
    pub fn resolve(data_dir: Option<PathBuf>) -> std::io::Result<Self> {
        match data_dir {
            Some(dir) => {
                std::fs::create_dir_all(&dir)?;
                Ok(Self::in_dir(dir))
            }
            None => Ok(Self::in_dir(default_data_dir()?)),
        }
    }
}

/// Get the default data directory with robust fallback strategy
fn default_data_dir() -> std::io::Result<PathBuf> {
    // Try various locations in order of preference
    let candidates = [
        dirs::home_dir().map(|p| p.join(".lockedin")),
        dirs::data_dir().map(|p| p.join("lockedin")),
        dirs::config_dir().map(|p| p.join("lockedin")),
        std::env::current_dir().ok().map(|p| p.join(".lockedin")),
    ];

    for candidate in candidates.iter().flatten() {
        if is_writable_dir(candidate) {
            return Ok(candidate.clone());
        }
    }

    // Ultimate fallback: use a temporary directory
    let temp_dir = std::env::temp_dir().join("lockedin");
    std::fs::create_dir_all(&temp_dir)?;

    tracing::warn!("Using temporary directory for data: {}", temp_dir.display());
    Ok(temp_dir)
}

fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let probe = dir.join(".write_test");
    if std::fs::write(&probe, b"ok").is_err() {
        return false;
    }
    let _ = std::fs::remove_file(&probe);
    true
}
