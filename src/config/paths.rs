//! XDG-compliant path management

use directories::ProjectDirs;
use std::path::PathBuf;

/// Locates vaultgrab's own files (currently only the log)
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directories from XDG, if the home directory could be resolved
    dirs: Option<ProjectDirs>,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    /// Create a new Paths instance
    pub fn new() -> Self {
        Self {
            dirs: ProjectDirs::from("", "", "vaultgrab"),
        }
    }

    /// Data directory: ~/.local/share/vaultgrab/ (falls back to ./.vaultgrab)
    pub fn data_dir(&self) -> PathBuf {
        self.dirs
            .as_ref()
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".vaultgrab"))
    }

    /// Log file: ~/.local/share/vaultgrab/vaultgrab.log
    pub fn log_file(&self) -> PathBuf {
        self.data_dir().join("vaultgrab.log")
    }

    /// Ensure the data directory exists
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.data_dir())
    }
}
