//! Path management for Moneta
//!
//! Provides platform-aware path resolution for settings and the saved session.
//!
//! ## Path Resolution Order
//!
//! 1. `MONETA_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix: `$XDG_CONFIG_HOME/moneta-cli` or `~/.config/moneta-cli`
//! 3. Otherwise the platform config directory reported by `directories`

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::MonetaError;

/// Manages all paths used by Moneta
#[derive(Debug, Clone)]
pub struct MonetaPaths {
    /// Base directory for all Moneta files
    base_dir: PathBuf,
}

impl MonetaPaths {
    /// Create a new MonetaPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, MonetaError> {
        let base_dir = if let Ok(custom) = std::env::var("MONETA_CLI_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create MonetaPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/moneta-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the saved session (cookie + cached user)
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), MonetaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MonetaError::Io(format!("Failed to create base directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, MonetaError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("moneta-cli"));
    }
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home).join(".config").join("moneta-cli"));
    }
    project_dirs_path()
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, MonetaError> {
    project_dirs_path()
}

fn project_dirs_path() -> Result<PathBuf, MonetaError> {
    ProjectDirs::from("", "", "moneta-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| MonetaError::Config("Could not determine a config directory".into()))
}
