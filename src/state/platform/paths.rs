//! Platform-specific path helpers.
//!
//! # Directory Locations
//!
//! | Platform | Config Dir | Data Dir |
//! |----------|------------|----------|
//! | Linux | `~/.config/solprobe` | `~/.local/share/solprobe` |
//! | macOS | `~/Library/Application Support/solprobe` | Same as config |
//! | Windows | `%APPDATA%/solprobe` | `%APPDATA%/solprobe` |
//!
//! The data directory is resolved by [`default_storage_path`].

use color_eyre::Result;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Constants
// ============================================================================

/// Application name used for directory naming.
pub const APP_NAME: &str = "solprobe";

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// File holding persisted history and network selection.
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Location of the persisted state file, if the platform has a data
/// directory.
#[must_use]
pub fn default_storage_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_NAME).join(STORAGE_FILE_NAME))
}

// ============================================================================
// AppPaths
// ============================================================================

/// Resolves the application's directories and files.
#[derive(Debug, Clone)]
pub struct AppPaths {
    app_name: String,
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

impl AppPaths {
    #[must_use]
    pub fn new() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
        }
    }

    /// Uses `app_name` as the directory name.
    #[cfg(test)]
    #[must_use]
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Returns the configuration directory, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be determined or created.
    pub fn config_dir(&self) -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            color_eyre::eyre::eyre!(
                "Could not determine config directory. Expected XDG_CONFIG_HOME or ~/.config on Linux, ~/Library/Application Support on macOS, %APPDATA% on Windows"
            )
        })?;
        path.push(&self.app_name);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined or created.
    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join(CONFIG_FILE_NAME))
    }

    #[cfg(test)]
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

// ============================================================================
// Tests
// ============================================================================
