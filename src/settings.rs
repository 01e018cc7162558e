//! Runtime settings
//!
//! Defaults suit the browser build. The native binary overlays environment
//! variables (`EMPLOYEE_FORM_STORAGE_KEY`, `EMPLOYEE_FORM_DATA_DIR`) and
//! then command line flags.

use std::path::PathBuf;

/// Key the record list is stored under
pub const DEFAULT_STORAGE_KEY: &str = "employees";

/// Directory for the native file store
pub const DEFAULT_DATA_DIR: &str = ".employee-form";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub storage_key: String,
    /// Ignored in the browser (LocalStorage has no directory)
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Settings {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(key) = lookup("EMPLOYEE_FORM_STORAGE_KEY").filter(|k| !k.trim().is_empty()) {
            settings.storage_key = key.trim().to_string();
        }
        if let Some(dir) = lookup("EMPLOYEE_FORM_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            settings.data_dir = PathBuf::from(dir.trim());
        }
        settings
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, storage_key: Option<String>, data_dir: Option<PathBuf>) -> Self {
        if let Some(key) = storage_key {
            self.storage_key = key;
        }
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }
}
