//! Locator configuration
//!
//! Layered, lowest precedence first:
//! 1. Built-in defaults
//! 2. Optional TOML file (`LocatorConfig::load`)
//! 3. `SRCLOC_ROOT` environment variable (`apply_env`)
//! 4. CLI flags (applied by the caller)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LocateError, Result};

/// Environment variable overriding the search root
pub const ROOT_ENV: &str = "SRCLOC_ROOT";

/// Dependency-install and build-output directories
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["node_modules", ".next"];

/// File extensions searched for definitions (without the dot)
pub const DEFAULT_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// Traversal limits. `None` means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkBudget {
    /// Maximum number of candidate files read before giving up
    pub max_files: Option<usize>,
    /// Maximum directory depth below the root (root entries are depth 1)
    pub max_depth: Option<usize>,
}

impl WalkBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }
}

/// Where and what to search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Source root; never escaped by the walk
    pub root: PathBuf,
    /// Directory names that are never descended
    pub exclude_dirs: Vec<String>,
    /// Recognized source extensions, without the leading dot
    pub extensions: Vec<String>,
    #[serde(flatten)]
    pub budget: WalkBudget,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            budget: WalkBudget::unlimited(),
        }
    }
}

impl LocatorConfig {
    /// Create config with explicit root directory and default filters
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Parse config from a TOML string
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| LocateError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LocateError::io(path, e))?;
        Self::from_toml(&text, path)
    }

    /// Apply `SRCLOC_ROOT` if set
    pub fn apply_env(mut self) -> Self {
        if let Ok(root) = std::env::var(ROOT_ENV) {
            if !root.is_empty() {
                self.root = PathBuf::from(root);
            }
        }
        self
    }

    /// Directory names that must never be descended
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }

    /// True if `file_name` ends in one of the recognized extensions
    pub fn is_candidate_file(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| {
            file_name
                .strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }

    /// Reject configs that could never produce a result
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(LocateError::config("at least one extension is required"));
        }
        if self.extensions.iter().any(|e| e.is_empty() || e.starts_with('.')) {
            return Err(LocateError::config(
                "extensions must be non-empty and given without the leading dot",
            ));
        }
        if self.budget.max_files == Some(0) {
            return Err(LocateError::config("max_files must be at least 1"));
        }
        if self.budget.max_depth == Some(0) {
            return Err(LocateError::config("max_depth must be at least 1"));
        }
        Ok(())
    }
}
