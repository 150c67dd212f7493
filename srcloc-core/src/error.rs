/// Structured error types for srcloc-core.
///
/// Library consumers get `thiserror` enums; the CLI wraps them in `anyhow`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for locator operations
#[derive(Error, Debug)]
pub enum LocateError {
    /// Listing a directory or reading a file failed mid-walk
    #[error("I/O error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// Configuration is unusable (missing root, bad budget, ...)
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Config file is not valid TOML for `LocatorConfig`
    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Result type alias for srcloc-core operations
pub type Result<T> = std::result::Result<T, LocateError>;

impl LocateError {
    /// Create an I/O error tagged with the path being accessed
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LocateError::config("root is not a directory");
        assert_eq!(
            err.to_string(),
            "Configuration error: root is not a directory"
        );

        let err = LocateError::io(
            "/app/src/Button.tsx",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("I/O error"));
        assert!(err.to_string().contains("Button.tsx"));
    }
}
