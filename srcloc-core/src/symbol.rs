//! Symbol name validation
//!
//! Names are embedded into regex patterns and never touch the filesystem
//! directly, but only PascalCase identifiers are accepted at all.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Component name pattern: uppercase first letter, then letters, digits, underscore
static SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9_]*$").expect("invalid symbol regex"));

/// Validation error for untrusted input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is missing or empty
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// String doesn't match the required format
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

/// Validated component name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolName(String);

impl SymbolName {
    /// Create a new symbol name, validating its shape.
    ///
    /// # Example
    /// ```
    /// use srcloc_core::SymbolName;
    ///
    /// assert!(SymbolName::new("Button").is_ok());
    /// assert!(SymbolName::new("button").is_err());
    /// assert!(SymbolName::new("../etc").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty {
                field: "component name",
            });
        }

        if !SYMBOL_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "component name",
                reason: "must start with an uppercase letter and contain only letters, digits and underscores",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SymbolName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
