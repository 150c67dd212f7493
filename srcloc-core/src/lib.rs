//! srcloc-core: find the source file that defines a UI component
//!
//! Given a component name, walks a source tree depth-first and returns the
//! first file whose text declares that name (`function X`, `const X =`,
//! `export [default] function X`).

pub mod config;
pub mod error;
pub mod locator;
pub mod matcher;
pub mod symbol;
pub mod tree;
pub mod walker;

pub use config::{LocatorConfig, WalkBudget};
pub use error::{LocateError, Result};
pub use locator::{LocateResult, Locator};
pub use matcher::{DefinitionRule, SymbolMatcher, DEFINITION_RULES};
pub use symbol::{SymbolName, ValidationError};
pub use tree::{DiskTree, EntryKind, MemoryTree, SourceTree, TreeEntry};
pub use walker::{BudgetLimit, TreeWalker, WalkOutcome};
