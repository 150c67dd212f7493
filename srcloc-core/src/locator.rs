//! End-to-end lookup: walk, re-read the winner, compute a display path

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::config::LocatorConfig;
use crate::error::{LocateError, Result};
use crate::matcher::SymbolMatcher;
use crate::symbol::SymbolName;
use crate::tree::SourceTree;
use crate::walker::{BudgetLimit, TreeWalker, WalkOutcome};

/// Outcome of one lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateResult {
    /// `path` is relative to the display base; `source` is the full file text
    Found { path: PathBuf, source: String },
    NotFound,
    /// Traversal budget exhausted before the search completed
    Aborted { limit: BudgetLimit },
}

/// Finds the file defining a component
///
/// Holds only immutable state; share it behind an `Arc` and call
/// [`Locator::locate`] concurrently.
pub struct Locator {
    tree: Arc<dyn SourceTree>,
    config: LocatorConfig,
    display_base: PathBuf,
}

impl Locator {
    /// `display_base` is the directory returned paths are made relative to,
    /// normally the process working directory.
    pub fn new(
        tree: Arc<dyn SourceTree>,
        config: LocatorConfig,
        display_base: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tree,
            config,
            display_base: display_base.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Walk the tree once and return the first definition of `symbol`.
    pub async fn locate(&self, symbol: &SymbolName) -> Result<LocateResult> {
        let matcher = SymbolMatcher::new(symbol);
        let walker = TreeWalker::new(self.tree.as_ref(), &self.config);

        match walker.find(&self.config.root, &matcher).await? {
            WalkOutcome::Found { path, .. } => {
                let bytes = self
                    .tree
                    .read(&path)
                    .await
                    .map_err(|e| LocateError::io(&path, e))?;
                let source = match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
                };

                let shown = relative_to(&path, &self.display_base);
                info!(symbol = %symbol, path = %shown.display(), "component located");
                Ok(LocateResult::Found {
                    path: shown,
                    source,
                })
            }
            WalkOutcome::NotFound { .. } => Ok(LocateResult::NotFound),
            WalkOutcome::Aborted { files_read, limit } => {
                info!(symbol = %symbol, files_read, ?limit, "search aborted");
                Ok(LocateResult::Aborted { limit })
            }
        }
    }
}

/// Express `path` relative to `base`, using `..` where `path` is not below it.
///
/// Both paths should be absolute (or both relative to the same directory).
/// Falls back to `path` unchanged when they share no root, e.g. different
/// Windows drives.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let roots_differ = path.has_root() && common == 0;
    if roots_differ {
        return path.to_path_buf();
    }

    let mut relative = PathBuf::new();
    for part in &base_parts[common..] {
        if !matches!(part, Component::CurDir) {
            relative.push("..");
        }
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}
