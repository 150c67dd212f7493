//! Pre-order depth-first search for the first defining file
//!
//! Traversal order:
//! - Entries of each directory are sorted by file name (byte-wise) before
//!   being visited, so the first match does not depend on the platform's
//!   listing order.
//! - A subdirectory is searched completely before its next sibling.
//! - Excluded directory names are skipped without being listed.
//! - Symlinks and other special entries are skipped.
//!
//! Any I/O error aborts the walk; nothing is skipped silently.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::config::LocatorConfig;
use crate::error::{LocateError, Result};
use crate::matcher::SymbolMatcher;
use crate::tree::{EntryKind, SourceTree, TreeEntry};

/// Which traversal limit stopped the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLimit {
    Files(usize),
    Depth(usize),
}

/// Result of one walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    /// First file (in traversal order) that defines the symbol
    Found { path: PathBuf, rule: &'static str },
    /// Whole tree searched, no definition
    NotFound { files_read: usize },
    /// A budget limit was hit before the search completed
    Aborted { files_read: usize, limit: BudgetLimit },
}

/// Walks a [`SourceTree`] under a [`LocatorConfig`]
pub struct TreeWalker<'a> {
    tree: &'a dyn SourceTree,
    config: &'a LocatorConfig,
}

impl<'a> TreeWalker<'a> {
    pub fn new(tree: &'a dyn SourceTree, config: &'a LocatorConfig) -> Self {
        Self { tree, config }
    }

    /// Search `root` for the first file defining `matcher`'s symbol.
    pub async fn find(&self, root: &Path, matcher: &SymbolMatcher) -> Result<WalkOutcome> {
        let budget = self.config.budget;
        let mut files_read = 0usize;

        // Each frame is a sorted directory listing and the depth of its entries.
        let mut stack = vec![(self.sorted_listing(root).await?.into_iter(), 1usize)];

        loop {
            let Some((entries, depth)) = stack.last_mut() else {
                break;
            };
            let depth = *depth;
            let Some(entry) = entries.next() else {
                stack.pop();
                continue;
            };

            let name = entry.name.to_string_lossy();
            match entry.kind {
                EntryKind::Dir => {
                    if self.config.is_excluded_dir(&name) {
                        trace!(path = %entry.path.display(), "skipping excluded directory");
                        continue;
                    }
                    if let Some(max) = budget.max_depth {
                        if depth + 1 > max {
                            debug!(max_depth = max, path = %entry.path.display(), "depth budget exhausted");
                            return Ok(WalkOutcome::Aborted {
                                files_read,
                                limit: BudgetLimit::Depth(max),
                            });
                        }
                    }
                    let children = self.sorted_listing(&entry.path).await?;
                    stack.push((children.into_iter(), depth + 1));
                }
                EntryKind::File => {
                    if !self.config.is_candidate_file(&name) {
                        continue;
                    }
                    if let Some(max) = budget.max_files {
                        if files_read >= max {
                            debug!(max_files = max, "file budget exhausted");
                            return Ok(WalkOutcome::Aborted {
                                files_read,
                                limit: BudgetLimit::Files(max),
                            });
                        }
                    }

                    let bytes = self
                        .tree
                        .read(&entry.path)
                        .await
                        .map_err(|e| LocateError::io(&entry.path, e))?;
                    files_read += 1;

                    let text = String::from_utf8_lossy(&bytes);
                    if let Some(rule) = matcher.matched_rule(&text) {
                        debug!(
                            symbol = %matcher.symbol(),
                            path = %entry.path.display(),
                            rule,
                            files_read,
                            "definition found"
                        );
                        return Ok(WalkOutcome::Found {
                            path: entry.path,
                            rule,
                        });
                    }
                }
                EntryKind::Other => {
                    trace!(path = %entry.path.display(), "skipping special entry");
                }
            }
        }

        debug!(symbol = %matcher.symbol(), files_read, "no definition found");
        Ok(WalkOutcome::NotFound { files_read })
    }

    async fn sorted_listing(&self, dir: &Path) -> Result<Vec<TreeEntry>> {
        let mut entries = self
            .tree
            .list(dir)
            .await
            .map_err(|e| LocateError::io(dir, e))?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
