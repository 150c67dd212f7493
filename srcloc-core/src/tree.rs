//! Source tree access
//!
//! The walker never touches `std::fs` directly. It goes through
//! [`SourceTree`], with:
//! - [`DiskTree`] reading the real filesystem via `tokio::fs`
//! - [`MemoryTree`] serving an in-memory fixture for tests

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

/// What a directory entry is, without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    /// Symlinks, sockets, devices. Never descended or read.
    Other,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub name: OsString,
    pub kind: EntryKind,
}

/// Read-only access to a directory tree (testable)
#[async_trait]
pub trait SourceTree: Send + Sync {
    /// List the entries of `dir`, in no particular order.
    async fn list(&self, dir: &Path) -> io::Result<Vec<TreeEntry>>;

    /// Read the full contents of `file`.
    async fn read(&self, file: &Path) -> io::Result<Vec<u8>>;
}

/// Real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskTree;

#[async_trait]
impl SourceTree for DiskTree {
    async fn list(&self, dir: &Path) -> io::Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        let mut read_dir = fs::read_dir(dir).await?;

        while let Some(entry) = read_dir.next_entry().await? {
            // file_type() does not follow symlinks
            let file_type = entry.file_type().await?;
            let kind = if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };

            entries.push(TreeEntry {
                path: entry.path(),
                name: entry.file_name(),
                kind,
            });
        }

        Ok(entries)
    }

    async fn read(&self, file: &Path) -> io::Result<Vec<u8>> {
        fs::read(file).await
    }
}

#[derive(Debug, Clone)]
enum MemoryNode {
    Dir,
    File(Vec<u8>),
    Symlink,
    /// Listed as a directory; listing it fails with `PermissionDenied`
    LockedDir,
    /// Reading fails with `PermissionDenied`
    LockedFile,
}

/// In-memory tree keyed by absolute path
///
/// Parent directories are created implicitly. Listings come back in
/// reverse-sorted order so callers cannot lean on insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    nodes: BTreeMap<PathBuf, MemoryNode>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given contents.
    pub fn file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.nodes.insert(path, MemoryNode::File(contents.into()));
        self
    }

    /// Add an empty directory.
    pub fn dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.nodes.insert(path, MemoryNode::Dir);
        self
    }

    /// Add a symlink entry (its target is irrelevant: links are never followed).
    pub fn symlink(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.nodes.insert(path, MemoryNode::Symlink);
        self
    }

    /// Add a file or directory that fails with `PermissionDenied` when accessed.
    pub fn unreadable(mut self, path: impl Into<PathBuf>, is_dir: bool) -> Self {
        let path = path.into();
        self.add_parents(&path);
        let node = if is_dir {
            MemoryNode::LockedDir
        } else {
            MemoryNode::LockedFile
        };
        self.nodes.insert(path, node);
        self
    }

    fn add_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(MemoryNode::Dir);
        }
    }

    fn kind_of(node: &MemoryNode) -> EntryKind {
        match node {
            MemoryNode::Dir | MemoryNode::LockedDir => EntryKind::Dir,
            MemoryNode::File(_) | MemoryNode::LockedFile => EntryKind::File,
            MemoryNode::Symlink => EntryKind::Other,
        }
    }
}

fn permission_denied(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {}", path.display()),
    )
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

#[async_trait]
impl SourceTree for MemoryTree {
    async fn list(&self, dir: &Path) -> io::Result<Vec<TreeEntry>> {
        match self.nodes.get(dir) {
            Some(MemoryNode::Dir) => {}
            Some(MemoryNode::LockedDir) => return Err(permission_denied(dir)),
            Some(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("not a directory: {}", dir.display()),
                ))
            }
            None => return Err(not_found(dir)),
        }

        let mut entries: Vec<TreeEntry> = self
            .nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .map(|(path, node)| TreeEntry {
                path: path.clone(),
                name: path.file_name().unwrap_or_default().to_os_string(),
                kind: Self::kind_of(node),
            })
            .collect();

        entries.reverse();
        Ok(entries)
    }

    async fn read(&self, file: &Path) -> io::Result<Vec<u8>> {
        match self.nodes.get(file) {
            Some(MemoryNode::File(contents)) => Ok(contents.clone()),
            Some(MemoryNode::LockedFile) => Err(permission_denied(file)),
            Some(_) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("not a file: {}", file.display()),
            )),
            None => Err(not_found(file)),
        }
    }
}
