//! Filesystem operations
//!
//! This module defines the operations provided by the filesystem service.

use fs_tree::{AccessMode, NodeKind};
use serde::Serialize;

use crate::error::FsResult;
use crate::listing::Listing;
use crate::users::User;

/// Read position within a file
///
/// `read` clamps the cursor to the file size and advances it by the number
/// of bytes copied, so repeated reads stream through the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadCursor {
    position: u64,
}

impl ReadCursor {
    /// Creates a cursor at `position`
    pub fn new(position: u64) -> Self {
        Self { position }
    }

    /// Current position
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Lowers the position to `max` if it lies beyond it
    pub fn clamp(&mut self, max: u64) {
        self.position = self.position.min(max);
    }

    /// Moves the position forward
    pub fn advance(&mut self, count: u64) {
        self.position += count;
    }
}

/// Metadata information about a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeStat {
    /// Node name ("/" for the root)
    pub name: String,
    /// Directory or file
    pub kind: NodeKind,
    /// Owner username
    pub owner: String,
    /// Owner default mode
    pub access: AccessMode,
    /// Logical size in bytes (files only)
    pub size: Option<u64>,
    /// Number of blocks (files only)
    pub block_count: Option<usize>,
    /// Entry count (directories only)
    pub entry_count: Option<usize>,
}

/// Filesystem operations trait
///
/// Every operation takes the acting username. Capability checks happen
/// before any mutation.
pub trait FileSystemOperations {
    /// Create a directory
    ///
    /// Missing intermediate directories are created too; each created segment
    /// needs write access on its parent. Existing directories are walked
    /// through without checks, so repeating a mkdir is a no-op.
    fn mkdir(&mut self, path: &str, user: &str) -> FsResult<()>;

    /// Set `target_user`'s override on a node
    ///
    /// Requires write access on the node.
    fn chmod(&mut self, path: &str, user: &str, target_user: &str, access: &str) -> FsResult<()>;

    /// Remove a file or directory
    ///
    /// Non-empty directories need `recursive`, and then every node of the
    /// subtree must grant write access.
    fn rm(&mut self, path: &str, user: &str, recursive: bool) -> FsResult<()>;

    /// Create an empty file, creating missing parent directories
    fn touch(&mut self, path: &str, user: &str) -> FsResult<()>;

    /// Write to a file, replacing its content unless `append` is set
    fn write(&mut self, path: &str, user: &str, append: bool, buffer: &[u8]) -> FsResult<()>;

    /// Read from a file at `cursor` into `buffer`
    ///
    /// Returns the number of bytes copied and advances the cursor by it.
    fn read(
        &self,
        path: &str,
        user: &str,
        buffer: &mut [u8],
        cursor: &mut ReadCursor,
    ) -> FsResult<usize>;

    /// Move or rename a node
    ///
    /// Only the destination's parent needs to exist; an existing destination
    /// name is never overwritten.
    fn mv(&mut self, old_path: &str, new_path: &str, user: &str) -> FsResult<()>;

    /// Copy a node into an existing directory
    ///
    /// Directories need `recursive`.
    fn cp(&mut self, src_path: &str, dst_path: &str, user: &str, recursive: bool)
        -> FsResult<()>;

    /// List a directory as text
    fn ls(&self, path: &str, user: &str, recursive: bool) -> FsResult<String>;

    /// List a directory as structured sections
    fn list(&self, path: &str, user: &str, recursive: bool) -> FsResult<Listing<'_>>;

    /// Get node metadata
    ///
    /// Requires read access on the node.
    fn stat(&self, path: &str, user: &str) -> FsResult<NodeStat>;

    /// Register a user and provision their home directory
    fn add_user(&mut self, user: User) -> FsResult<()>;

    /// Unregister a user
    fn remove_user(&mut self, name: &str) -> FsResult<()>;
}
