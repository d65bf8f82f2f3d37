//! Node types and identifiers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::blocks::BlockStore;
use crate::permissions::{Access, AccessMode, NodePermissions};

/// Stable handle for a node in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Creates a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a node ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Kind of node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Holds named children
    Directory,
    /// Holds block content, never children
    File,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Directory => write!(f, "Directory"),
            NodeKind::File => write!(f, "File"),
        }
    }
}

/// Variant payload of a node
#[derive(Debug, Clone)]
pub enum NodeBody {
    /// Child name -> child handle
    Directory { children: BTreeMap<String, NodeId> },
    /// File content
    File { content: BlockStore },
}

/// A directory or file in the hierarchy
#[derive(Debug, Clone)]
pub struct Node {
    /// Name, unique among siblings
    pub name: String,
    /// Owner, default mode and overrides
    pub permissions: NodePermissions,
    /// Owning directory (`None` for the root and detached nodes)
    pub parent: Option<NodeId>,
    /// Directory children or file content
    pub body: NodeBody,
}

impl Node {
    /// Creates an empty directory node
    pub fn directory(name: impl Into<String>, owner: impl Into<String>, mode: AccessMode) -> Self {
        Self {
            name: name.into(),
            permissions: NodePermissions::new(owner, mode),
            parent: None,
            body: NodeBody::Directory {
                children: BTreeMap::new(),
            },
        }
    }

    /// Creates an empty file node
    pub fn file(
        name: impl Into<String>,
        owner: impl Into<String>,
        mode: AccessMode,
        block_size: usize,
    ) -> Self {
        Self {
            name: name.into(),
            permissions: NodePermissions::new(owner, mode),
            parent: None,
            body: NodeBody::File {
                content: BlockStore::new(block_size),
            },
        }
    }

    /// Returns the node kind
    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::Directory { .. } => NodeKind::Directory,
            NodeBody::File { .. } => NodeKind::File,
        }
    }

    /// Returns true for directories
    pub fn is_directory(&self) -> bool {
        self.kind() == NodeKind::Directory
    }

    /// Returns true for files
    pub fn is_file(&self) -> bool {
        self.kind() == NodeKind::File
    }

    /// Owner username
    pub fn owner(&self) -> &str {
        &self.permissions.owner
    }

    /// Owner default mode
    pub fn mode(&self) -> AccessMode {
        self.permissions.default
    }

    /// Checks whether `username` may perform `access` on this node
    pub fn allows(&self, username: &str, access: Access) -> bool {
        self.permissions.allows(username, access)
    }

    /// Children of a directory (`None` for files)
    pub fn children(&self) -> Option<&BTreeMap<String, NodeId>> {
        match &self.body {
            NodeBody::Directory { children } => Some(children),
            NodeBody::File { .. } => None,
        }
    }

    /// Looks up a child handle by name (always `None` for files)
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children().and_then(|children| children.get(name).copied())
    }

    /// Number of children (zero for files)
    pub fn child_count(&self) -> usize {
        self.children().map(|children| children.len()).unwrap_or(0)
    }

    /// File content (`None` for directories)
    pub fn content(&self) -> Option<&BlockStore> {
        match &self.body {
            NodeBody::File { content } => Some(content),
            NodeBody::Directory { .. } => None,
        }
    }

    /// Mutable file content (`None` for directories)
    pub fn content_mut(&mut self) -> Option<&mut BlockStore> {
        match &mut self.body {
            NodeBody::File { content } => Some(content),
            NodeBody::Directory { .. } => None,
        }
    }

    /// Logical size: bytes for files, child count for directories
    pub fn size(&self) -> u64 {
        match &self.body {
            NodeBody::File { content } => content.size(),
            NodeBody::Directory { children } => children.len() as u64,
        }
    }
}
