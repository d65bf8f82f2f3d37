//! Arena-backed node tree
//!
//! Every node lives in a single map keyed by [`NodeId`]. Directories refer to
//! their children by handle and every attached node records its parent, so
//! moving a subtree is a matter of rebinding two handles.

use std::collections::HashMap;
use thiserror::Error;

use crate::node::{Node, NodeBody, NodeId};
use crate::path::{PathError, PathResolver};
use crate::permissions::AccessMode;

/// Name of the root directory
pub const ROOT_NAME: &str = "/";

/// Structural misuse of the tree
///
/// These indicate a broken internal invariant (attaching children to a file,
/// linking a name twice), never a user mistake.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    /// Handle does not refer to a live node
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// Children were requested from a file
    #[error("{0} is a file and cannot hold children")]
    NotADirectory(NodeId),

    /// Parent already has a child with this name
    #[error("{parent} already has a child named {name:?}")]
    DuplicateChild { parent: NodeId, name: String },

    /// Parent has no child with this name
    #[error("{parent} has no child named {name:?}")]
    MissingChild { parent: NodeId, name: String },

    /// Name is empty or contains a separator
    #[error("Invalid node name: {0:?}")]
    InvalidName(String),

    /// Node would become its own ancestor
    #[error("Cannot place {node} inside its own subtree")]
    WouldCycle { node: NodeId },

    /// The root cannot be detached, renamed or moved
    #[error("The root directory cannot be detached")]
    RootImmutable,
}

/// The directory hierarchy
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
}

impl NodeTree {
    /// Creates a tree holding only the root directory
    pub fn new(root_owner: impl Into<String>, root_mode: AccessMode) -> Self {
        let root = NodeId::new();
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::directory(ROOT_NAME, root_owner, root_mode));
        Self { nodes, root }
    }

    /// Handle of the root directory
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists for the lifetime of the tree
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Gets a node by handle
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Gets a mutable node by handle
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Gets a node, failing on a stale handle
    pub fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(&id).ok_or(TreeError::UnknownNode(id))
    }

    /// Gets a mutable node, failing on a stale handle
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(&id).ok_or(TreeError::UnknownNode(id))
    }

    /// Looks up a child of `dir` by name
    pub fn child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.nodes.get(&dir).and_then(|node| node.child(name))
    }

    /// Resolves a slash-delimited path from the root
    ///
    /// Descending into a file behaves like a missing child.
    pub fn resolve(&self, path: &str) -> Result<NodeId, PathError> {
        let components = PathResolver::split_path(path);
        self.resolve_components(&components)
            .map_err(|_| PathError::NotFound(path.to_string()))
    }

    /// Resolves already-split components from the root
    pub fn resolve_components<S: AsRef<str>>(&self, components: &[S]) -> Result<NodeId, PathError> {
        let mut current = self.root;
        for component in components {
            current = self.child(current, component.as_ref()).ok_or_else(|| {
                PathError::NotFound(PathResolver::from_components(components))
            })?;
        }
        Ok(current)
    }

    /// Attaches a new node under `parent` and returns its handle
    pub fn attach(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId, TreeError> {
        Self::validate_name(&node.name)?;
        let id = NodeId::new();
        let name = node.name.clone();
        self.insert_child(parent, &name, id)?;
        node.parent = Some(parent);
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Moves `id` under `new_parent` with `new_name`
    ///
    /// Checks everything before touching either directory, so a failure
    /// leaves the tree unchanged.
    pub fn relocate(
        &mut self,
        id: NodeId,
        new_parent: NodeId,
        new_name: &str,
    ) -> Result<(), TreeError> {
        Self::validate_name(new_name)?;
        if id == self.root {
            return Err(TreeError::RootImmutable);
        }
        let old_parent = self.node(id)?.parent.ok_or(TreeError::UnknownNode(id))?;
        let old_name = self.node(id)?.name.clone();

        if self.is_ancestor_or_self(id, new_parent) {
            return Err(TreeError::WouldCycle { node: id });
        }
        match &self.node(new_parent)?.body {
            NodeBody::File { .. } => return Err(TreeError::NotADirectory(new_parent)),
            NodeBody::Directory { children } => {
                let same_slot = new_parent == old_parent && new_name == old_name;
                if children.contains_key(new_name) && !same_slot {
                    return Err(TreeError::DuplicateChild {
                        parent: new_parent,
                        name: new_name.to_string(),
                    });
                }
            }
        }

        self.remove_child(old_parent, &old_name)?;
        self.insert_child(new_parent, new_name, id)?;
        let node = self.node_mut(id)?;
        node.name = new_name.to_string();
        node.parent = Some(new_parent);
        Ok(())
    }

    /// Unlinks `name` from `parent` and drops its whole subtree
    ///
    /// Returns the number of nodes dropped.
    pub fn remove_subtree(&mut self, parent: NodeId, name: &str) -> Result<usize, TreeError> {
        let id = self.child(parent, name).ok_or_else(|| TreeError::MissingChild {
            parent,
            name: name.to_string(),
        })?;
        let mut doomed = self.descendants(id);
        doomed.push(id);

        self.remove_child(parent, name)?;
        for node in &doomed {
            self.nodes.remove(node);
        }
        Ok(doomed.len())
    }

    /// Deep-copies the subtree at `source` into the directory `dest`
    ///
    /// Copies keep name, owner and default mode; overrides are not carried
    /// over. File blocks are duplicated, never shared.
    pub fn copy_subtree(&mut self, source: NodeId, dest: NodeId) -> Result<NodeId, TreeError> {
        if self.is_ancestor_or_self(source, dest) {
            return Err(TreeError::WouldCycle { node: source });
        }

        let original = self.node(source)?;
        let body = match &original.body {
            NodeBody::File { content } => NodeBody::File {
                content: content.clone(),
            },
            NodeBody::Directory { .. } => NodeBody::Directory {
                children: Default::default(),
            },
        };
        let children: Vec<NodeId> = original
            .children()
            .map(|children| children.values().copied().collect())
            .unwrap_or_default();
        let copy = Node {
            name: original.name.clone(),
            permissions: original.permissions.without_overrides(),
            parent: None,
            body,
        };

        let copy_id = self.attach(dest, copy)?;
        for child in children {
            self.copy_subtree(child, copy_id)?;
        }
        Ok(copy_id)
    }

    /// Every node below `id`, in pre-order (parents before children,
    /// siblings by name)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children_of(id).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children_of(next).into_iter().rev());
        }
        out
    }

    /// Child handles of `id` in name order (empty for files)
    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&id)
            .and_then(|node| node.children())
            .map(|children| children.values().copied().collect())
            .unwrap_or_default()
    }

    /// Returns true if `ancestor` is `node` or lies on its parent chain
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    /// Absolute path of a node
    pub fn path_of(&self, id: NodeId) -> Result<String, TreeError> {
        let mut components = Vec::new();
        let mut current = id;
        while current != self.root {
            let node = self.node(current)?;
            components.push(node.name.clone());
            current = node.parent.ok_or(TreeError::UnknownNode(current))?;
        }
        components.reverse();
        Ok(PathResolver::from_components(&components))
    }

    fn validate_name(name: &str) -> Result<(), TreeError> {
        if name.is_empty() || name.contains('/') {
            return Err(TreeError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    fn insert_child(&mut self, parent: NodeId, name: &str, id: NodeId) -> Result<(), TreeError> {
        match &mut self.node_mut(parent)?.body {
            NodeBody::File { .. } => Err(TreeError::NotADirectory(parent)),
            NodeBody::Directory { children } => {
                if children.contains_key(name) {
                    return Err(TreeError::DuplicateChild {
                        parent,
                        name: name.to_string(),
                    });
                }
                children.insert(name.to_string(), id);
                Ok(())
            }
        }
    }

    fn remove_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        match &mut self.node_mut(parent)?.body {
            NodeBody::File { .. } => Err(TreeError::NotADirectory(parent)),
            NodeBody::Directory { children } => {
                children.remove(name).ok_or_else(|| TreeError::MissingChild {
                    parent,
                    name: name.to_string(),
                })
            }
        }
    }
}
