//! # Filesystem Tree
//!
//! This crate provides the in-memory node hierarchy behind the filesystem service.
//!
//! ## Philosophy
//!
//! - **Handles, not nesting**: Nodes live in an arena and refer to each other by `NodeId`
//! - **Tagged nodes**: A node is either a directory or a file, never both
//! - **Names are local**: A name is unique only among its siblings
//! - **Access is per node**: Every node carries its owner, a default mode and per-user overrides
//!
//! ## Design
//!
//! - The root directory is named "/" and always exists
//! - Directories map child names to handles (sorted, so walks are deterministic)
//! - Files hold their content as a sequence of fixed-capacity blocks
//! - Path resolution walks child maps from the root and fails on the first missing segment

pub mod blocks;
pub mod node;
pub mod path;
pub mod permissions;
pub mod tree;

pub use blocks::{Block, BlockStore, DEFAULT_BLOCK_SIZE};
pub use node::{Node, NodeBody, NodeId, NodeKind};
pub use path::{PathError, PathResolver};
pub use permissions::{Access, AccessMode, CapabilityParseError, NodePermissions};
pub use tree::{NodeTree, TreeError, ROOT_NAME};
