//! # Filesystem Service
//!
//! This service provides permission-aware filesystem operations over an
//! in-memory node tree.
//!
//! ## Philosophy
//!
//! - Every operation names the acting user explicitly
//! - Permission checks run before any mutation
//! - The user registry is passed in, never ambient
//! - Nothing is persisted; the tree lives as long as the service
//!
//! ## Operations
//!
//! - `mkdir(path)`: Create a directory and any missing parents
//! - `touch(path)`: Create an empty file, creating missing parents
//! - `write(path, append, bytes)` / `read(path, buffer, cursor)`: File content
//! - `rm(path, recursive)`: Remove a file or directory
//! - `mv(old, new)`: Move or rename
//! - `cp(src, dst_dir, recursive)`: Deep copy into an existing directory
//! - `ls(path, recursive)` / `list(...)`: Text or structured listing
//! - `chmod(path, target_user, mode)`: Set a per-user override
//! - `add_user(user)` / `remove_user(name)`: Registry management

pub mod config;
pub mod error;
pub mod listing;
pub mod operations;
pub mod service;
pub mod users;

pub use config::FileSystemConfig;
pub use error::{ErrorKind, FsError, FsResult};
pub use listing::{Listing, ListingEntry, ListingSection};
pub use operations::{FileSystemOperations, NodeStat, ReadCursor};
pub use service::FileSystemService;
pub use users::{User, UserRegistry, ROOT_USER};
