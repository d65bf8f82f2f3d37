//! Path splitting logic
//!
//! This module handles parsing slash-delimited paths. Walking the tree lives
//! in [`crate::tree::NodeTree::resolve`].

use thiserror::Error;

/// Errors that can occur during path resolution
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// Path component not found during traversal
    #[error("Path not found: {0}")]
    NotFound(String),
}

/// Path resolver
///
/// Handles splitting paths into components. Repeated, leading and trailing
/// slashes are tolerated; "" and "/" both denote the root.
pub struct PathResolver;

impl PathResolver {
    /// Splits a path into components, skipping empty ones
    ///
    /// # Examples
    ///
    /// ```
    /// use fs_tree::PathResolver;
    ///
    /// let components = PathResolver::split_path("/docs//notes/todo.txt/");
    /// assert_eq!(components, vec!["docs", "notes", "todo.txt"]);
    ///
    /// assert!(PathResolver::split_path("/").is_empty());
    /// ```
    pub fn split_path(path: &str) -> Vec<&str> {
        path.split('/')
            .filter(|component| !component.is_empty())
            .collect()
    }

    /// Splits a path into its parent components and final name
    ///
    /// Returns `None` when the path names the root.
    pub fn split_parent(path: &str) -> Option<(Vec<&str>, &str)> {
        let mut components = Self::split_path(path);
        let name = components.pop()?;
        Some((components, name))
    }

    /// Returns true if the path has no components
    pub fn is_root(path: &str) -> bool {
        Self::split_path(path).is_empty()
    }

    /// Builds the path of a child from its parent's path
    pub fn join(parent: &str, name: &str) -> String {
        if parent.ends_with('/') {
            format!("{}{}", parent, name)
        } else {
            format!("{}/{}", parent, name)
        }
    }

    /// Builds an absolute path from components
    pub fn from_components<S: AsRef<str>>(components: &[S]) -> String {
        if components.is_empty() {
            return "/".to_string();
        }
        components
            .iter()
            .fold(String::new(), |mut path, component| {
                path.push('/');
                path.push_str(component.as_ref());
                path
            })
    }
}
