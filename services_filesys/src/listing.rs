//! Directory listings
//!
//! A [`Listing`] walks the tree lazily, one directory at a time, and yields
//! structured [`ListingSection`]s. Text rendering is a separate step so
//! callers can consume the entries directly.

use fs_tree::{AccessMode, NodeId, NodeKind, NodeTree, PathResolver};
use serde::Serialize;
use std::fmt;

/// One child as seen in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    /// Full path of the child
    pub path: String,
    /// Child name
    pub name: String,
    /// Directory or file
    pub kind: NodeKind,
    /// Owner default mode
    pub access: AccessMode,
    /// Owner username
    pub owner: String,
    /// Bytes for files, child count for directories
    pub size: u64,
}

impl fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            NodeKind::Directory => 'd',
            NodeKind::File => '-',
        };
        write!(
            f,
            "{}{} {} {} {}",
            marker, self.access, self.owner, self.size, self.name
        )
    }
}

/// Immediate children of one directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingSection {
    /// Path of the listed directory
    pub header: String,
    /// Children in name order
    pub entries: Vec<ListingEntry>,
}

impl fmt::Display for ListingSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.header)?;
        for entry in &self.entries {
            writeln!(f, "  {}", entry)?;
        }
        Ok(())
    }
}

/// Depth-first producer of listing sections
///
/// A directory's own section comes before the sections of its child
/// directories, which follow in name order.
pub struct Listing<'a> {
    tree: &'a NodeTree,
    pending: Vec<(String, NodeId)>,
    recursive: bool,
}

impl<'a> Listing<'a> {
    /// Starts a listing of `dir`, labelled with `path`
    pub fn new(tree: &'a NodeTree, dir: NodeId, path: &str, recursive: bool) -> Self {
        let header = PathResolver::from_components(&PathResolver::split_path(path));
        Self {
            tree,
            pending: vec![(header, dir)],
            recursive,
        }
    }

    /// Renders every remaining section as text
    pub fn render(self) -> String {
        self.map(|section| section.to_string()).collect()
    }
}

impl Iterator for Listing<'_> {
    type Item = ListingSection;

    fn next(&mut self) -> Option<Self::Item> {
        let (header, dir) = self.pending.pop()?;

        let mut entries = Vec::new();
        let mut subdirs = Vec::new();
        for child_id in self.tree.children_of(dir) {
            let Some(child) = self.tree.get(child_id) else {
                continue;
            };
            let path = PathResolver::join(&header, &child.name);
            if self.recursive && child.is_directory() {
                subdirs.push((path.clone(), child_id));
            }
            entries.push(ListingEntry {
                path,
                name: child.name.clone(),
                kind: child.kind(),
                access: child.mode(),
                owner: child.owner().to_string(),
                size: child.size(),
            });
        }

        self.pending.extend(subdirs.into_iter().rev());
        Some(ListingSection { header, entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fs_tree::{Node, DEFAULT_BLOCK_SIZE};

    fn sample_tree() -> NodeTree {
        let mut tree = NodeTree::new("root", AccessMode::all());
        let root = tree.root();
        let a = tree
            .attach(root, Node::directory("a", "root", AccessMode::all()))
            .unwrap();
        tree.attach(a, Node::directory("inner", "alice", AccessMode::read_only()))
            .unwrap();
        let b = tree
            .attach(root, Node::directory("b", "root", AccessMode::all()))
            .unwrap();
        let file = tree
            .attach(
                b,
                Node::file("notes.txt", "root", AccessMode::read_write(), DEFAULT_BLOCK_SIZE),
            )
            .unwrap();
        tree.get_mut(file)
            .unwrap()
            .content_mut()
            .unwrap()
            .append(b"hello");
        tree
    }

    #[test]
    fn test_flat_listing() {
        let tree = sample_tree();
        let sections: Vec<_> = Listing::new(&tree, tree.root(), "/", false).collect();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].header, "/");
        let names: Vec<_> = sections[0].entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_recursive_order() {
        let tree = sample_tree();
        let headers: Vec<_> = Listing::new(&tree, tree.root(), "/", true)
            .map(|s| s.header)
            .collect();
        assert_eq!(headers, vec!["/", "/a", "/a/inner", "/b"]);
    }

    #[test]
    fn test_entry_fields() {
        let tree = sample_tree();
        let b = tree.resolve("/b").unwrap();
        let section = Listing::new(&tree, b, "/b/", false).next().unwrap();

        assert_eq!(section.header, "/b");
        let entry = &section.entries[0];
        assert_eq!(entry.path, "/b/notes.txt");
        assert_eq!(entry.kind, NodeKind::File);
        assert_eq!(entry.size, 5);
        assert_eq!(entry.to_string(), "-rw- root 5 notes.txt");
    }

    #[test]
    fn test_render() {
        let tree = sample_tree();
        let a = tree.resolve("/a").unwrap();
        let text = Listing::new(&tree, a, "/a", true).render();
        assert_eq!(text, "/a:\n  dr-- alice 0 inner\n/a/inner:\n");
    }
}
