//! Filesystem Service implementation
//!
//! This module provides the actual service that implements filesystem operations.

use crate::config::FileSystemConfig;
use crate::error::{FsError, FsResult};
use crate::listing::Listing;
use crate::operations::{FileSystemOperations, NodeStat, ReadCursor};
use crate::users::{User, UserRegistry};
use fs_tree::{Access, AccessMode, Node, NodeId, NodeTree, PathResolver};
use log::{debug, info, warn};

/// The Filesystem Service
///
/// Owns the node tree and the user registry and enforces access rules on
/// every operation.
#[derive(Debug, Clone)]
pub struct FileSystemService {
    tree: NodeTree,
    users: UserRegistry,
    config: FileSystemConfig,
}

impl FileSystemService {
    /// Creates a service with the default configuration
    ///
    /// The tree holds only "/", owned by "root" with `rwx`.
    pub fn new() -> Self {
        Self::build(FileSystemConfig::default())
    }

    /// Creates a service from a configuration
    pub fn with_config(config: FileSystemConfig) -> FsResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: FileSystemConfig) -> Self {
        info!(
            "filesystem started: admin={} access={} block_size={}",
            config.root_user, config.root_access, config.block_size
        );
        Self {
            tree: NodeTree::new(config.root_user.clone(), config.root_access),
            users: UserRegistry::new(config.root_user.clone(), config.root_access),
            config,
        }
    }

    /// The node tree
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// The user registry
    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    /// Active configuration
    pub fn config(&self) -> &FileSystemConfig {
        &self.config
    }

    /// Resolves a path to a node handle
    pub fn resolve(&self, path: &str) -> FsResult<NodeId> {
        Ok(self.tree.resolve(path)?)
    }

    /// Returns true if the path resolves
    pub fn exists(&self, path: &str) -> bool {
        self.tree.resolve(path).is_ok()
    }

    fn require(&self, id: NodeId, user: &str, access: Access, path: &str) -> FsResult<()> {
        if self.tree.node(id)?.allows(user, access) {
            return Ok(());
        }
        debug!("denied {} access on {} to {}", access, path, user);
        Err(FsError::PermissionDenied(format!(
            "{} lacks {} access on {}",
            user, access, path
        )))
    }

    fn registered(&self, user: &str) -> FsResult<&User> {
        self.users
            .get(user)
            .ok_or_else(|| FsError::PermissionDenied(format!("unknown user {}", user)))
    }

    /// Resolves the parent of `path` and the handle of its final segment
    fn locate(&self, path: &str, parent: &[&str], name: &str) -> FsResult<(NodeId, NodeId)> {
        let parent_id = self.tree.resolve_components(parent)?;
        let target = self
            .tree
            .child(parent_id, name)
            .ok_or_else(|| FsError::PathNotFound(path.to_string()))?;
        Ok((parent_id, target))
    }
}

impl Default for FileSystemService {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemOperations for FileSystemService {
    fn mkdir(&mut self, path: &str, user: &str) -> FsResult<()> {
        let mut current = self.tree.root();
        let mut walked: Vec<&str> = Vec::new();

        for segment in PathResolver::split_path(path) {
            let parent_path = PathResolver::from_components(&walked);
            walked.push(segment);

            match self.tree.child(current, segment) {
                Some(existing) => {
                    if self.tree.node(existing)?.is_file() {
                        return Err(FsError::InvalidOperation(format!(
                            "cannot create a directory inside file {}",
                            PathResolver::from_components(&walked)
                        )));
                    }
                    current = existing;
                }
                None => {
                    self.require(current, user, Access::Write, &parent_path)?;
                    let owner = self.registered(user)?.name.clone();
                    let mode = self.tree.node(current)?.mode();
                    current = self
                        .tree
                        .attach(current, Node::directory(segment, owner, mode))?;
                    debug!(
                        "mkdir {} by {}",
                        PathResolver::from_components(&walked),
                        user
                    );
                }
            }
        }
        Ok(())
    }

    fn chmod(&mut self, path: &str, user: &str, target_user: &str, access: &str) -> FsResult<()> {
        let id = self.resolve(path)?;
        self.require(id, user, Access::Write, path)?;
        let mode = AccessMode::parse(access)?;

        if !self.users.contains(target_user) {
            warn!(
                "chmod {} on {}: {} is not a registered user",
                mode, path, target_user
            );
        }
        self.tree
            .node_mut(id)?
            .permissions
            .set_override(target_user, mode);
        info!("chmod {} {} {} by {}", path, target_user, mode, user);
        Ok(())
    }

    fn rm(&mut self, path: &str, user: &str, recursive: bool) -> FsResult<()> {
        let Some((parent, name)) = PathResolver::split_parent(path) else {
            return Err(FsError::PermissionDenied(
                "the root directory cannot be removed".to_string(),
            ));
        };
        let (parent_id, target) = self.locate(path, &parent, name)?;
        self.require(target, user, Access::Write, path)?;

        let node = self.tree.node(target)?;
        if node.is_directory() && node.child_count() > 0 {
            if !recursive {
                return Err(FsError::PermissionDenied(format!(
                    "{} is not empty; remove it recursively",
                    path
                )));
            }
            // Whole subtree is checked up front so a denial leaves it intact.
            for id in self.tree.descendants(target) {
                if !self.tree.node(id)?.allows(user, Access::Write) {
                    let denied = self.tree.path_of(id)?;
                    debug!("denied write access on {} to {}", denied, user);
                    return Err(FsError::PermissionDenied(format!(
                        "{} lacks write access on {}",
                        user, denied
                    )));
                }
            }
        }

        let removed = self.tree.remove_subtree(parent_id, name)?;
        info!("rm {} by {} ({} nodes)", path, user, removed);
        Ok(())
    }

    fn touch(&mut self, path: &str, user: &str) -> FsResult<()> {
        if path.ends_with('/') || PathResolver::is_root(path) {
            return Err(FsError::InvalidOperation(format!(
                "invalid file name: {:?}",
                path
            )));
        }
        let Some((parent, name)) = PathResolver::split_parent(path) else {
            return Err(FsError::InvalidOperation(format!(
                "invalid file name: {:?}",
                path
            )));
        };
        let parent_path = PathResolver::from_components(&parent);

        self.mkdir(&parent_path, user)?;
        let parent_id = self.tree.resolve_components(&parent)?;
        self.require(parent_id, user, Access::Write, &parent_path)?;

        if self.tree.node(parent_id)?.is_file() {
            return Err(FsError::InvalidOperation(format!(
                "cannot create a file inside file {}",
                parent_path
            )));
        }
        if self.tree.child(parent_id, name).is_some() {
            return Err(FsError::PathAlreadyExists(path.to_string()));
        }

        let owner = self.registered(user)?;
        let file = Node::file(name, owner.name.clone(), owner.access, self.config.block_size);
        self.tree.attach(parent_id, file)?;
        info!("touch {} by {}", path, user);
        Ok(())
    }

    fn write(&mut self, path: &str, user: &str, append: bool, buffer: &[u8]) -> FsResult<()> {
        let id = self.resolve(path)?;
        if !self.tree.node(id)?.is_file() {
            return Err(FsError::InvalidOperation(format!(
                "cannot write to directory {}",
                path
            )));
        }
        self.require(id, user, Access::Write, path)?;

        let content = self
            .tree
            .node_mut(id)?
            .content_mut()
            .ok_or_else(|| FsError::InvalidOperation(format!("{} is not a file", path)))?;
        if !append {
            content.clear();
        }
        let blocks = content.append(buffer);
        debug!(
            "write {} by {}: {} bytes in {} blocks (append={})",
            path,
            user,
            buffer.len(),
            blocks,
            append
        );
        Ok(())
    }

    fn read(
        &self,
        path: &str,
        user: &str,
        buffer: &mut [u8],
        cursor: &mut ReadCursor,
    ) -> FsResult<usize> {
        let id = self.resolve(path)?;
        let content = self.tree.node(id)?.content().ok_or_else(|| {
            FsError::InvalidOperation(format!("cannot read from directory {}", path))
        })?;
        self.require(id, user, Access::Read, path)?;

        let size = content.size();
        cursor.clamp(size);
        if cursor.position() >= size {
            return Ok(0);
        }

        let copied = content.read_at(cursor.position(), buffer);
        cursor.advance(copied as u64);
        Ok(copied)
    }

    fn mv(&mut self, old_path: &str, new_path: &str, user: &str) -> FsResult<()> {
        let (Some((old_parent, old_name)), Some((new_parent, new_name))) = (
            PathResolver::split_parent(old_path),
            PathResolver::split_parent(new_path),
        ) else {
            return Err(FsError::PermissionDenied(
                "the root directory cannot be moved".to_string(),
            ));
        };

        let (_, target) = self.locate(old_path, &old_parent, old_name)?;
        self.require(target, user, Access::Write, old_path)?;

        let new_parent_id = self.tree.resolve_components(&new_parent)?;
        if !self.tree.node(new_parent_id)?.is_directory() {
            return Err(FsError::InvalidOperation(format!(
                "cannot move into file {}",
                PathResolver::from_components(&new_parent)
            )));
        }
        if self.tree.child(new_parent_id, new_name).is_some() {
            return Err(FsError::PermissionDenied(format!(
                "{} already exists; mv never overwrites",
                new_path
            )));
        }
        if self.tree.is_ancestor_or_self(target, new_parent_id) {
            return Err(FsError::InvalidOperation(format!(
                "cannot move {} inside itself",
                old_path
            )));
        }

        self.tree.relocate(target, new_parent_id, new_name)?;
        info!("mv {} {} by {}", old_path, new_path, user);
        Ok(())
    }

    fn cp(
        &mut self,
        src_path: &str,
        dst_path: &str,
        user: &str,
        recursive: bool,
    ) -> FsResult<()> {
        let source = self.resolve(src_path)?;
        let dest = self.resolve(dst_path)?;
        self.require(source, user, Access::Read, src_path)?;
        self.require(dest, user, Access::Write, dst_path)?;

        if !self.tree.node(dest)?.is_directory() {
            return Err(FsError::InvalidOperation(format!(
                "copy destination {} is not a directory",
                dst_path
            )));
        }
        let source_node = self.tree.node(source)?;
        if source_node.is_directory() && !recursive {
            return Err(FsError::PermissionDenied(format!(
                "{} is a directory; copy it recursively",
                src_path
            )));
        }
        if self.tree.is_ancestor_or_self(source, dest) {
            return Err(FsError::InvalidOperation(format!(
                "cannot copy {} into itself",
                src_path
            )));
        }
        if self.tree.child(dest, &source_node.name).is_some() {
            return Err(FsError::PathAlreadyExists(PathResolver::join(
                &PathResolver::from_components(&PathResolver::split_path(dst_path)),
                &source_node.name,
            )));
        }

        self.tree.copy_subtree(source, dest)?;
        info!("cp {} {} by {} (recursive={})", src_path, dst_path, user, recursive);
        Ok(())
    }

    fn ls(&self, path: &str, user: &str, recursive: bool) -> FsResult<String> {
        Ok(self.list(path, user, recursive)?.render())
    }

    fn list(&self, path: &str, user: &str, recursive: bool) -> FsResult<Listing<'_>> {
        let id = self.resolve(path)?;
        if !self.tree.node(id)?.is_directory() {
            return Err(FsError::InvalidOperation(format!(
                "{} is not a directory",
                path
            )));
        }
        self.require(id, user, Access::Read, path)?;
        Ok(Listing::new(&self.tree, id, path, recursive))
    }

    fn stat(&self, path: &str, user: &str) -> FsResult<NodeStat> {
        let id = self.resolve(path)?;
        self.require(id, user, Access::Read, path)?;

        let node = self.tree.node(id)?;
        let content = node.content();
        Ok(NodeStat {
            name: node.name.clone(),
            kind: node.kind(),
            owner: node.owner().to_string(),
            access: node.mode(),
            size: content.map(|c| c.size()),
            block_count: content.map(|c| c.block_count()),
            entry_count: node.children().map(|children| children.len()),
        })
    }

    fn add_user(&mut self, user: User) -> FsResult<()> {
        if self.users.contains(&user.name) {
            return Err(FsError::UserAlreadyExists(user.name));
        }
        if user.name.is_empty() || user.name.contains('/') {
            return Err(FsError::InvalidOperation(format!(
                "invalid user name {:?}",
                user.name
            )));
        }

        let home = match self.tree.resolve(&user.home) {
            Ok(id) => id,
            Err(_) => {
                let admin = self.users.admin().to_string();
                self.mkdir(&user.home, &admin)?;
                self.resolve(&user.home)?
            }
        };
        self.tree
            .node_mut(home)?
            .permissions
            .set_override(user.name.clone(), user.access);

        info!("added user {} (home {}, {})", user.name, user.home, user.access);
        self.users.insert(user)
    }

    fn remove_user(&mut self, name: &str) -> FsResult<()> {
        self.users.remove(name)?;
        info!("removed user {}", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn service_with_bob() -> FileSystemService {
        let mut service = FileSystemService::new();
        service
            .add_user(User::parse("bob", "rw-", "/home/bob").unwrap())
            .unwrap();
        service
    }

    #[test]
    fn test_service_creation() {
        let service = FileSystemService::new();
        assert_eq!(service.tree().len(), 1);
        assert_eq!(service.users().len(), 1);
        assert!(service.exists("/"));
    }

    #[test]
    fn test_with_config() {
        let config = FileSystemConfig {
            block_size: 8,
            ..FileSystemConfig::default()
        };
        let mut service = FileSystemService::with_config(config).unwrap();
        service.touch("/f", "root").unwrap();
        service.write("/f", "root", false, b"0123456789").unwrap();

        let stat = service.stat("/f", "root").unwrap();
        assert_eq!(stat.block_count, Some(2));
        assert_eq!(stat.owner, "root");
    }

    #[test]
    fn test_with_config_keeps_root_invariant() {
        let config = FileSystemConfig {
            root_user: "admin".to_string(),
            root_access: AccessMode::read_only(),
            ..FileSystemConfig::default()
        };
        let err = FileSystemService::with_config(config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_with_invalid_config() {
        let config = FileSystemConfig {
            block_size: 0,
            ..FileSystemConfig::default()
        };
        assert!(FileSystemService::with_config(config).is_err());
    }

    #[test]
    fn test_mkdir_root_is_noop() {
        let mut service = FileSystemService::new();
        service.mkdir("/", "root").unwrap();
        assert_eq!(service.tree().len(), 1);
    }

    #[test]
    fn test_mkdir_inherits_parent_mode() {
        let mut service = FileSystemService::new();
        service.mkdir("/a", "root").unwrap();
        service.chmod("/a", "root", "root", "rw-").unwrap();
        service.mkdir("/a/b", "root").unwrap();

        let stat = service.stat("/a/b", "root").unwrap();
        assert_eq!(stat.access, AccessMode::all());
        assert_eq!(stat.owner, "root");
    }

    #[test]
    fn test_mkdir_unknown_user() {
        let mut service = FileSystemService::new();
        service.mkdir("/open", "root").unwrap();
        service.chmod("/open", "root", "ghost", "rwx").unwrap();

        let err = service.mkdir("/open/x", "ghost").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(!service.exists("/open/x"));
    }

    #[test]
    fn test_mkdir_through_file() {
        let mut service = FileSystemService::new();
        service.touch("/f.txt", "root").unwrap();
        let err = service.mkdir("/f.txt/sub", "root").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_mkdir_existing_needs_no_permission() {
        let mut service = service_with_bob();
        service.mkdir("/locked/deep", "root").unwrap();
        service.mkdir("/locked/deep", "bob").unwrap();
    }

    #[test]
    fn test_chmod_requires_write() {
        let mut service = service_with_bob();
        service.mkdir("/srv", "root").unwrap();
        let err = service.chmod("/srv", "bob", "bob", "rwx").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_chmod_rejects_malformed_mode() {
        let mut service = FileSystemService::new();
        let err = service.chmod("/", "root", "bob", "rwxx").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_touch_creates_file_with_user_mode() {
        let mut service = service_with_bob();
        service.touch("/home/bob/notes.txt", "bob").unwrap();

        let stat = service.stat("/home/bob/notes.txt", "bob").unwrap();
        assert_eq!(stat.owner, "bob");
        assert_eq!(stat.access, AccessMode::read_write());
        assert_eq!(stat.size, Some(0));
    }

    #[test]
    fn test_touch_rejects_trailing_slash() {
        let mut service = FileSystemService::new();
        assert_eq!(
            service.touch("/a/", "root").unwrap_err().kind(),
            ErrorKind::InvalidOperation
        );
        assert_eq!(
            service.touch("/", "root").unwrap_err().kind(),
            ErrorKind::InvalidOperation
        );
        assert!(!service.exists("/a"));
    }

    #[test]
    fn test_touch_inside_file() {
        let mut service = FileSystemService::new();
        service.touch("/f.txt", "root").unwrap();
        assert_eq!(
            service.touch("/f.txt/g.txt", "root").unwrap_err().kind(),
            ErrorKind::InvalidOperation
        );
    }

    #[test]
    fn test_write_and_read_directory() {
        let mut service = FileSystemService::new();
        service.mkdir("/d", "root").unwrap();
        assert_eq!(
            service.write("/d", "root", false, b"x").unwrap_err().kind(),
            ErrorKind::InvalidOperation
        );

        let mut buf = [0u8; 4];
        let mut cursor = ReadCursor::default();
        assert_eq!(
            service
                .read("/d", "root", &mut buf, &mut cursor)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidOperation
        );
    }

    #[test]
    fn test_read_streams_with_cursor() {
        let mut service = FileSystemService::new();
        service.touch("/f", "root").unwrap();
        service.write("/f", "root", false, b"abcdefgh").unwrap();

        let mut buf = [0u8; 3];
        let mut cursor = ReadCursor::default();
        assert_eq!(service.read("/f", "root", &mut buf, &mut cursor).unwrap(), 3);
        assert_eq!(&buf, b"abc");
        assert_eq!(service.read("/f", "root", &mut buf, &mut cursor).unwrap(), 3);
        assert_eq!(&buf, b"def");
        assert_eq!(service.read("/f", "root", &mut buf, &mut cursor).unwrap(), 2);
        assert_eq!(&buf[..2], b"gh");
        assert_eq!(service.read("/f", "root", &mut buf, &mut cursor).unwrap(), 0);
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_read_clamps_cursor() {
        let mut service = FileSystemService::new();
        service.touch("/f", "root").unwrap();
        service.write("/f", "root", false, b"abc").unwrap();

        let mut buf = [0u8; 3];
        let mut cursor = ReadCursor::new(100);
        assert_eq!(service.read("/f", "root", &mut buf, &mut cursor).unwrap(), 0);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_read_requires_read_access() {
        let mut service = service_with_bob();
        service.touch("/secret", "root").unwrap();
        let mut buf = [0u8; 1];
        let mut cursor = ReadCursor::default();
        let err = service
            .read("/secret", "bob", &mut buf, &mut cursor)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_write_replaces_content() {
        let mut service = FileSystemService::new();
        service.touch("/f", "root").unwrap();
        service.write("/f", "root", false, b"first").unwrap();
        service.write("/f", "root", false, b"2nd").unwrap();
        assert_eq!(service.stat("/f", "root").unwrap().size, Some(3));

        service.write("/f", "root", false, b"").unwrap();
        assert_eq!(service.stat("/f", "root").unwrap().size, Some(0));
    }

    #[test]
    fn test_rm_root() {
        let mut service = FileSystemService::new();
        assert_eq!(
            service.rm("/", "root", true).unwrap_err().kind(),
            ErrorKind::PermissionDenied
        );
    }

    #[test]
    fn test_rm_missing() {
        let mut service = FileSystemService::new();
        assert_eq!(
            service.rm("/nope", "root", false).unwrap_err().kind(),
            ErrorKind::PathNotFound
        );
        assert_eq!(
            service.rm("/no/parent", "root", false).unwrap_err().kind(),
            ErrorKind::PathNotFound
        );
    }

    #[test]
    fn test_rm_empty_directory_without_recursive() {
        let mut service = FileSystemService::new();
        service.mkdir("/empty", "root").unwrap();
        service.rm("/empty", "root", false).unwrap();
        assert!(!service.exists("/empty"));
    }

    #[test]
    fn test_rm_recursive_is_all_or_nothing() {
        let mut service = service_with_bob();
        service.mkdir("/home/bob/a/b", "bob").unwrap();
        service.touch("/home/bob/a/first.txt", "bob").unwrap();
        service.touch("/home/bob/a/b/locked.txt", "bob").unwrap();
        service
            .chmod("/home/bob/a/b/locked.txt", "bob", "bob", "r--")
            .unwrap();

        let err = service.rm("/home/bob/a", "bob", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(service.exists("/home/bob/a/first.txt"));
        assert!(service.exists("/home/bob/a/b/locked.txt"));
    }

    #[test]
    fn test_mv_root() {
        let mut service = FileSystemService::new();
        service.mkdir("/a", "root").unwrap();
        assert_eq!(
            service.mv("/", "/a/x", "root").unwrap_err().kind(),
            ErrorKind::PermissionDenied
        );
        assert_eq!(
            service.mv("/a", "/", "root").unwrap_err().kind(),
            ErrorKind::PermissionDenied
        );
    }

    #[test]
    fn test_mv_onto_existing_name() {
        let mut service = FileSystemService::new();
        service.mkdir("/a", "root").unwrap();
        service.touch("/b/keep.txt", "root").unwrap();
        let b = service.resolve("/b").unwrap();
        assert_eq!(
            service.mv("/a", "/b", "root").unwrap_err().kind(),
            ErrorKind::PermissionDenied
        );
        assert!(service.exists("/a"));
        assert_eq!(service.resolve("/b").unwrap(), b);
        assert!(service.exists("/b/keep.txt"));
    }

    #[test]
    fn test_mv_into_own_subtree() {
        let mut service = FileSystemService::new();
        service.mkdir("/a/b", "root").unwrap();
        assert_eq!(
            service.mv("/a", "/a/b/a", "root").unwrap_err().kind(),
            ErrorKind::InvalidOperation
        );
        assert!(service.exists("/a/b"));
    }

    #[test]
    fn test_mv_requires_write_on_source() {
        let mut service = service_with_bob();
        service.touch("/home/bob/x", "root").unwrap();
        assert_eq!(
            service
                .mv("/home/bob/x", "/home/bob/y", "bob")
                .unwrap_err()
                .kind(),
            ErrorKind::PermissionDenied
        );
    }

    #[test]
    fn test_cp_directory_requires_recursive() {
        let mut service = FileSystemService::new();
        service.mkdir("/a", "root").unwrap();
        service.mkdir("/b", "root").unwrap();
        assert_eq!(
            service.cp("/a", "/b", "root", false).unwrap_err().kind(),
            ErrorKind::PermissionDenied
        );
        service.cp("/a", "/b", "root", true).unwrap();
        assert!(service.exists("/b/a"));
    }

    #[test]
    fn test_cp_into_file() {
        let mut service = FileSystemService::new();
        service.touch("/a.txt", "root").unwrap();
        service.touch("/b.txt", "root").unwrap();
        assert_eq!(
            service.cp("/a.txt", "/b.txt", "root", false).unwrap_err().kind(),
            ErrorKind::InvalidOperation
        );
    }

    #[test]
    fn test_cp_name_clash() {
        let mut service = FileSystemService::new();
        service.touch("/a/f.txt", "root").unwrap();
        service.touch("/b/f.txt", "root").unwrap();
        assert_eq!(
            service.cp("/a/f.txt", "/b", "root", false).unwrap_err().kind(),
            ErrorKind::PathAlreadyExists
        );
    }

    #[test]
    fn test_cp_into_itself() {
        let mut service = FileSystemService::new();
        service.mkdir("/a/b", "root").unwrap();
        assert_eq!(
            service.cp("/a", "/a/b", "root", true).unwrap_err().kind(),
            ErrorKind::InvalidOperation
        );
    }

    #[test]
    fn test_ls_on_file() {
        let mut service = FileSystemService::new();
        service.touch("/f", "root").unwrap();
        assert_eq!(
            service.ls("/f", "root", false).unwrap_err().kind(),
            ErrorKind::InvalidOperation
        );
    }

    #[test]
    fn test_ls_requires_read() {
        let mut service = service_with_bob();
        service.mkdir("/private", "root").unwrap();
        assert_eq!(
            service.ls("/private", "bob", false).unwrap_err().kind(),
            ErrorKind::PermissionDenied
        );
    }

    #[test]
    fn test_add_user_with_existing_home() {
        let mut service = FileSystemService::new();
        service.mkdir("/shared", "root").unwrap();
        service
            .add_user(User::parse("carol", "r--", "/shared").unwrap())
            .unwrap();

        let shared = service.resolve("/shared").unwrap();
        let node = service.tree().get(shared).unwrap();
        assert_eq!(
            node.permissions.override_for("carol"),
            Some(AccessMode::read_only())
        );
    }

    #[test]
    fn test_add_user_invalid_name() {
        let mut service = FileSystemService::new();
        let err = service
            .add_user(User::new("", AccessMode::all(), "/home/x"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert!(!service.exists("/home"));
    }

    #[test]
    fn test_remove_user() {
        let mut service = service_with_bob();
        service.remove_user("bob").unwrap();
        assert!(!service.users().contains("bob"));
        assert!(service.exists("/home/bob"));

        assert_eq!(
            service.remove_user("bob").unwrap_err().kind(),
            ErrorKind::UserNotFound
        );
        assert_eq!(
            service.remove_user("root").unwrap_err().kind(),
            ErrorKind::PermissionDenied
        );
    }
}
