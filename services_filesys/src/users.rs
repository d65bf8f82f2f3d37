//! User registry
//!
//! Users are plain records: a name, the mode they get on nodes they create,
//! and a home directory. The administrative user always exists.

use fs_tree::AccessMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{FsError, FsResult};

/// Name of the default administrative user
pub const ROOT_USER: &str = "root";

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique name
    pub name: String,
    /// Default mode for nodes this user creates, and for their home
    pub access: AccessMode,
    /// Home directory path
    pub home: String,
}

impl User {
    /// Creates a user record
    pub fn new(name: impl Into<String>, access: AccessMode, home: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access,
            home: home.into(),
        }
    }

    /// Creates a user from a capability string
    pub fn parse(name: impl Into<String>, access: &str, home: impl Into<String>) -> FsResult<Self> {
        Ok(Self::new(name, AccessMode::parse(access)?, home))
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.access, self.home)
    }
}

/// Set of registered users, keyed by name
#[derive(Debug, Clone)]
pub struct UserRegistry {
    users: BTreeMap<String, User>,
    admin: String,
}

impl UserRegistry {
    /// Creates a registry holding only the administrative user, homed at "/"
    pub fn new(admin: impl Into<String>, access: AccessMode) -> Self {
        let admin = admin.into();
        let mut users = BTreeMap::new();
        users.insert(admin.clone(), User::new(admin.clone(), access, "/"));
        Self { users, admin }
    }

    /// Name of the administrative user
    pub fn admin(&self) -> &str {
        &self.admin
    }

    /// Returns true if `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    /// Gets a user by name
    pub fn get(&self, name: &str) -> Option<&User> {
        self.users.get(name)
    }

    /// Registers a user
    pub fn insert(&mut self, user: User) -> FsResult<()> {
        if self.users.contains_key(&user.name) {
            return Err(FsError::UserAlreadyExists(user.name));
        }
        self.users.insert(user.name.clone(), user);
        Ok(())
    }

    /// Unregisters a user
    ///
    /// The administrative user cannot be removed.
    pub fn remove(&mut self, name: &str) -> FsResult<User> {
        if !self.users.contains_key(name) {
            return Err(FsError::UserNotFound(name.to_string()));
        }
        if name == self.admin {
            return Err(FsError::PermissionDenied(format!(
                "the {} user cannot be removed",
                self.admin
            )));
        }
        self.users
            .remove(name)
            .ok_or_else(|| FsError::UserNotFound(name.to_string()))
    }

    /// Iterates over users in name order
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Number of registered users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Always false: the administrative user is never removed
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new(ROOT_USER, AccessMode::all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_registry_has_root() {
        let registry = UserRegistry::default();
        assert_eq!(registry.len(), 1);
        let root = registry.get(ROOT_USER).unwrap();
        assert_eq!(root.access, AccessMode::all());
        assert_eq!(root.home, "/");
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = UserRegistry::default();
        registry
            .insert(User::parse("alice", "rw-", "/home/alice").unwrap())
            .unwrap();
        assert!(registry.contains("alice"));
        assert_eq!(registry.get("alice").unwrap().access, AccessMode::read_write());
    }

    #[test]
    fn test_insert_duplicate() {
        let mut registry = UserRegistry::default();
        let alice = User::new("alice", AccessMode::all(), "/home/alice");
        registry.insert(alice.clone()).unwrap();
        let err = registry.insert(alice).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UserAlreadyExists);
    }

    #[test]
    fn test_remove() {
        let mut registry = UserRegistry::default();
        registry
            .insert(User::new("alice", AccessMode::all(), "/home/alice"))
            .unwrap();
        let removed = registry.remove("alice").unwrap();
        assert_eq!(removed.name, "alice");
        assert!(!registry.contains("alice"));
    }

    #[test]
    fn test_remove_unknown() {
        let mut registry = UserRegistry::default();
        assert_eq!(
            registry.remove("ghost").unwrap_err().kind(),
            ErrorKind::UserNotFound
        );
    }

    #[test]
    fn test_remove_root() {
        let mut registry = UserRegistry::default();
        assert_eq!(
            registry.remove(ROOT_USER).unwrap_err().kind(),
            ErrorKind::PermissionDenied
        );
        assert!(registry.contains(ROOT_USER));
    }

    #[test]
    fn test_parse_rejects_bad_access() {
        assert!(User::parse("bob", "rwxrwx", "/home/bob").is_err());
    }

    #[test]
    fn test_user_display() {
        let user = User::new("bob", AccessMode::read_only(), "/home/bob");
        assert_eq!(user.to_string(), "bob r-- /home/bob");
    }
}
