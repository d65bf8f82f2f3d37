//! # Access Modes & Per-Node Permissions
//!
//! A simplified three-capability model: read, write and execute.
//!
//! ## Design Principles
//!
//! 1. **No POSIX permission bits**: A mode is three independent flags, not a numeric mode
//! 2. **Explicit ownership**: Every node records the user that created it
//! 3. **Overrides win**: A per-user override replaces the owner default for that user
//! 4. **Deny by default**: Anyone who is neither overridden nor the owner gets nothing

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single requested capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Access {
    /// Read file content or list a directory
    Read,
    /// Modify content, create children, remove, rename, change permissions
    Write,
    /// Execute (recorded, never required by the operation layer)
    Execute,
}

impl Access {
    /// Symbol used in capability strings
    pub fn symbol(self) -> char {
        match self {
            Access::Read => 'r',
            Access::Write => 'w',
            Access::Execute => 'x',
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => write!(f, "read"),
            Access::Write => write!(f, "write"),
            Access::Execute => write!(f, "execute"),
        }
    }
}

/// Errors produced while parsing a capability string
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapabilityParseError {
    /// Capability strings are exactly three characters long
    #[error("Capability string must have 3 characters, got {0:?}")]
    WrongLength(String),

    /// Only `r`, `w`, `x` and the `-` placeholder are allowed
    #[error("Unrecognized capability symbol {symbol:?} in {input:?}")]
    UnknownSymbol { symbol: char, input: String },
}

/// Read/write/execute flags for a node
///
/// Rendered positionally: `rwx`, `r-x`, `---`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessMode {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl AccessMode {
    /// No capabilities
    pub fn none() -> Self {
        Self::default()
    }

    /// Read-only
    pub fn read_only() -> Self {
        Self {
            read: true,
            write: false,
            execute: false,
        }
    }

    /// Read and write
    pub fn read_write() -> Self {
        Self {
            read: true,
            write: true,
            execute: false,
        }
    }

    /// Read, write and execute
    pub fn all() -> Self {
        Self {
            read: true,
            write: true,
            execute: true,
        }
    }

    /// Parses a capability string
    ///
    /// A flag is granted when its symbol appears anywhere in the string, so
    /// `wr-` grants the same as `rw-`.
    ///
    /// ```
    /// use fs_tree::AccessMode;
    ///
    /// let mode = AccessMode::parse("r-x").unwrap();
    /// assert!(mode.read && !mode.write && mode.execute);
    /// assert!(AccessMode::parse("rw").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, CapabilityParseError> {
        if input.chars().count() != 3 {
            return Err(CapabilityParseError::WrongLength(input.to_string()));
        }

        let mut mode = Self::none();
        for symbol in input.chars() {
            match symbol {
                'r' => mode.read = true,
                'w' => mode.write = true,
                'x' => mode.execute = true,
                '-' => {}
                other => {
                    return Err(CapabilityParseError::UnknownSymbol {
                        symbol: other,
                        input: input.to_string(),
                    })
                }
            }
        }
        Ok(mode)
    }

    /// Checks whether the requested flag is set
    pub fn allows(&self, access: Access) -> bool {
        match access {
            Access::Read => self.read,
            Access::Write => self.write,
            Access::Execute => self.execute,
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, access: Access| if set { access.symbol() } else { '-' };
        write!(
            f,
            "{}{}{}",
            flag(self.read, Access::Read),
            flag(self.write, Access::Write),
            flag(self.execute, Access::Execute)
        )
    }
}

impl FromStr for AccessMode {
    type Err = CapabilityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccessMode {
    type Error = CapabilityParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccessMode> for String {
    fn from(mode: AccessMode) -> Self {
        mode.to_string()
    }
}

/// Ownership and access rules attached to a single node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePermissions {
    /// User that created the node
    pub owner: String,
    /// Mode applied to the owner
    pub default: AccessMode,
    /// Per-user overrides (username -> mode)
    overrides: BTreeMap<String, AccessMode>,
}

impl NodePermissions {
    /// Creates permissions with no overrides
    pub fn new(owner: impl Into<String>, default: AccessMode) -> Self {
        Self {
            owner: owner.into(),
            default,
            overrides: BTreeMap::new(),
        }
    }

    /// Checks whether `username` may perform `access`
    ///
    /// An override for the user is consulted first, then the owner default.
    /// Everyone else is denied.
    pub fn allows(&self, username: &str, access: Access) -> bool {
        if let Some(mode) = self.overrides.get(username) {
            return mode.allows(access);
        }
        if username == self.owner {
            return self.default.allows(access);
        }
        false
    }

    /// Replaces the override for `username`
    pub fn set_override(&mut self, username: impl Into<String>, mode: AccessMode) {
        self.overrides.insert(username.into(), mode);
    }

    /// Returns the override recorded for `username`
    pub fn override_for(&self, username: &str) -> Option<AccessMode> {
        self.overrides.get(username).copied()
    }

    /// Iterates over all overrides in username order
    pub fn overrides(&self) -> impl Iterator<Item = (&str, AccessMode)> {
        self.overrides.iter().map(|(name, mode)| (name.as_str(), *mode))
    }

    /// Copies owner and default mode, dropping overrides
    pub fn without_overrides(&self) -> Self {
        Self::new(self.owner.clone(), self.default)
    }
}
