//! Service configuration
//!
//! All fields have defaults, so an empty JSON object is a valid config.

use fs_tree::{AccessMode, DEFAULT_BLOCK_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FsError, FsResult};
use crate::users::ROOT_USER;

/// Startup configuration for [`crate::FileSystemService`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSystemConfig {
    /// Name of the administrative user that owns "/". Must be `root`.
    pub root_user: String,
    /// Mode of the administrative user and of "/". Must be `rwx`.
    pub root_access: AccessMode,
    /// Capacity of each file block in bytes
    ///
    /// Anything other than 4096 exists for tests that want to exercise
    /// block boundaries with small payloads.
    pub block_size: usize,
}

impl Default for FileSystemConfig {
    fn default() -> Self {
        Self {
            root_user: ROOT_USER.to_string(),
            root_access: AccessMode::all(),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl FileSystemConfig {
    /// Parses a JSON config
    pub fn from_json(json: &str) -> FsResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| FsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file
    pub fn load(path: impl AsRef<Path>) -> FsResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| FsError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Checks the config for values the service cannot run with
    pub fn validate(&self) -> FsResult<()> {
        if self.root_user != ROOT_USER {
            return Err(FsError::Config(format!(
                "root user must be named {:?}, got {:?}",
                ROOT_USER, self.root_user
            )));
        }
        if self.root_access != AccessMode::all() {
            return Err(FsError::Config(format!(
                "root user must have rwx access, got {}",
                self.root_access
            )));
        }
        if self.block_size == 0 {
            return Err(FsError::Config("block_size must be positive".to_string()));
        }
        Ok(())
    }
}
