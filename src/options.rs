use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

fn default_dir_mode() -> u32 {
    0o777
}

/// Options for [`Directory::create`](crate::Directory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryOptions {
    /// `mkdir -p`: create missing parents and accept an existing directory.
    #[serde(default)]
    pub recursive: bool,
    /// Permission bits for every directory created (subject to the process umask).
    #[serde(default = "default_dir_mode")]
    pub mode: u32,
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            mode: default_dir_mode(),
        }
    }
}

impl DirectoryOptions {
    pub fn recursive() -> Self {
        Self {
            recursive: true,
            ..Self::default()
        }
    }
}

/// Options for [`File::create`](crate::File).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileOptions {
    /// Create the parent directory chain when it is missing.
    #[serde(default)]
    pub recursive: bool,
    /// Modification time to stamp; the current time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<SystemTime>,
    /// Access time to stamp; the modification time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessed: Option<SystemTime>,
}

impl FileOptions {
    pub fn recursive() -> Self {
        Self {
            recursive: true,
            ..Self::default()
        }
    }
}

/// Options for [`Link::create`](crate::Link).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkOptions {
    /// Stored verbatim as the link's content; it does not need to exist.
    pub target: PathBuf,
}

impl LinkOptions {
    pub fn to(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadOptions {
    #[serde(default)]
    pub offset: u64,
    /// Upper bound on returned bytes; read to end of file when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WriteOptions {
    /// Append instead of truncating existing content.
    #[serde(default)]
    pub append: bool,
    /// Hold an exclusive advisory lock while writing.
    #[serde(default)]
    pub lock: bool,
}
