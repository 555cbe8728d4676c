use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Cannot {op} {}: {reason}.", .path.display())]
    NoSuchNode {
        op: &'static str,
        path: PathBuf,
        reason: &'static str,
    },

    #[error("Cannot {op} {}: {reason}.", .path.display())]
    PermissionDenied {
        op: &'static str,
        path: PathBuf,
        reason: &'static str,
    },

    #[error("Cannot {op} {}: {reason}.", .path.display())]
    InvalidTarget {
        op: &'static str,
        path: PathBuf,
        reason: &'static str,
    },

    #[error("Cannot {op} {}: {reason}.", .path.display())]
    NodeExists {
        op: &'static str,
        path: PathBuf,
        reason: &'static str,
    },

    #[error("Missing child node type for {}", .path.display())]
    MissingChildType { path: PathBuf },

    #[error("io error during {op} ({}): {source}", .path.display())]
    IoPath {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io_path(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::IoPath {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    // Precondition errors are only built right before an operation bails out, so they are
    // logged here rather than at every return site.
    pub(crate) fn no_such_node(op: &'static str, path: &Path, reason: &'static str) -> Self {
        Self::NoSuchNode {
            op,
            path: path.to_path_buf(),
            reason,
        }
        .rejected()
    }

    pub(crate) fn permission_denied(op: &'static str, path: &Path) -> Self {
        Self::PermissionDenied {
            op,
            path: path.to_path_buf(),
            reason: "Permission denied",
        }
        .rejected()
    }

    pub(crate) fn invalid_target(op: &'static str, path: &Path, reason: &'static str) -> Self {
        Self::InvalidTarget {
            op,
            path: path.to_path_buf(),
            reason,
        }
        .rejected()
    }

    pub(crate) fn node_exists(op: &'static str, path: &Path, reason: &'static str) -> Self {
        Self::NodeExists {
            op,
            path: path.to_path_buf(),
            reason,
        }
        .rejected()
    }

    pub(crate) fn missing_child_type(path: PathBuf) -> Self {
        Self::MissingChildType { path }.rejected()
    }

    fn rejected(self) -> Self {
        tracing::debug!(code = self.code(), path = %self.path().display(), "{self}");
        self
    }

    /// Stable machine-readable identifier for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoSuchNode { .. } => "no_such_node",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::InvalidTarget { .. } => "invalid_target",
            Self::NodeExists { .. } => "node_exists",
            Self::MissingChildType { .. } => "missing_child_type",
            Self::IoPath { .. } => "io",
        }
    }

    /// Numeric code compatible with the bit flags used by older consumers of this library.
    ///
    /// `MissingChildType` and `IoPath` never had a numeric code and report `0`.
    pub fn legacy_code(&self) -> u32 {
        match self {
            Self::PermissionDenied { .. } => 1,
            Self::NoSuchNode { .. } => 2,
            Self::InvalidTarget { .. } => 4,
            Self::NodeExists { .. } => 8,
            Self::MissingChildType { .. } | Self::IoPath { .. } => 0,
        }
    }

    /// The pathname the failing operation was acting on.
    pub fn path(&self) -> &Path {
        match self {
            Self::NoSuchNode { path, .. }
            | Self::PermissionDenied { path, .. }
            | Self::InvalidTarget { path, .. }
            | Self::NodeExists { path, .. }
            | Self::MissingChildType { path }
            | Self::IoPath { path, .. } => path,
        }
    }
}
