use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::NodeKind;

/// Point-in-time description of a node. The final symlink is never followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStat {
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Byte length for files; `0` for directories and links.
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessed_ms: Option<u64>,
    /// Permission bits (`0o7777` mask).
    pub mode: u32,
    pub readonly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_target: Option<PathBuf>,
}

/// Milliseconds since the epoch, `None` for pre-epoch times or platforms without the timestamp.
fn epoch_millis(
    path: &Path,
    op: &'static str,
    time: std::io::Result<SystemTime>,
) -> Result<Option<u64>> {
    let time = match time {
        Err(err) if err.kind() == ErrorKind::Unsupported => return Ok(None),
        other => other.map_err(|err| Error::io_path(op, path, err))?,
    };
    Ok(time
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|since| since.as_millis().try_into().ok()))
}

#[cfg(unix)]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    if meta.permissions().readonly() { 0o444 } else { 0o666 }
}

pub(crate) fn stat_path(path: &Path) -> Result<NodeStat> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(Error::no_such_node("stat", path, "No such file or directory"));
        }
        Err(err) => return Err(Error::io_path("symlink_metadata", path, err)),
    };

    let kind = NodeKind::from_file_type(meta.file_type());
    let size_bytes = if kind == NodeKind::File { meta.len() } else { 0 };
    let link_target = match kind {
        NodeKind::Link => Some(
            fs::read_link(path).map_err(|err| Error::io_path("read_link", path, err))?,
        ),
        NodeKind::Directory | NodeKind::File => None,
    };

    Ok(NodeStat {
        path: path.to_path_buf(),
        kind,
        size_bytes,
        modified_ms: epoch_millis(path, "modified", meta.modified())?,
        accessed_ms: epoch_millis(path, "accessed", meta.accessed())?,
        mode: permission_bits(&meta),
        readonly: meta.permissions().readonly(),
        link_target,
    })
}
