#![allow(dead_code)]

use std::path::{Path, PathBuf};

use fs_nodes::{Directory, File};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[cfg(unix)]
pub fn is_running_as_root() -> bool {
    // SAFETY: `geteuid` has no preconditions and does not dereference pointers.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(unix)]
pub fn skip_when_root(test_name: &str) -> bool {
    if is_running_as_root() {
        eprintln!("{test_name} skipped: requires non-root to validate permission-denied behavior");
        return true;
    }
    false
}

/// Restores the previous permission bits of a path when dropped.
#[cfg(unix)]
pub struct PermissionRestoreGuard {
    path: PathBuf,
    mode: u32,
}

#[cfg(unix)]
impl PermissionRestoreGuard {
    pub fn set(path: &Path, mode: u32) -> Self {
        let prev = std::fs::symlink_metadata(path)
            .expect("stat before chmod")
            .permissions()
            .mode()
            & 0o777;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).expect("chmod");
        Self {
            path: path.to_path_buf(),
            mode: prev,
        }
    }
}

#[cfg(unix)]
impl Drop for PermissionRestoreGuard {
    fn drop(&mut self) {
        if let Err(err) =
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(self.mode))
        {
            eprintln!(
                "failed to restore permissions for {}: {err}",
                self.path.display()
            );
        }
    }
}

/// Write `files` (relative path, content) under `root`, creating parents as needed.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("mkdir parents");
        }
        std::fs::write(&path, content).expect("write");
    }
}

pub fn dir_node(root: &Path, rel: &str) -> Directory {
    Directory::new(root.join(rel))
}

pub fn file_node(root: &Path, rel: &str) -> File {
    File::new(root.join(rel))
}

/// Basenames of `nodes`, in the order given.
pub fn basenames<N: fs_nodes::FsNode>(nodes: &[N]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| node.basename().to_string_lossy().into_owned())
        .collect()
}
