use std::fs;
use std::path::Path;

#[cfg(unix)]
fn sync_parent_directory(path: &Path) -> std::io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    // Write-only parents cannot be opened for syncing; the rename itself already succeeded.
    let parent_dir = match fs::File::open(parent) {
        Ok(dir) => dir,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => return Ok(()),
        Err(err) => return Err(err),
    };
    parent_dir.sync_all()
}

#[cfg(unix)]
fn sync_rename_parents(src_path: &Path, dest_path: &Path) -> std::io::Result<()> {
    sync_parent_directory(dest_path)?;
    if src_path.parent() != dest_path.parent() {
        sync_parent_directory(src_path)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn sync_rename_parents(_src_path: &Path, _dest_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Rename `src_path` to `dest_path`, then flush both parent directories.
///
/// Replacement follows the OS `rename` rules: an existing file or empty directory at the
/// destination is replaced, a non-empty directory is not.
pub(crate) fn rename_node(src_path: &Path, dest_path: &Path) -> std::io::Result<()> {
    fs::rename(src_path, dest_path)?;
    sync_rename_parents(src_path, dest_path).map_err(|err| {
        std::io::Error::new(
            err.kind(),
            format!("rename already applied, but failed to sync parent directories: {err}"),
        )
    })
}
