use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Expand a leading `~/` to `home`.
///
/// Only the first two characters are inspected: `~user/...`, `a/~/b` and a bare `~` are returned
/// unchanged. When `home` is `None` the path is kept verbatim.
pub(crate) fn expand_home_with(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    if !path.as_os_str().as_encoded_bytes().starts_with(b"~/") {
        return path.to_path_buf();
    }
    match path.strip_prefix("~") {
        Ok(rest) if rest.as_os_str().is_empty() => home.to_path_buf(),
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

pub(crate) fn expand_home(path: &Path) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    expand_home_with(path, home.as_deref())
}

/// `dirname`-style parent lookup.
///
/// A bare relative name has `.` as its parent. Returns `None` once the parent would be the path
/// itself (`/`, `.`, or an empty path).
pub(crate) fn parent_path(path: &Path) -> Option<PathBuf> {
    let parent = match path.parent() {
        None => return None,
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
    };
    if parent == path {
        return None;
    }
    Some(parent.to_path_buf())
}

pub(crate) fn basename(path: &Path) -> &OsStr {
    path.file_name().unwrap_or_else(|| path.as_os_str())
}

/// Text after the last `.` of the basename.
///
/// Unlike [`Path::extension`], a leading dot counts: `.bashrc` has the extension `bashrc`.
pub(crate) fn extension(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext.to_string())
}
