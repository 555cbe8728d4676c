use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write,
    Execute,
}

/// Whether the calling process may access `path` in the given way.
///
/// Follows symlinks. Any failure to probe (missing path, interior NUL) reads as "no access".
#[cfg(unix)]
pub(crate) fn has_access(path: &Path, access: Access) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    let mode = match access {
        Access::Read => libc::R_OK,
        Access::Write => libc::W_OK,
        Access::Execute => libc::X_OK,
    };
    // SAFETY: `c_path` is a NUL-terminated C string that outlives this synchronous call, and
    // `access` does not retain the pointer.
    unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
}

#[cfg(not(unix))]
pub(crate) fn has_access(path: &Path, access: Access) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    match access {
        Access::Read => true,
        Access::Write => !meta.permissions().readonly(),
        Access::Execute => meta.is_dir(),
    }
}
