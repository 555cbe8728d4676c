use std::io::{Error, ErrorKind};
use std::path::Path;
use std::time::SystemTime;

/// Stamp access and modification times on `path` without opening it.
///
/// Only write access (or ownership) is needed, so a write-only file can be touched.
#[cfg(unix)]
pub(crate) fn set_path_times(
    path: &Path,
    accessed: SystemTime,
    modified: SystemTime,
) -> std::io::Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| Error::new(ErrorKind::InvalidInput, "path contains a NUL byte"))?;
    let times = [to_timespec(accessed)?, to_timespec(modified)?];
    // SAFETY: `c_path` is NUL-terminated and `times` holds exactly the two entries `utimensat`
    // reads; both outlive the call and neither pointer is retained.
    let rc = unsafe { libc::utimensat(libc::AT_FDCWD, c_path.as_ptr(), times.as_ptr(), 0) };
    if rc == 0 {
        return Ok(());
    }
    Err(Error::last_os_error())
}

#[cfg(unix)]
fn to_timespec(time: SystemTime) -> std::io::Result<libc::timespec> {
    let out_of_range = || Error::new(ErrorKind::InvalidInput, "timestamp out of range");
    let since_epoch = time
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|_| out_of_range())?;
    // SAFETY: `timespec` is plain integer fields (plus padding on some targets), so all-zero
    // bytes are a valid value.
    let mut spec: libc::timespec = unsafe { std::mem::zeroed() };
    spec.tv_sec = libc::time_t::try_from(since_epoch.as_secs()).map_err(|_| out_of_range())?;
    spec.tv_nsec = since_epoch.subsec_nanos().try_into().map_err(|_| out_of_range())?;
    Ok(spec)
}

#[cfg(not(unix))]
pub(crate) fn set_path_times(
    path: &Path,
    accessed: SystemTime,
    modified: SystemTime,
) -> std::io::Result<()> {
    let file = std::fs::OpenOptions::new().write(true).open(path)?;
    let times = std::fs::FileTimes::new()
        .set_accessed(accessed)
        .set_modified(modified);
    file.set_times(times)
}
