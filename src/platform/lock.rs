use std::fs;

/// Take an exclusive advisory lock on `file`, held until the handle is closed.
#[cfg(unix)]
pub(crate) fn lock_exclusive(file: &fs::File) -> std::io::Result<()> {
    use std::os::fd::AsRawFd;

    // SAFETY: the descriptor is owned by `file`, which is borrowed for the whole call.
    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
    if rc == 0 {
        return Ok(());
    }
    Err(std::io::Error::last_os_error())
}

#[cfg(not(unix))]
pub(crate) fn lock_exclusive(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}
