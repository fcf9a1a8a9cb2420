use std::fmt;
use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use crate::error::OperationStoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Many readers at once, excludes writers.
    Shared,
    /// One writer, excludes everyone.
    Exclusive,
}

impl LockMode {
    fn operation(self) -> libc::c_int {
        match self {
            Self::Shared => libc::LOCK_SH,
            Self::Exclusive => libc::LOCK_EX,
        }
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => f.write_str("shared"),
            Self::Exclusive => f.write_str("exclusive"),
        }
    }
}

/// Advisory `flock` held for the guard's lifetime.
///
/// Locks belong to the open file description, so two `File`s opened on the
/// same path contend even inside one process.
pub(crate) struct FileLock<'a> {
    file: &'a File,
}

impl<'a> FileLock<'a> {
    /// Blocks until the lock is granted.
    pub(crate) fn acquire(
        file: &'a File,
        mode: LockMode,
        path: &Path,
    ) -> Result<Self, OperationStoreError> {
        let fd = file.as_raw_fd();
        loop {
            // SAFETY: `fd` belongs to `file`, which outlives the guard.
            let result = unsafe { libc::flock(fd, mode.operation()) };
            if result == 0 {
                break;
            }
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(OperationStoreError::lock(mode, path, err));
        }

        tracing::trace!(path = %path.display(), %mode, "registry lock acquired");
        Ok(Self { file })
    }
}

impl Drop for FileLock<'_> {
    fn drop(&mut self) {
        let fd = self.file.as_raw_fd();
        // SAFETY: `fd` belongs to `file`, still alive here; unlocking is idempotent.
        let _ = unsafe { libc::flock(fd, libc::LOCK_UN) };
    }
}
