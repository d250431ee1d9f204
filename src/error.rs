//! Error types for statx-compat operations

use nix::errno::Errno;
use thiserror::Error;

/// Result type for statx-compat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a flag or extended-stat accessor
///
/// The crate never retries or reclassifies a failure: whatever the kernel
/// reported ends up in [`Error::SystemCallFailed`] unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The facility does not exist on this build
    #[error("operation not supported: {0}")]
    NotSupported(&'static str),

    /// The underlying system call returned a failure code
    #[error("system call failed: {0}")]
    SystemCallFailed(#[from] Errno),
}

impl Error {
    /// Check if error is due to operation not being supported
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Error::NotSupported(_))
    }

    /// Check if error is due to system call failure
    pub fn is_system_call_error(&self) -> bool {
        matches!(self, Error::SystemCallFailed(_))
    }

    /// The kernel's error code, if a system call was issued
    pub fn errno(&self) -> Option<Errno> {
        match self {
            Error::SystemCallFailed(errno) => Some(*errno),
            Error::NotSupported(_) => None,
        }
    }
}

impl From<Error> for std::io::Error {
    /// `NotSupported` becomes `ENOSYS`, the code a missing facility reports
    /// through errno.
    fn from(err: Error) -> Self {
        match err {
            Error::SystemCallFailed(errno) => std::io::Error::from_raw_os_error(errno as i32),
            Error::NotSupported(_) => std::io::Error::from_raw_os_error(Errno::ENOSYS as i32),
        }
    }
}
