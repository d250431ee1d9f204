//! Extended-stat accessors
//!
//! Two implementations of [`ExtendedStatAccessor`] exist:
//!
//! - [`StatxAccessor`]: one `statx(2)` call asking for the basic stats plus the
//!   birth time. Only compiled when the target exposes `statx`.
//! - [`LegacyStatAccessor`]: `fstat(2)` / `lstat(2)`, translated into the same
//!   record with the creation time set to [`Timestamp::OMIT`](crate::Timestamp::OMIT).
//!
//! [`DefaultAccessor`] is fixed when the crate is built and [`stat_fd`] /
//! [`stat_path`] always go through it. A `statx` failure at run time (for
//! example `ENOSYS` from a kernel older than the build target) is returned as is;
//! nothing falls back to the legacy calls per call.
//!
//! # Usage
//!
//! ```rust,no_run
//! use statx_compat::{stat_fd, stat_path};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let file = std::fs::File::open("file.txt")?;
//! let by_fd = stat_fd(&file)?;
//! let by_path = stat_path("file.txt")?;
//! assert_eq!(by_fd.size_bytes, by_path.size_bytes);
//!
//! match by_path.creation_time() {
//!     Some(born) => println!("created at {born}"),
//!     None => println!("creation time unknown"),
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::status::ExtendedStatus;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd};
use std::path::Path;
use tracing::trace;

#[cfg(statx_available)]
use crate::status::{RawStatx, STATX_BASIC_STATS, STATX_BTIME};
#[cfg(statx_available)]
use nix::errno::Errno;
#[cfg(statx_available)]
use nix::NixPath;
#[cfg(statx_available)]
use std::ffi::CStr;

/// Whether [`DefaultAccessor`] can report creation times
pub const SUPPORTS_BIRTHTIME: bool = cfg!(all(statx_available, not(feature = "legacy-stat")));

/// A way of fetching [`ExtendedStatus`] for a descriptor or a path
pub trait ExtendedStatAccessor {
    /// Name of the underlying system call family, for diagnostics
    const NAME: &'static str;

    /// Status of the file `fd` is open on
    ///
    /// # Errors
    ///
    /// Returns [`Error::SystemCallFailed`](crate::Error::SystemCallFailed) with
    /// the kernel's errno if the call fails.
    fn stat_fd(fd: BorrowedFd<'_>) -> Result<ExtendedStatus>;

    /// Status of `path` itself; a trailing symlink is not followed
    ///
    /// # Errors
    ///
    /// Returns [`Error::SystemCallFailed`](crate::Error::SystemCallFailed) with
    /// the kernel's errno if the call fails, or `EINVAL` if `path` contains a
    /// NUL byte.
    fn stat_path(path: &Path) -> Result<ExtendedStatus>;
}

/// `statx(2)` with `STATX_BASIC_STATS | STATX_BTIME`
#[cfg(statx_available)]
#[derive(Debug, Clone, Copy, Default)]
pub struct StatxAccessor;

/// `AT_STATX_SYNC_AS_STAT`: do whatever `stat(2)` would do
#[cfg(statx_available)]
const AT_STATX_SYNC_AS_STAT: libc::c_int = 0x0000;

#[cfg(statx_available)]
impl StatxAccessor {
    fn statx(dirfd: libc::c_int, path: &CStr, flags: libc::c_int) -> Result<ExtendedStatus> {
        let mut buf = RawStatx::default();
        // SAFETY: `path` is NUL-terminated and `buf` is a writable `struct statx`
        // that outlives the call.
        let res = unsafe {
            libc::syscall(
                libc::SYS_statx,
                dirfd,
                path.as_ptr(),
                flags,
                STATX_BASIC_STATS | STATX_BTIME,
                &mut buf as *mut RawStatx,
            )
        };
        Errno::result(res)?;
        Ok(ExtendedStatus::from_raw_statx(&buf))
    }
}

#[cfg(statx_available)]
impl ExtendedStatAccessor for StatxAccessor {
    const NAME: &'static str = "statx";

    fn stat_fd(fd: BorrowedFd<'_>) -> Result<ExtendedStatus> {
        trace!(fd = fd.as_raw_fd(), "statx(AT_EMPTY_PATH)");
        Self::statx(
            fd.as_raw_fd(),
            c"",
            libc::AT_EMPTY_PATH | AT_STATX_SYNC_AS_STAT,
        )
    }

    fn stat_path(path: &Path) -> Result<ExtendedStatus> {
        trace!(path = %path.display(), "statx(AT_SYMLINK_NOFOLLOW)");
        path.with_nix_path(|cstr| {
            Self::statx(libc::AT_FDCWD, cstr, libc::AT_SYMLINK_NOFOLLOW)
        })?
    }
}

/// `fstat(2)` / `lstat(2)`; the creation time is always the omit sentinel
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyStatAccessor;

impl ExtendedStatAccessor for LegacyStatAccessor {
    const NAME: &'static str = "stat";

    fn stat_fd(fd: BorrowedFd<'_>) -> Result<ExtendedStatus> {
        trace!(fd = fd.as_raw_fd(), "fstat");
        let raw = nix::sys::stat::fstat(fd.as_raw_fd())?;
        Ok(ExtendedStatus::from_legacy_stat(&raw))
    }

    fn stat_path(path: &Path) -> Result<ExtendedStatus> {
        trace!(path = %path.display(), "lstat");
        let raw = nix::sys::stat::lstat(path)?;
        Ok(ExtendedStatus::from_legacy_stat(&raw))
    }
}

/// The accessor selected for this build
#[cfg(all(statx_available, not(feature = "legacy-stat")))]
pub type DefaultAccessor = StatxAccessor;

/// The accessor selected for this build
#[cfg(not(all(statx_available, not(feature = "legacy-stat"))))]
pub type DefaultAccessor = LegacyStatAccessor;

/// Extended status of the file an open descriptor refers to
///
/// The descriptor is only borrowed for the duration of the call.
///
/// # Errors
///
/// Returns [`Error::SystemCallFailed`](crate::Error::SystemCallFailed) with the
/// kernel's errno (`EBADF`, `EACCES`, `ENOSYS`, ...) if the call fails.
pub fn stat_fd<Fd: AsFd>(fd: Fd) -> Result<ExtendedStatus> {
    DefaultAccessor::stat_fd(fd.as_fd())
}

/// Extended status of a path, without following a trailing symbolic link
///
/// # Errors
///
/// Returns [`Error::SystemCallFailed`](crate::Error::SystemCallFailed) with the
/// kernel's errno (`ENOENT`, `EACCES`, `ENOTDIR`, ...) if the call fails, or
/// `EINVAL` if the path contains a NUL byte.
pub fn stat_path<P: AsRef<Path>>(path: P) -> Result<ExtendedStatus> {
    DefaultAccessor::stat_path(path.as_ref())
}
