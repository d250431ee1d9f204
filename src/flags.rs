//! Inode attribute flags (`chattr`/`lsattr`) through `FS_IOC_GETFLAGS`
//!
//! The flag word is passed through untouched; its bits (immutable,
//! append-only, no-dump, ...) are defined by the kernel and left to the caller.
//!
//! When the target's headers do not define the request codes, or the
//! `no-file-flags` feature is on, [`get_flags`] and [`set_flags`] return
//! [`Error::NotSupported`](crate::Error::NotSupported) for every descriptor
//! without issuing any call.

use crate::error::Result;
use std::os::fd::{AsFd, AsRawFd};
use tracing::trace;

/// Whether [`get_flags`] and [`set_flags`] reach the kernel on this build
pub const SUPPORTS_FILE_FLAGS: bool =
    cfg!(all(fs_ioc_flags_available, not(feature = "no-file-flags")));

/// Read the attribute flags of the file `fd` is open on
///
/// # Errors
///
/// Returns [`Error::NotSupported`](crate::Error::NotSupported) if the build has
/// no `FS_IOC_GETFLAGS`, or
/// [`Error::SystemCallFailed`](crate::Error::SystemCallFailed) with the
/// kernel's errno (`ENOTTY` on filesystems without flag support, `EBADF`, ...).
pub fn get_flags<Fd: AsFd>(fd: Fd) -> Result<u32> {
    let fd = fd.as_fd();
    trace!(fd = fd.as_raw_fd(), "FS_IOC_GETFLAGS");
    imp::get_flags(fd.as_raw_fd())
}

/// Replace the attribute flags of the file `fd` is open on
///
/// # Errors
///
/// Returns [`Error::NotSupported`](crate::Error::NotSupported) if the build has
/// no `FS_IOC_SETFLAGS`, or
/// [`Error::SystemCallFailed`](crate::Error::SystemCallFailed) with the
/// kernel's errno (`EPERM` for immutable/append-only without
/// `CAP_LINUX_IMMUTABLE`, `EOPNOTSUPP`, ...).
pub fn set_flags<Fd: AsFd>(fd: Fd, flags: u32) -> Result<()> {
    let fd = fd.as_fd();
    trace!(fd = fd.as_raw_fd(), flags, "FS_IOC_SETFLAGS");
    imp::set_flags(fd.as_raw_fd(), flags)
}

#[cfg(all(fs_ioc_flags_available, not(feature = "no-file-flags")))]
mod imp {
    use crate::error::Result;
    use std::os::fd::RawFd;

    // /usr/include/linux/fs.h: #define FS_IOC_GETFLAGS _IOR('f', 1, long)
    // The size says long but the kernel reads and writes an int.
    nix::ioctl_read_bad!(
        fs_ioc_getflags,
        nix::request_code_read!(b'f', 1, std::mem::size_of::<libc::c_long>()),
        libc::c_int
    );

    // /usr/include/linux/fs.h: #define FS_IOC_SETFLAGS _IOW('f', 2, long)
    nix::ioctl_write_ptr_bad!(
        fs_ioc_setflags,
        nix::request_code_write!(b'f', 2, std::mem::size_of::<libc::c_long>()),
        libc::c_int
    );

    pub(super) fn get_flags(fd: RawFd) -> Result<u32> {
        let mut flags: libc::c_int = 0;
        // SAFETY: `flags` is a valid, writable int for the duration of the call.
        unsafe { fs_ioc_getflags(fd, &mut flags) }?;
        Ok(flags as u32)
    }

    pub(super) fn set_flags(fd: RawFd, flags: u32) -> Result<()> {
        let flags = flags as libc::c_int;
        // SAFETY: `flags` is a valid int for the duration of the call.
        unsafe { fs_ioc_setflags(fd, &flags) }?;
        Ok(())
    }
}

#[cfg(not(all(fs_ioc_flags_available, not(feature = "no-file-flags"))))]
mod imp {
    use crate::error::{Error, Result};
    use std::os::fd::RawFd;

    pub(super) fn get_flags(_fd: RawFd) -> Result<u32> {
        Err(Error::NotSupported("FS_IOC_GETFLAGS"))
    }

    pub(super) fn set_flags(_fd: RawFd, _flags: u32) -> Result<()> {
        Err(Error::NotSupported("FS_IOC_SETFLAGS"))
    }
}
