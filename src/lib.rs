//! # statx-compat
//!
//! Extended file status and inode attribute flags on Linux, with graceful
//! degradation when the target lacks the modern primitives:
//! - Extended status (link count, owner, mode, size, access/modify/change
//!   times and creation time) through `statx(2)`, or through `fstat(2)` /
//!   `lstat(2)` with the creation time marked unknown
//! - Attribute flags (immutable, append-only, ...) through
//!   `FS_IOC_GETFLAGS` / `FS_IOC_SETFLAGS`, or a deterministic
//!   "not supported" error
//!
//! Which primitive is used is decided once, when the crate is built, by probing
//! the target's headers (see `build.rs`). Every call is a single blocking system
//! call; nothing is cached, retried or logged on failure. Descriptors are only
//! borrowed.
//!
//! The whole crate is empty on targets other than Linux.
//!
//! ## Example
//!
//! ```rust,no_run
//! use statx_compat::{get_flags, stat_fd, stat_path};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let file = std::fs::File::open("data.bin")?;
//!
//! let status = stat_fd(&file)?;
//! println!("{} bytes, mode {:o}", status.size_bytes, status.mode);
//! if let Some(born) = status.creation_time() {
//!     println!("created {born}");
//! }
//!
//! let link = stat_path("data.link")?;
//! assert!(link.is_symlink());
//!
//! match get_flags(&file) {
//!     Ok(flags) => println!("flags: {flags:#x}"),
//!     Err(e) if e.is_not_supported() => println!("no file flags on this build"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(target_os = "linux")]
pub mod error;
#[cfg(target_os = "linux")]
pub mod flags;
#[cfg(target_os = "linux")]
pub mod stat;
#[cfg(target_os = "linux")]
pub mod status;
#[cfg(target_os = "linux")]
pub mod timestamp;

// Re-export main types
#[cfg(target_os = "linux")]
pub use error::{Error, Result};
#[cfg(target_os = "linux")]
pub use status::ExtendedStatus;
#[cfg(target_os = "linux")]
pub use timestamp::{Timestamp, TIMESTAMP_NOW, TIMESTAMP_OMIT};

// Re-export operations
#[cfg(target_os = "linux")]
pub use flags::{get_flags, set_flags, SUPPORTS_FILE_FLAGS};
#[cfg(target_os = "linux")]
pub use stat::{stat_fd, stat_path, ExtendedStatAccessor, SUPPORTS_BIRTHTIME};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Feature flags available
pub mod features {
    /// Serve extended status through `fstat`/`lstat` even when `statx` exists
    pub const LEGACY_STAT: &str = "legacy-stat";
    /// Report file flags as unsupported even when the ioctls exist
    pub const NO_FILE_FLAGS: &str = "no-file-flags";
}
