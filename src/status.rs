//! The normalized extended-status record and its two sources
//!
//! [`ExtendedStatus`] is the only shape callers see. It is filled either from
//! the kernel's `struct statx` ([`RawStatx`]) or from a legacy `struct stat`;
//! both translations are pure functions so they can be checked without a
//! filesystem.

use crate::timestamp::Timestamp;

/// `STATX_TYPE | STATX_MODE | ... | STATX_BLOCKS`
pub const STATX_BASIC_STATS: u32 = 0x0000_07ff;
/// Request the birth time
pub const STATX_BTIME: u32 = 0x0000_0800;

/// One timestamp inside [`RawStatx`] (`struct statx_timestamp`)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawStatxTimestamp {
    pub tv_sec: i64,
    pub tv_nsec: u32,
    pub __reserved: i32,
}

/// Kernel ABI mirror of `struct statx` from `<linux/stat.h>`
///
/// Defined here rather than taken from `libc` because not every libc target
/// ships it, and the layout is fixed by the kernel regardless of the C library.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RawStatx {
    pub stx_mask: u32,
    pub stx_blksize: u32,
    pub stx_attributes: u64,
    pub stx_nlink: u32,
    pub stx_uid: u32,
    pub stx_gid: u32,
    pub stx_mode: u16,
    pub __spare0: [u16; 1],
    pub stx_ino: u64,
    pub stx_size: u64,
    pub stx_blocks: u64,
    pub stx_attributes_mask: u64,
    pub stx_atime: RawStatxTimestamp,
    pub stx_btime: RawStatxTimestamp,
    pub stx_ctime: RawStatxTimestamp,
    pub stx_mtime: RawStatxTimestamp,
    pub stx_rdev_major: u32,
    pub stx_rdev_minor: u32,
    pub stx_dev_major: u32,
    pub stx_dev_minor: u32,
    pub stx_mnt_id: u64,
    pub stx_dio_mem_align: u32,
    pub stx_dio_offset_align: u32,
    pub __spare3: [u64; 12],
}

const _: () = assert!(std::mem::size_of::<RawStatx>() == 256);

impl From<RawStatxTimestamp> for Timestamp {
    fn from(ts: RawStatxTimestamp) -> Self {
        Timestamp::new(ts.tv_sec, i64::from(ts.tv_nsec))
    }
}

/// Extended file status, identical in shape whichever system call produced it
///
/// `creation_time` is either what the kernel reported or [`Timestamp::OMIT`]
/// when the legacy `stat` family served the request. No other field is ever a
/// sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtendedStatus {
    /// Number of hard links
    pub link_count: u32,
    /// User ID of owner
    pub owner_user_id: u32,
    /// Group ID of owner
    pub owner_group_id: u32,
    /// File mode (type + permissions)
    pub mode: u16,
    /// File size in bytes
    pub size_bytes: u64,
    /// Last access time
    pub access_time: Timestamp,
    /// Last modification time
    pub modify_time: Timestamp,
    /// Last status change time
    pub change_time: Timestamp,
    /// Birth time, or [`Timestamp::OMIT`]
    pub creation_time: Timestamp,
}

impl ExtendedStatus {
    /// Translate a kernel `struct statx`
    ///
    /// The birth time is copied as reported; a filesystem that does not track
    /// it leaves whatever the kernel wrote there.
    #[must_use]
    pub fn from_raw_statx(raw: &RawStatx) -> Self {
        Self {
            link_count: raw.stx_nlink,
            owner_user_id: raw.stx_uid,
            owner_group_id: raw.stx_gid,
            mode: raw.stx_mode,
            size_bytes: raw.stx_size,
            access_time: raw.stx_atime.into(),
            modify_time: raw.stx_mtime.into(),
            change_time: raw.stx_ctime.into(),
            creation_time: raw.stx_btime.into(),
        }
    }

    /// Translate a legacy `struct stat`, marking the creation time unknown
    #[must_use]
    #[allow(clippy::unnecessary_cast)]
    pub fn from_legacy_stat(raw: &libc::stat) -> Self {
        Self {
            link_count: raw.st_nlink as u32,
            owner_user_id: raw.st_uid,
            owner_group_id: raw.st_gid,
            mode: raw.st_mode as u16,
            size_bytes: raw.st_size as u64,
            access_time: Timestamp::new(raw.st_atime as i64, raw.st_atime_nsec as i64),
            modify_time: Timestamp::new(raw.st_mtime as i64, raw.st_mtime_nsec as i64),
            change_time: Timestamp::new(raw.st_ctime as i64, raw.st_ctime_nsec as i64),
            creation_time: Timestamp::OMIT,
        }
    }

    /// Creation time, unless the sentinel marks it unavailable
    #[must_use]
    pub fn creation_time(&self) -> Option<Timestamp> {
        (!self.creation_time.is_omit()).then_some(self.creation_time)
    }

    /// The `S_IFMT` part of the mode
    #[must_use]
    pub fn file_type_bits(&self) -> u16 {
        self.mode & libc::S_IFMT as u16
    }

    /// Permission, setuid, setgid and sticky bits
    #[must_use]
    pub fn permission_bits(&self) -> u16 {
        self.mode & 0o7777
    }

    #[must_use]
    pub fn is_file(&self) -> bool {
        self.file_type_bits() == libc::S_IFREG as u16
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.file_type_bits() == libc::S_IFDIR as u16
    }

    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.file_type_bits() == libc::S_IFLNK as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(tv_sec: i64, tv_nsec: u32) -> RawStatxTimestamp {
        RawStatxTimestamp {
            tv_sec,
            tv_nsec,
            __reserved: 0,
        }
    }

    fn sample_statx() -> RawStatx {
        RawStatx {
            stx_mask: STATX_BASIC_STATS | STATX_BTIME,
            stx_nlink: 3,
            stx_uid: 1000,
            stx_gid: 100,
            stx_mode: (libc::S_IFREG as u16) | 0o640,
            stx_size: 4096,
            stx_atime: stamp(1_700_000_003, 30),
            stx_btime: stamp(1_700_000_000, 1),
            stx_ctime: stamp(1_700_000_002, 20),
            stx_mtime: stamp(1_700_000_001, 10),
            ..RawStatx::default()
        }
    }

    /// A zeroed `struct stat`; libc hides padding fields behind private names
    fn zeroed_stat() -> libc::stat {
        // SAFETY: `struct stat` is plain old data and all-zero is a valid value.
        unsafe { std::mem::zeroed() }
    }

    #[test]
    fn test_from_raw_statx_copies_every_field() {
        let status = ExtendedStatus::from_raw_statx(&sample_statx());

        assert_eq!(status.link_count, 3);
        assert_eq!(status.owner_user_id, 1000);
        assert_eq!(status.owner_group_id, 100);
        assert_eq!(status.mode, (libc::S_IFREG as u16) | 0o640);
        assert_eq!(status.size_bytes, 4096);
        assert_eq!(status.access_time, Timestamp::new(1_700_000_003, 30));
        assert_eq!(status.modify_time, Timestamp::new(1_700_000_001, 10));
        assert_eq!(status.change_time, Timestamp::new(1_700_000_002, 20));
        assert_eq!(status.creation_time, Timestamp::new(1_700_000_000, 1));
        assert_eq!(status.creation_time(), Some(Timestamp::new(1_700_000_000, 1)));
    }

    #[test]
    fn test_from_raw_statx_passes_unreported_btime_through() {
        let mut raw = sample_statx();
        raw.stx_mask = STATX_BASIC_STATS;
        raw.stx_btime = RawStatxTimestamp::default();

        let status = ExtendedStatus::from_raw_statx(&raw);
        assert_eq!(status.creation_time, Timestamp::new(0, 0));
        assert!(!status.creation_time.is_omit());
    }

    #[test]
    fn test_from_legacy_stat_is_exact() {
        let mut raw = zeroed_stat();
        raw.st_nlink = 2;
        raw.st_uid = 501;
        raw.st_gid = 20;
        raw.st_mode = libc::S_IFDIR | 0o755;
        raw.st_size = 123;
        raw.st_atime = 11;
        raw.st_atime_nsec = 12;
        raw.st_mtime = 21;
        raw.st_mtime_nsec = 22;
        raw.st_ctime = 31;
        raw.st_ctime_nsec = 32;

        let status = ExtendedStatus::from_legacy_stat(&raw);

        assert_eq!(status.link_count, 2);
        assert_eq!(status.owner_user_id, 501);
        assert_eq!(status.owner_group_id, 20);
        assert_eq!(status.mode, (libc::S_IFDIR | 0o755) as u16);
        assert_eq!(status.size_bytes, 123);
        assert_eq!(status.access_time, Timestamp::new(11, 12));
        assert_eq!(status.modify_time, Timestamp::new(21, 22));
        assert_eq!(status.change_time, Timestamp::new(31, 32));
        assert!(status.creation_time.is_omit());
        assert_eq!(status.creation_time(), None);
        assert!(status.is_dir());
    }

    #[test]
    fn test_legacy_and_statx_agree_on_shared_fields() {
        let raw = sample_statx();
        let mut legacy = zeroed_stat();
        legacy.st_nlink = raw.stx_nlink as _;
        legacy.st_uid = raw.stx_uid;
        legacy.st_gid = raw.stx_gid;
        legacy.st_mode = raw.stx_mode as _;
        legacy.st_size = raw.stx_size as libc::off_t;
        legacy.st_atime = raw.stx_atime.tv_sec as libc::time_t;
        legacy.st_atime_nsec = raw.stx_atime.tv_nsec as _;
        legacy.st_mtime = raw.stx_mtime.tv_sec as libc::time_t;
        legacy.st_mtime_nsec = raw.stx_mtime.tv_nsec as _;
        legacy.st_ctime = raw.stx_ctime.tv_sec as libc::time_t;
        legacy.st_ctime_nsec = raw.stx_ctime.tv_nsec as _;

        let from_statx = ExtendedStatus::from_raw_statx(&raw);
        let from_stat = ExtendedStatus::from_legacy_stat(&legacy);

        assert_eq!(
            ExtendedStatus {
                creation_time: Timestamp::OMIT,
                ..from_statx
            },
            from_stat
        );
    }

    #[test]
    fn test_mode_helpers() {
        let status = ExtendedStatus::from_raw_statx(&RawStatx {
            stx_mode: (libc::S_IFLNK as u16) | 0o777,
            ..RawStatx::default()
        });
        assert!(status.is_symlink());
        assert!(!status.is_file());
        assert_eq!(status.permission_bits(), 0o777);
        assert_eq!(status.file_type_bits(), libc::S_IFLNK as u16);
    }
}
