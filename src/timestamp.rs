//! Second/nanosecond timestamps and the `utimensat` sentinels
//!
//! Every time field of [`ExtendedStatus`](crate::ExtendedStatus) is a
//! [`Timestamp`]. A timestamp is a plain `(seconds, nanoseconds)` pair relative
//! to the Unix epoch, using the same width on every target so callers never see
//! `time_t` or `c_long` differences.
//!
//! Two reserved nanosecond values come from the kernel's time-setting
//! interface (`utimensat(2)`): [`TIMESTAMP_OMIT`] ("leave this field alone")
//! and [`TIMESTAMP_NOW`] ("set this field to the current time"). This crate
//! only ever produces the first one, as [`Timestamp::OMIT`], to mark a
//! creation time the kernel could not provide.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Sentinel meaning "field should be ignored / not set" (`UTIME_OMIT`)
pub const TIMESTAMP_OMIT: i64 = libc::UTIME_OMIT as i64;

/// Sentinel meaning "field should be set to the current time" (`UTIME_NOW`)
pub const TIMESTAMP_NOW: i64 = libc::UTIME_NOW as i64;

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// A point in time as seconds and nanoseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timestamp {
    /// Whole seconds since the epoch, negative before 1970
    pub seconds: i64,
    /// Nanoseconds within the second, or a sentinel
    pub nanoseconds: i64,
}

impl Timestamp {
    /// The "not available" pair: both fields set to [`TIMESTAMP_OMIT`]
    pub const OMIT: Timestamp = Timestamp {
        seconds: TIMESTAMP_OMIT,
        nanoseconds: TIMESTAMP_OMIT,
    };

    /// The "set to now" pair as `utimensat(2)` expects it
    pub const NOW: Timestamp = Timestamp {
        seconds: 0,
        nanoseconds: TIMESTAMP_NOW,
    };

    /// Create a timestamp from raw parts
    #[must_use]
    pub const fn new(seconds: i64, nanoseconds: i64) -> Self {
        Self {
            seconds,
            nanoseconds,
        }
    }

    /// Whether this is the [`Timestamp::OMIT`] sentinel pair
    #[must_use]
    pub const fn is_omit(&self) -> bool {
        self.seconds == TIMESTAMP_OMIT && self.nanoseconds == TIMESTAMP_OMIT
    }

    /// Convert to a [`SystemTime`]
    ///
    /// Returns `None` for the omit sentinel, for a nanosecond field outside
    /// `0..1_000_000_000` (which covers the `NOW` sentinel), and for instants
    /// the platform's `SystemTime` cannot represent.
    #[must_use]
    pub fn to_system_time(&self) -> Option<SystemTime> {
        if self.is_omit() || !(0..NANOS_PER_SEC).contains(&self.nanoseconds) {
            return None;
        }
        let nanos = Duration::from_nanos(self.nanoseconds as u64);
        if self.seconds >= 0 {
            UNIX_EPOCH
                .checked_add(Duration::from_secs(self.seconds as u64))?
                .checked_add(nanos)
        } else {
            UNIX_EPOCH
                .checked_sub(Duration::from_secs(self.seconds.unsigned_abs()))?
                .checked_add(nanos)
        }
    }
}

impl From<libc::timespec> for Timestamp {
    fn from(ts: libc::timespec) -> Self {
        Self::new(i64::from(ts.tv_sec), i64::from(ts.tv_nsec))
    }
}

impl From<Timestamp> for libc::timespec {
    /// Truncates on targets with a 32-bit `time_t`.
    #[allow(clippy::unnecessary_cast)]
    fn from(ts: Timestamp) -> Self {
        libc::timespec {
            tv_sec: ts.seconds as libc::time_t,
            tv_nsec: ts.nanoseconds as libc::c_long,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_omit() {
            write!(f, "omit")
        } else {
            write!(f, "{}.{:09}", self.seconds, self.nanoseconds)
        }
    }
}
