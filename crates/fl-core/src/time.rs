//! Simulated time model.
//!
//! # Design
//!
//! Time is a count of whole simulated seconds.  [`SimTime`] is an absolute
//! instant (seconds since run start) and [`SimDuration`] a span between
//! instants.  Using an integer second as the canonical unit means all
//! scheduling arithmetic is exact (no floating-point drift) and repeated runs
//! of the same scenario are byte-identical.
//!
//! Both types render as `HH:MM:SS`, the format used by the simulation log and
//! the summary tables.  Hours widen past two digits for long runs rather than
//! wrapping.

use std::fmt;

// ── SimDuration ───────────────────────────────────────────────────────────────

/// A span of simulated time, in whole seconds.
///
/// Stored as `u64`: at 1-second resolution a u64 lasts ~585 billion years,
/// far longer than any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimDuration(pub u64);

impl SimDuration {
    pub const ZERO: SimDuration = SimDuration(0);

    /// Build a duration from hour/minute/second components.
    #[inline]
    pub fn from_hms(hours: u64, minutes: u64, seconds: u64) -> SimDuration {
        SimDuration(hours * 3_600 + minutes * 60 + seconds)
    }

    #[inline]
    pub fn as_secs(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::Add for SimDuration {
    type Output = SimDuration;
    #[inline]
    fn add(self, rhs: SimDuration) -> SimDuration {
        SimDuration(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for SimDuration {
    #[inline]
    fn add_assign(&mut self, rhs: SimDuration) {
        self.0 += rhs.0;
    }
}

impl std::ops::Mul<u64> for SimDuration {
    type Output = SimDuration;
    #[inline]
    fn mul(self, rhs: u64) -> SimDuration {
        SimDuration(self.0 * rhs)
    }
}

impl fmt::Display for SimDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hms(f, self.0)
    }
}

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulated instant: seconds elapsed since the run started.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Seconds elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> SimDuration {
        SimDuration(self.0 - earlier.0)
    }

    /// The elapsed span from run start to this instant.
    #[inline]
    pub fn elapsed(self) -> SimDuration {
        SimDuration(self.0)
    }
}

impl std::ops::Add<SimDuration> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: SimDuration) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl std::ops::Sub for SimTime {
    type Output = SimDuration;
    #[inline]
    fn sub(self, rhs: SimTime) -> SimDuration {
        SimDuration(self.0 - rhs.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hms(f, self.0)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Format `secs` as `HH:MM:SS`.  Hours widen beyond two digits as needed.
fn write_hms(f: &mut fmt::Formatter<'_>, secs: u64) -> fmt::Result {
    let h = secs / 3_600;
    let m = (secs % 3_600) / 60;
    let s = secs % 60;
    write!(f, "{h:02}:{m:02}:{s:02}")
}
