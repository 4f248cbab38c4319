//! Virtual time model.
//!
//! # Design
//!
//! Time is a continuous quantity measured in simulated seconds and wrapped in
//! [`SimTime`].  Service and arrival durations are sampled from continuous
//! uniform distributions, so an integer tick would force rounding into every
//! stage of a customer's path.
//!
//! `f64` is not `Ord`, but the event list needs a total order.  `SimTime`
//! therefore orders with [`f64::total_cmp`]; the scheduler rejects non-finite
//! due times before they can enter the event list, so NaN never participates
//! in a comparison that matters.

use std::cmp::Ordering;
use std::fmt;

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute point in virtual time, in simulated seconds since the start of
/// the run.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Wrap `secs`.  Negative zero becomes zero: `total_cmp` orders `-0.0`
    /// before `0.0`, which would put the instant before the run start.
    #[inline]
    pub fn new(secs: f64) -> Self {
        SimTime(secs + 0.0)
    }

    #[inline]
    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// Return the instant `secs` seconds after `self`.
    #[inline]
    pub fn offset(self, secs: f64) -> SimTime {
        SimTime(self.0 + secs)
    }

    /// Seconds elapsed from `earlier` to `self`.  Negative if `earlier` is
    /// actually later.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Break the instant into (hours, minutes, seconds) from the run start.
    pub fn hms(self) -> (u64, u32, f64) {
        let total = self.0.max(0.0);
        let hours = (total / 3_600.0).floor();
        let minutes = ((total - hours * 3_600.0) / 60.0).floor();
        let seconds = total - hours * 3_600.0 - minutes * 60.0;
        (hours as u64, minutes as u32, seconds)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}s", self.0)
    }
}

// ── Clock ────────────────────────────────────────────────────────────────────

/// Monotonic virtual clock.
///
/// Only the event list moves it forward (when it pops an event) and the
/// scheduler sets it to the stop time when a run ends early.  It never moves
/// backwards.
#[derive(Clone, Debug, Default)]
pub struct Clock {
    now: SimTime,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock to `to`.  Earlier instants are ignored.
    #[inline]
    pub fn advance_to(&mut self, to: SimTime) {
        debug_assert!(to >= self.now, "clock moved backwards: {} -> {}", self.now, to);
        if to > self.now {
            self.now = to;
        }
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.now.hms();
        write!(f, "{} ({:02}:{:02}:{:06.3})", self.now, h, m, s)
    }
}
