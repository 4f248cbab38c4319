//! Deterministic random-variate streams.
//!
//! # Determinism strategy
//!
//! Each named [`Stream`] gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR ((stream_index + 1) * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream indices uniformly across the seed space.
//! This means:
//!
//! - Streams never share RNG state, so drawing an extra arrival gap does not
//!   shift the sequence of service times.
//! - The same seed always reproduces the same sequence on every stream.
//! - The model is single-threaded; no synchronisation is needed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Course, RunConfig, Station, UniformRange};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── Stream ────────────────────────────────────────────────────────────────────

/// A named use of randomness.  Every stream is sampled independently.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Stream {
    /// Gap between two consecutive customer arrivals.
    Arrival,
    /// How long one server at a station is occupied by one customer.
    /// For the seating hall, the course decides the resting time.
    Service(Station, Course),
    /// Branch decisions on the customer's path.
    Routing,
}

impl Stream {
    /// Number of distinct stream slots (see [`Stream::index`]).
    pub const COUNT: usize = Station::COUNT + 3;

    /// Dense slot index.  `Service(s, _)` shares one slot per station except
    /// the seating hall, whose dessert course has its own slot.
    pub fn index(self) -> usize {
        match self {
            Stream::Arrival => 0,
            Stream::Service(Station::SeatingHall, Course::Dessert) => Station::COUNT + 1,
            Stream::Service(station, _) => 1 + station.index(),
            Stream::Routing => Station::COUNT + 2,
        }
    }

    /// The stream for one server occupation at `station`.
    #[inline]
    pub fn service(station: Station, course: Course) -> Self {
        Stream::Service(station, course)
    }
}

// ── RandomVariateSource ───────────────────────────────────────────────────────

/// Capability the model draws all randomness from.
///
/// Implementations must be reproducible: the same construction inputs give
/// the same sequence per stream.  Sampling never fails for a validated range.
pub trait RandomVariateSource {
    /// A continuous-uniform sample from the range configured for `stream`.
    fn sample(&mut self, stream: Stream) -> f64;

    /// `true` with probability `p` (clamped to [0, 1]).
    fn chance(&mut self, stream: Stream, p: f64) -> bool;
}

// ── StreamRng ─────────────────────────────────────────────────────────────────

/// One deterministic RNG stream.
pub struct StreamRng(SmallRng);

impl StreamRng {
    /// Seed deterministically from the run's global seed and a stream slot.
    pub fn new(global_seed: u64, slot: usize) -> Self {
        let seed = global_seed ^ (slot as u64 + 1).wrapping_mul(MIXING_CONSTANT);
        StreamRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample uniformly from `range`; a degenerate range yields its bound.
    #[inline]
    pub fn uniform(&mut self, range: UniformRange) -> f64 {
        if range.low >= range.high {
            return range.low;
        }
        self.0.gen_range(range.low..=range.high)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── SeededStreams ─────────────────────────────────────────────────────────────

/// The default [`RandomVariateSource`]: one [`StreamRng`] per stream slot,
/// all derived from `RunConfig::seed`.
pub struct SeededStreams {
    rngs:   Vec<StreamRng>,
    ranges: [UniformRange; Stream::COUNT],
}

impl SeededStreams {
    /// Build the streams for `config`.  The config is assumed validated.
    pub fn new(config: &RunConfig) -> Self {
        let mut ranges = [UniformRange::UNIT; Stream::COUNT];
        ranges[Stream::Arrival.index()] = config.arrival_gap;
        for station in Station::ALL {
            for course in [Course::Main, Course::Dessert] {
                let stream = Stream::service(station, course);
                ranges[stream.index()] = config.service_range(station, course);
            }
        }

        let rngs = (0..Stream::COUNT)
            .map(|slot| StreamRng::new(config.seed, slot))
            .collect();
        Self { rngs, ranges }
    }

    /// The configured range of `stream`.
    pub fn range(&self, stream: Stream) -> UniformRange {
        self.ranges[stream.index()]
    }
}

impl RandomVariateSource for SeededStreams {
    fn sample(&mut self, stream: Stream) -> f64 {
        let range = self.ranges[stream.index()];
        self.rngs[stream.index()].uniform(range)
    }

    fn chance(&mut self, stream: Stream, p: f64) -> bool {
        self.rngs[stream.index()].gen_bool(p)
    }
}
