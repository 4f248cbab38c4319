//! Run configuration.
//!
//! Typically built with `RunConfig::default()` and tweaked field by field, or
//! deserialized from JSON by the application crate (with the `serde`
//! feature).  A config is validated once, before the run starts; the model
//! never re-checks it.

use crate::{CoreError, CoreResult, Course, Station};

// ── UniformRange ──────────────────────────────────────────────────────────────

/// Closed interval `[low, high]` of a continuous uniform distribution, in
/// simulated seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformRange {
    pub low:  f64,
    pub high: f64,
}

impl UniformRange {
    /// The unit interval, used by routing decisions.
    pub const UNIT: UniformRange = UniformRange { low: 0.0, high: 1.0 };

    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// A degenerate range that always yields `value`.
    pub const fn fixed(value: f64) -> Self {
        Self { low: value, high: value }
    }

    /// Reject negative, inverted or non-finite bounds.
    pub fn validate(&self, name: &'static str) -> CoreResult<()> {
        let ok = self.low.is_finite()
            && self.high.is_finite()
            && self.low >= 0.0
            && self.low <= self.high;
        if ok {
            Ok(())
        } else {
            Err(CoreError::InvalidRange { name, low: self.low, high: self.high })
        }
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

// ── Staffing ──────────────────────────────────────────────────────────────────

/// Employee count for each staffed station.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Staffing {
    pub sandwich_bar:      u32,
    pub menu_bar:          u32,
    pub check_out:         u32,
    pub dessert_bar:       u32,
    pub dessert_check_out: u32,
}

impl Staffing {
    /// The same head count at every staffed station.
    pub const fn uniform(n: u32) -> Self {
        Self {
            sandwich_bar:      n,
            menu_bar:          n,
            check_out:         n,
            dessert_bar:       n,
            dessert_check_out: n,
        }
    }
}

impl Default for Staffing {
    fn default() -> Self {
        Self::uniform(2)
    }
}

// ── ServiceTimes ──────────────────────────────────────────────────────────────

/// Service-time ranges for the six stations that serve at a counter.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ServiceTimes {
    pub sandwich_bar:      UniformRange,
    pub menu_bar:          UniformRange,
    pub drinks_bar:        UniformRange,
    pub check_out:         UniformRange,
    pub dessert_bar:       UniformRange,
    pub dessert_check_out: UniformRange,
}

impl Default for ServiceTimes {
    fn default() -> Self {
        Self {
            sandwich_bar:      UniformRange::new(30.0, 90.0),
            menu_bar:          UniformRange::new(15.0, 75.0),
            drinks_bar:        UniformRange::new(15.0, 25.0),
            check_out:         UniformRange::new(15.0, 35.0),
            dessert_bar:       UniformRange::new(20.0, 40.0),
            dessert_check_out: UniformRange::new(15.0, 35.0),
        }
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

/// Probabilities of the customer's branch points.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Routing {
    /// Share of customers starting at the sandwich bar; the rest go to the
    /// menu bar.
    pub sandwich_bar: f64,
    /// Share of customers that fetch a drink.
    pub drinks:       f64,
    /// Share of customers that stay for dessert after the main dish.
    pub dessert:      f64,
}

impl Default for Routing {
    fn default() -> Self {
        Self { sandwich_bar: 0.4, drinks: 0.9, dessert: 0.1 }
    }
}

/// Step calls a station server needs to finish one service and take the
/// next customer: one to release the served customer, one to poll the desk.
pub const MIN_STEPS_PER_ACTIVATION: u32 = 2;

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Everything a single simulation run needs.  Immutable once the run starts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    pub staffing:        Staffing,
    /// Self-service drink machines.
    pub drink_machines:  u32,
    /// Seats in the seating hall.  Zero is allowed: customers then stall in
    /// front of the hall for the rest of the run.
    pub seats:           u32,

    pub service:         ServiceTimes,
    pub resting_main:    UniformRange,
    pub resting_dessert: UniformRange,
    pub arrival_gap:     UniformRange,
    pub routing:         Routing,

    /// Instant of the first arrival.
    pub first_arrival_at: f64,
    /// Events due after this instant are not processed.  `None` runs until
    /// the event list is exhausted, which never happens while the customer
    /// generator is alive.
    pub stop_at:          Option<f64>,

    /// Master seed; the same seed always produces the same run.
    pub seed:                     u64,
    /// Maximum consecutive steps one activation may take without suspending.
    /// At least [`MIN_STEPS_PER_ACTIVATION`].
    pub max_steps_per_activation: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            staffing:                 Staffing::default(),
            drink_machines:           2,
            seats:                    50,
            service:                  ServiceTimes::default(),
            resting_main:             UniformRange::new(600.0, 1_800.0),
            resting_dessert:          UniformRange::new(420.0, 780.0),
            arrival_gap:              UniformRange::new(10.0, 50.0),
            routing:                  Routing::default(),
            first_arrival_at:         0.0,
            stop_at:                  Some(14_400.0),
            seed:                     42,
            max_steps_per_activation: 10_000,
        }
    }
}

impl RunConfig {
    /// Number of servers (employees, machines or seats) at `station`.
    pub fn capacity(&self, station: Station) -> u32 {
        match station {
            Station::SandwichBar     => self.staffing.sandwich_bar,
            Station::MenuBar         => self.staffing.menu_bar,
            Station::DrinksBar       => self.drink_machines,
            Station::CheckOut        => self.staffing.check_out,
            Station::DessertBar      => self.staffing.dessert_bar,
            Station::DessertCheckOut => self.staffing.dessert_check_out,
            Station::SeatingHall     => self.seats,
        }
    }

    /// Occupation range of one server at `station`.  For the seating hall
    /// this is the resting time of the course being eaten.
    pub fn service_range(&self, station: Station, course: Course) -> UniformRange {
        match station {
            Station::SandwichBar     => self.service.sandwich_bar,
            Station::MenuBar         => self.service.menu_bar,
            Station::DrinksBar       => self.service.drinks_bar,
            Station::CheckOut        => self.service.check_out,
            Station::DessertBar      => self.service.dessert_bar,
            Station::DessertCheckOut => self.service.dessert_check_out,
            Station::SeatingHall     => match course {
                Course::Main    => self.resting_main,
                Course::Dessert => self.resting_dessert,
            },
        }
    }

    /// Check every field.  Called by the simulation builder; a run with an
    /// invalid config never starts.
    pub fn validate(&self) -> CoreResult<()> {
        for station in Station::STAFFED {
            if self.capacity(station) == 0 {
                return Err(CoreError::Config(format!("{station} needs at least one employee")));
            }
        }
        if self.drink_machines == 0 {
            return Err(CoreError::Config("drinks_bar needs at least one machine".into()));
        }

        let s = &self.service;
        s.sandwich_bar.validate("service.sandwich_bar")?;
        s.menu_bar.validate("service.menu_bar")?;
        s.drinks_bar.validate("service.drinks_bar")?;
        s.check_out.validate("service.check_out")?;
        s.dessert_bar.validate("service.dessert_bar")?;
        s.dessert_check_out.validate("service.dessert_check_out")?;
        self.resting_main.validate("resting_main")?;
        self.resting_dessert.validate("resting_dessert")?;
        self.arrival_gap.validate("arrival_gap")?;
        if self.arrival_gap.high <= 0.0 {
            return Err(CoreError::Config("arrival_gap must allow a positive gap".into()));
        }

        let r = &self.routing;
        for (name, p) in [("sandwich_bar", r.sandwich_bar), ("drinks", r.drinks), ("dessert", r.dessert)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CoreError::Config(format!("routing.{name} = {p} is not a probability")));
            }
        }

        if !(self.first_arrival_at.is_finite() && self.first_arrival_at >= 0.0) {
            return Err(CoreError::Config(format!(
                "first_arrival_at = {} must be a non-negative instant",
                self.first_arrival_at
            )));
        }
        if let Some(stop) = self.stop_at {
            if !(stop.is_finite() && stop >= 0.0) {
                return Err(CoreError::Config(format!("stop_at = {stop} must be a non-negative instant")));
            }
        }
        if self.max_steps_per_activation < MIN_STEPS_PER_ACTIVATION {
            return Err(CoreError::Config(format!(
                "max_steps_per_activation = {} is below the minimum of {MIN_STEPS_PER_ACTIVATION}",
                self.max_steps_per_activation
            )));
        }
        Ok(())
    }
}
