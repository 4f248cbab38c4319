//! Observer sink for lifecycle events.
//!
//! The model never reads anything back from an observer, so swapping
//! observers cannot change a run's outcome.

use std::collections::BTreeMap;
use std::fmt;

use cafe_core::{Course, ProcessId, SimTime, Station};

use crate::{Role, RunSummary};

// ── Event vocabulary ──────────────────────────────────────────────────────────

/// A queue whose length is reported to observers.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum QueueId {
    /// Customers waiting for service at a station.
    Demand(Station),
    /// Dessert customers waiting for a seat.  Served before `Demand(SeatingHall)`.
    Reserved,
    /// Servers waiting for customers at a station.
    Idle(Station),
}

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueId::Demand(s) => write!(f, "{s}.demand"),
            QueueId::Reserved  => f.write_str("seating_hall.reserved"),
            QueueId::Idle(s)   => write!(f, "{s}.idle"),
        }
    }
}

/// A point on a customer's path.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Stage {
    Arrived,
    /// Joined the demand queue of a station.
    Queued(Station, Course),
    /// A server took the customer off the queue.
    Service(Station),
    /// Left the cafeteria.
    Left,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Arrived          => f.write_str("arrived"),
            Stage::Queued(s, c)     => write!(f, "queued:{s}:{c}"),
            Stage::Service(s)       => write!(f, "service:{s}"),
            Stage::Left             => f.write_str("left"),
        }
    }
}

/// One observer notification, as recorded by [`RecordingObserver`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CafeEvent {
    Resumed { time: SimTime, process: ProcessId, role: Role },
    QueueLength { time: SimTime, queue: QueueId, len: usize },
    Stage { time: SimTime, customer: ProcessId, stage: Stage },
}

impl CafeEvent {
    pub fn time(&self) -> SimTime {
        match *self {
            CafeEvent::Resumed { time, .. }
            | CafeEvent::QueueLength { time, .. }
            | CafeEvent::Stage { time, .. } => time,
        }
    }
}

// ── CafeObserver ──────────────────────────────────────────────────────────────

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait CafeObserver {
    /// A process was resumed and ran until it suspended.
    fn on_resume(&mut self, _time: SimTime, _process: ProcessId, _role: Role) {}

    /// A queue changed length.
    fn on_queue_length(&mut self, _time: SimTime, _queue: QueueId, _len: usize) {}

    /// A customer reached a stage of its path.
    fn on_stage(&mut self, _time: SimTime, _customer: ProcessId, _stage: Stage) {}

    /// Called once when the run ends without error.
    fn on_run_end(&mut self, _summary: &RunSummary) {}
}

/// A [`CafeObserver`] that does nothing.
pub struct NoopObserver;

impl CafeObserver for NoopObserver {}

/// Forward a journal entry to the matching observer hook.
pub(crate) fn dispatch<O: CafeObserver + ?Sized>(observer: &mut O, event: CafeEvent) {
    match event {
        CafeEvent::Resumed { time, process, role }  => observer.on_resume(time, process, role),
        CafeEvent::QueueLength { time, queue, len } => observer.on_queue_length(time, queue, len),
        CafeEvent::Stage { time, customer, stage }  => observer.on_stage(time, customer, stage),
    }
}

// ── RecordingObserver ─────────────────────────────────────────────────────────

/// Keeps every notification in memory, plus a per-queue length time series.
#[derive(Default, Debug)]
pub struct RecordingObserver {
    pub events:  Vec<CafeEvent>,
    pub series:  BTreeMap<QueueId, Vec<(SimTime, usize)>>,
    pub summary: Option<RunSummary>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage notifications for one customer, in order.
    pub fn stages_of(&self, customer: ProcessId) -> Vec<(SimTime, Stage)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                CafeEvent::Stage { time, customer: c, stage } if c == customer => Some((time, stage)),
                _ => None,
            })
            .collect()
    }
}

impl CafeObserver for RecordingObserver {
    fn on_resume(&mut self, time: SimTime, process: ProcessId, role: Role) {
        self.events.push(CafeEvent::Resumed { time, process, role });
    }

    fn on_queue_length(&mut self, time: SimTime, queue: QueueId, len: usize) {
        self.events.push(CafeEvent::QueueLength { time, queue, len });
        self.series.entry(queue).or_default().push((time, len));
    }

    fn on_stage(&mut self, time: SimTime, customer: ProcessId, stage: Stage) {
        self.events.push(CafeEvent::Stage { time, customer, stage });
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        self.summary = Some(summary.clone());
    }
}
