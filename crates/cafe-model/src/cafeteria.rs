//! `Cafeteria<R>`: the shared world every process mutates.
//!
//! One [`Desk`] per station holds the two queues of the process-interaction
//! pattern: customers waiting for service (`demand`) and servers waiting for
//! customers (`idle`).  The seating hall also keeps a `reserved` queue for
//! dessert customers; free seats take from it first.
//!
//! Queue mutations are journaled as [`CafeEvent`]s and drained to the
//! observer by the run driver after each activation.

use cafe_core::{Course, ProcessId, RandomVariateSource, RunConfig, SimTime, Station, Stream};
use cafe_kernel::WaitQueue;
use tracing::trace;

use crate::observer::{CafeEvent, QueueId, Stage};

/// A customer waiting at a station, with the course it is there for.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Patron {
    pub customer:  ProcessId,
    pub course:    Course,
    pub queued_at: SimTime,
}

/// Running totals for one station.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct DeskStats {
    /// Customers taken into service.
    pub served:      u64,
    pub total_wait:  f64,
    pub max_wait:    f64,
    /// Longest combined demand queue seen.
    pub max_queue:   usize,
    /// Integral of the combined demand queue length over time, up to
    /// `last_change`.
    pub queue_area:  f64,
    pub last_change: SimTime,
}

impl DeskStats {
    /// Close the current length interval at `now`.
    fn accumulate(&mut self, now: SimTime, len: usize) {
        self.queue_area += len as f64 * now.since(self.last_change);
        self.last_change = now;
    }
}

/// Queues and counters of one station.
#[derive(Clone, Debug)]
pub struct Desk {
    pub station:  Station,
    pub capacity: u32,
    pub demand:   WaitQueue<Patron>,
    /// Seating hall only: dessert customers, served ahead of `demand`.
    pub reserved: WaitQueue<Patron>,
    pub idle:     WaitQueue<ProcessId>,
    pub stats:    DeskStats,
}

impl Desk {
    fn new(station: Station, capacity: u32) -> Self {
        Self {
            station,
            capacity,
            demand:   WaitQueue::new(),
            reserved: WaitQueue::new(),
            idle:     WaitQueue::new(),
            stats:    DeskStats::default(),
        }
    }

    /// Customers queued at this station, both queues together.
    pub fn waiting(&self) -> usize {
        self.demand.len() + self.reserved.len()
    }

    /// Customers queued here, head to tail, reserved queue first.
    pub fn waiting_customers(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.reserved.iter().chain(self.demand.iter()).map(|p| p.customer)
    }

    /// Time-weighted average of the combined demand queue length over
    /// `[0, now]`.
    pub fn mean_queue(&self, now: SimTime) -> f64 {
        let secs = now.as_secs();
        if secs <= 0.0 {
            return 0.0;
        }
        let open = self.waiting() as f64 * now.since(self.stats.last_change);
        (self.stats.queue_area + open) / secs
    }

    /// No customer waits while a server idles.
    pub fn is_matched(&self) -> bool {
        self.waiting() == 0 || self.idle.is_empty()
    }

    fn queue_for(&mut self, course: Course) -> (&mut WaitQueue<Patron>, QueueId) {
        if self.station == Station::SeatingHall && course == Course::Dessert {
            (&mut self.reserved, QueueId::Reserved)
        } else {
            (&mut self.demand, QueueId::Demand(self.station))
        }
    }

    fn take_next(&mut self) -> Option<(Patron, QueueId)> {
        if let Some(p) = self.reserved.remove_first() {
            return Some((p, QueueId::Reserved));
        }
        self.demand
            .remove_first()
            .map(|p| (p, QueueId::Demand(self.station)))
    }
}

/// The cafeteria model state shared by all processes.
pub struct Cafeteria<R> {
    pub(crate) config:  RunConfig,
    rng:                R,
    desks:              Vec<Desk>,
    journal:            Vec<CafeEvent>,
    pub(crate) arrived: u64,
    pub(crate) left:    u64,
}

impl<R: RandomVariateSource> Cafeteria<R> {
    pub fn new(config: RunConfig, rng: R) -> Self {
        let desks = Station::ALL
            .iter()
            .map(|&s| Desk::new(s, config.capacity(s)))
            .collect();
        Self { config, rng, desks, journal: Vec::new(), arrived: 0, left: 0 }
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn desk(&self, station: Station) -> &Desk {
        &self.desks[station.index()]
    }

    pub fn desks(&self) -> &[Desk] {
        &self.desks
    }

    pub fn customers_arrived(&self) -> u64 {
        self.arrived
    }

    pub fn customers_left(&self) -> u64 {
        self.left
    }

    /// Customers sitting in any demand queue.
    pub fn customers_waiting(&self) -> u64 {
        self.desks.iter().map(|d| d.waiting() as u64).sum()
    }

    /// True when no station has a waiting customer and an idle server at once.
    pub fn is_matched(&self) -> bool {
        self.desks.iter().all(Desk::is_matched)
    }

    // ── Randomness ────────────────────────────────────────────────────────

    pub(crate) fn arrival_gap(&mut self) -> f64 {
        self.rng.sample(Stream::Arrival)
    }

    pub(crate) fn service_time(&mut self, station: Station, course: Course) -> f64 {
        self.rng.sample(Stream::service(station, course))
    }

    pub(crate) fn chance(&mut self, p: f64) -> bool {
        self.rng.chance(Stream::Routing, p)
    }

    // ── Queue operations ──────────────────────────────────────────────────

    /// Put `customer` in the demand queue of `station`.  If a server idles
    /// there it is removed from the idle queue and returned; the caller must
    /// activate it.
    pub(crate) fn join(
        &mut self,
        now:      SimTime,
        station:  Station,
        course:   Course,
        customer: ProcessId,
    ) -> Option<ProcessId> {
        let desk = &mut self.desks[station.index()];
        let before = desk.waiting();
        desk.stats.accumulate(now, before);
        let (queue, queue_id) = desk.queue_for(course);
        queue.insert(Patron { customer, course, queued_at: now });
        let len = queue.len();
        desk.stats.max_queue = desk.stats.max_queue.max(desk.waiting());
        let server = desk.idle.remove_first();
        let idle_len = desk.idle.len();
        trace!(%now, %customer, %station, %course, len, "join");

        self.journal.push(CafeEvent::Stage { time: now, customer, stage: Stage::Queued(station, course) });
        self.journal.push(CafeEvent::QueueLength { time: now, queue: queue_id, len });
        if server.is_some() {
            self.journal.push(CafeEvent::QueueLength { time: now, queue: QueueId::Idle(station), len: idle_len });
        }
        server
    }

    /// Take the next waiting customer at `station` into service.
    pub(crate) fn next_patron(&mut self, now: SimTime, station: Station) -> Option<Patron> {
        let desk = &mut self.desks[station.index()];
        let before = desk.waiting();
        let (patron, queue_id) = desk.take_next()?;
        desk.stats.accumulate(now, before);
        let wait = now.since(patron.queued_at);
        desk.stats.served += 1;
        desk.stats.total_wait += wait;
        desk.stats.max_wait = desk.stats.max_wait.max(wait);
        let len = match queue_id {
            QueueId::Reserved => desk.reserved.len(),
            _ => desk.demand.len(),
        };

        self.journal.push(CafeEvent::QueueLength { time: now, queue: queue_id, len });
        self.journal.push(CafeEvent::Stage {
            time:     now,
            customer: patron.customer,
            stage:    Stage::Service(station),
        });
        Some(patron)
    }

    /// Park `server` in the idle queue of `station`.
    pub(crate) fn park(&mut self, now: SimTime, station: Station, server: ProcessId) {
        let idle = &mut self.desks[station.index()].idle;
        idle.insert(server);
        let len = idle.len();
        trace!(%now, %server, %station, len, "park");
        self.journal.push(CafeEvent::QueueLength { time: now, queue: QueueId::Idle(station), len });
    }

    pub(crate) fn record_arrival(&mut self, now: SimTime, customer: ProcessId) {
        self.arrived += 1;
        self.journal.push(CafeEvent::Stage { time: now, customer, stage: Stage::Arrived });
    }

    pub(crate) fn record_departure(&mut self, now: SimTime, customer: ProcessId) {
        self.left += 1;
        self.journal.push(CafeEvent::Stage { time: now, customer, stage: Stage::Left });
    }

    /// Hand out the journal collected since the last drain.
    pub(crate) fn drain_journal(&mut self) -> std::vec::Drain<'_, CafeEvent> {
        self.journal.drain(..)
    }
}
