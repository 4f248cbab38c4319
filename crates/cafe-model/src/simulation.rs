//! `Simulation`: owns the scheduler and the cafeteria, drives the run.

use cafe_core::{ProcessId, RandomVariateSource, SeededStreams, SimTime, Station};
use cafe_kernel::{ProcessState, RunState, Scheduler};
use tracing::info;

use crate::agent::{Agent, Role};
use crate::cafeteria::Cafeteria;
use crate::observer::{dispatch, CafeEvent, CafeObserver};
use crate::ModelResult;

// ── RunSummary ────────────────────────────────────────────────────────────────

/// End-of-run figures for one station.
#[derive(Clone, Debug, PartialEq)]
pub struct StationSummary {
    pub station:    Station,
    pub capacity:   u32,
    /// Customers taken into service.
    pub served:     u64,
    pub mean_wait:  f64,
    pub max_wait:   f64,
    pub max_queue:  usize,
    /// Time-weighted average queue length.
    pub mean_queue: f64,
    /// Servers idle at the end of the run.
    pub idle:       usize,
    /// Customers still queued at the end of the run, head first.
    pub waiting:    Vec<ProcessId>,
}

/// What a finished run looked like.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub final_time:           SimTime,
    pub events_processed:     u64,
    pub customers_arrived:    u64,
    pub customers_left:       u64,
    /// Customers in some demand queue.
    pub customers_waiting:    u64,
    /// Customers being served somewhere.
    pub customers_in_service: u64,
    pub stations:             Vec<StationSummary>,
}

impl RunSummary {
    pub fn station(&self, station: Station) -> &StationSummary {
        &self.stations[station.index()]
    }

    /// Customers that were still queued when the run ended.
    pub fn stalled(&self) -> impl Iterator<Item = (Station, ProcessId)> + '_ {
        self.stations
            .iter()
            .flat_map(|s| s.waiting.iter().map(move |&c| (s.station, c)))
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// A ready-to-run cafeteria simulation.
pub struct Simulation<R: RandomVariateSource = SeededStreams> {
    pub scheduler: Scheduler<Cafeteria<R>, Agent>,
    pub cafeteria: Cafeteria<R>,
}

impl<R: RandomVariateSource> Simulation<R> {
    fn stop_time(&self) -> Option<SimTime> {
        self.cafeteria.config().stop_at.map(SimTime::new)
    }

    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    /// Resume one process and forward its notifications to `observer`.
    pub fn step<O: CafeObserver + ?Sized>(&mut self, observer: &mut O) -> ModelResult<RunState<Role>> {
        let stop = self.stop_time();
        let state = self.scheduler.step(&mut self.cafeteria, stop)?;
        if let RunState::Resumed(r) = state {
            dispatch(observer, CafeEvent::Resumed { time: r.time, process: r.process, role: r.role });
            for event in self.cafeteria.drain_journal() {
                dispatch(observer, event);
            }
        }
        Ok(state)
    }

    /// Run until the stop time passes or no events remain.
    ///
    /// On error the run is abandoned: the error is returned and
    /// `on_run_end` is not called.
    pub fn run<O: CafeObserver + ?Sized>(&mut self, observer: &mut O) -> ModelResult<RunSummary> {
        loop {
            match self.step(observer)? {
                RunState::Resumed(_) => {}
                RunState::StopTimeReached(_) | RunState::Exhausted(_) => break,
            }
        }
        let summary = self.summary();
        info!(
            final_time = %summary.final_time,
            events = summary.events_processed,
            arrived = summary.customers_arrived,
            left = summary.customers_left,
            waiting = summary.customers_waiting,
            "run finished",
        );
        observer.on_run_end(&summary);
        Ok(summary)
    }

    /// Snapshot of the current state as a [`RunSummary`].
    pub fn summary(&self) -> RunSummary {
        let world = &self.cafeteria;
        let now = self.now();
        let stations: Vec<StationSummary> = world
            .desks()
            .iter()
            .map(|d| StationSummary {
                station:    d.station,
                capacity:   d.capacity,
                served:     d.stats.served,
                mean_wait:  if d.stats.served == 0 {
                    0.0
                } else {
                    d.stats.total_wait / d.stats.served as f64
                },
                max_wait:   d.stats.max_wait,
                max_queue:  d.stats.max_queue,
                mean_queue: d.mean_queue(now),
                idle:       d.idle.len(),
                waiting:    d.waiting_customers().collect(),
            })
            .collect();

        let waiting = world.customers_waiting();
        let in_system = world.customers_arrived() - world.customers_left();
        RunSummary {
            final_time:           now,
            events_processed:     self.scheduler.events_processed(),
            customers_arrived:    world.customers_arrived(),
            customers_left:       world.customers_left(),
            customers_waiting:    waiting,
            customers_in_service: in_system.saturating_sub(waiting),
            stations,
        }
    }

    /// Live server processes at `station`, whatever their state.
    pub fn servers_at(&self, station: Station) -> usize {
        self.scheduler
            .processes()
            .iter()
            .filter(|&(_, role, state)| role == Role::Server(station) && state != ProcessState::Terminated)
            .count()
    }

    /// Passive servers at `station`.  Every one of them sits in the idle queue.
    pub fn passive_servers_at(&self, station: Station) -> usize {
        self.scheduler
            .processes()
            .iter()
            .filter(|&(_, role, state)| role == Role::Server(station) && state == ProcessState::Passive)
            .count()
    }
}
