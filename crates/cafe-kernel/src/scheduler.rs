//! The `Scheduler` and its run loop.

use std::marker::PhantomData;

use cafe_core::{ProcessId, SimTime};
use tracing::{debug, trace};

use crate::event_list::{EventList, Lane};
use crate::process::{Context, ProcessBody, ProcessState, ProcessTable, Step};
use crate::{KernelError, KernelResult};

/// Report of one resumed activation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resumption<R> {
    pub time:    SimTime,
    pub process: ProcessId,
    pub role:    R,
    /// State the process suspended into.
    pub outcome: ProcessState,
    /// Step calls the activation took.
    pub steps:   u32,
}

/// Result of one call to [`Scheduler::step`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RunState<R> {
    /// One process ran until it suspended or terminated.
    Resumed(Resumption<R>),
    /// The earliest pending event lies beyond the stop time.  The clock now
    /// reads the stop time; pending events were left untouched.
    StopTimeReached(SimTime),
    /// No events remain.
    Exhausted(SimTime),
}

/// Cooperative single-threaded scheduler.
///
/// `Scheduler<W, P>` owns the event list (and with it the clock) and the
/// process table.  The world `W` is borrowed for each step, so the caller
/// keeps ownership of the model and can inspect it between activations.
///
/// # Loop
///
/// 1. Peek the earliest event; stop if none is left or it is due after the
///    stop time.
/// 2. Pop it (advancing the clock) and mark its process `Active`.
/// 3. Call the body's `step` until it returns `Hold`, `Passivate` or
///    `Terminate`.  More than `max_steps` calls in one activation is a
///    runaway process.
pub struct Scheduler<W, P: ProcessBody<W>> {
    events:           EventList,
    table:            ProcessTable<P::Role, P>,
    max_steps:        u32,
    events_processed: u64,
    _world:           PhantomData<fn(&mut W)>,
}

impl<W, P: ProcessBody<W>> Scheduler<W, P> {
    /// Create an empty scheduler whose activations may take at most
    /// `max_steps` step calls.
    pub fn new(max_steps: u32) -> Self {
        Self {
            events:           EventList::new(),
            table:            ProcessTable::new(),
            max_steps:        max_steps.max(1),
            events_processed: 0,
            _world:           PhantomData,
        }
    }

    // ── Bootstrap ─────────────────────────────────────────────────────────

    /// Register a passive process.
    pub fn spawn(&mut self, body: P) -> KernelResult<ProcessId> {
        let role = body.role();
        self.table.spawn(role, body)
    }

    /// Schedule passive process `id` at `now + delay`.  Used before the run
    /// to start the initial population.
    pub fn activate(&mut self, id: ProcessId, delay: f64) -> KernelResult<()> {
        let due = self.events.now() + delay;
        self.table.activate(&mut self.events, id, due, Lane::Normal)
    }

    // ── Introspection ─────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.events.now()
    }

    pub fn state(&self, id: ProcessId) -> Option<ProcessState> {
        self.table.state(id)
    }

    pub fn role(&self, id: ProcessId) -> Option<P::Role> {
        self.table.role(id)
    }

    pub fn processes(&self) -> &ProcessTable<P::Role, P> {
        &self.table
    }

    pub fn events(&self) -> &EventList {
        &self.events
    }

    /// Activations completed so far.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    // ── Run loop ──────────────────────────────────────────────────────────

    /// Resume the next process, unless the run is over.
    pub fn step(&mut self, world: &mut W, stop: Option<SimTime>) -> Result<RunState<P::Role>, P::Error> {
        let Some(due) = self.events.peek_time() else {
            debug!(now = %self.now(), "event list exhausted");
            return Ok(RunState::Exhausted(self.now()));
        };
        if let Some(stop) = stop {
            if due > stop {
                self.events.advance_clock_to(stop);
                debug!(%stop, pending = self.events.len(), "stop time reached");
                return Ok(RunState::StopTimeReached(stop));
            }
        }
        let Some(event) = self.events.pop_earliest() else {
            return Ok(RunState::Exhausted(self.now()));
        };

        let id = event.process;
        let slot = self.table.slot_mut(id)?;
        let mut body = slot.body.take().ok_or(KernelError::UnknownProcess(id))?;
        slot.state = ProcessState::Active;
        let role = slot.role;
        trace!(time = %event.due, process = %id, ?role, "resume");

        let mut steps = 0u32;
        let outcome = loop {
            let mut ctx = Context {
                me:     id,
                events: &mut self.events,
                table:  &mut self.table,
                world:  &mut *world,
            };
            let step = body.step(&mut ctx)?;
            steps += 1;
            match step {
                Step::Continue => {
                    if steps >= self.max_steps {
                        return Err(KernelError::Runaway { process: id, steps }.into());
                    }
                }
                Step::Hold(secs) => {
                    let due = self.events.now() + secs;
                    self.events.schedule(id, due, Lane::Normal)?;
                    break ProcessState::Scheduled;
                }
                Step::Passivate => break ProcessState::Passive,
                Step::Terminate => break ProcessState::Terminated,
            }
        };

        let slot = self.table.slot_mut(id)?;
        slot.state = outcome;
        if outcome != ProcessState::Terminated {
            slot.body = Some(body);
        }
        self.events_processed += 1;

        Ok(RunState::Resumed(Resumption {
            time: event.due,
            process: id,
            role,
            outcome,
            steps,
        }))
    }

    /// Step until the run ends.  Returns the terminal state (never
    /// `Resumed`).
    pub fn run(&mut self, world: &mut W, stop: Option<SimTime>) -> Result<RunState<P::Role>, P::Error> {
        loop {
            match self.step(world, stop)? {
                RunState::Resumed(_) => continue,
                done => return Ok(done),
            }
        }
    }
}
