//! Process lifecycle, the `ProcessBody` trait and the `Context` handed to a
//! running body.
//!
//! # Lifecycle
//!
//! ```text
//!   spawn ──► Passive ──activate──► Scheduled ──pop──► Active ─┬─ Hold ──────► Scheduled
//!                ▲                                             ├─ Passivate ─► Passive
//!                └─────────────────────────────────────────────┘─ Terminate ─► Terminated
//! ```
//!
//! A body is a step function over its own state machine.  The scheduler calls
//! [`ProcessBody::step`] until it returns a suspending [`Step`]; a
//! [`Step::Continue`] means "I moved to my next resume point without
//! yielding, call me again".

use std::fmt;

use cafe_core::{ProcessId, SimTime};

use crate::event_list::{EventList, Lane};
use crate::{KernelError, KernelResult};

/// Lifecycle state of a process.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ProcessState {
    /// Has exactly one pending event.
    Scheduled,
    /// Currently executing.  At most one process is active.
    Active,
    /// Parked with no pending event; only another process can wake it.
    Passive,
    /// Finished.  Absorbing.
    Terminated,
}

/// What a body asks the scheduler to do after one step.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Step {
    /// Keep running: call `step` again immediately.
    Continue,
    /// Suspend for the given number of seconds, then resume.
    Hold(f64),
    /// Suspend with no scheduled resumption.
    Passivate,
    /// Finish; the body is dropped.
    Terminate,
}

/// A cooperatively scheduled process body.
///
/// `W` is the shared world the body mutates between suspension points.
/// Implementations are usually an enum over the model's roles so that one
/// scheduler can drive every kind of process.
pub trait ProcessBody<W>: Sized {
    /// Role tag recorded at spawn time; reported with every resumption.
    type Role: Copy + fmt::Debug;

    /// Error type of the body.  Kernel errors must convert into it so that
    /// `?` works on [`Context`] calls.
    type Error: From<KernelError>;

    fn role(&self) -> Self::Role;

    /// Run from the current resume point to the next one.
    fn step(&mut self, ctx: &mut Context<'_, W, Self>) -> Result<Step, Self::Error>;
}

// ── ProcessTable ──────────────────────────────────────────────────────────────

/// Id of the process stored at slot `index`.  `ProcessId::INVALID` is never
/// handed out.
pub(crate) fn next_id(index: usize) -> KernelResult<ProcessId> {
    match ProcessId::try_from(index) {
        Ok(id) if id != ProcessId::INVALID => Ok(id),
        _ => Err(KernelError::ProcessTableFull { spawned: index }),
    }
}

pub(crate) struct Slot<R, P> {
    pub(crate) state: ProcessState,
    pub(crate) role:  R,
    /// `None` while the process is active or after it terminated.
    pub(crate) body:  Option<P>,
}

/// Every process ever spawned in a run, indexed by `ProcessId`.
pub struct ProcessTable<R, P> {
    pub(crate) slots: Vec<Slot<R, P>>,
}

impl<R: Copy, P> ProcessTable<R, P> {
    pub(crate) fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Register a new passive process.
    pub(crate) fn spawn(&mut self, role: R, body: P) -> KernelResult<ProcessId> {
        let id = next_id(self.slots.len())?;
        self.slots.push(Slot { state: ProcessState::Passive, role, body: Some(body) });
        Ok(id)
    }

    pub(crate) fn slot_mut(&mut self, id: ProcessId) -> KernelResult<&mut Slot<R, P>> {
        self.slots.get_mut(id.index()).ok_or(KernelError::UnknownProcess(id))
    }

    pub fn state(&self, id: ProcessId) -> Option<ProcessState> {
        self.slots.get(id.index()).map(|s| s.state)
    }

    pub fn role(&self, id: ProcessId) -> Option<R> {
        self.slots.get(id.index()).map(|s| s.role)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `(id, role, state)` for every process, in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (ProcessId, R, ProcessState)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| (ProcessId(i as u32), s.role, s.state))
    }

    /// Move a passive process to `Scheduled` with an event at `due`.
    pub(crate) fn activate(
        &mut self,
        events: &mut EventList,
        id:     ProcessId,
        due:    SimTime,
        lane:   Lane,
    ) -> KernelResult<()> {
        let slot = self.slot_mut(id)?;
        if slot.state != ProcessState::Passive {
            return Err(KernelError::NotPassive { process: id, state: slot.state });
        }
        events.schedule(id, due, lane)?;
        slot.state = ProcessState::Scheduled;
        Ok(())
    }
}

// ── Context ───────────────────────────────────────────────────────────────────

/// Everything a running body may touch: the shared world, the clock, and the
/// activation primitives.  None of these calls suspends the caller.
pub struct Context<'a, W, P: ProcessBody<W>> {
    pub(crate) me:     ProcessId,
    pub(crate) events: &'a mut EventList,
    pub(crate) table:  &'a mut ProcessTable<P::Role, P>,
    /// The shared model state.
    pub world:         &'a mut W,
}

impl<W, P: ProcessBody<W>> Context<'_, W, P> {
    /// The running process.
    #[inline]
    pub fn me(&self) -> ProcessId {
        self.me
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.events.now()
    }

    /// Create a new passive process.  It does nothing until activated.
    pub fn spawn(&mut self, body: P) -> KernelResult<ProcessId> {
        let role = body.role();
        self.table.spawn(role, body)
    }

    /// Schedule passive process `id` to resume `delay` seconds from now.
    pub fn activate(&mut self, id: ProcessId, delay: f64) -> KernelResult<()> {
        let due = self.now() + delay;
        self.table.activate(self.events, id, due, Lane::Normal)
    }

    /// Schedule passive process `id` to resume now, directly after the
    /// running activation and ahead of other events due at this instant.
    pub fn activate_after(&mut self, id: ProcessId) -> KernelResult<()> {
        let now = self.now();
        self.table.activate(self.events, id, now, Lane::AfterCurrent)
    }

    /// Lifecycle state of any process.  The running process reports `Active`.
    pub fn state_of(&self, id: ProcessId) -> Option<ProcessState> {
        self.table.state(id)
    }
}
