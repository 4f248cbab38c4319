//! `EventList`: the ordered set of pending process resumptions.
//!
//! # Ordering
//!
//! Events are keyed by `(due, lane, seq)`:
//!
//! - `due`:  virtual time of the resumption;
//! - `lane`: [`Lane::AfterCurrent`] sorts ahead of [`Lane::Normal`] at the
//!   same instant, so a process activated "after" the running one is resumed
//!   next, before anything already waiting at that instant;
//! - `seq`:  a strictly increasing insertion counter that keeps same-instant,
//!   same-lane events in causal order.
//!
//! The key is unique, so a `BTreeMap` gives O(log E) insert and pop-first
//! without a separate tie-break heap wrapper.
//!
//! The clock lives here: [`EventList::pop_earliest`] is the single place where
//! virtual time advances during a run.

use std::collections::BTreeMap;

use cafe_core::{Clock, ProcessId, SimTime};

use crate::{KernelError, KernelResult};

/// Tie-break class of an event at a given instant.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Lane {
    /// Resume right after the currently running activation.
    AfterCurrent,
    /// Ordinary FIFO at the due instant.
    Normal,
}

/// One pending resumption.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Event {
    pub due:     SimTime,
    pub lane:    Lane,
    pub seq:     u64,
    pub process: ProcessId,
}

type EventKey = (SimTime, Lane, u64);

/// Pending events plus the virtual clock they drive.
#[derive(Default)]
pub struct EventList {
    inner:    BTreeMap<EventKey, ProcessId>,
    clock:    Clock,
    next_seq: u64,
}

impl EventList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Schedule `process` to resume at `due`.
    ///
    /// Fails with [`KernelError::InvalidSchedule`] if `due` lies before the
    /// current time or is not finite.
    pub fn schedule(&mut self, process: ProcessId, due: SimTime, lane: Lane) -> KernelResult<Event> {
        let now = self.now();
        if !due.is_finite() || due < now {
            return Err(KernelError::InvalidSchedule { process, due, now });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.inner.insert((due, lane, seq), process);
        Ok(Event { due, lane, seq, process })
    }

    /// Remove and return the earliest event, advancing the clock to its due
    /// time.  Returns `None` once nothing is pending.
    pub fn pop_earliest(&mut self) -> Option<Event> {
        let ((due, lane, seq), process) = self.inner.pop_first()?;
        self.clock.advance_to(due);
        Some(Event { due, lane, seq, process })
    }

    /// The earliest event without removing it.
    pub fn peek(&self) -> Option<Event> {
        self.inner
            .first_key_value()
            .map(|(&(due, lane, seq), &process)| Event { due, lane, seq, process })
    }

    /// Due time of the earliest event, or `None` if empty.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|&(due, _, _)| due)
    }

    /// Whether `process` has a pending event.
    pub fn contains(&self, process: ProcessId) -> bool {
        self.inner.values().any(|&p| p == process)
    }

    /// Move the clock to `to` without consuming an event.  Used by the
    /// scheduler when a run ends at its stop time.
    pub(crate) fn advance_clock_to(&mut self, to: SimTime) {
        self.clock.advance_to(to);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
