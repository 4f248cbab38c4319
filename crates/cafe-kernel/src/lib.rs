//! `cafe-kernel`: the process-interaction discrete-event kernel.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`event_list`] | `EventList` (`BTreeMap<(SimTime, Lane, seq), ProcessId>`), `Event`, `Lane` |
//! | [`process`]    | `ProcessBody` trait, `Step`, `ProcessState`, `Context`, `ProcessTable` |
//! | [`scheduler`]  | `Scheduler`, `RunState`, `Resumption`                      |
//! | [`wait_queue`] | `WaitQueue<T>`                                             |
//! | [`error`]      | `KernelError`, `KernelResult<T>`                           |
//!
//! # Execution model (summary)
//!
//! One logical thread of control.  The scheduler pops the earliest event,
//! advances the clock, and runs exactly one process body until it holds,
//! passivates or terminates.  Activating another process never yields, so
//! everything a body does between two suspension points is atomic with
//! respect to every other process.
//!
//! ```rust,ignore
//! let mut sched: Scheduler<World, Body> = Scheduler::new(10_000);
//! let id = sched.spawn(Body::new())?;
//! sched.activate(id, 0.0)?;
//! sched.run(&mut world, Some(SimTime(3_600.0)))?;
//! ```

pub mod error;
pub mod event_list;
pub mod process;
pub mod scheduler;
pub mod wait_queue;

#[cfg(test)]
mod tests;

pub use error::{KernelError, KernelResult};
pub use event_list::{Event, EventList, Lane};
pub use process::{Context, ProcessBody, ProcessState, ProcessTable, Step};
pub use scheduler::{Resumption, RunState, Scheduler};
pub use wait_queue::WaitQueue;
