use cafe_core::{ProcessId, SimTime};
use thiserror::Error;

use crate::ProcessState;

/// Kernel-usage errors.  Every variant is fatal: it means a process body
/// broke a scheduling invariant, not that the environment misbehaved.
#[derive(Debug, Error, PartialEq)]
pub enum KernelError {
    #[error("invalid schedule for {process}: due {due} is before now {now} or not finite")]
    InvalidSchedule {
        process: ProcessId,
        due:     SimTime,
        now:     SimTime,
    },

    #[error("{process} cannot be activated while {state:?}")]
    NotPassive {
        process: ProcessId,
        state:   ProcessState,
    },

    #[error("runaway process {process}: {steps} steps without suspending")]
    Runaway {
        process: ProcessId,
        steps:   u32,
    },

    #[error("process table full after {spawned} spawns")]
    ProcessTableFull { spawned: usize },

    #[error("unknown process {0}")]
    UnknownProcess(ProcessId),
}

pub type KernelResult<T> = Result<T, KernelError>;
