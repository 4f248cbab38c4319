//! Plain data row types written by output backends.

use cafe_core::{Course, Station};
use cafe_model::{QueueId, Stage};

/// One queue-length change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueLengthRow {
    /// Simulated seconds since the start of the run.
    pub time:  f64,
    pub queue: QueueId,
    pub len:   u32,
}

/// One customer reaching a stage of its path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageRow {
    pub time:     f64,
    pub customer: u32,
    pub stage:    Stage,
}

impl StageRow {
    /// Stage kind without its station or course.
    pub fn kind(&self) -> &'static str {
        match self.stage {
            Stage::Arrived      => "arrived",
            Stage::Queued(..)   => "queued",
            Stage::Service(_)   => "service",
            Stage::Left         => "left",
        }
    }

    pub fn station(&self) -> Option<Station> {
        match self.stage {
            Stage::Queued(s, _) | Stage::Service(s) => Some(s),
            Stage::Arrived | Stage::Left => None,
        }
    }

    /// Only queueing records the course.
    pub fn course(&self) -> Option<Course> {
        match self.stage {
            Stage::Queued(_, c) => Some(c),
            _ => None,
        }
    }
}
