//! `StationServer`: an employee, drink machine or seat.
//!
//! All three behave alike: take the next waiting customer, hold for its
//! service time, release it, repeat.  With nobody waiting the server parks
//! itself in the station's idle queue until a joining customer wakes it.

use cafe_core::{ProcessId, RandomVariateSource, Station};
use cafe_kernel::Step;
use tracing::trace;

use crate::agent::CafeContext;
use crate::{ModelError, ModelResult};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Phase {
    /// Looking for the next customer.
    Polling,
    /// Resuming after a service hold.
    Serving,
}

#[derive(Clone, Debug)]
pub struct StationServer {
    pub(crate) station: Station,
    pub(crate) phase:   Phase,
    pub(crate) serving: Option<ProcessId>,
}

impl StationServer {
    pub fn new(station: Station) -> Self {
        Self { station, phase: Phase::Polling, serving: None }
    }

    pub fn station(&self) -> Station {
        self.station
    }

    /// The customer currently in service.
    pub fn serving(&self) -> Option<ProcessId> {
        self.serving
    }

    pub(crate) fn step<R: RandomVariateSource>(&mut self, ctx: &mut CafeContext<'_, R>) -> ModelResult<Step> {
        let (now, me) = (ctx.now(), ctx.me());
        match self.phase {
            Phase::Polling => match ctx.world.next_patron(now, self.station) {
                Some(patron) => {
                    let secs = ctx.world.service_time(self.station, patron.course);
                    trace!(%now, server = %me, customer = %patron.customer, secs, "serve");
                    self.serving = Some(patron.customer);
                    self.phase = Phase::Serving;
                    Ok(Step::Hold(secs))
                }
                None => {
                    ctx.world.park(now, self.station, me);
                    Ok(Step::Passivate)
                }
            },
            Phase::Serving => {
                let customer = self.serving.take().ok_or(ModelError::Routing {
                    station: self.station,
                    reason:  "server resumed from service without a customer",
                })?;
                ctx.activate(customer, 0.0)?;
                self.phase = Phase::Polling;
                Ok(Step::Continue)
            }
        }
    }
}
