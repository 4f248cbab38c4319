//! `SimulationBuilder`: validates a config and spawns the initial population.
//!
//! # Bootstrap order
//!
//! Servers are spawned station by station (employees, drink machines, then
//! seats) and activated at t = 0, so every server has parked in its idle
//! queue before the generator's first activation at the same instant.

use cafe_core::{RandomVariateSource, RunConfig, SeededStreams, Station};
use cafe_kernel::Scheduler;
use tracing::info;

use crate::agent::Agent;
use crate::cafeteria::Cafeteria;
use crate::customer::CustomerGenerator;
use crate::server::StationServer;
use crate::simulation::Simulation;
use crate::ModelResult;

/// Fluent builder for [`Simulation`].
///
/// Uses [`SeededStreams`] built from the config's seed unless another
/// [`RandomVariateSource`] is supplied.
pub struct SimulationBuilder<R = SeededStreams> {
    config: RunConfig,
    source: R,
}

impl SimulationBuilder<SeededStreams> {
    pub fn new(config: RunConfig) -> Self {
        let source = SeededStreams::new(&config);
        Self { config, source }
    }
}

impl<R: RandomVariateSource> SimulationBuilder<R> {
    /// Replace the random source, e.g. with a scripted one in tests.
    pub fn random_source<S: RandomVariateSource>(self, source: S) -> SimulationBuilder<S> {
        SimulationBuilder { config: self.config, source }
    }

    /// Validate the config and spawn the initial population.
    pub fn build(self) -> ModelResult<Simulation<R>> {
        self.config.validate()?;
        let mut scheduler: Scheduler<Cafeteria<R>, Agent> = Scheduler::new(self.config.max_steps_per_activation);

        for station in Station::ALL {
            for _ in 0..self.config.capacity(station) {
                let id = scheduler.spawn(Agent::Server(StationServer::new(station)))?;
                scheduler.activate(id, 0.0)?;
            }
        }
        let generator = scheduler.spawn(Agent::Generator(CustomerGenerator))?;
        scheduler.activate(generator, self.config.first_arrival_at)?;

        info!(
            processes = scheduler.processes().len(),
            seed = self.config.seed,
            stop_at = ?self.config.stop_at,
            "simulation built",
        );
        let cafeteria = Cafeteria::new(self.config, self.source);
        Ok(Simulation { scheduler, cafeteria })
    }
}
