//! `cafe-model`: the self-service cafeteria as a network of processes.
//!
//! Customers walk a fixed path of stations (counters, drinks, check-out,
//! seats, optionally dessert).  Every station is staffed by a pool of
//! [`StationServer`] processes; customers and servers meet through the
//! demand and idle queues of each station's [`Desk`].
//!
//! # Quick start
//!
//! ```no_run
//! use cafe_core::RunConfig;
//! use cafe_model::{NoopObserver, SimulationBuilder};
//!
//! let mut sim = SimulationBuilder::new(RunConfig::default()).build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! println!("{} customers left", summary.customers_left);
//! # Ok::<(), cafe_model::ModelError>(())
//! ```

pub mod agent;
pub mod builder;
pub mod cafeteria;
pub mod customer;
pub mod error;
pub mod observer;
pub mod server;
pub mod simulation;


pub use agent::{Agent, CafeContext, Role};
pub use builder::SimulationBuilder;
pub use cafeteria::{Cafeteria, Desk, DeskStats, Patron};
pub use customer::{Customer, CustomerGenerator, Leg};
pub use error::{ModelError, ModelResult};
pub use observer::{CafeEvent, CafeObserver, NoopObserver, QueueId, RecordingObserver, Stage};
pub use server::StationServer;
pub use simulation::{RunSummary, Simulation, StationSummary};
