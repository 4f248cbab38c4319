//! `Agent`: the one process-body type driven by the cafeteria scheduler.

use std::fmt;

use cafe_core::{RandomVariateSource, Station};
use cafe_kernel::{Context, ProcessBody, Step};

use crate::cafeteria::Cafeteria;
use crate::customer::{Customer, CustomerGenerator};
use crate::server::StationServer;
use crate::ModelError;

/// Context type seen by every cafeteria process.
pub type CafeContext<'a, R> = Context<'a, Cafeteria<R>, Agent>;

/// Role tag reported with every resumption.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Role {
    Generator,
    Customer,
    Server(Station),
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Generator  => f.write_str("generator"),
            Role::Customer   => f.write_str("customer"),
            Role::Server(s)  => write!(f, "server:{s}"),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Agent {
    Generator(CustomerGenerator),
    Customer(Customer),
    Server(StationServer),
}

impl<R: RandomVariateSource> ProcessBody<Cafeteria<R>> for Agent {
    type Role  = Role;
    type Error = ModelError;

    fn role(&self) -> Role {
        match self {
            Agent::Generator(_) => Role::Generator,
            Agent::Customer(_)  => Role::Customer,
            Agent::Server(s)    => Role::Server(s.station()),
        }
    }

    fn step(&mut self, ctx: &mut CafeContext<'_, R>) -> Result<Step, ModelError> {
        match self {
            Agent::Generator(g) => g.step(ctx),
            Agent::Customer(c)  => c.step(ctx),
            Agent::Server(s)    => s.step(ctx),
        }
    }
}
