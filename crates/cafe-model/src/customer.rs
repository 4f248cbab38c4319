//! Customers and the process that creates them.
//!
//! A customer's path through the cafeteria:
//!
//! ```text
//!   arrive ─► sandwich bar | menu bar ─► [drinks bar] ─► check-out ─► seat (main)
//!                                                                      │
//!        leave ◄─ seat (dessert) ◄─ dessert check-out ◄─ dessert bar ◄─┘ [dessert]
//!          ▲                                                           │
//!          └───────────────────────────────────────────────────────────┘
//! ```
//!
//! At every station the customer joins the demand queue and passivates; the
//! server that finishes with it reactivates it.

use cafe_core::{Course, RandomVariateSource, Station};
use cafe_kernel::Step;
use tracing::debug;

use crate::agent::{Agent, CafeContext};
use crate::ModelResult;

// ── CustomerGenerator ─────────────────────────────────────────────────────────

/// Creates one customer per activation, then sleeps for an arrival gap.
#[derive(Clone, Debug, Default)]
pub struct CustomerGenerator;

impl CustomerGenerator {
    pub(crate) fn step<R: RandomVariateSource>(&mut self, ctx: &mut CafeContext<'_, R>) -> ModelResult<Step> {
        let customer = ctx.spawn(Agent::Customer(Customer::new()))?;
        ctx.activate_after(customer)?;
        let gap = ctx.world.arrival_gap();
        Ok(Step::Hold(gap))
    }
}

// ── Customer ──────────────────────────────────────────────────────────────────

/// Where a customer resumes next.  Each variant names the station it has
/// just been served at.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Leg {
    Arrival,
    Counter,
    Drinks,
    CheckOut,
    MainDish,
    DessertBar,
    DessertCheckOut,
    Dessert,
}

#[derive(Clone, Debug)]
pub struct Customer {
    leg: Leg,
}

impl Default for Customer {
    fn default() -> Self {
        Self::new()
    }
}

impl Customer {
    pub fn new() -> Self {
        Self { leg: Leg::Arrival }
    }

    pub fn leg(&self) -> Leg {
        self.leg
    }

    pub(crate) fn step<R: RandomVariateSource>(&mut self, ctx: &mut CafeContext<'_, R>) -> ModelResult<Step> {
        let routing = ctx.world.config.routing;
        match self.leg {
            Leg::Arrival => {
                let (now, me) = (ctx.now(), ctx.me());
                ctx.world.record_arrival(now, me);
                debug!(%now, customer = %me, "arrived");
                let counter = if ctx.world.chance(routing.sandwich_bar) {
                    Station::SandwichBar
                } else {
                    Station::MenuBar
                };
                self.leg = Leg::Counter;
                queue_at(ctx, counter, Course::Main)
            }
            Leg::Counter => {
                self.leg = Leg::Drinks;
                if ctx.world.chance(routing.drinks) {
                    queue_at(ctx, Station::DrinksBar, Course::Main)
                } else {
                    Ok(Step::Continue)
                }
            }
            Leg::Drinks => {
                self.leg = Leg::CheckOut;
                queue_at(ctx, Station::CheckOut, Course::Main)
            }
            Leg::CheckOut => {
                self.leg = Leg::MainDish;
                queue_at(ctx, Station::SeatingHall, Course::Main)
            }
            Leg::MainDish => {
                if ctx.world.chance(routing.dessert) {
                    self.leg = Leg::DessertBar;
                    queue_at(ctx, Station::DessertBar, Course::Dessert)
                } else {
                    leave(ctx)
                }
            }
            Leg::DessertBar => {
                self.leg = Leg::DessertCheckOut;
                queue_at(ctx, Station::DessertCheckOut, Course::Dessert)
            }
            Leg::DessertCheckOut => {
                self.leg = Leg::Dessert;
                queue_at(ctx, Station::SeatingHall, Course::Dessert)
            }
            Leg::Dessert => leave(ctx),
        }
    }
}

/// Join the demand queue of `station`, wake an idle server if there is one,
/// and wait to be served.
fn queue_at<R: RandomVariateSource>(
    ctx:     &mut CafeContext<'_, R>,
    station: Station,
    course:  Course,
) -> ModelResult<Step> {
    let (now, me) = (ctx.now(), ctx.me());
    if let Some(server) = ctx.world.join(now, station, course, me) {
        ctx.activate_after(server)?;
    }
    Ok(Step::Passivate)
}

fn leave<R: RandomVariateSource>(ctx: &mut CafeContext<'_, R>) -> ModelResult<Step> {
    let (now, me) = (ctx.now(), ctx.me());
    ctx.world.record_departure(now, me);
    debug!(%now, customer = %me, "left");
    Ok(Step::Terminate)
}
