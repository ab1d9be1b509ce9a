//! Routing problem definition.

use super::config::QpsoConfig;
use super::runner::{QpsoRunner, RouteResult};
use crate::error::Result;
use crate::oracle::{CostOracle, Destination, TripContext, VehicleRegistry};

/// A set of destinations to order into one visiting sequence.
///
/// Bundles the destinations with the [`CostOracle`] that prices them, the
/// trip context handed to the oracle, an optional vehicle registry for
/// display ids, and optional known-good orders used to seed the swarm.
#[derive(Debug, Clone)]
pub struct RoutingProblem<O: CostOracle> {
    destinations: Vec<Destination>,
    oracle: O,
    context: TripContext,
    vehicles: VehicleRegistry,
    seed_orders: Vec<Vec<usize>>,
}

impl<O: CostOracle> RoutingProblem<O> {
    /// Creates a problem priced in the default trip context (Monday noon,
    /// off-peak, dry). Use [`with_context`](Self::with_context) with
    /// [`TripContext::now`] to price at the current local time.
    pub fn new(destinations: Vec<Destination>, oracle: O) -> Self {
        Self {
            destinations,
            oracle,
            context: TripContext::default(),
            vehicles: VehicleRegistry::default(),
            seed_orders: Vec::new(),
        }
    }

    /// Creates a problem from bare identifiers at the default distance.
    pub fn from_ids<I, S>(ids: I, oracle: O) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ids.into_iter().map(Destination::new).collect(), oracle)
    }

    pub fn with_context(mut self, context: TripContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_vehicles(mut self, vehicles: VehicleRegistry) -> Self {
        self.vehicles = vehicles;
        self
    }

    /// Seeds one particle with a known visiting order (destination indices).
    ///
    /// Orders are checked when the run starts; a non-permutation fails the
    /// run with [`crate::QpsoError::InvalidSeedOrder`].
    pub fn with_seed_order(mut self, order: Vec<usize>) -> Self {
        self.seed_orders.push(order);
        self
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn context(&self) -> &TripContext {
        &self.context
    }

    pub fn vehicles(&self) -> &VehicleRegistry {
        &self.vehicles
    }

    pub fn seed_orders(&self) -> &[Vec<usize>] {
        &self.seed_orders
    }

    /// Runs the optimizer with default settings and the given budget.
    pub fn optimize(&self, particle_count: usize, generation_count: usize) -> Result<RouteResult> {
        optimize(self, particle_count, generation_count)
    }
}

/// Orders `problem`'s destinations with `particle_count` particles over
/// `generation_count` generations, all other settings at their defaults.
///
/// # Errors
///
/// [`crate::QpsoError::InvalidConfiguration`] if either count is zero.
pub fn optimize<O: CostOracle>(
    problem: &RoutingProblem<O>,
    particle_count: usize,
    generation_count: usize,
) -> Result<RouteResult> {
    let config = QpsoConfig::default()
        .with_particles(particle_count)
        .with_generations(generation_count);
    QpsoRunner::run(problem, &config)
}
