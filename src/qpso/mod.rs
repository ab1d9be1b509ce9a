//! Quantum-behaved Particle Swarm Optimization with Simulated Annealing
//! acceptance (QPSO-SA) for ordering delivery destinations.
//!
//! Each particle holds a real-valued position vector with one key per
//! destination; the smallest-position-value rule ([`decode`]) turns it into
//! a visiting order. Every generation:
//!
//! 1. the cost oracle is queried once per destination and cached,
//! 2. every particle is evaluated and its personal best updated,
//! 3. the global best is updated from the personal bests,
//! 4. every particle proposes a delta-potential-well move around a random
//!    attractor between its personal best and the global best, with a
//!    log-distributed jump scaled by its distance to the mean of all
//!    personal bests and by the decaying coefficient `alpha`,
//! 5. the move is kept or discarded by the Metropolis criterion, and the
//!    temperature cools geometrically.
//!
//! Positions are unbounded; initial keys are uniform in `[-spread, spread]`.
//!
//! # References
//!
//! - Sun, Feng & Xu (2004), "Particle swarm optimization with particles
//!   having quantum behavior"
//! - Tasgetiren et al. (2007), "A particle swarm optimization algorithm for
//!   makespan and total flowtime minimization" (SPV rule)
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod annealing;
mod codec;
mod config;
mod fitness;
mod runner;
mod swarm;
mod types;

pub use annealing::{metropolis_accept, Annealing};
pub use codec::{decode, encode, is_permutation};
pub use config::QpsoConfig;
pub use fitness::{Evaluation, FitnessEvaluator, SATISFACTION_SCALE};
pub use runner::{QpsoRunner, RouteResult, RouteStop};
pub use swarm::{GlobalBest, MoveStats, Particle, Swarm, MIN_UNIFORM};
pub use types::{optimize, RoutingProblem};
