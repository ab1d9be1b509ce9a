//! QPSO-SA generation loop.

use super::annealing::Annealing;
use super::codec::{decode, encode, is_permutation};
use super::config::QpsoConfig;
use super::fitness::{Evaluation, FitnessEvaluator};
use super::swarm::{MoveStats, Swarm};
use super::types::RoutingProblem;
use crate::error::{QpsoError, Result};
use crate::oracle::{CostOracle, EstimateCache, UNAVAILABLE_VEHICLE_ID};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One visit in the optimized route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStop {
    pub destination: String,
    /// Display vehicle id; does not affect the objective.
    pub vehicle_id: String,
}

/// Result of a QPSO-SA run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Destinations in visiting order.
    pub stops: Vec<RouteStop>,

    /// Total cost of the best route.
    pub total_cost: f64,

    /// Total satisfaction of the best route.
    pub total_satisfaction: f64,

    /// Total traversal time of the best route, in minutes.
    pub total_time: f64,

    /// Global-best objective after each completed generation.
    pub history: Vec<f64>,

    /// Objective of the best route, unmodified.
    pub final_objective: f64,

    /// Number of completed generations.
    pub generations: usize,

    /// Candidate moves accepted by the annealing layer.
    pub accepted_moves: usize,

    /// Accepted moves that strictly improved the particle's objective.
    pub improving_moves: usize,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

impl RouteResult {
    /// Destination identifiers in visiting order.
    pub fn ordered_destinations(&self) -> Vec<&str> {
        self.stops.iter().map(|s| s.destination.as_str()).collect()
    }
}

/// Executes the hybrid quantum-swarm / simulated-annealing optimizer.
///
/// # Usage
///
/// ```
/// use qpso_route::oracle::{Estimate, TableOracle};
/// use qpso_route::qpso::{QpsoConfig, QpsoRunner, RoutingProblem};
///
/// let oracle = TableOracle::new()
///     .with_entry("Uppal", Estimate::new(180.0, 14.0, 8.0))
///     .with_entry("Kompally", Estimate::new(260.0, 22.0, 6.5))
///     .with_entry("Medchal", Estimate::new(310.0, 27.0, 5.0));
/// let problem = RoutingProblem::from_ids(["Uppal", "Kompally", "Medchal"], oracle);
/// let config = QpsoConfig::default().with_generations(20).with_seed(42);
///
/// let result = QpsoRunner::run(&problem, &config).unwrap();
/// assert_eq!(result.stops.len(), 3);
/// assert_eq!(result.history.len(), 20);
/// ```
pub struct QpsoRunner;

impl QpsoRunner {
    /// Runs the optimizer for the configured generation budget.
    pub fn run<O: CostOracle>(problem: &RoutingProblem<O>, config: &QpsoConfig) -> Result<RouteResult> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the optimizer with an optional cancellation token.
    ///
    /// The flag is polled between generations, so at least one generation
    /// always completes. A cancelled run reports the global best of the
    /// last completed generation.
    pub fn run_with_cancel<O: CostOracle>(
        problem: &RoutingProblem<O>,
        config: &QpsoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RouteResult> {
        config.validate()?;

        let n = problem.destinations().len();
        let seeded = problem
            .seed_orders()
            .iter()
            .map(|order| {
                if order.len() == n && is_permutation(order) {
                    encode(order, config.initial_spread).ok_or_else(|| invalid_seed(n, order))
                } else {
                    Err(invalid_seed(n, order))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let evaluator = FitnessEvaluator::new(config, n);

        if n <= 1 {
            log::info!("qpso: {n} destination(s), returning trivial route");
            let cache = EstimateCache::fetch(problem.oracle(), problem.destinations(), problem.context(), false);
            let order: Vec<usize> = (0..n).collect();
            let evaluation = evaluator.evaluate_order(&order, &cache);
            return Ok(RouteResult {
                stops: build_stops(problem, &order, Some(&cache), &mut rng),
                total_cost: evaluation.total_cost,
                total_satisfaction: evaluation.total_satisfaction,
                total_time: evaluation.total_time,
                history: Vec::new(),
                final_objective: evaluation.objective,
                generations: 0,
                accepted_moves: 0,
                improving_moves: 0,
                final_temperature: config.initial_temperature,
                cancelled: false,
            });
        }

        log::info!(
            "qpso: {} destinations, {} particles, {} generations",
            n,
            config.particle_count,
            config.generation_count
        );

        let mut swarm = Swarm::initialize(
            config.particle_count,
            n,
            config.initial_spread,
            &seeded,
            &mut rng,
        );
        let mut annealing = Annealing::new(config.initial_temperature, config.cooling_factor);

        let mut history = Vec::with_capacity(config.generation_count);
        let mut moves = MoveStats::default();
        let mut last_cache: Option<EstimateCache> = None;
        let mut cancelled = false;

        for generation in 1..=config.generation_count {
            if generation > 1 {
                if let Some(ref flag) = cancel {
                    if flag.load(Ordering::Relaxed) {
                        cancelled = true;
                        break;
                    }
                }
            }

            // Oracle queries happen here only, never inside the particle loop.
            let cache = EstimateCache::fetch(
                problem.oracle(),
                problem.destinations(),
                problem.context(),
                config.parallel,
            );

            swarm.evaluate(&evaluator, &cache, config.parallel);
            swarm.update_global_best();

            let alpha = config.alpha_at(generation);
            let temperature = annealing.temperature();
            moves += swarm.move_particles(&evaluator, &cache, alpha, temperature, config.parallel, &mut rng);
            annealing.cool();

            let best = swarm
                .global_best()
                .map_or(f64::INFINITY, |g| g.evaluation.objective);
            history.push(best);

            log::debug!(
                "generation {generation}/{}: alpha={alpha:.3} T={temperature:.4} best={best:.6}",
                config.generation_count
            );

            last_cache = Some(cache);
        }

        let (order, evaluation) = match swarm.global_best() {
            Some(best) => (decode(&best.position), best.evaluation),
            None => ((0..n).collect(), Evaluation::REJECTED),
        };

        log::info!(
            "qpso: finished after {} generations, objective {:.6}, {} accepted / {} improving moves{}",
            history.len(),
            evaluation.objective,
            moves.accepted,
            moves.improving,
            if cancelled { " (cancelled)" } else { "" }
        );

        Ok(RouteResult {
            stops: build_stops(problem, &order, last_cache.as_ref(), &mut rng),
            total_cost: evaluation.total_cost,
            total_satisfaction: evaluation.total_satisfaction,
            total_time: evaluation.total_time,
            generations: history.len(),
            history,
            final_objective: evaluation.objective,
            accepted_moves: moves.accepted,
            improving_moves: moves.improving,
            final_temperature: annealing.temperature(),
            cancelled,
        })
    }
}

fn invalid_seed(expected: usize, order: &[usize]) -> QpsoError {
    QpsoError::InvalidSeedOrder {
        expected,
        order: order.to_vec(),
    }
}

/// Attaches display vehicle ids to the decoded order.
fn build_stops<O: CostOracle>(
    problem: &RoutingProblem<O>,
    order: &[usize],
    cache: Option<&EstimateCache>,
    rng: &mut StdRng,
) -> Vec<RouteStop> {
    order
        .iter()
        .map(|&i| {
            let destination = problem.destinations()[i].id.clone();
            let fell_back = cache.is_some_and(|c| c.is_fallback(i));
            let vehicle_id = if fell_back {
                UNAVAILABLE_VEHICLE_ID.to_string()
            } else {
                problem.vehicles().pick(&destination, &mut *rng)
            };
            RouteStop {
                destination,
                vehicle_id,
            }
        })
        .collect()
}
