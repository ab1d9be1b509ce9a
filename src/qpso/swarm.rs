//! Swarm state and the delta-potential-well position update.

use super::annealing::metropolis_accept;
use super::fitness::{Evaluation, FitnessEvaluator};
use crate::oracle::EstimateCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Floor for the uniform draw inside `ln(1/u)`.
pub const MIN_UNIFORM: f64 = 1e-12;

/// One candidate route, encoded as a real-valued position vector.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current position; decoded with the SPV rule.
    pub position: Vec<f64>,

    /// Objective of `position` at the last evaluation.
    pub objective: f64,

    /// Best position this particle has held.
    pub best_position: Vec<f64>,

    /// Evaluation of `best_position` when it was recorded.
    pub best_evaluation: Evaluation,
}

impl Particle {
    fn new(position: Vec<f64>) -> Self {
        Self {
            best_position: position.clone(),
            position,
            objective: f64::INFINITY,
            best_evaluation: Evaluation::REJECTED,
        }
    }

    pub fn best_objective(&self) -> f64 {
        self.best_evaluation.objective
    }
}

/// Best position found by any particle.
#[derive(Debug, Clone)]
pub struct GlobalBest {
    pub position: Vec<f64>,
    pub evaluation: Evaluation,
}

/// Accepted and improving move counts of one move step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveStats {
    pub accepted: usize,
    pub improving: usize,
}

impl std::ops::AddAssign for MoveStats {
    fn add_assign(&mut self, rhs: Self) {
        self.accepted += rhs.accepted;
        self.improving += rhs.improving;
    }
}

/// Population of particles plus the shared global best.
///
/// A generation runs [`Swarm::evaluate`], [`Swarm::update_global_best`],
/// then [`Swarm::move_particles`]. The global best is written only by
/// `update_global_best`; the move step reads an immutable snapshot of it.
#[derive(Debug, Clone)]
pub struct Swarm {
    particles: Vec<Particle>,
    global_best: Option<GlobalBest>,
}

impl Swarm {
    /// Creates `count` particles of dimension `dim`.
    ///
    /// The first particles take the positions in `seeded` (each of length
    /// `dim`); the rest are drawn uniformly from `[-spread, spread]`.
    pub fn initialize<R: Rng>(
        count: usize,
        dim: usize,
        spread: f64,
        seeded: &[Vec<f64>],
        rng: &mut R,
    ) -> Self {
        let particles = (0..count)
            .map(|i| match seeded.get(i) {
                Some(position) if position.len() == dim => Particle::new(position.clone()),
                _ => Particle::new((0..dim).map(|_| rng.random_range(-spread..=spread)).collect()),
            })
            .collect();

        Self {
            particles,
            global_best: None,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn global_best(&self) -> Option<&GlobalBest> {
        self.global_best.as_ref()
    }

    /// Evaluates every current position and updates personal bests on
    /// strict improvement.
    pub fn evaluate(&mut self, evaluator: &FitnessEvaluator, cache: &EstimateCache, parallel: bool) {
        let update = |p: &mut Particle| {
            let eval = evaluator.evaluate_position(&p.position, cache);
            p.objective = eval.objective;
            if eval.objective < p.best_objective() {
                p.best_position.clone_from(&p.position);
                p.best_evaluation = eval;
            }
        };

        if parallel {
            self.particles.par_iter_mut().for_each(update);
        } else {
            self.particles.iter_mut().for_each(update);
        }
    }

    /// Promotes the best personal best to global best if strictly better.
    ///
    /// Returns `true` when the global best changed.
    pub fn update_global_best(&mut self) -> bool {
        let Some(leader) = self
            .particles
            .iter()
            .min_by(|a, b| a.best_objective().total_cmp(&b.best_objective()))
        else {
            return false;
        };

        let improved = self
            .global_best
            .as_ref()
            .is_none_or(|g| leader.best_objective() < g.evaluation.objective);

        if improved {
            self.global_best = Some(GlobalBest {
                position: leader.best_position.clone(),
                evaluation: leader.best_evaluation,
            });
        }
        improved
    }

    /// Elementwise mean of all personal-best positions.
    pub fn mean_best(&self) -> Vec<f64> {
        let Some(first) = self.particles.first() else {
            return Vec::new();
        };
        let mut mean = vec![0.0; first.best_position.len()];
        for p in &self.particles {
            for (m, x) in mean.iter_mut().zip(&p.best_position) {
                *m += x;
            }
        }
        let count = self.particles.len() as f64;
        mean.iter_mut().for_each(|m| *m /= count);
        mean
    }

    /// Proposes a quantum-behaved move for every particle and applies the
    /// Metropolis test at `temperature`.
    ///
    /// Each particle draws from its own RNG seeded from `rng`, so the
    /// outcome does not depend on `parallel`. Rejected moves leave the
    /// particle where it was. Does nothing before the first global best.
    pub fn move_particles<R: Rng>(
        &mut self,
        evaluator: &FitnessEvaluator,
        cache: &EstimateCache,
        alpha: f64,
        temperature: f64,
        parallel: bool,
        rng: &mut R,
    ) -> MoveStats {
        let Some(global_best) = self.global_best.as_ref() else {
            return MoveStats::default();
        };
        let mean_best = self.mean_best();
        let global_best = global_best.position.as_slice();
        let seeds: Vec<u64> = (0..self.particles.len()).map(|_| rng.random()).collect();

        let step = |(p, &seed): (&mut Particle, &u64)| -> MoveStats {
            let mut prng = StdRng::seed_from_u64(seed);
            let candidate = propose(p, global_best, &mean_best, alpha, &mut prng);
            let eval = evaluator.evaluate_position(&candidate, cache);
            let delta = eval.objective - p.objective;

            if metropolis_accept(delta, temperature, &mut prng) {
                p.position = candidate;
                p.objective = eval.objective;
                MoveStats {
                    accepted: 1,
                    improving: usize::from(delta < 0.0),
                }
            } else {
                MoveStats::default()
            }
        };

        let mut stats = MoveStats::default();
        if parallel {
            let per_particle: Vec<MoveStats> = self
                .particles
                .par_iter_mut()
                .zip(seeds.par_iter())
                .map(step)
                .collect();
            per_particle.into_iter().for_each(|s| stats += s);
        } else {
            self.particles
                .iter_mut()
                .zip(seeds.iter())
                .for_each(|pair| stats += step(pair));
        }
        stats
    }
}

/// Delta-potential-well update, one dimension at a time:
///
/// `p = phi * pbest + (1 - phi) * gbest`,
/// `x' = p ± alpha * |mbest - x| * ln(1/u)`.
fn propose<R: Rng>(
    particle: &Particle,
    global_best: &[f64],
    mean_best: &[f64],
    alpha: f64,
    rng: &mut R,
) -> Vec<f64> {
    particle
        .position
        .iter()
        .zip(&particle.best_position)
        .zip(global_best.iter().zip(mean_best))
        .map(|((&x, &pbest), (&gbest, &mbest))| {
            let phi: f64 = rng.random();
            let attractor = phi * pbest + (1.0 - phi) * gbest;
            let u = rng.random::<f64>().max(MIN_UNIFORM);
            let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            attractor + sign * alpha * (mbest - x).abs() * (1.0 / u).ln()
        })
        .collect()
}
