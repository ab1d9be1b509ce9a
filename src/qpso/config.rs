//! QPSO-SA configuration.

use crate::error::QpsoError;

/// Configuration for the hybrid quantum-swarm / annealing optimizer.
///
/// # Examples
///
/// ```
/// use qpso_route::qpso::QpsoConfig;
///
/// let config = QpsoConfig::default()
///     .with_particles(40)
///     .with_generations(200)
///     .with_alpha(1.0, 0.5)
///     .with_initial_temperature(1000.0)
///     .with_cooling_factor(0.95)
///     .with_weights(0.7, 0.3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QpsoConfig {
    /// Number of particles in the swarm.
    pub particle_count: usize,

    /// Generation budget. The run always executes exactly this many
    /// generations unless cancelled.
    pub generation_count: usize,

    /// Contraction-expansion coefficient at the first generation.
    pub alpha_start: f64,

    /// Contraction-expansion coefficient at the last generation.
    pub alpha_end: f64,

    /// Annealing temperature for the first generation.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1), applied once per generation.
    pub cooling_factor: f64,

    /// Weight of the normalized total cost.
    pub cost_weight: f64,

    /// Weight of the normalized satisfaction shortfall.
    pub satisfaction_weight: f64,

    /// Largest plausible cost of one visit; scaled by the destination count
    /// to normalize the route's total cost.
    pub max_cost_per_destination: f64,

    /// Initial positions are drawn uniformly from `[-spread, spread]`.
    pub initial_spread: f64,

    /// Whether to evaluate and move particles in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for QpsoConfig {
    fn default() -> Self {
        Self {
            particle_count: 30,
            generation_count: 100,
            alpha_start: 1.0,
            alpha_end: 0.5,
            initial_temperature: 1000.0,
            cooling_factor: 0.95,
            cost_weight: 0.7,
            satisfaction_weight: 0.3,
            max_cost_per_destination: 500.0,
            initial_spread: 10.0,
            parallel: true,
            seed: None,
        }
    }
}

impl QpsoConfig {
    pub fn with_particles(mut self, n: usize) -> Self {
        self.particle_count = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generation_count = n;
        self
    }

    pub fn with_alpha(mut self, start: f64, end: f64) -> Self {
        self.alpha_start = start;
        self.alpha_end = end;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_factor(mut self, factor: f64) -> Self {
        self.cooling_factor = factor;
        self
    }

    pub fn with_weights(mut self, cost: f64, satisfaction: f64) -> Self {
        self.cost_weight = cost;
        self.satisfaction_weight = satisfaction;
        self
    }

    pub fn with_max_cost_per_destination(mut self, cost: f64) -> Self {
        self.max_cost_per_destination = cost;
        self
    }

    pub fn with_initial_spread(mut self, spread: f64) -> Self {
        self.initial_spread = spread;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Contraction-expansion coefficient for 1-based `generation`.
    ///
    /// Decreases linearly and reaches `alpha_end` at the final generation.
    pub fn alpha_at(&self, generation: usize) -> f64 {
        let progress = generation as f64 / self.generation_count.max(1) as f64;
        self.alpha_start - (self.alpha_start - self.alpha_end) * progress
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), QpsoError> {
        let invalid =
            |msg: String| -> Result<(), QpsoError> { Err(QpsoError::InvalidConfiguration(msg)) };

        if self.particle_count == 0 {
            return invalid("particle_count must be at least 1".into());
        }
        if self.generation_count == 0 {
            return invalid("generation_count must be at least 1".into());
        }
        if !(self.alpha_start.is_finite() && self.alpha_start > 0.0)
            || !(self.alpha_end.is_finite() && self.alpha_end > 0.0)
        {
            return invalid(format!(
                "alpha bounds must be positive, got {} -> {}",
                self.alpha_start, self.alpha_end
            ));
        }
        if self.alpha_end > self.alpha_start {
            return invalid(format!(
                "alpha_end ({}) must not exceed alpha_start ({})",
                self.alpha_end, self.alpha_start
            ));
        }
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return invalid(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            ));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return invalid(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            ));
        }
        if !(self.cost_weight.is_finite() && self.cost_weight > 0.0)
            || !(self.satisfaction_weight.is_finite() && self.satisfaction_weight > 0.0)
        {
            return invalid(format!(
                "objective weights must both be positive, got {} / {}",
                self.cost_weight, self.satisfaction_weight
            ));
        }
        if !(self.max_cost_per_destination.is_finite() && self.max_cost_per_destination > 0.0) {
            return invalid(format!(
                "max_cost_per_destination must be positive, got {}",
                self.max_cost_per_destination
            ));
        }
        if !(self.initial_spread.is_finite() && self.initial_spread > 0.0) {
            return invalid(format!(
                "initial_spread must be positive, got {}",
                self.initial_spread
            ));
        }
        Ok(())
    }
}
