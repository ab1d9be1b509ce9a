//! Metropolis acceptance and geometric cooling.

use rand::Rng;

/// Temperature state. Monotonically non-increasing; never reset mid-run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annealing {
    temperature: f64,
    cooling_factor: f64,
}

impl Annealing {
    pub fn new(initial_temperature: f64, cooling_factor: f64) -> Self {
        Self {
            temperature: initial_temperature,
            cooling_factor,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Applies one geometric cooling step: `T <- factor * T`.
    pub fn cool(&mut self) {
        self.temperature *= self.cooling_factor;
    }
}

/// Metropolis criterion.
///
/// Improvements (`delta < 0`) are always accepted. Otherwise the move is
/// accepted with probability `exp(-delta / temperature)`. A non-positive
/// temperature or a non-finite `delta` rejects every non-improving move.
pub fn metropolis_accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta < 0.0 {
        return true;
    }
    if temperature <= 0.0 || !delta.is_finite() {
        return false;
    }
    let probability = (-delta / temperature).exp();
    rng.random_range(0.0..1.0) < probability
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn acceptance_ratio(delta: f64, temperature: f64, trials: usize, seed: u64) -> f64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let accepted = (0..trials)
            .filter(|_| metropolis_accept(delta, temperature, &mut rng))
            .count();
        accepted as f64 / trials as f64
    }

    #[test]
    fn test_improvement_always_accepted() {
        assert_eq!(acceptance_ratio(-1e-9, 0.0, 1000, 1), 1.0);
        assert_eq!(acceptance_ratio(-5.0, 1e-300, 1000, 2), 1.0);
    }

    #[test]
    fn test_equal_cost_accepted_while_warm() {
        assert_eq!(acceptance_ratio(0.0, 1.0, 1000, 3), 1.0);
    }

    #[test]
    fn test_metropolis_probability_matches() {
        let ratio = acceptance_ratio(1.0, 1.0, 20_000, 42);
        let expected = (-1.0f64).exp();
        assert!(
            (ratio - expected).abs() < 0.02,
            "expected acceptance near {expected}, got {ratio}"
        );
    }

    #[test]
    fn test_high_temperature_accepts_uphill() {
        let ratio = acceptance_ratio(1.0, 1e6, 10_000, 7);
        assert!(ratio > 0.99, "expected near-total acceptance, got {ratio}");
    }

    #[test]
    fn test_cold_limit_is_greedy() {
        let delta = 0.05;
        let mut annealing = Annealing::new(1000.0, 0.95);
        while annealing.temperature() >= delta / 50.0 {
            annealing.cool();
        }
        let ratio = acceptance_ratio(delta, annealing.temperature(), 100_000, 9);
        assert_eq!(ratio, 0.0, "uphill moves accepted at T = {}", annealing.temperature());
    }

    #[test]
    fn test_non_finite_delta_rejected() {
        assert_eq!(acceptance_ratio(f64::INFINITY, 1e9, 1000, 4), 0.0);
        assert_eq!(acceptance_ratio(f64::NAN, 1e9, 1000, 5), 0.0);
    }

    #[test]
    fn test_cooling_is_monotone() {
        let mut annealing = Annealing::new(1000.0, 0.95);
        let mut last = annealing.temperature();
        for _ in 0..200 {
            annealing.cool();
            assert!(annealing.temperature() <= last);
            last = annealing.temperature();
        }
        assert!((Annealing::new(1000.0, 0.95).temperature() - 1000.0).abs() < 1e-12);
    }
}
