//! Weighted cost / satisfaction objective.

use super::codec::decode;
use super::config::QpsoConfig;
use crate::oracle::EstimateCache;

/// Upper end of the satisfaction scale for one visit.
pub const SATISFACTION_SCALE: f64 = 10.0;

/// Objective value of a route and the totals it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Weighted objective. Lower is better.
    pub objective: f64,
    pub total_cost: f64,
    pub total_satisfaction: f64,
    pub total_time: f64,
}

impl Evaluation {
    /// Evaluation of a move that could not be scored; never accepted.
    pub const REJECTED: Evaluation = Evaluation {
        objective: f64::INFINITY,
        total_cost: f64::INFINITY,
        total_satisfaction: 0.0,
        total_time: f64::INFINITY,
    };
}

/// Scores visiting orders against one generation's estimate cache.
///
/// `objective = w_cost * cost / max_cost + w_sat * (1 - satisfaction / max_sat)`
/// where both maxima scale with the destination count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessEvaluator {
    cost_weight: f64,
    satisfaction_weight: f64,
    max_total_cost: f64,
    max_total_satisfaction: f64,
}

impl FitnessEvaluator {
    pub fn new(config: &QpsoConfig, destination_count: usize) -> Self {
        let n = destination_count as f64;
        Self {
            cost_weight: config.cost_weight,
            satisfaction_weight: config.satisfaction_weight,
            max_total_cost: config.max_cost_per_destination * n,
            max_total_satisfaction: SATISFACTION_SCALE * n,
        }
    }

    /// Evaluates a decoded order. Pure: depends only on `order` and `cache`.
    pub fn evaluate_order(&self, order: &[usize], cache: &EstimateCache) -> Evaluation {
        if order.is_empty() {
            return Evaluation {
                objective: 0.0,
                total_cost: 0.0,
                total_satisfaction: 0.0,
                total_time: 0.0,
            };
        }

        let (total_cost, total_satisfaction, total_time) =
            order.iter().fold((0.0, 0.0, 0.0), |(c, s, t), &i| {
                let est = cache.get(i);
                (c + est.cost, s + est.satisfaction, t + est.time)
            });

        let normalized_cost = total_cost / self.max_total_cost;
        let normalized_satisfaction = total_satisfaction / self.max_total_satisfaction;

        Evaluation {
            objective: self.cost_weight * normalized_cost
                + self.satisfaction_weight * (1.0 - normalized_satisfaction),
            total_cost,
            total_satisfaction,
            total_time,
        }
    }

    /// Decodes `position` with the SPV rule and evaluates the order.
    ///
    /// Positions with non-finite coordinates are scored as
    /// [`Evaluation::REJECTED`].
    pub fn evaluate_position(&self, position: &[f64], cache: &EstimateCache) -> Evaluation {
        if !position.iter().all(|x| x.is_finite()) {
            return Evaluation::REJECTED;
        }
        self.evaluate_order(&decode(position), cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::Estimate;

    fn constant_cache(n: usize) -> EstimateCache {
        EstimateCache::from_estimates(vec![Estimate::new(100.0, 10.0, 7.0); n])
    }

    #[test]
    fn test_constant_estimates_objective() {
        let evaluator = FitnessEvaluator::new(&QpsoConfig::default(), 6);
        let eval = evaluator.evaluate_order(&[0, 1, 2, 3, 4, 5], &constant_cache(6));

        // 0.7 * 600/3000 + 0.3 * (1 - 42/60)
        assert!((eval.objective - 0.23).abs() < 1e-12);
        assert!((eval.total_cost - 600.0).abs() < 1e-12);
        assert!((eval.total_satisfaction - 42.0).abs() < 1e-12);
        assert!((eval.total_time - 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_objective_is_order_invariant() {
        let cache = EstimateCache::from_estimates(vec![
            Estimate::new(50.0, 12.0, 9.0),
            Estimate::new(500.0, 30.0, 1.0),
            Estimate::new(210.0, 18.0, 6.5),
        ]);
        let evaluator = FitnessEvaluator::new(&QpsoConfig::default(), 3);
        let reference = evaluator.evaluate_order(&[0, 1, 2], &cache);
        for order in [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
            let eval = evaluator.evaluate_order(&order, &cache);
            assert!((eval.objective - reference.objective).abs() < 1e-12);
        }
    }

    #[test]
    fn test_two_destination_hand_computed() {
        let cache = EstimateCache::from_estimates(vec![
            Estimate::new(50.0, 10.0, 9.0),
            Estimate::new(500.0, 10.0, 1.0),
        ]);
        let evaluator = FitnessEvaluator::new(&QpsoConfig::default().with_weights(0.7, 0.3), 2);
        let eval = evaluator.evaluate_order(&[1, 0], &cache);
        // 0.7 * 550/1000 + 0.3 * (1 - 10/20)
        assert!((eval.objective - 0.535).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_position_decodes_and_rejects_non_finite() {
        let evaluator = FitnessEvaluator::new(&QpsoConfig::default(), 6);
        let cache = constant_cache(6);
        let eval = evaluator.evaluate_position(&[3.0, 1.0, -2.0, 0.5, 9.0, -7.0], &cache);
        assert!((eval.objective - 0.23).abs() < 1e-12);

        let broken = evaluator.evaluate_position(&[0.0, f64::INFINITY, 1.0, 2.0, 3.0, 4.0], &cache);
        assert_eq!(broken.objective, f64::INFINITY);
    }

    #[test]
    fn test_empty_order() {
        let evaluator = FitnessEvaluator::new(&QpsoConfig::default(), 0);
        let eval = evaluator.evaluate_order(&[], &EstimateCache::from_estimates(vec![]));
        assert_eq!(eval.objective, 0.0);
    }
}
