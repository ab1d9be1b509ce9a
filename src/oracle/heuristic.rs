//! Closed-form cost oracle for use without trained forecasters.
//!
//! Uses expected speeds per road class instead of sampled ones, so every
//! answer is deterministic for a given destination, context and distance.

use super::context::TripContext;
use super::types::{CostOracle, Estimate};
use crate::error::OracleError;
use crate::fuzzy::FuzzyEngine;

const FIXED_OPERATION_COST: f64 = 40.0;
const FUEL_PRICE: f64 = 90.0;
const RUNNING_COST_PER_MIN: f64 = 1.0;
const WET_RUNNING_SURCHARGE_PER_MIN: f64 = 0.5;
const PRODUCT_VALUE: f64 = 1000.0;
const WET_DAMAGE_PROBABILITY: f64 = 0.02;
const LATE_PENALTY_PER_MIN: f64 = 5.0;
const PROMISE_SLACK: f64 = 1.3;
const MIN_SPEED_KMH: f64 = 5.0;

/// Road class inferred from a destination name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadClass {
    Highway,
    ItCorridor,
    Core,
}

impl RoadClass {
    pub fn classify(name: &str) -> Self {
        if ["Highway", "Expressway", "NH"].iter().any(|k| name.contains(k)) {
            RoadClass::Highway
        } else if ["IT", "HITEC", "Gachibowli"].iter().any(|k| name.contains(k)) {
            RoadClass::ItCorridor
        } else {
            RoadClass::Core
        }
    }

    /// Free-flow speed in km/h.
    pub fn free_flow_speed(self) -> f64 {
        match self {
            RoadClass::Highway => 85.0,
            RoadClass::ItCorridor => 60.0,
            RoadClass::Core => 45.0,
        }
    }

    /// Expected operating speed in km/h, never above free flow.
    pub fn operating_speed(self, is_peak: bool) -> f64 {
        let free_flow = self.free_flow_speed();
        let target = match (self, is_peak) {
            (RoadClass::Highway, true) => 62.5,
            (RoadClass::ItCorridor, true) => 35.0,
            (RoadClass::Core, true) => 30.0,
            (RoadClass::Core, false) => 50.0,
            (_, false) => free_flow - 2.5,
        };
        target.clamp(MIN_SPEED_KMH, free_flow)
    }
}

/// Vehicle characteristics that drive running cost and spoilage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleProfile {
    pub fuel_efficiency_l_per_100km: f64,
    pub cooling_efficiency_percent: f64,
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self {
            fuel_efficiency_l_per_100km: 15.0,
            cooling_efficiency_percent: 95.0,
        }
    }
}

/// Full derivation of one heuristic estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripBreakdown {
    pub speed_kmh: f64,
    pub traffic_index: f64,
    pub travel_time: f64,
    pub time_deviation: f64,
    pub transport_cost: f64,
    pub damage_cost: f64,
    pub penalty_cost: f64,
    pub quality_score: f64,
    pub satisfaction: f64,
}

impl TripBreakdown {
    pub fn total_cost(&self) -> f64 {
        self.transport_cost + self.damage_cost + self.penalty_cost
    }
}

/// Oracle computing cost, time and satisfaction from road class and distance.
#[derive(Debug, Clone, Default)]
pub struct HeuristicOracle {
    vehicle: VehicleProfile,
    engine: FuzzyEngine,
}

impl HeuristicOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vehicle(mut self, vehicle: VehicleProfile) -> Self {
        self.vehicle = vehicle;
        self
    }

    /// Computes every intermediate quantity of the estimate.
    pub fn breakdown(&self, destination: &str, context: &TripContext, distance_km: f64) -> TripBreakdown {
        let class = RoadClass::classify(destination);
        let free_flow = class.free_flow_speed();
        let speed = class.operating_speed(context.is_peak);

        let traffic_index = (1.0 - speed / free_flow) * 100.0;
        let travel_time = distance_km / speed * 60.0;
        let promised_time = distance_km / free_flow * 60.0 * PROMISE_SLACK;
        let time_deviation = travel_time - promised_time;

        let cooling = self.vehicle.cooling_efficiency_percent;

        let mut running_per_min = (self.vehicle.fuel_efficiency_l_per_100km / 100.0)
            * (speed / 60.0)
            * FUEL_PRICE
            + RUNNING_COST_PER_MIN;
        if context.wet_weather {
            running_per_min += WET_RUNNING_SURCHARGE_PER_MIN;
        }
        let transport_cost = FIXED_OPERATION_COST + running_per_min * travel_time;

        let mut damage_probability = travel_time / 600.0 + traffic_index / 800.0;
        if cooling < 90.0 {
            damage_probability += (90.0 - cooling) * 0.005;
        }
        if context.wet_weather {
            damage_probability += WET_DAMAGE_PROBABILITY;
        }
        let damage_cost = PRODUCT_VALUE * damage_probability.min(1.0);

        let penalty_cost = LATE_PENALTY_PER_MIN * time_deviation.max(0.0);

        let mut quality_score = 100.0 - traffic_index / 4.0;
        if cooling < 95.0 {
            quality_score -= (95.0 - cooling) * 1.5;
        }
        if context.wet_weather {
            quality_score -= 15.0;
        }
        if travel_time > 30.0 {
            quality_score -= (travel_time - 30.0) / 5.0 * 2.0;
        }
        let quality_score = quality_score.clamp(0.0, 100.0);

        TripBreakdown {
            speed_kmh: speed,
            traffic_index,
            travel_time,
            time_deviation,
            transport_cost,
            damage_cost,
            penalty_cost,
            quality_score,
            satisfaction: self.engine.compute(time_deviation, quality_score),
        }
    }
}

impl CostOracle for HeuristicOracle {
    fn estimate(
        &self,
        destination: &str,
        context: &TripContext,
        distance_km: f64,
    ) -> Result<Estimate, OracleError> {
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Err(OracleError::Unavailable {
                destination: destination.to_string(),
                reason: format!("distance must be positive, got {distance_km}"),
            });
        }
        let b = self.breakdown(destination, context, distance_km);
        Ok(Estimate::new(b.total_cost(), b.travel_time, b.satisfaction).with_traffic_index(b.traffic_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak() -> TripContext {
        TripContext {
            is_peak: true,
            ..TripContext::default()
        }
    }

    #[test]
    fn test_classify_roads() {
        assert_eq!(RoadClass::classify("ORR Expressway"), RoadClass::Highway);
        assert_eq!(RoadClass::classify("NH44 Medchal"), RoadClass::Highway);
        assert_eq!(RoadClass::classify("Gachibowli"), RoadClass::ItCorridor);
        assert_eq!(RoadClass::classify("HITEC City"), RoadClass::ItCorridor);
        assert_eq!(RoadClass::classify("Uppal"), RoadClass::Core);
    }

    #[test]
    fn test_off_peak_core_trip() {
        let oracle = HeuristicOracle::new();
        let b = oracle.breakdown("Uppal", &TripContext::default(), 10.0);

        // Core off-peak target exceeds free flow and is clamped to 45 km/h.
        assert!((b.speed_kmh - 45.0).abs() < 1e-12);
        assert!(b.traffic_index.abs() < 1e-12);
        assert!((b.travel_time - 40.0 / 3.0).abs() < 1e-9);
        assert!((b.time_deviation + 4.0).abs() < 1e-9);
        assert_eq!(b.penalty_cost, 0.0);
        assert!((b.quality_score - 100.0).abs() < 1e-12);

        let expected_transport = 40.0 + (0.15 * 0.75 * 90.0 + 1.0) * (40.0 / 3.0);
        assert!((b.transport_cost - expected_transport).abs() < 1e-9);
        assert!(b.satisfaction >= 8.0);
    }

    #[test]
    fn test_peak_is_slower_and_costlier() {
        let oracle = HeuristicOracle::new();
        let off = oracle.estimate("Uppal", &TripContext::default(), 10.0).unwrap();
        let on = oracle.estimate("Uppal", &peak(), 10.0).unwrap();
        assert!(on.time > off.time);
        assert!(on.cost > off.cost);
        assert!(on.traffic_index > off.traffic_index);
    }

    #[test]
    fn test_wet_weather_hurts() {
        let oracle = HeuristicOracle::new();
        let dry = oracle.breakdown("Uppal", &peak(), 10.0);
        let wet = oracle.breakdown("Uppal", &peak().with_wet_weather(true), 10.0);
        assert!(wet.total_cost() > dry.total_cost());
        assert!(wet.quality_score < dry.quality_score);
    }

    #[test]
    fn test_poor_cooling_raises_damage() {
        let warm = HeuristicOracle::new().with_vehicle(VehicleProfile {
            cooling_efficiency_percent: 80.0,
            ..VehicleProfile::default()
        });
        let base = HeuristicOracle::new().breakdown("Uppal", &peak(), 10.0);
        let b = warm.breakdown("Uppal", &peak(), 10.0);
        assert!(b.damage_cost > base.damage_cost);
        assert!(b.quality_score < base.quality_score);
    }

    #[test]
    fn test_invalid_distance_is_unavailable() {
        let oracle = HeuristicOracle::new();
        let err = oracle.estimate("Uppal", &TripContext::default(), 0.0).unwrap_err();
        assert!(matches!(err, OracleError::Unavailable { .. }));
        assert!(oracle.estimate("Uppal", &TripContext::default(), f64::NAN).is_err());
    }
}
