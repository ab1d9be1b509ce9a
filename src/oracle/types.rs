//! Cost oracle contract and the per-generation estimate cache.

use super::context::TripContext;
use crate::error::OracleError;
use rayon::prelude::*;
use std::collections::HashMap;

/// Estimate substituted whenever the oracle fails or returns unusable data.
pub const FALLBACK_ESTIMATE: Estimate = Estimate {
    traffic_index: 50.0,
    time: 20.0,
    cost: 500.0,
    satisfaction: 5.0,
};

/// Default road distance per destination when none is known.
pub const DEFAULT_DISTANCE_KM: f64 = 10.0;

/// Predicted outcome of visiting one destination.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate {
    /// Congestion index, 0 (free flow) to 100.
    pub traffic_index: f64,
    /// Traversal time in minutes.
    pub time: f64,
    /// Monetary distribution cost.
    pub cost: f64,
    /// Customer satisfaction, 0 to 10.
    pub satisfaction: f64,
}

impl Estimate {
    pub fn new(cost: f64, time: f64, satisfaction: f64) -> Self {
        Self {
            traffic_index: FALLBACK_ESTIMATE.traffic_index,
            time,
            cost,
            satisfaction,
        }
    }

    pub fn with_traffic_index(mut self, traffic_index: f64) -> Self {
        self.traffic_index = traffic_index;
        self
    }

    fn is_usable(&self) -> bool {
        self.traffic_index.is_finite()
            && self.time.is_finite()
            && self.cost.is_finite()
            && self.satisfaction.is_finite()
    }
}

/// A delivery destination.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination {
    /// External identifier (service area or route name).
    pub id: String,
    /// Road distance handed to the oracle.
    pub distance_km: f64,
}

impl Destination {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            distance_km: DEFAULT_DISTANCE_KM,
        }
    }

    pub fn with_distance(mut self, distance_km: f64) -> Self {
        self.distance_km = distance_km;
        self
    }
}

/// Supplies per-destination cost, time and satisfaction estimates.
///
/// Implementations typically wrap forecasting models. The optimizer calls
/// [`CostOracle::estimate`] once per destination per generation, never
/// inside the particle update loop.
///
/// Any `Fn(&str, &TripContext, f64) -> Result<Estimate, OracleError>`
/// closure is an oracle.
pub trait CostOracle: Send + Sync {
    /// Estimates the visit to `destination` under `context`.
    fn estimate(
        &self,
        destination: &str,
        context: &TripContext,
        distance_km: f64,
    ) -> Result<Estimate, OracleError>;
}

impl<F> CostOracle for F
where
    F: Fn(&str, &TripContext, f64) -> Result<Estimate, OracleError> + Send + Sync,
{
    fn estimate(
        &self,
        destination: &str,
        context: &TripContext,
        distance_km: f64,
    ) -> Result<Estimate, OracleError> {
        self(destination, context, distance_km)
    }
}

/// Oracle backed by a fixed lookup table; unknown destinations are missing data.
#[derive(Debug, Clone, Default)]
pub struct TableOracle {
    table: HashMap<String, Estimate>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, destination: impl Into<String>, estimate: Estimate) -> Self {
        self.table.insert(destination.into(), estimate);
        self
    }
}

impl CostOracle for TableOracle {
    fn estimate(
        &self,
        destination: &str,
        _context: &TripContext,
        _distance_km: f64,
    ) -> Result<Estimate, OracleError> {
        self.table
            .get(destination)
            .copied()
            .ok_or_else(|| OracleError::MissingData {
                destination: destination.to_string(),
            })
    }
}

/// Estimates for every destination, fixed for one generation.
///
/// Indexed by destination position in the problem. This is the only
/// state shared across concurrent particle evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateCache {
    entries: Vec<Estimate>,
    fell_back: Vec<bool>,
}

impl EstimateCache {
    /// Queries the oracle once per destination.
    ///
    /// Failures and non-finite answers are logged and replaced by
    /// [`FALLBACK_ESTIMATE`]; this never fails.
    pub fn fetch<O: CostOracle + ?Sized>(
        oracle: &O,
        destinations: &[Destination],
        context: &TripContext,
        parallel: bool,
    ) -> Self {
        let query = |d: &Destination| -> (Estimate, bool) {
            match oracle.estimate(&d.id, context, d.distance_km) {
                Ok(est) if est.is_usable() => (est, false),
                Ok(_) => {
                    log::warn!(
                        "non-finite estimate for {}, using fallback {:?}",
                        d.id,
                        FALLBACK_ESTIMATE
                    );
                    (FALLBACK_ESTIMATE, true)
                }
                Err(e) => {
                    log::warn!("{e}; using fallback {:?}", FALLBACK_ESTIMATE);
                    (FALLBACK_ESTIMATE, true)
                }
            }
        };

        let results: Vec<(Estimate, bool)> = if parallel {
            destinations.par_iter().map(query).collect()
        } else {
            destinations.iter().map(query).collect()
        };

        let (entries, fell_back) = results.into_iter().unzip();
        Self { entries, fell_back }
    }

    /// Builds a cache from known estimates (none marked as fallback).
    pub fn from_estimates(entries: Vec<Estimate>) -> Self {
        let fell_back = vec![false; entries.len()];
        Self { entries, fell_back }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Estimate for destination `index`.
    pub fn get(&self, index: usize) -> &Estimate {
        &self.entries[index]
    }

    /// Whether destination `index` carries the fallback estimate.
    pub fn is_fallback(&self, index: usize) -> bool {
        self.fell_back[index]
    }

    pub fn fallback_count(&self) -> usize {
        self.fell_back.iter().filter(|&&f| f).count()
    }
}
