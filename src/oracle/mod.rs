//! Cost oracle: the narrow contract to external forecasting models.
//!
//! The optimizer never talks to a forecaster directly. It asks a
//! [`CostOracle`] for one [`Estimate`] per destination per generation and
//! caches the answers in an [`EstimateCache`]. Failed or unusable answers
//! are replaced by [`FALLBACK_ESTIMATE`] so a run never aborts on an
//! oracle outage.
//!
//! [`HeuristicOracle`] is a closed-form stand-in built from road class,
//! distance and trip context.

mod context;
mod heuristic;
mod types;
mod vehicles;

pub use context::{Season, TripContext};
pub use heuristic::{HeuristicOracle, RoadClass, TripBreakdown, VehicleProfile};
pub use types::{
    CostOracle, Destination, Estimate, EstimateCache, TableOracle, DEFAULT_DISTANCE_KM,
    FALLBACK_ESTIMATE,
};
pub use vehicles::{VehicleRegistry, GENERIC_VEHICLE_ID, UNAVAILABLE_VEHICLE_ID};
