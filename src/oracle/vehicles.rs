//! Display vehicle assignment per service area.

use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashMap;

/// Shown when a service area has no registered vehicles.
pub const GENERIC_VEHICLE_ID: &str = "VH-GEN";

/// Shown when the destination's estimate fell back to defaults.
pub const UNAVAILABLE_VEHICLE_ID: &str = "VH-NA";

/// Vehicle pools keyed by service area. Purely cosmetic.
#[derive(Debug, Clone, Default)]
pub struct VehicleRegistry {
    pools: HashMap<String, Vec<String>>,
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one vehicle to the pool of `service_area`.
    pub fn register(&mut self, service_area: impl Into<String>, vehicle_id: impl Into<String>) {
        self.pools
            .entry(service_area.into())
            .or_default()
            .push(vehicle_id.into());
    }

    pub fn with_vehicle(mut self, service_area: impl Into<String>, vehicle_id: impl Into<String>) -> Self {
        self.register(service_area, vehicle_id);
        self
    }

    pub fn pool(&self, service_area: &str) -> &[String] {
        self.pools.get(service_area).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Picks a vehicle from the area's pool, or [`GENERIC_VEHICLE_ID`].
    pub fn pick<R: Rng>(&self, service_area: &str, rng: &mut R) -> String {
        self.pool(service_area)
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| GENERIC_VEHICLE_ID.to_string())
    }
}

impl<A, V> FromIterator<(A, V)> for VehicleRegistry
where
    A: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (A, V)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (area, vehicle) in iter {
            registry.register(area, vehicle);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_from_pool() {
        let registry: VehicleRegistry =
            [("Uppal", "RV-01"), ("Uppal", "RV-02"), ("Medchal", "RV-07")]
                .into_iter()
                .collect();
        let mut rng = StdRng::seed_from_u64(42);

        let picked = registry.pick("Uppal", &mut rng);
        assert!(picked == "RV-01" || picked == "RV-02");
        assert_eq!(registry.pick("Medchal", &mut rng), "RV-07");
        assert_eq!(registry.pool("Uppal").len(), 2);
    }

    #[test]
    fn test_empty_pool_is_generic() {
        let registry = VehicleRegistry::new().with_vehicle("Uppal", "RV-01");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(registry.pick("Kompally", &mut rng), GENERIC_VEHICLE_ID);
        assert!(registry.pool("Kompally").is_empty());
    }
}
