//! Geographic resolution for candidate locations.
//!
//! Maps `(city, state)` pairs to coordinates through a static reference table
//! and measures the geodesic distance between them. A pair that does not
//! resolve yields no distance, which callers treat as "no signal".

pub mod distance;
pub mod location;
pub mod table;

pub use distance::{geodesic_miles, round_tenth, Coordinate};
pub use location::{
    canonical_state, clean_state, jurisdiction_state, standardize_city, us_state_code, US_STATES,
};
pub use table::{GeoError, LatLongTable};

/// Resolves city/state pairs and distances between them.
#[derive(Debug, Default, Clone)]
pub struct GeoResolver {
    table: LatLongTable,
}

impl GeoResolver {
    pub fn new(table: LatLongTable) -> Self {
        Self { table }
    }

    /// Coordinates for a city/state pair, if both are present and known.
    pub fn coordinates(&self, city: &str, state: &str) -> Option<Coordinate> {
        self.table.lookup(city, state)
    }

    /// Distance in miles between two city/state pairs, rounded to 0.1.
    ///
    /// `None` when either side does not resolve.
    pub fn resolve_distance(
        &self,
        city_a: &str,
        state_a: &str,
        city_b: &str,
        state_b: &str,
    ) -> Option<f64> {
        let from = self.coordinates(city_a, state_a)?;
        self.distance_from(from, city_b, state_b)
    }

    /// Distance in miles from a resolved origin to a city/state pair.
    pub fn distance_from(&self, origin: Coordinate, city: &str, state: &str) -> Option<f64> {
        let to = self.coordinates(city, state)?;
        Some(round_tenth(geodesic_miles(origin, to)))
    }
}
