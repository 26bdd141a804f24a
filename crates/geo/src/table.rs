//! Static `(city, state) -> coordinate` reference table.

use std::collections::HashMap;

use thiserror::Error;

use crate::distance::Coordinate;
use crate::location::{canonical_state, standardize_city};

#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("Invalid coordinate ({latitude}, {longitude}) for {city}, {state}")]
    InvalidCoordinate {
        city: String,
        state: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("Missing city or state in reference row")]
    MissingKey,
}

/// Lookup table keyed by standardized city and canonical state.
///
/// The first row inserted for a key wins.
#[derive(Debug, Default, Clone)]
pub struct LatLongTable {
    entries: HashMap<(String, String), Coordinate>,
}

impl LatLongTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row, returning `Ok(false)` when the key was already present.
    pub fn insert(
        &mut self,
        city: &str,
        state: &str,
        coordinate: Coordinate,
    ) -> Result<bool, GeoError> {
        let key = table_key(city, state).ok_or(GeoError::MissingKey)?;
        if !coordinate.is_valid() {
            return Err(GeoError::InvalidCoordinate {
                city: city.to_string(),
                state: state.to_string(),
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
            });
        }
        if self.entries.contains_key(&key) {
            return Ok(false);
        }
        self.entries.insert(key, coordinate);
        Ok(true)
    }

    /// Build a table from `(city, state, latitude, longitude)` rows, skipping bad rows.
    pub fn from_rows<I, C, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (C, S, f64, f64)>,
        C: AsRef<str>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (city, state, latitude, longitude) in rows {
            let coordinate = Coordinate::new(latitude, longitude);
            if let Err(e) = table.insert(city.as_ref(), state.as_ref(), coordinate) {
                tracing::debug!(error = %e, "Skipping reference row");
            }
        }
        table
    }

    pub fn lookup(&self, city: &str, state: &str) -> Option<Coordinate> {
        let key = table_key(city, state)?;
        self.entries.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn table_key(city: &str, state: &str) -> Option<(String, String)> {
    let city = standardize_city(city);
    let state = canonical_state(state)?;
    if city.is_empty() {
        return None;
    }
    Some((city, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_wins() {
        let table = LatLongTable::from_rows(vec![
            ("Springfield", "Il", 39.78, -89.65),
            ("SPRINGFIELD", "Illinois", 0.0, 0.0),
            ("Springfield", "Mo", 37.21, -93.29),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("springfield", "IL"), Some(Coordinate::new(39.78, -89.65)));
    }

    #[test]
    fn test_lookup_standardizes_city() {
        let table = LatLongTable::from_rows(vec![("Saint Louis", "MO", 38.63, -90.2)]);
        assert!(table.lookup("St. Louis", "Missouri").is_some());
        assert!(table.lookup("St. Louis", "").is_none());
    }

    #[test]
    fn test_invalid_rows() {
        let mut table = LatLongTable::new();
        assert_eq!(
            table.insert("", "Il", Coordinate::new(1.0, 1.0)),
            Err(GeoError::MissingKey)
        );
        assert!(matches!(
            table.insert("Nowhere", "Il", Coordinate::new(200.0, 1.0)),
            Err(GeoError::InvalidCoordinate { .. })
        ));
        assert!(table.is_empty());
    }
}
