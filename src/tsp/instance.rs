//! Euclidean TSP instance.

use crate::error::{AcoError, AcoResult};

/// A city in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl City {
    /// Creates a city at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Immutable TSP instance: cities plus their precomputed distance matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspInstance {
    cities: Vec<City>,
    /// Flattened `n × n` symmetric matrix.
    distances: Vec<f64>,
}

impl TspInstance {
    /// Builds an instance from city coordinates.
    ///
    /// # Errors
    /// [`AcoError::EmptyInstance`] for no cities,
    /// [`AcoError::InvalidInstance`] for non-finite coordinates.
    pub fn new(cities: Vec<City>) -> AcoResult<Self> {
        if cities.is_empty() {
            return Err(AcoError::EmptyInstance { what: "cities" });
        }
        if let Some(i) = cities
            .iter()
            .position(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(AcoError::invalid_instance(format!(
                "city {i} has non-finite coordinates"
            )));
        }

        let n = cities.len();
        let mut distances = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }

        Ok(Self { cities, distances })
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`; construction rejects empty instances.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// The cities, in input order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Distance between cities `i` and `j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.cities.len() + j]
    }

    /// Length of a path visiting `tour` in order (closed tours repeat the
    /// start city at the end).
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        tour.windows(2).map(|w| self.distance(w[0], w[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> TspInstance {
        TspInstance::new(vec![
            City::new(0.0, 0.0),
            City::new(10.0, 0.0),
            City::new(10.0, 10.0),
            City::new(0.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_distance_matrix_symmetric() {
        let inst = square();
        assert_eq!(inst.len(), 4);
        assert!((inst.distance(0, 1) - 10.0).abs() < 1e-12);
        assert!((inst.distance(0, 2) - 200f64.sqrt()).abs() < 1e-12);
        for i in 0..4 {
            assert_eq!(inst.distance(i, i), 0.0);
            for j in 0..4 {
                assert_eq!(inst.distance(i, j), inst.distance(j, i));
            }
        }
    }

    #[test]
    fn test_tour_length() {
        let inst = square();
        assert!((inst.tour_length(&[0, 1, 2, 3, 0]) - 40.0).abs() < 1e-12);
        assert!((inst.tour_length(&[0, 2, 1, 3, 0]) - (20.0 + 2.0 * 200f64.sqrt())).abs() < 1e-9);
        assert_eq!(inst.tour_length(&[2]), 0.0);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(
            TspInstance::new(Vec::new()).unwrap_err(),
            AcoError::EmptyInstance { what: "cities" }
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = TspInstance::new(vec![City::new(0.0, 0.0), City::new(f64::NAN, 1.0)]).unwrap_err();
        assert!(matches!(err, AcoError::InvalidInstance { .. }));
    }
}
