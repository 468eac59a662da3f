//! Geographic feature model: positions, closed linear rings and named polygons

use crate::{DroughtWatchError, Result};

/// Minimum number of positions in a closed ring (a triangle plus the closing point)
pub const MIN_RING_POSITIONS: usize = 4;

/// A (longitude, latitude) pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

impl Position {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self> {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DroughtWatchError::validation(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DroughtWatchError::validation(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Position as a GeoJSON `[lon, lat]` pair
    #[must_use]
    pub fn to_pair(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// A closed sequence of positions bounding a polygon
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing(Vec<Position>);

impl LinearRing {
    pub fn new(positions: Vec<Position>) -> Result<Self> {
        if positions.len() < MIN_RING_POSITIONS {
            return Err(DroughtWatchError::validation(format!(
                "ring needs at least {MIN_RING_POSITIONS} positions, got {}",
                positions.len()
            )));
        }
        if positions.first() != positions.last() {
            return Err(DroughtWatchError::validation(
                "ring is not closed: first and last positions differ",
            ));
        }
        Ok(Self(positions))
    }

    /// Build a ring from raw `[lon, lat]` pairs, validating every position
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Result<Self> {
        let positions = pairs
            .iter()
            .map(|[lon, lat]| Position::new(*lon, *lat))
            .collect::<Result<Vec<_>>>()?;
        Self::new(positions)
    }

    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    Polygon,
}

impl GeometryType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryType::Polygon => "Polygon",
        }
    }
}

/// A named region boundary
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    name: String,
    geometry_type: GeometryType,
    rings: Vec<LinearRing>,
}

impl GeoFeature {
    /// Create a polygon feature. The first ring is the exterior boundary.
    pub fn polygon(name: impl Into<String>, rings: Vec<LinearRing>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DroughtWatchError::validation("feature name cannot be empty"));
        }
        if rings.is_empty() {
            return Err(DroughtWatchError::validation(format!(
                "polygon '{name}' has no rings"
            )));
        }
        Ok(Self {
            name,
            geometry_type: GeometryType::Polygon,
            rings,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    #[must_use]
    pub fn rings(&self) -> &[LinearRing] {
        &self.rings
    }
}
