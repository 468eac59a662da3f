//! Region boundary catalog and feature providers
//!
//! The catalog maps region ids to validated polygons. It is built once at
//! startup, either from the built-in Turkana fixture or from a GeoJSON
//! `FeatureCollection` file, and is read-only afterwards.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::models::{GeoFeature, LinearRing};
use crate::{DroughtWatchError, Result};

/// Id of the built-in fixture region
pub const TURKANA_ID: &str = "turkana";

const TURKANA_RING: [[f64; 2]; 5] = [
    [34.0, 2.0],
    [35.0, 2.0],
    [35.0, 3.0],
    [34.0, 3.0],
    [34.0, 2.0],
];

pub trait FeatureProvider: Send + Sync {
    /// Boundary feature for a region id
    fn get_feature(&self, region_id: &str) -> Result<GeoFeature>;

    /// Known region ids in sorted order
    fn list_regions(&self) -> Vec<String>;
}

/// Lookups ignore case and surrounding whitespace
#[must_use]
pub fn normalize_region_id(region_id: &str) -> String {
    region_id.trim().to_lowercase()
}

/// Immutable region id to feature mapping
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    features: BTreeMap<String, GeoFeature>,
}

impl RegionCatalog {
    /// Catalog containing only the Turkana fixture
    pub fn builtin() -> Result<Self> {
        let ring = LinearRing::from_pairs(&TURKANA_RING)?;
        let turkana = GeoFeature::polygon("Turkana", vec![ring])?;
        Self::from_features([(TURKANA_ID.to_string(), turkana)])
    }

    /// Build a catalog from (id, feature) pairs, rejecting duplicate ids
    pub fn from_features<I>(features: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, GeoFeature)>,
    {
        let mut catalog = BTreeMap::new();
        for (id, feature) in features {
            let id = normalize_region_id(&id);
            if id.is_empty() {
                return Err(DroughtWatchError::validation(format!(
                    "region '{}' has an empty id",
                    feature.name()
                )));
            }
            if catalog.insert(id.clone(), feature).is_some() {
                return Err(DroughtWatchError::validation(format!(
                    "duplicate region id '{id}'"
                )));
            }
        }
        Ok(Self { features: catalog })
    }

    /// Load a catalog from a GeoJSON `FeatureCollection` on disk
    pub fn from_geojson_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading region boundaries from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_geojson_str(&content).map_err(|e| {
            DroughtWatchError::config(format!("{}: {e}", path.display()))
        })
    }

    /// Parse a GeoJSON `FeatureCollection`
    pub fn from_geojson_str(content: &str) -> Result<Self> {
        let collection: GeoJsonFeatureCollection = serde_json::from_str(content)
            .map_err(|e| DroughtWatchError::validation(format!("invalid GeoJSON: {e}")))?;

        if collection.kind != "FeatureCollection" {
            return Err(DroughtWatchError::validation(format!(
                "expected a FeatureCollection, found '{}'",
                collection.kind
            )));
        }

        let features = collection
            .features
            .into_iter()
            .map(GeoJsonFeature::into_region)
            .collect::<Result<Vec<_>>>()?;

        let catalog = Self::from_features(features)?;
        info!("Loaded {} region boundaries", catalog.len());
        Ok(catalog)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FeatureProvider for RegionCatalog {
    fn get_feature(&self, region_id: &str) -> Result<GeoFeature> {
        let id = normalize_region_id(region_id);
        match self.features.get(&id) {
            Some(feature) => {
                debug!(region = %id, "Serving region boundary");
                Ok(feature.clone())
            }
            None => {
                warn!(region = %region_id, "Unknown region requested");
                Err(DroughtWatchError::not_found(region_id))
            }
        }
    }

    fn list_regions(&self) -> Vec<String> {
        self.features.keys().cloned().collect()
    }
}

/// GeoJSON structures for deserialization
#[derive(Debug, Deserialize)]
struct GeoJsonFeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    geometry: GeoJsonGeometry,
    properties: GeoJsonProperties,
}

#[derive(Debug, Deserialize)]
struct GeoJsonGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeoJsonProperties {
    name: String,
    id: Option<String>,
}

impl GeoJsonFeature {
    fn into_region(self) -> Result<(String, GeoFeature)> {
        let name = self.properties.name;
        if self.geometry.kind != "Polygon" {
            return Err(DroughtWatchError::validation(format!(
                "region '{name}' has unsupported geometry '{}'",
                self.geometry.kind
            )));
        }

        // positions may carry a third (altitude) element, which is dropped
        let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(self.geometry.coordinates)
            .map_err(|e| {
                DroughtWatchError::validation(format!("region '{name}' has bad coordinates: {e}"))
            })?;

        let rings = rings
            .iter()
            .map(|ring| {
                let pairs = ring
                    .iter()
                    .map(|position| match position.as_slice() {
                        [lon, lat, ..] => Ok([*lon, *lat]),
                        _ => Err(DroughtWatchError::validation(format!(
                            "region '{name}' has a position with fewer than 2 values"
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                LinearRing::from_pairs(&pairs)
            })
            .collect::<Result<Vec<_>>>()
            .map_err(|e| match e {
                DroughtWatchError::Validation { message } => {
                    DroughtWatchError::validation(format!("region '{name}': {message}"))
                }
                other => other,
            })?;

        let id = self
            .properties
            .id
            .unwrap_or_else(|| normalize_region_id(&name));
        let feature = GeoFeature::polygon(name, rings)?;
        Ok((id, feature))
    }
}
