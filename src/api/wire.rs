//! JSON wire records
//!
//! Every response body is one of these types. Field declaration order is the
//! serialized key order.

use serde::Serialize;

use crate::models::{Forecast, GeoFeature, Horizon, Severity};

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub next_month: Severity,
    pub two_months: Severity,
    pub three_months: Severity,
    pub accuracy: f64,
}

impl From<&Forecast> for ForecastResponse {
    fn from(forecast: &Forecast) -> Self {
        Self {
            next_month: forecast.severity(Horizon::NextMonth),
            two_months: forecast.severity(Horizon::TwoMonths),
            three_months: forecast.severity(Horizon::ThreeMonths),
            accuracy: forecast.accuracy(),
        }
    }
}

/// GeoJSON Feature
#[derive(Debug, Serialize)]
pub struct FeatureResponse {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: GeometryResponse,
    pub properties: FeatureProperties,
}

#[derive(Debug, Serialize)]
pub struct GeometryResponse {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Serialize)]
pub struct FeatureProperties {
    pub name: String,
}

impl From<&GeoFeature> for FeatureResponse {
    fn from(feature: &GeoFeature) -> Self {
        Self {
            kind: "Feature",
            geometry: GeometryResponse {
                kind: feature.geometry_type().as_str(),
                coordinates: feature
                    .rings()
                    .iter()
                    .map(|ring| ring.positions().iter().map(|p| p.to_pair()).collect())
                    .collect(),
            },
            properties: FeatureProperties {
                name: feature.name().to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegionsResponse {
    pub regions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Body of every non-2xx response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    #[must_use]
    pub fn new(error: &'static str) -> Self {
        Self {
            error,
            region: None,
            message: None,
        }
    }
}
