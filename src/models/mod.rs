//! Domain models for the DroughtWatch service
//!
//! - Forecast: drought severity per horizon with a confidence score
//! - Feature: named region boundaries as validated polygons

pub mod feature;
pub mod forecast;

pub use feature::{GeoFeature, GeometryType, LinearRing, Position};
pub use forecast::{Forecast, ForecastResult, Horizon, Severity};
