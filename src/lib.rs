//! `DroughtWatch` - drought early-warning web service
//!
//! This library serves drought severity forecasts and region boundary
//! polygons over a small JSON API, together with the landing page that
//! renders them.

pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod logging;
pub mod models;
pub mod regions;
pub mod web;

// Re-export core types for public API
pub use api::{AppState, router};
pub use crate::config::DroughtWatchConfig;
pub use error::DroughtWatchError;
pub use forecast::{ForecastProvider, StaticForecastProvider};
pub use models::{Forecast, ForecastResult, GeoFeature, Horizon, LinearRing, Position, Severity};
pub use regions::{FeatureProvider, RegionCatalog};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DroughtWatchError>;
