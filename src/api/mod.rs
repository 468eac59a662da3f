//! HTTP API: route table, handlers and error translation
//!
//! Routes are declared in [`routes`] as plain (method, path, endpoint) rows so
//! the table can be inspected and tested on its own. [`router`] turns it into
//! an axum `Router`, which tests drive in memory without binding a socket.

mod error;
pub mod wire;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    response::Html,
    routing::{MethodFilter, MethodRouter, on},
};
use serde::Deserialize;
use tracing::info;

pub use error::ApiError;
pub use wire::{ErrorBody, FeatureResponse, ForecastResponse, HealthResponse, RegionsResponse};

use crate::config::DroughtWatchConfig;
use crate::forecast::{ForecastProvider, StaticForecastProvider};
use crate::regions::{FeatureProvider, RegionCatalog, TURKANA_ID};

const LANDING_PAGE: &str = include_str!("../../static/index.html");

/// Providers shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub forecast: Arc<dyn ForecastProvider>,
    pub features: Arc<dyn FeatureProvider>,
}

impl AppState {
    pub fn new(
        forecast: impl ForecastProvider + 'static,
        features: impl FeatureProvider + 'static,
    ) -> Self {
        Self {
            forecast: Arc::new(forecast),
            features: Arc::new(features),
        }
    }

    /// Build the providers described by the configuration
    pub fn from_config(config: &DroughtWatchConfig) -> crate::Result<Self> {
        let forecast = StaticForecastProvider::from_config(&config.forecast)?;
        let catalog = match &config.regions.geojson_path {
            Some(path) => RegionCatalog::from_geojson_file(path)?,
            None => RegionCatalog::builtin()?,
        };
        info!("Region catalog ready with {} regions", catalog.len());
        Ok(Self::new(forecast, catalog))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    LandingPage,
    Forecast,
    Feature,
    Regions,
    LegacyTurkana,
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub method: MethodFilter,
    pub path: &'static str,
    pub endpoint: Endpoint,
}

impl Route {
    fn get(path: &'static str, endpoint: Endpoint) -> Self {
        Self {
            method: MethodFilter::GET,
            path,
            endpoint,
        }
    }
}

/// Every route served by the API
#[must_use]
pub fn routes() -> Vec<Route> {
    vec![
        Route::get("/", Endpoint::LandingPage),
        Route::get("/api/forecast", Endpoint::Forecast),
        Route::get("/api/feature", Endpoint::Feature),
        Route::get("/api/regions", Endpoint::Regions),
        Route::get("/api/turkana", Endpoint::LegacyTurkana),
        Route::get("/health", Endpoint::Health),
    ]
}

impl Endpoint {
    fn method_router(self, filter: MethodFilter) -> MethodRouter<AppState> {
        match self {
            Endpoint::LandingPage => on(filter, landing_page),
            Endpoint::Forecast => on(filter, get_forecast),
            Endpoint::Feature => on(filter, get_feature),
            Endpoint::Regions => on(filter, list_regions),
            Endpoint::LegacyTurkana => on(filter, get_turkana),
            Endpoint::Health => on(filter, health),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let mut router = Router::new();
    for route in routes() {
        router = router.route(route.path, route.endpoint.method_router(route.method));
    }

    router
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

#[tracing::instrument(skip(state))]
async fn get_forecast(State(state): State<AppState>) -> Result<Json<ForecastResponse>, ApiError> {
    let forecast = state.forecast.get_forecast()?;
    Ok(Json(ForecastResponse::from(&forecast)))
}

#[derive(Debug, Deserialize)]
struct FeatureQuery {
    region: Option<String>,
}

#[tracing::instrument(skip(state))]
async fn get_feature(
    State(state): State<AppState>,
    query: Result<Query<FeatureQuery>, QueryRejection>,
) -> Result<Json<FeatureResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let region = query
        .region
        .filter(|region| !region.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing required query parameter 'region'".into()))?;

    let feature = state.features.get_feature(&region)?;
    Ok(Json(FeatureResponse::from(&feature)))
}

#[tracing::instrument(skip(state))]
async fn get_turkana(State(state): State<AppState>) -> Result<Json<FeatureResponse>, ApiError> {
    let feature = state.features.get_feature(TURKANA_ID)?;
    Ok(Json(FeatureResponse::from(&feature)))
}

async fn list_regions(State(state): State<AppState>) -> Json<RegionsResponse> {
    Json(RegionsResponse {
        regions: state.features.list_regions(),
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
    })
}

/// JSON 404 for paths outside the route table, including missing static files
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
