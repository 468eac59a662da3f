//! HTTP-level tests driving the router in memory

use std::io::Write;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{Method, Request, StatusCode, header},
    routing::get as get_route,
};
use droughtwatch::{
    AppState, DroughtWatchConfig, DroughtWatchError, Forecast, ForecastProvider, RegionCatalog,
    Severity, StaticForecastProvider, router, web,
};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::Value;
use tower::ServiceExt;

fn default_state() -> AppState {
    AppState::from_config(&DroughtWatchConfig::default()).unwrap()
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Option<String>, Bytes) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, body)
}

async fn get(uri: &str) -> (StatusCode, Option<String>, Bytes) {
    send(router(default_state()), Method::GET, uri).await
}

fn json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_landing_page_served_as_html() {
    let (status, content_type, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    let page = String::from_utf8_lossy(&body);
    assert!(page.contains("DroughtWatch"));
    assert!(page.contains("trendChart"));
}

#[tokio::test]
async fn test_forecast_exact_body() {
    let (status, content_type, body) = get("/api/forecast").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        r#"{"next_month":"Severe","two_months":"Moderate","three_months":"Normal","accuracy":0.89}"#
    );
}

#[tokio::test]
async fn test_forecast_shape() {
    let (_, _, body) = get("/api/forecast").await;
    let value = json(&body);
    let object = value.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["accuracy", "next_month", "three_months", "two_months"]);

    for key in ["next_month", "two_months", "three_months"] {
        let severity = object[key].as_str().unwrap();
        assert!(["Normal", "Moderate", "Severe"].contains(&severity));
    }
    let accuracy = object["accuracy"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&accuracy));
}

#[tokio::test]
async fn test_forecast_uses_injected_provider() {
    let forecast = Forecast::new([Severity::Normal; 3], 0.5).unwrap();
    let state = AppState::new(
        StaticForecastProvider::new(forecast),
        RegionCatalog::builtin().unwrap(),
    );
    let (status, _, body) = send(router(state), Method::GET, "/api/forecast").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"next_month":"Normal","two_months":"Normal","three_months":"Normal","accuracy":0.5}"#
    );
}

#[tokio::test]
async fn test_turkana_feature() {
    let (status, content_type, body) = get("/api/feature?region=turkana").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let value = json(&body);
    assert_eq!(value["type"], "Feature");
    assert_eq!(value["geometry"]["type"], "Polygon");
    assert_eq!(value["properties"]["name"], "Turkana");

    let rings = value["geometry"]["coordinates"].as_array().unwrap();
    assert_eq!(rings.len(), 1);
    let ring = rings[0].as_array().unwrap();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], serde_json::json!([34.0, 2.0]));
    assert_eq!(ring[4], serde_json::json!([34.0, 2.0]));
}

#[tokio::test]
async fn test_every_known_region_has_closed_rings() {
    let state = default_state();
    let regions = state.features.list_regions();
    assert!(!regions.is_empty());

    for region in regions {
        let uri = format!("/api/feature?region={region}");
        let (status, _, body) = send(router(state.clone()), Method::GET, &uri).await;
        assert_eq!(status, StatusCode::OK, "region {region}");

        let value = json(&body);
        for ring in value["geometry"]["coordinates"].as_array().unwrap() {
            let ring = ring.as_array().unwrap();
            assert!(ring.len() >= 4);
            assert_eq!(ring.first(), ring.last(), "region {region} ring is open");
        }
    }
}

#[rstest]
#[case("/api/feature?region=unknown", "unknown")]
#[case("/api/feature?region=atlantis", "atlantis")]
#[tokio::test]
async fn test_unknown_region_not_found(#[case] uri: &str, #[case] region: &str) {
    let (status, content_type, body) = get(uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        json(&body),
        serde_json::json!({"error": "not_found", "region": region})
    );
}

#[rstest]
#[case("/api/feature")]
#[case("/api/feature?region=")]
#[case("/api/feature?other=1")]
#[tokio::test]
async fn test_missing_region_is_bad_request(#[case] uri: &str) {
    let (status, _, body) = get(uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["error"], "bad_request");
}

#[tokio::test]
async fn test_region_lookup_ignores_case() {
    let (status, _, body) = get("/api/feature?region=Turkana").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["properties"]["name"], "Turkana");
}

#[tokio::test]
async fn test_legacy_turkana_route_matches_feature_route() {
    let (_, _, legacy) = get("/api/turkana").await;
    let (_, _, feature) = get("/api/feature?region=turkana").await;
    assert_eq!(legacy, feature);
}

#[tokio::test]
async fn test_regions_listing() {
    let (status, _, body) = get("/api/regions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"regions":["turkana"]}"#);
}

#[tokio::test]
async fn test_health() {
    let (status, _, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    let value = json(&body);
    assert_eq!(value["status"], "ok");
    assert_eq!(value["version"], droughtwatch::VERSION);
}

#[rstest]
#[case("/api/forecast")]
#[case("/api/feature?region=turkana")]
#[case("/api/feature?region=unknown")]
#[tokio::test]
async fn test_repeated_requests_byte_identical(#[case] uri: &str) {
    let first = get(uri).await;
    let second = get(uri).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let (status, _, body) = get("/api/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"not_found"}"#);
}

#[tokio::test]
async fn test_wrong_method_rejected() {
    let (status, _, body) = send(router(default_state()), Method::POST, "/api/forecast").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, r#"{"error":"method_not_allowed"}"#);
}

struct BrokenModel;

impl ForecastProvider for BrokenModel {
    fn get_forecast(&self) -> droughtwatch::Result<Forecast> {
        Err(DroughtWatchError::internal("model weights missing"))
    }
}

#[tokio::test]
async fn test_provider_failure_returns_generic_500() {
    let state = AppState::new(BrokenModel, RegionCatalog::builtin().unwrap());
    let (status, content_type, body) = send(router(state), Method::GET, "/api/forecast").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, r#"{"error":"internal"}"#);
}

#[tokio::test]
async fn test_full_app_serves_static_assets() {
    let config = DroughtWatchConfig::default();
    let app = web::app(default_state(), &config.server);
    let (status, _, body) = send(app, Method::GET, "/static/js/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&body).contains("/api/forecast"));
}

#[tokio::test]
async fn test_full_app_keeps_api_routes() {
    let config = DroughtWatchConfig::default();
    let app = web::app(default_state(), &config.server);
    let (status, _, body) = send(app, Method::GET, "/api/forecast").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["next_month"], "Severe");
}

#[tokio::test]
async fn test_full_app_missing_static_asset_returns_json_404() {
    let config = DroughtWatchConfig::default();
    let app = web::app(default_state(), &config.server);
    let (status, content_type, body) = send(app, Method::GET, "/static/nope.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, r#"{"error":"not_found"}"#);
}

#[tokio::test]
async fn test_slow_request_times_out_with_json_408() {
    let slow = Router::new().route(
        "/slow",
        get_route(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    );
    let app = web::with_timeout(slow, Duration::from_millis(20));
    let (status, content_type, body) = send(app, Method::GET, "/slow").await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, r#"{"error":"timeout"}"#);
}

#[tokio::test]
async fn test_fast_request_passes_timeout_layer() {
    let fast = Router::new().route("/fast", get_route(|| async { "ok" }));
    let app = web::with_timeout(fast, Duration::from_secs(1));
    let (status, _, body) = send(app, Method::GET, "/fast").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

const MARSABIT_COLLECTION: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"name": "Marsabit"},
            "geometry": {"type": "Polygon", "coordinates": [[[37.0, 2.0], [38.5, 2.0], [38.5, 4.0], [37.0, 4.0], [37.0, 2.0]]]}
        }
    ]
}"#;

#[tokio::test]
async fn test_configured_geojson_catalog_is_served() {
    let mut file = tempfile::Builder::new().suffix(".geojson").tempfile().unwrap();
    write!(file, "{MARSABIT_COLLECTION}").unwrap();

    let mut config = DroughtWatchConfig::default();
    config.regions.geojson_path = Some(file.path().to_path_buf());
    let state = AppState::from_config(&config).unwrap();

    let (status, _, body) = send(router(state.clone()), Method::GET, "/api/regions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"regions":["marsabit"]}"#);

    let (status, _, body) =
        send(router(state.clone()), Method::GET, "/api/feature?region=marsabit").await;
    assert_eq!(status, StatusCode::OK);
    let value = json(&body);
    assert_eq!(value["properties"]["name"], "Marsabit");
    assert_eq!(value["geometry"]["coordinates"][0].as_array().unwrap().len(), 5);

    // the built-in fixture is replaced, not merged
    let (status, _, _) = send(router(state), Method::GET, "/api/feature?region=turkana").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn test_invalid_geojson_catalog_rejected_at_startup() {
    let mut file = tempfile::Builder::new().suffix(".geojson").tempfile().unwrap();
    write!(file, r#"{{"type": "Feature", "features": []}}"#).unwrap();

    let mut config = DroughtWatchConfig::default();
    config.regions.geojson_path = Some(file.path().to_path_buf());
    let err = AppState::from_config(&config).err().unwrap();
    assert!(matches!(err, DroughtWatchError::Config { .. }));
    assert!(err.to_string().contains("FeatureCollection"));
}
