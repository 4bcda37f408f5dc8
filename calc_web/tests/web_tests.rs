//! Integration tests for the braid calculator router.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

use calc_core::{BraidPattern, Catalog, CatalogInfo, ColorCord};
use calc_web::config::Config;
use calc_web::{create_router, AppState};

/// Creates a test AppState with a small in-memory catalog.
fn create_test_state() -> AppState {
    create_test_state_with(Config::default())
}

fn create_test_state_with(config: Config) -> AppState {
    let catalog = Catalog::from_patterns(vec![
        BraidPattern::new("Half", 0.5),
        BraidPattern::new("Cobra", 12.0),
        BraidPattern::new("Duo", 1.0).with_colors(vec![
            ColorCord::new("Core", 10.0),
            ColorCord::new("Weave", 20.0).with_url("https://shop.test/weave"),
        ]),
    ])
    .expect("Failed to build catalog");

    let info = CatalogInfo::new("test", &catalog);

    AppState::new(config, catalog, info)
}

async fn send(app: &axum::Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Helper to make a GET request and get the response body as JSON.
async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    let status = response.status();
    let json = serde_json::from_str(&body_text(response).await).unwrap_or(Value::Null);
    (status, json)
}

/// Helper to make a POST request with JSON body.
async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
    )
    .await;

    let status = response.status();
    let json = serde_json::from_str(&body_text(response).await).unwrap_or(Value::Null);
    (status, json)
}

/// Helper to submit the HTML form.
async fn post_form(app: &axum::Router, body: &str) -> (StatusCode, String) {
    let response = send(
        app,
        Request::builder()
            .method("POST")
            .uri("/")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await;

    let status = response.status();
    (status, body_text(response).await)
}

// ============================================================================
// Form Page Tests
// ============================================================================

#[tokio::test]
async fn test_form_lists_every_pattern() {
    let app = create_router(create_test_state());

    let response = send(&app, Request::builder().uri("/").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;

    assert!(html.contains("<form method=\"post\""));
    for name in ["Half", "Cobra", "Duo"] {
        assert!(html.contains(&format!(">{name}</option>")), "missing option {name}");
    }
    assert!(!html.contains("Please correct the errors"));
}

#[tokio::test]
async fn test_form_submit_even_split() {
    let app = create_router(create_test_state());

    let (status, html) = post_form(&app, "wrist=20&knot=Half&cord_count=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches("<td class=\"num\">5.75</td>").count(), 2);
    assert!(html.contains("Cord 1"));
    assert!(html.contains("Cord 2"));
    assert!(html.contains("11.50"));
    assert!(html.contains("<option value=\"Half\" selected>"));
}

#[tokio::test]
async fn test_form_submit_color_layout() {
    let app = create_router(create_test_state());

    let (status, html) = post_form(&app, "wrist=15&knot=Duo&cord_count=4").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<td>Core</td>"));
    assert!(html.contains("<td class=\"num\">6.00</td>"));
    assert!(html.contains("<td>Weave</td>"));
    assert!(html.contains("<td class=\"num\">12.00</td>"));
    assert_eq!(html.matches(">Buy</a>").count(), 1);
}

#[tokio::test]
async fn test_form_submit_decimal_comma() {
    let app = create_router(create_test_state());

    let (status, html) = post_form(&app, "wrist=20%2C0&knot=Half&cord_count=1").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<td class=\"num\">11.50</td>"));
}

#[tokio::test]
async fn test_form_invalid_input_shows_errors() {
    let app = create_router(create_test_state());

    let (status, html) = post_form(&app, "wrist=45&knot=Cobra&cord_count=9").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Please correct the errors in the form."));
    assert!(html.contains("Wrist length must be between 10 and 30 cm."));
    assert!(html.contains("Cord count must be between 1 and 5."));
    assert!(!html.contains("<table>"));
    // Entered values are kept
    assert!(html.contains("value=\"45\""));
}

#[tokio::test]
async fn test_form_unknown_pattern_is_rejected() {
    let app = create_router(create_test_state());

    let (status, html) = post_form(&app, "wrist=20&knot=Sailor&cord_count=2").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Not a valid choice."));
    assert!(!html.contains("<table>"));
}

#[tokio::test]
async fn test_form_missing_fields() {
    let app = create_router(create_test_state());

    let (status, html) = post_form(&app, "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches("This field is required.").count(), 3);
}

#[tokio::test]
async fn test_form_wrong_content_type_shows_errors() {
    let app = create_router(create_test_state());

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"wrist": "20", "knot": "Half", "cord_count": "2"}"#))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Please correct the errors in the form."));
    assert_eq!(html.matches("This field is required.").count(), 3);
    assert!(!html.contains("<table>"));
}

#[tokio::test]
async fn test_form_rounds_ties_to_even() {
    let app = create_router(create_test_state());

    // (10.25 + 3) * 0.5 = 6.625
    let (status, html) = post_form(&app, "wrist=10.25&knot=Half&cord_count=1").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<td class=\"num\">6.62</td>"));
    assert!(html.contains("<th class=\"num\">6.62</th>"));
    assert!(!html.contains("6.63"));
}

#[tokio::test]
async fn test_form_escapes_input() {
    let app = create_router(create_test_state());

    let (_, html) = post_form(&app, "wrist=%3Cscript%3E&knot=Cobra&cord_count=2").await;

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

// ============================================================================
// JSON API Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
    assert_eq!(json["catalog"]["source"], "test");
    assert_eq!(json["catalog"]["pattern_count"], 3);
}

#[tokio::test]
async fn test_list_braids() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/braids").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 3);
    assert_eq!(json["braids"][0]["name"], "Half");
    assert!(json["braids"][0].get("colors").is_none());
    assert_eq!(json["braids"][2]["colors"][1]["url"], "https://shop.test/weave");
}

#[tokio::test]
async fn test_get_braid() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/braids/Cobra").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cord_per_cm"], 12.0);

    let (status, json) = get_json(&app, "/api/braids/Sailor").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "PATTERN_NOT_FOUND");
}

#[tokio::test]
async fn test_calculate_even_split() {
    let app = create_router(create_test_state());

    let (status, json) = post_json(
        &app,
        "/api/calculate",
        json!({ "wrist_cm": 20.0, "braid_name": "Half", "cord_count": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_length_cm"], 11.5);
    assert_eq!(json["cords"], json!([{ "length_cm": 5.75 }, { "length_cm": 5.75 }]));
}

#[tokio::test]
async fn test_calculate_color_layout() {
    let app = create_router(create_test_state());

    let (status, json) = post_json(
        &app,
        "/api/calculate",
        json!({ "wrist_cm": 15.0, "braid_name": "Duo", "cord_count": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["cords"],
        json!([
            { "length_cm": 6.0, "name": "Core" },
            { "length_cm": 12.0, "name": "Weave", "url": "https://shop.test/weave" }
        ])
    );
}

#[tokio::test]
async fn test_calculate_unknown_pattern() {
    let app = create_router(create_test_state());

    let (status, json) = post_json(
        &app,
        "/api/calculate",
        json!({ "wrist_cm": 20.0, "braid_name": "nonexistent", "cord_count": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "PATTERN_NOT_FOUND");
}

#[tokio::test]
async fn test_calculate_out_of_range() {
    let app = create_router(create_test_state());

    let (status, json) = post_json(
        &app,
        "/api/calculate",
        json!({ "wrist_cm": 5.0, "braid_name": "Cobra", "cord_count": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_INPUT");
    assert_eq!(json["details"], "field: wrist_cm");
}

#[tokio::test]
async fn test_calculate_malformed_body() {
    let app = create_router(create_test_state());

    let (status, json) = post_json(&app, "/api/calculate", json!({ "wrist_cm": 20.0 })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_REQUEST");
}

// ============================================================================
// Security Header Tests
// ============================================================================

#[tokio::test]
async fn test_security_headers() {
    let app = create_router(create_test_state());

    let response = send(&app, Request::builder().uri("/").body(Body::empty()).unwrap()).await;
    let headers = response.headers();

    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
    assert!(headers["content-security-policy"]
        .to_str()
        .unwrap()
        .starts_with("default-src 'self'"));
    assert!(headers.get("strict-transport-security").is_none());
}

#[tokio::test]
async fn test_hsts_when_enabled() {
    let mut config = Config::default();
    config.security.hsts = true;
    let app = create_router(create_test_state_with(config));

    let response = send(&app, Request::builder().uri("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["strict-transport-security"]
        .to_str()
        .unwrap()
        .starts_with("max-age="));
}

// ============================================================================
// Startup Tests
// ============================================================================

#[tokio::test]
async fn test_load_state_from_catalog_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let catalog_path = temp_dir.path().join("braids.json");
    fs::write(&catalog_path, r#"[{ "name": "Snake Knot", "cord_per_cm": 10.0 }]"#).unwrap();

    let config_path = temp_dir.path().join("braid-calc.toml");
    fs::write(&config_path, "[catalog]\npath = \"braids.json\"\n").unwrap();

    let config = Config::load(Some(config_path.as_path())).expect("Failed to load config");
    assert_eq!(config.catalog.path.as_deref(), Some(catalog_path.as_path()));

    let state = AppState::load(config).expect("Failed to load state");
    assert_eq!(state.catalog().names(), vec!["Snake Knot"]);

    let app = create_router(state);
    let (status, json) = get_json(&app, "/api/braids").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
}

#[tokio::test]
async fn test_load_state_with_embedded_catalog() {
    let state = AppState::load(Config::default()).expect("Failed to load state");
    assert!(state.catalog_info().source.starts_with("embedded:"));
    assert!(state.catalog().contains("Cobra"));
}

#[test]
fn test_invalid_catalog_is_fatal() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let catalog_path = temp_dir.path().join("braids.json");
    fs::write(&catalog_path, "[]").unwrap();

    let mut config = Config::default();
    config.catalog.path = Some(catalog_path);
    assert!(AppState::load(config).is_err());

    let mut config = Config::default();
    config.catalog.path = Some(temp_dir.path().join("missing.json"));
    assert!(AppState::load(config).is_err());
}

#[test]
fn test_explicit_config_must_exist() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    assert!(Config::load(Some(temp_dir.path().join("nope.toml").as_path())).is_err());
}
