//! End-to-end tests driving the HTTP router with an in-memory store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use pv_yield_estimator::{
    api,
    config::Config,
    controller::AppState,
    engine::YieldEstimator,
    repo::{memory::InMemoryUserStore, Repositories},
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let repos = Repositories::with_store(Arc::new(InMemoryUserStore::default()));
    let state = AppState::from_parts(Config::default(), repos, YieldEstimator::default());
    api::router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn new_user(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/api/home", None).await;
    assert_eq!(status, StatusCode::OK);
    body["userId"].as_str().unwrap().to_string()
}

fn valid_info() -> Value {
    json!({ "electricityRateCents": 40, "householdSize": 2, "annualConsumptionKwh": 2000 })
}

fn valid_conditions() -> Value {
    json!({ "pvConfig": "CHEAP", "tiltAngleDeg": 30, "direction": "SOUTH", "shadeFactor": 0.0 })
}

#[tokio::test]
async fn generated_user_starts_empty() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/home", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(uuid::Uuid::parse_str(body["userId"].as_str().unwrap()).is_ok());
    assert!(body["userInfo"].is_null());
    assert!(body["userConditions"].is_null());
    assert!(body["userResult"].is_null());
}

#[tokio::test]
async fn full_flow_produces_result() {
    let app = app();
    let id = new_user(&app).await;

    let (status, body) =
        send(&app, Method::PUT, &format!("/api/home/{id}/info"), Some(valid_info())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userInfo"]["electricityRateCents"], 40);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/home/{id}/conditions"),
        Some(valid_conditions()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userConditions"]["pvConfig"], "CHEAP");

    let (status, body) = send(&app, Method::POST, &format!("/api/home/{id}/result"), None).await;
    assert_eq!(status, StatusCode::OK);

    let result = &body["userResult"];
    assert_eq!(result["possibleElectricityGenerationKwh"], 800);
    assert_eq!(result["possibleSavingsEur"], 320);
    assert_eq!(result["amortises"], true);
    assert_eq!(result["amortisationYears"], 1.6);
    assert_eq!(result["dailyYieldKwh"], 2.2);
    assert!(result["dailyEBikeRangeKm"].as_f64().unwrap() > 0.0);

    let (status, stored) = send(&app, Method::GET, &format!("/api/home/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["userResult"], body["userResult"]);
}

#[tokio::test]
async fn out_of_range_rate_is_rejected() {
    let app = app();
    let id = new_user(&app).await;

    let mut info = valid_info();
    info["electricityRateCents"] = json!(150);
    let (status, body) = send(&app, Method::PUT, &format!("/api/home/{id}/info"), Some(info)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
    assert!(body["fieldErrors"]["electricityRateCents"].is_string());

    let (_, stored) = send(&app, Method::GET, &format!("/api/home/{id}"), None).await;
    assert!(stored["userInfo"].is_null());
}

#[tokio::test]
async fn missing_field_is_rejected() {
    let app = app();
    let id = new_user(&app).await;

    let info = json!({ "electricityRateCents": 40, "householdSize": 2 });
    let (status, body) = send(&app, Method::PUT, &format!("/api/home/{id}/info"), Some(info)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fieldErrors"]["annualConsumptionKwh"].is_string());
}

#[tokio::test]
async fn steep_angle_is_rejected() {
    let app = app();
    let id = new_user(&app).await;

    let mut conditions = valid_conditions();
    conditions["tiltAngleDeg"] = json!(150);
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/home/{id}/conditions"),
        Some(conditions),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fieldErrors"]["tiltAngleDeg"].is_string());
}

#[tokio::test]
async fn unknown_pv_config_is_rejected() {
    let app = app();
    let id = new_user(&app).await;

    let mut conditions = valid_conditions();
    conditions["pvConfig"] = json!("DELUXE");
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/home/{id}/conditions"),
        Some(conditions),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Unknown PV configuration: DELUXE"));
}

#[tokio::test]
async fn result_requires_household_info_first() {
    let app = app();
    let id = new_user(&app).await;

    let (status, body) = send(&app, Method::POST, &format!("/api/home/{id}/result"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MissingHouseholdInfo");

    send(&app, Method::PUT, &format!("/api/home/{id}/info"), Some(valid_info())).await;
    let (status, body) = send(&app, Method::POST, &format!("/api/home/{id}/result"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MissingMountingConditions");
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = app();
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(&app, Method::GET, &format!("/api/home/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/home/{missing}/info"),
        Some(valid_info()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/api/home/not-a-uuid/result", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lists_pv_configs() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/home/pv-configs", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["CHEAP", "MEDIUM", "PREMIUM"]);
    assert_eq!(body[2]["totalModuleKwp"], 1.6);
}

#[tokio::test]
async fn health_endpoints() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["store"]["status"], "healthy");
}
