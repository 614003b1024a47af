use super::*;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::{FieldKind, FIELDS};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
struct RecordedRequest {
    content_type: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    response: Value,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn handle_predict(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_str(&body).unwrap_or(Value::Null);
    state
        .requests
        .lock()
        .await
        .push(RecordedRequest { content_type, body });
    (state.status, Json(state.response.clone()))
}

async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "timestamp": "2024-01-01T00:00:00"}))
}

async fn spawn_prediction_server(
    status: StatusCode,
    response: Value,
) -> (String, Arc<Mutex<Vec<RecordedRequest>>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        status,
        response,
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/predict", post(handle_predict))
        .route("/health", get(handle_health))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), requests)
}

async fn refused_url() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

fn filled_controller() -> SubmissionController {
    let mut controller = SubmissionController::new();
    for field in FIELDS.iter() {
        let raw = match field.kind {
            FieldKind::Numeric => "1.5",
            FieldKind::Text => "x",
        };
        controller.set_field(field.name, raw).expect("known field");
    }
    controller
}

#[tokio::test]
async fn success_response_renders_label_and_percentage() {
    let (server_url, requests) = spawn_prediction_server(
        StatusCode::OK,
        json!({
            "label": "Happy",
            "prediction": 1,
            "probability": 0.87,
            "timestamp": "2024-01-01T00:00:00Z"
        }),
    )
    .await;
    let client = HttpPredictionClient::new(server_url);
    let mut controller = filled_controller();

    controller.submit(&client).await.expect("submitted");

    let view = controller.view();
    let result = view.result.expect("result region");
    assert_eq!(result.headline, "Happy (1)");
    assert_eq!(result.probability, "87.00%");
    assert_eq!(view.error, None);

    let requests = requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn request_body_has_exactly_the_schema_keys_with_coerced_types() {
    let (server_url, requests) = spawn_prediction_server(
        StatusCode::OK,
        json!({"label": "High CSAT", "prediction": 1, "probability": 0.5, "timestamp": "2024-01-01T00:00:00"}),
    )
    .await;
    let client = HttpPredictionClient::new(server_url);
    let mut controller = filled_controller();

    controller.submit(&client).await.expect("submitted");

    let requests = requests.lock().await;
    let body = requests[0].body.as_object().expect("json object");
    assert_eq!(body.len(), FIELDS.len());
    for field in FIELDS.iter() {
        let value = body.get(field.name).unwrap_or_else(|| panic!("{}", field.name));
        match field.kind {
            FieldKind::Numeric => assert_eq!(value, &json!(1.5), "{}", field.name),
            FieldKind::Text => assert_eq!(value, &json!("x"), "{}", field.name),
        }
    }
}

#[tokio::test]
async fn server_error_message_is_shown_verbatim() {
    let (server_url, _requests) =
        spawn_prediction_server(StatusCode::BAD_REQUEST, json!({"error": "bad input"})).await;
    let client = HttpPredictionClient::new(server_url);
    let mut controller = filled_controller();

    controller.submit(&client).await.expect("submitted");

    assert_eq!(controller.view().error.as_deref(), Some("Error: bad input"));
    assert_eq!(controller.result(), None);
}

#[tokio::test]
async fn server_validation_details_are_kept() {
    let (server_url, _requests) = spawn_prediction_server(
        StatusCode::BAD_REQUEST,
        json!({"error": "Validation failed", "details": ["Feature Item_price must be numeric"]}),
    )
    .await;
    let client = HttpPredictionClient::new(server_url);
    let mut controller = filled_controller();

    controller.submit(&client).await.expect("submitted");

    let err = controller.error().expect("error");
    assert_eq!(err.to_string(), "Error: Validation failed");
    assert_eq!(err.details(), ["Feature Item_price must be numeric"]);
}

#[tokio::test]
async fn server_error_without_message_uses_fallback() {
    let (server_url, _requests) =
        spawn_prediction_server(StatusCode::INTERNAL_SERVER_ERROR, json!("oops")).await;
    let client = HttpPredictionClient::new(server_url);
    let mut controller = filled_controller();

    controller.submit(&client).await.expect("submitted");

    assert_eq!(
        controller.view().error.as_deref(),
        Some("Error: Prediction request failed (HTTP 500)")
    );
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    let client = HttpPredictionClient::new(refused_url().await);
    let mut controller = filled_controller();

    controller.submit(&client).await.expect("submitted");

    let message = controller.view().error.expect("error region");
    assert!(message.starts_with("Network error: "), "{message}");
    assert!(message.len() > "Network error: ".len());
    assert!(controller.error().is_some_and(SubmitError::is_transport));
}

#[tokio::test]
async fn malformed_success_body_is_a_network_error() {
    let (server_url, _requests) =
        spawn_prediction_server(StatusCode::OK, json!({"unexpected": true})).await;
    let client = HttpPredictionClient::new(server_url);
    let mut controller = filled_controller();

    controller.submit(&client).await.expect("submitted");

    let message = controller.view().error.expect("error region");
    assert!(message.starts_with("Network error: "), "{message}");
}

#[tokio::test]
async fn missing_field_issues_no_request() {
    let (server_url, requests) = spawn_prediction_server(StatusCode::OK, json!({})).await;
    let client = HttpPredictionClient::new(server_url);
    let mut controller = filled_controller();
    controller.set_field("Item_price", "").expect("known field");

    let rejected = controller.submit(&client).await.expect_err("blocked");

    assert_eq!(rejected, SubmitRejected::MissingField("Item_price"));
    assert_eq!(controller.state(), &SubmissionState::Idle);
    assert!(requests.lock().await.is_empty());
}

#[tokio::test]
async fn resubmitting_same_state_sends_two_identical_bodies() {
    let (server_url, requests) = spawn_prediction_server(
        StatusCode::OK,
        json!({"label": "High CSAT", "prediction": 1, "probability": 0.9, "timestamp": "2024-01-01T00:00:00"}),
    )
    .await;
    let client = HttpPredictionClient::new(server_url);
    let mut controller = filled_controller();

    controller.submit(&client).await.expect("first");
    controller.submit(&client).await.expect("second");

    let requests = requests.lock().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);
}

#[tokio::test]
async fn health_probe_reads_status() {
    let (server_url, _requests) = spawn_prediction_server(StatusCode::OK, json!({})).await;
    let client = HttpPredictionClient::new(format!("{server_url}/"));

    let health = client.health().await.expect("health");

    assert_eq!(health.status, "healthy");
    assert_eq!(health.timestamp.as_deref(), Some("2024-01-01T00:00:00"));
}

#[test]
fn client_trims_trailing_slash_from_base_url() {
    let client = HttpPredictionClient::new("http://127.0.0.1:5000/");
    assert_eq!(client.predict_url(), "http://127.0.0.1:5000/predict");
    assert_eq!(client.health_url(), "http://127.0.0.1:5000/health");
}

#[test]
fn client_uses_configured_server_url() {
    let settings = ClientSettings {
        server_url: "https://csat.example.com/api".into(),
    };
    let client = HttpPredictionClient::from_settings(&settings);
    assert_eq!(client.predict_url(), "https://csat.example.com/api/predict");
}
