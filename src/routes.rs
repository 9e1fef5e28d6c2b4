//! Route definitions and router setup
//!
//! Configures all API routes and middleware.

mod car;
mod email;
mod inquiry;

use crate::config::Settings;
use crate::state::SharedState;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState, settings: &Settings) -> Router {
    // Build CORS layer
    let cors = build_cors_layer(settings);

    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Build middleware stack
    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(cors)
        .propagate_x_request_id();

    // Build the router
    Router::new()
        // Health check
        .route("/api/health", get(health_check))
        // Car catalog
        .route("/api/cars", post(car::create_car).get(car::list_cars))
        .route(
            "/api/cars/{id}",
            get(car::get_car).put(car::update_car).delete(car::delete_car),
        )
        // Inquiries
        .route(
            "/api/inquiries",
            post(inquiry::create_inquiry).get(inquiry::list_inquiries),
        )
        .route("/api/inquiries/{id}/status", put(inquiry::update_inquiry_status))
        .route("/api/inquiries/{id}", delete(inquiry::delete_inquiry))
        // Contact relay
        .route("/api/send-email", post(email::send_email))
        // Apply middleware and state
        .layer(middleware)
        .with_state(state)
}

/// Build CORS layer from settings
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    }
}

/// Health check response payload
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    db_connected: bool,
    timestamp: String,
}

/// Health check endpoint: liveness plus database reachability
async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    let db_connected = match &state.db {
        Some(db) => crate::db::ping(db).await,
        None => false,
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        db_connected,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CorsConfig, EmailConfig, ServerConfig, Settings, StorageConfig};
    use crate::inventory::{InventoryStore, MemoryInventory};
    use crate::mailer::Mailer;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_settings() -> Settings {
        Settings {
            server: ServerConfig::default(),
            storage: StorageConfig::Local {
                path: "inventory.json".into(),
            },
            cors: CorsConfig::default(),
            email: EmailConfig::default(),
        }
    }

    /// Demo-mode app over in-memory persistence
    fn test_app() -> Router {
        let store = InventoryStore::open(Box::new(MemoryInventory::new()))
            .expect("store opens");
        let state = Arc::new(AppState::standalone(store, Mailer::new(EmailConfig::default())));
        create_router(state, &test_settings())
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).expect("serializes")))
                .expect("request builds"),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request builds"),
        };

        let response = app.clone().oneshot(request).await.expect("app responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is JSON")
        };
        (status, json)
    }

    fn corolla() -> serde_json::Value {
        serde_json::json!({
            "make": "Toyota",
            "model": "Corolla",
            "year": 2022,
            "price": 20000,
            "mileage": 5000,
            "images": ["http://x/img.jpg"]
        })
    }

    fn inquiry() -> serde_json::Value {
        serde_json::json!({
            "name": "Jamie",
            "email": "jamie@example.com",
            "message": "Is the Corolla still available?",
            "car": {"make": "Toyota", "model": "Corolla"}
        })
    }

    #[tokio::test]
    async fn health_reports_no_database_in_demo_mode() {
        let app = test_app();
        let (status, json) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["dbConnected"], false);
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = test_app();
        let (status, _) = send(&app, "GET", "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn car_crud_round_trip() {
        let app = test_app();

        // Create
        let (status, created) = send(&app, "POST", "/api/cars", Some(corolla())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().expect("id present").to_string();
        assert_eq!(created["make"], "Toyota");
        assert_eq!(created["fuel"], "Gasoline");

        // Listed exactly once (3 seeded + 1 created)
        let (status, listed) = send(&app, "GET", "/api/cars", None).await;
        assert_eq!(status, StatusCode::OK);
        let cars = listed.as_array().expect("array");
        assert_eq!(cars.len(), 4);
        assert_eq!(
            cars.iter().filter(|car| car["id"] == created["id"]).count(),
            1
        );

        // Fetch by id returns the same attributes
        let (status, fetched) = send(&app, "GET", &format!("/api/cars/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["model"], "Corolla");
        assert_eq!(fetched["price"], created["price"]);

        // Full replace refreshes updatedAt, keeps createdAt
        let mut replacement = corolla();
        replacement["model"] = serde_json::json!("Camry");
        replacement["featured"] = serde_json::json!(true);
        let (status, updated) =
            send(&app, "PUT", &format!("/api/cars/{}", id), Some(replacement)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["model"], "Camry");
        assert_eq!(updated["featured"], true);
        assert_eq!(updated["createdAt"], created["createdAt"]);

        // Delete removes it from subsequent lists
        let (status, deleted) = send(&app, "DELETE", &format!("/api/cars/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["success"], true);

        let (status, _) = send(&app, "GET", &format!("/api/cars/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, listed) = send(&app, "GET", "/api/cars", None).await;
        assert_eq!(listed.as_array().expect("array").len(), 3);
    }

    #[tokio::test]
    async fn create_car_without_images_is_rejected() {
        let app = test_app();
        let mut body = corolla();
        body["images"] = serde_json::json!([]);
        let (status, json) = send(&app, "POST", "/api/cars", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn create_car_with_missing_field_is_rejected() {
        let app = test_app();
        let mut body = corolla();
        body.as_object_mut().expect("object").remove("make");
        let (status, json) = send(&app, "POST", "/api/cars", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_car_id_returns_400() {
        let app = test_app();
        let (status, json) = send(&app, "GET", "/api/cars/not-a-number", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MALFORMED_ID");
    }

    #[tokio::test]
    async fn deleting_absent_car_returns_404() {
        let app = test_app();
        let (status, json) = send(&app, "DELETE", "/api/cars/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn inquiry_lifecycle() {
        let app = test_app();

        // Create starts in `new`, even if the client claims otherwise
        let mut body = inquiry();
        body["status"] = serde_json::json!("contacted");
        let (status, created) = send(&app, "POST", "/api/inquiries", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "new");
        let id = created["id"].as_str().expect("id present").to_string();

        // Newest first
        let (_, _) = send(&app, "POST", "/api/inquiries", Some(inquiry())).await;
        let (status, listed) = send(&app, "GET", "/api/inquiries", None).await;
        assert_eq!(status, StatusCode::OK);
        let inquiries = listed.as_array().expect("array");
        assert_eq!(inquiries.len(), 2);
        assert!(inquiries[0]["id"] != created["id"], "newest first");

        // new -> contacted
        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/inquiries/{}/status", id),
            Some(serde_json::json!({"status": "contacted"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["success"], true);

        // Terminal: no second transition
        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/inquiries/{}/status", id),
            Some(serde_json::json!({"status": "rejected"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["code"], "CONFLICT");

        // Delete
        let (status, deleted) =
            send(&app, "DELETE", &format!("/api/inquiries/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["success"], true);

        let (_, listed) = send(&app, "GET", "/api/inquiries", None).await;
        assert_eq!(listed.as_array().expect("array").len(), 1);
    }

    #[tokio::test]
    async fn status_new_is_not_a_valid_target() {
        let app = test_app();
        let (_, created) = send(&app, "POST", "/api/inquiries", Some(inquiry())).await;
        let id = created["id"].as_str().expect("id present");

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/inquiries/{}/status", id),
            Some(serde_json::json!({"status": "new"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn status_update_on_absent_inquiry_returns_404() {
        let app = test_app();
        let (status, _) = send(
            &app,
            "PUT",
            "/api/inquiries/99/status",
            Some(serde_json::json!({"status": "contacted"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_inquiry_id_returns_400() {
        let app = test_app();
        let (status, json) = send(
            &app,
            "PUT",
            "/api/inquiries/zzz/status",
            Some(serde_json::json!({"status": "contacted"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MALFORMED_ID");

        let (status, _) = send(&app, "DELETE", "/api/inquiries/zzz", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_inquiry_email_is_rejected() {
        let app = test_app();
        let mut body = inquiry();
        body["email"] = serde_json::json!("not-an-email");
        let (status, json) = send(&app, "POST", "/api/inquiries", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn send_email_with_missing_message_returns_400() {
        let app = test_app();
        let (status, json) = send(
            &app,
            "POST",
            "/api/send-email",
            Some(serde_json::json!({
                "recipient": "sales@dealer.test",
                "subject": "Vehicle inquiry",
                "name": "Jamie",
                "email": "jamie@example.com"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing required fields");
    }
}
