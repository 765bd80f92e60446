//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter; [`router`] assembles them
//! under `/api` with the auth middleware and the tower-http layers.

pub mod class_room;
pub mod course;
pub mod error;
pub mod middleware;

pub use class_room::{class_room_routes, ClassRoomHandlers};
pub use course::{course_routes, CourseHandlers};

use std::time::Duration;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use self::middleware::{auth_middleware, AuthState};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the full application router.
///
/// Requests without an `x-request-id` get a fresh UUID; the id is echoed
/// on the response and becomes the command correlation id.
pub fn router(
    courses: CourseHandlers,
    class_rooms: ClassRoomHandlers,
    auth: AuthState,
    settings: &HttpSettings,
) -> Router {
    let api = Router::new()
        .nest("/courses", course_routes(courses))
        .nest("/classrooms", class_room_routes(class_rooms))
        .layer(from_fn_with_state(auth, auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
}

/// GET /health - Liveness check
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(parsed))
    }
}
