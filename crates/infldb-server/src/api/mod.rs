mod profiles;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use infldb_ingest::SourceClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};
use crate::store::{ProfileStore, Snapshot};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProfileStore>,
    pub client: SourceClient,
    /// Directory or URL base of the monthly performance exports.
    pub performance_dir: Arc<str>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    profiles: usize,
    loaded_at: Option<DateTime<Utc>>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn normalize_limit(limit: Option<i64>) -> usize {
    let clamped = limit.unwrap_or(100).clamp(1, 500);
    usize::try_from(clamped).unwrap_or(100)
}

/// Current snapshot, or a 503 while the first load is still running.
pub(super) async fn require_snapshot(
    state: &AppState,
    request_id: &str,
) -> Result<Snapshot, ApiError> {
    state.store.snapshot().await.ok_or_else(|| {
        ApiError::new(
            request_id,
            "unavailable",
            "profiles are still loading; try again shortly",
        )
    })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/profiles", get(profiles::list_profiles))
        .route("/api/v1/profiles/lookup", get(profiles::lookup_profile))
        .route(
            "/api/v1/profiles/{platform}/{base_id}",
            get(profiles::get_profile),
        )
        .route(
            "/api/v1/profiles/{platform}/{base_id}/performance",
            get(profiles::get_performance),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let data = match state.store.snapshot().await {
        Some(snapshot) => HealthData {
            status: "ok",
            profiles: snapshot.profiles.len(),
            loaded_at: Some(snapshot.loaded_at),
        },
        None => HealthData {
            status: "loading",
            profiles: 0,
            loaded_at: None,
        },
    };

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
