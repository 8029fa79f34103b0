//! # grindlog-api
//!
//! HTTP API server for grindlog: problem log CRUD, stats and heatmap
//! endpoints, judge imports, and knowledge-base notes, all scoped to the
//! authenticated user.

pub mod auth;
pub mod error;
pub mod handlers;

use std::num::NonZeroU32;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use governor::{Quota, RateLimiter};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use grindlog_judges::ProblemImporter;
use grindlog_store::Store;

use auth::AuthProvider;

pub use error::ApiError;

/// Maximum accepted request body, in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Global rate limiter type (direct quota, no keyed bucketing — this is a
/// personal server).
pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation when debugging.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Per-user repositories.
    pub store: Store,
    /// Identity provider client.
    pub auth: Arc<dyn AuthProvider>,
    /// Judge metadata importer.
    pub importer: Arc<ProblemImporter>,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    pub fn new(store: Store, auth: Arc<dyn AuthProvider>, importer: ProblemImporter) -> Self {
        Self {
            store,
            auth,
            importer: Arc::new(importer),
            rate_limiter: None,
        }
    }

    /// Attach a global rate limiter allowing `per_second` requests.
    pub fn with_rate_limit(mut self, per_second: NonZeroU32) -> Self {
        self.rate_limiter = Some(Arc::new(RateLimiter::direct(Quota::per_second(per_second))));
        self
    }
}

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Success envelope: `{"success": true, "data": ...}`.
///
/// Failures use the mirror `{"success": false, "error": ...}` shape, built
/// by [`ApiError`].
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

/// Wrap payload in the success envelope.
pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
    })
}

// =============================================================================
// MIDDLEWARE / SYSTEM HANDLERS
// =============================================================================

/// Reject requests beyond the global quota with 429.
async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            tracing::warn!(subsystem = "api", "Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "success": false,
                    "error": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

/// Liveness probe. Reports store readiness without failing the probe — a
/// flapping Redis should show up in monitoring, not restart loops.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_ready = state.store.ready().await;
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "store_ready": store_ready,
    }))
}

// =============================================================================
// ROUTER
// =============================================================================

/// CORS layer from `CORS_ALLOWED_ORIGINS` (comma-separated; default: any).
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ALLOWED_ORIGINS") {
        Ok(origins) if origins != "*" => {
            let parsed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            AllowOrigin::list(parsed)
        }
        _ => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Build the full application router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/auth/signup", post(handlers::signup::signup))
        .route(
            "/problems",
            get(handlers::problems::list_problems).post(handlers::problems::create_problem),
        )
        .route(
            "/problems/:id",
            put(handlers::problems::update_problem).delete(handlers::problems::delete_problem),
        )
        .route("/fetch-problem", post(handlers::import::fetch_problem))
        .route("/stats", get(handlers::activity::get_stats))
        .route("/heatmap", get(handlers::activity::get_heatmap))
        .route(
            "/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route(
            "/notes/:id",
            get(handlers::notes::get_note)
                .put(handlers::notes::update_note)
                .delete(handlers::notes::delete_note),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
