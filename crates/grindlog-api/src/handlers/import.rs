//! Judge import HTTP handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use grindlog_core::ImportedProblem;

use crate::auth::RequireAuth;
use crate::{ok, ApiError, AppState, Envelope};

/// Request body for a judge lookup.
#[derive(Debug, Deserialize)]
pub struct FetchProblemBody {
    pub url: Option<String>,
}

/// Resolve a judge URL to normalized problem metadata.
///
/// Does not touch the problem store; the client decides whether to log the
/// returned metadata.
///
/// # Returns
/// - 200 OK with normalized metadata
/// - 400 Bad Request for a missing url, unsupported platform, or malformed
///   judge URL
/// - 404 Not Found when the judge catalog has no such problem
/// - 500 Internal Server Error when the judge is unreachable
pub async fn fetch_problem(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(body): Json<FetchProblemBody>,
) -> Result<Json<Envelope<ImportedProblem>>, ApiError> {
    let url = match body.url {
        Some(url) if !url.trim().is_empty() => url,
        _ => return Err(ApiError::BadRequest("Missing required field: url".to_string())),
    };

    let imported = state.importer.import(&url).await?;
    info!(
        subsystem = "api",
        op = "import",
        user_id = %auth.user.id,
        judge_url = %url,
        "Imported problem metadata"
    );
    Ok(ok(imported))
}
