//! Stats and heatmap HTTP handlers.
//!
//! Both derive everything from the caller's current problem snapshot; no
//! aggregate state is stored anywhere.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use grindlog_core::{activity, stats, HeatmapEntry, ProblemStats, StreakSummary};

use crate::auth::RequireAuth;
use crate::{ok, ApiError, AppState, Envelope};

/// Stats payload: the counter roll-up plus streak data.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: ProblemStats,
    pub streak: StreakSummary,
}

/// Aggregate counters and streaks for the caller.
///
/// Recomputed from the full snapshot on every call — two calls without an
/// intervening mutation return identical payloads.
///
/// # Returns
/// - 200 OK with counters and streaks
/// - 401 Unauthorized without a valid token
pub async fn get_stats(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Envelope<StatsResponse>>, ApiError> {
    let problems = state.store.problems.list(&auth.user.id).await?;
    let series = activity::heatmap_now(&problems);

    Ok(ok(StatsResponse {
        stats: stats::aggregate(&problems),
        streak: activity::streaks(&series),
    }))
}

/// 365-day daily activity series ending today.
///
/// # Returns
/// - 200 OK with one entry per day, oldest first
/// - 401 Unauthorized without a valid token
pub async fn get_heatmap(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Envelope<Vec<HeatmapEntry>>>, ApiError> {
    let problems = state.store.problems.list(&auth.user.id).await?;
    Ok(ok(activity::heatmap_now(&problems)))
}
