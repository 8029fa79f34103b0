//! Calendar heatmap and solve-streak calculation.
//!
//! The heatmap is a fixed 365-day window ending "today" (inclusive), one
//! entry per calendar day. It is derived on every request from the solve
//! timestamps in the current snapshot; nothing here is stored.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Problem;

/// Number of days in the heatmap window, ending today inclusive.
pub const HEATMAP_WINDOW_DAYS: i64 = 365;

/// One day's activity bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapEntry {
    pub date: NaiveDate,
    pub count: u32,
    /// Intensity bucket 0-4 for calendar-style rendering.
    pub level: u8,
}

/// Current and longest consecutive-activity streaks over the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
}

/// Bucket a solve count into a rendering level.
///
/// Thresholds: 0→0, 1→1, 2→2, 3→3, ≥4→4.
pub fn level_for_count(count: u32) -> u8 {
    count.min(4) as u8
}

/// Build the daily activity series for the window ending at `today`.
///
/// Only records carrying a `solved_at` timestamp count; the day is the UTC
/// calendar day of that timestamp. Solves outside the window are ignored.
pub fn heatmap(problems: &[Problem], today: NaiveDate) -> Vec<HeatmapEntry> {
    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
    for problem in problems {
        if let Some(solved_at) = problem.solved_at {
            *counts.entry(solved_at.date_naive()).or_insert(0) += 1;
        }
    }

    let start = today - Duration::days(HEATMAP_WINDOW_DAYS - 1);
    (0..HEATMAP_WINDOW_DAYS)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let count = counts.get(&date).copied().unwrap_or(0);
            HeatmapEntry {
                date,
                count,
                level: level_for_count(count),
            }
        })
        .collect()
}

/// Convenience wrapper using the current UTC day.
pub fn heatmap_now(problems: &[Problem]) -> Vec<HeatmapEntry> {
    heatmap(problems, Utc::now().date_naive())
}

/// Derive streaks from an ordered daily series (oldest first).
///
/// Current streak: consecutive non-zero days scanning backward from the last
/// entry; a zero day stops the scan even if earlier activity exists.
/// Longest streak: longest run of non-zero days anywhere in the window.
pub fn streaks(series: &[HeatmapEntry]) -> StreakSummary {
    let mut current = 0u32;
    for entry in series.iter().rev() {
        if entry.count == 0 {
            break;
        }
        current += 1;
    }

    let mut longest = 0u32;
    let mut run = 0u32;
    for entry in series {
        if entry.count > 0 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    StreakSummary { current, longest }
}
