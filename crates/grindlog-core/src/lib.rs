//! # grindlog-core
//!
//! Core types, traits, and aggregation logic for grindlog, a personal
//! competitive-programming progress tracker.
//!
//! This crate provides the foundational data structures, the repository
//! trait definitions, and the two pure computations the system performs:
//! the stats roll-up and the heatmap/streak calculation.

pub mod activity;
pub mod error;
pub mod logging;
pub mod models;
pub mod stats;
pub mod traits;

// Re-export commonly used types at crate root
pub use activity::{
    heatmap, heatmap_now, level_for_count, streaks, HeatmapEntry, StreakSummary,
    HEATMAP_WINDOW_DAYS,
};
pub use error::{Error, Result};
pub use models::*;
pub use stats::{aggregate, ProblemStats};
pub use traits::{NoteRepository, ProblemRepository};
