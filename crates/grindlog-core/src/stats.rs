//! Summary statistics over a user's problem list.
//!
//! Pure and stateless: every call recomputes from the full snapshot. There
//! is no incremental maintenance — the lists involved are a single user's
//! practice log, small enough that a linear pass per request is fine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Difficulty, Problem, ProblemStatus};

/// Aggregate counters derived from a problem snapshot.
///
/// `by_difficulty`, `by_platform`, and `by_tag` are restricted to Solved
/// records. Difficulty keys are always present (default 0); platform and tag
/// keys are dynamic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemStats {
    pub total: usize,
    pub solved: usize,
    pub attempted: usize,
    pub to_review: usize,
    pub by_difficulty: BTreeMap<String, usize>,
    pub by_platform: BTreeMap<String, usize>,
    pub by_tag: BTreeMap<String, usize>,
}

/// Compute summary counters from the full problem snapshot.
pub fn aggregate(problems: &[Problem]) -> ProblemStats {
    let mut solved = 0;
    let mut attempted = 0;
    let mut to_review = 0;

    let mut by_difficulty: BTreeMap<String, usize> = BTreeMap::new();
    for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        by_difficulty.insert(d.as_str().to_string(), 0);
    }
    let mut by_platform: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_tag: BTreeMap<String, usize> = BTreeMap::new();

    for problem in problems {
        match problem.status {
            ProblemStatus::Solved => solved += 1,
            ProblemStatus::Attempted => attempted += 1,
            ProblemStatus::ToReview => to_review += 1,
        }

        if problem.status != ProblemStatus::Solved {
            continue;
        }

        *by_difficulty
            .entry(problem.difficulty.as_str().to_string())
            .or_insert(0) += 1;
        *by_platform
            .entry(problem.platform.as_str().to_string())
            .or_insert(0) += 1;
        // One increment per tag per record; tags are already deduplicated.
        for tag in &problem.tags {
            *by_tag.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    ProblemStats {
        total: problems.len(),
        solved,
        attempted,
        to_review,
        by_difficulty,
        by_platform,
        by_tag,
    }
}
