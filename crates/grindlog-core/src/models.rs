//! Domain models for grindlog.
//!
//! A `Problem` is one practice problem logged by a user. A `Note` is a
//! knowledge-base entry (writeup, template, cheatsheet). Both are owned by
//! exactly one user and addressed by UUID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ENUMS
// =============================================================================

/// Judge hosting a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Codeforces,
    LeetCode,
    Other,
}

impl Platform {
    /// Stable string form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Codeforces => "codeforces",
            Platform::LeetCode => "leetcode",
            Platform::Other => "other",
        }
    }
}

/// Progress state of a logged problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemStatus {
    Solved,
    Attempted,
    ToReview,
}

impl ProblemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemStatus::Solved => "solved",
            ProblemStatus::Attempted => "attempted",
            ProblemStatus::ToReview => "to_review",
        }
    }
}

/// Coarse difficulty bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Kind of knowledge-base note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Note,
    Code,
    Explanation,
    Template,
    Cheatsheet,
}

// =============================================================================
// PROBLEMS
// =============================================================================

/// One logged practice problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    pub title: String,
    pub platform: Platform,
    pub url: String,
    pub status: ProblemStatus,
    pub difficulty: Difficulty,
    /// Normalized: lowercase, deduplicated, sorted.
    pub tags: Vec<String>,
    /// When the problem was solved; drives the heatmap and streaks.
    pub solved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Problem {
    /// Sort key for listings: most recently touched first.
    pub fn touched_at(&self) -> DateTime<Utc> {
        self.updated_at.max(self.created_at)
    }
}

/// Request for logging a new problem.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProblemRequest {
    pub title: String,
    pub platform: Platform,
    pub url: String,
    /// Defaults to `Attempted`.
    pub status: Option<ProblemStatus>,
    /// Defaults to `Medium`.
    pub difficulty: Option<Difficulty>,
    pub tags: Option<Vec<String>>,
    pub solved_at: Option<DateTime<Utc>>,
}

/// Partial update for a problem. Absent fields are left unchanged.
///
/// Fields can be set but not cleared: an explicit `null` deserializes the
/// same as an absent field, so a stored `solved_at` cannot be reset to
/// nothing through an update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProblemRequest {
    pub title: Option<String>,
    pub platform: Option<Platform>,
    pub url: Option<String>,
    pub status: Option<ProblemStatus>,
    pub difficulty: Option<Difficulty>,
    pub tags: Option<Vec<String>>,
    pub solved_at: Option<DateTime<Utc>>,
}

impl UpdateProblemRequest {
    /// Shallow-merge this update into an existing record.
    ///
    /// Does not touch `updated_at`; the repository refreshes that when it
    /// persists the merged record.
    pub fn apply(&self, problem: &mut Problem) {
        if let Some(title) = &self.title {
            problem.title = title.clone();
        }
        if let Some(platform) = self.platform {
            problem.platform = platform;
        }
        if let Some(url) = &self.url {
            problem.url = url.clone();
        }
        if let Some(status) = self.status {
            problem.status = status;
        }
        if let Some(difficulty) = self.difficulty {
            problem.difficulty = difficulty;
        }
        if let Some(tags) = &self.tags {
            problem.tags = normalize_tags(tags.clone());
        }
        if let Some(solved_at) = self.solved_at {
            problem.solved_at = Some(solved_at);
        }
    }
}

/// Normalized problem metadata returned by the importer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedProblem {
    pub title: String,
    pub platform: Platform,
    pub url: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
}

// =============================================================================
// NOTES
// =============================================================================

/// Knowledge-base entry authored by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    /// Markdown body.
    pub content: String,
    pub kind: NoteKind,
    pub category: String,
    pub tags: Vec<String>,
    pub difficulty: Option<Difficulty>,
    pub favorite: bool,
    pub public: bool,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn touched_at(&self) -> DateTime<Utc> {
        self.updated_at.max(self.created_at)
    }
}

/// Request for creating a note.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    /// Defaults to `Note`.
    pub kind: Option<NoteKind>,
    /// Free-text category; defaults to "general".
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub difficulty: Option<Difficulty>,
    pub favorite: Option<bool>,
    pub public: Option<bool>,
}

/// Partial update for a note. Absent fields are left unchanged.
///
/// Set-only, like [`UpdateProblemRequest`]: `difficulty` can be assigned
/// but not cleared back to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub kind: Option<NoteKind>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub difficulty: Option<Difficulty>,
    pub favorite: Option<bool>,
    pub public: Option<bool>,
}

impl UpdateNoteRequest {
    /// Shallow-merge this update into an existing note.
    pub fn apply(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        if let Some(kind) = self.kind {
            note.kind = kind;
        }
        if let Some(category) = &self.category {
            note.category = category.clone();
        }
        if let Some(tags) = &self.tags {
            note.tags = normalize_tags(tags.clone());
        }
        if let Some(difficulty) = self.difficulty {
            note.difficulty = Some(difficulty);
        }
        if let Some(favorite) = self.favorite {
            note.favorite = favorite;
        }
        if let Some(public) = self.public {
            note.public = public;
        }
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Identity returned by the external identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Provider-assigned user id; namespaces all stored collections.
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

// =============================================================================
// TAG NORMALIZATION
// =============================================================================

/// Normalize a tag list: trim, lowercase, drop empties, dedupe, sort.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut set: std::collections::HashSet<String> = tags
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let mut result: Vec<String> = set.drain().collect();
    result.sort();
    result
}
