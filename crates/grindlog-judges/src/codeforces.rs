//! Codeforces problem lookup.
//!
//! Parses a contest id and problem index out of a Codeforces URL, then
//! resolves the pair against the judge's public problemset catalog
//! (`/api/problemset.problems`). The catalog has no per-problem endpoint,
//! so resolution is a linear search over the returned list.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use grindlog_core::{normalize_tags, Difficulty, Error, ImportedProblem, Platform, Result};

/// Default base URL of the Codeforces public API.
pub const DEFAULT_API_URL: &str = "https://codeforces.com/api";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Rating at or below which a problem counts as Easy.
pub const EASY_MAX_RATING: u32 = 1200;

/// Rating at or below which a problem counts as Medium.
pub const MEDIUM_MAX_RATING: u32 = 1600;

fn url_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"/contest/(\d+)/problem/([A-Za-z]\d*)").unwrap(),
            Regex::new(r"/problemset/problem/(\d+)/([A-Za-z]\d*)").unwrap(),
            Regex::new(r"/contest/(\d+)/([A-Za-z]\d*)").unwrap(),
        ]
    })
}

/// Extract `(contest_id, problem_index)` from a Codeforces URL.
///
/// Accepts the contest, problemset, and short contest URL forms. The index
/// is uppercased ("a" and "A" address the same problem).
pub fn parse_problem_url(url: &str) -> Result<(u32, String)> {
    for pattern in url_patterns() {
        if let Some(caps) = pattern.captures(url) {
            let contest_id: u32 = caps[1]
                .parse()
                .map_err(|_| Error::InvalidInput(format!("Invalid contest id in URL: {}", url)))?;
            return Ok((contest_id, caps[2].to_uppercase()));
        }
    }
    Err(Error::InvalidInput(format!(
        "Unrecognized Codeforces problem URL: {}",
        url
    )))
}

/// Map a numeric rating to a difficulty bucket. Unrated problems default to
/// Medium.
pub fn difficulty_for_rating(rating: Option<u32>) -> Difficulty {
    match rating {
        Some(r) if r <= EASY_MAX_RATING => Difficulty::Easy,
        Some(r) if r <= MEDIUM_MAX_RATING => Difficulty::Medium,
        Some(_) => Difficulty::Hard,
        None => Difficulty::Medium,
    }
}

// =============================================================================
// CATALOG WIRE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    status: String,
    comment: Option<String>,
    result: Option<CatalogResult>,
}

#[derive(Debug, Deserialize)]
struct CatalogResult {
    problems: Vec<CatalogProblem>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CatalogProblem {
    #[serde(rename = "contestId")]
    pub contest_id: Option<u32>,
    pub index: String,
    pub name: String,
    pub rating: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Linear search for a contest/index pair in the catalog.
pub(crate) fn find_in_catalog<'a>(
    problems: &'a [CatalogProblem],
    contest_id: u32,
    index: &str,
) -> Option<&'a CatalogProblem> {
    problems.iter().find(|p| {
        p.contest_id == Some(contest_id) && p.index.eq_ignore_ascii_case(index)
    })
}

// =============================================================================
// CLIENT
// =============================================================================

/// Client for the Codeforces public API.
pub struct CodeforcesClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Default for CodeforcesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeforcesClient {
    /// Create a client against the real Codeforces API.
    ///
    /// The per-request timeout is tunable via `CODEFORCES_TIMEOUT_SECS`.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL.to_string())
    }

    /// Create a client against a custom base URL (test servers).
    pub fn with_base_url(base_url: String) -> Self {
        let timeout_secs = std::env::var("CODEFORCES_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Resolve a Codeforces problem URL to normalized metadata.
    pub async fn fetch_problem(&self, url: &str) -> Result<ImportedProblem> {
        let (contest_id, index) = parse_problem_url(url)?;
        debug!(
            subsystem = "judges",
            component = "codeforces",
            op = "import",
            judge_url = %url,
            contest_id,
            index = %index,
            "Resolving Codeforces problem"
        );

        let endpoint = format!("{}/problemset.problems", self.base_url);
        let response = self
            .client
            .get(&endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Codeforces unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "Codeforces returned HTTP {}",
                response.status()
            )));
        }

        let catalog: CatalogResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Malformed Codeforces catalog: {}", e)))?;

        if catalog.status != "OK" {
            return Err(Error::Upstream(format!(
                "Codeforces API status {}: {}",
                catalog.status,
                catalog.comment.unwrap_or_default()
            )));
        }

        let problems = catalog
            .result
            .map(|r| r.problems)
            .unwrap_or_default();

        let found = find_in_catalog(&problems, contest_id, &index).ok_or_else(|| {
            Error::NotFound(format!(
                "Problem {}{} not in Codeforces catalog",
                contest_id, index
            ))
        })?;

        info!(
            subsystem = "judges",
            component = "codeforces",
            op = "import",
            contest_id,
            index = %index,
            rating = found.rating,
            "Resolved Codeforces problem"
        );

        Ok(ImportedProblem {
            title: format!("{}{}. {}", contest_id, found.index, found.name),
            platform: Platform::Codeforces,
            url: url.to_string(),
            difficulty: difficulty_for_rating(found.rating),
            tags: normalize_tags(found.tags.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contest_problem_url() {
        let (contest, index) =
            parse_problem_url("https://codeforces.com/contest/1850/problem/C").unwrap();
        assert_eq!(contest, 1850);
        assert_eq!(index, "C");
    }

    #[test]
    fn test_parse_short_contest_url() {
        let (contest, index) = parse_problem_url("https://codeforces.com/contest/1/A").unwrap();
        assert_eq!(contest, 1);
        assert_eq!(index, "A");
    }

    #[test]
    fn test_parse_problemset_url() {
        let (contest, index) =
            parse_problem_url("https://codeforces.com/problemset/problem/4/a").unwrap();
        assert_eq!(contest, 4);
        assert_eq!(index, "A");
    }

    #[test]
    fn test_parse_two_character_index() {
        let (contest, index) =
            parse_problem_url("https://codeforces.com/contest/1901/problem/F1").unwrap();
        assert_eq!(contest, 1901);
        assert_eq!(index, "F1");
    }

    #[test]
    fn test_parse_rejects_non_problem_url() {
        let err = parse_problem_url("https://codeforces.com/profile/tourist").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(difficulty_for_rating(Some(800)), Difficulty::Easy);
        assert_eq!(difficulty_for_rating(Some(1200)), Difficulty::Easy);
        assert_eq!(difficulty_for_rating(Some(1201)), Difficulty::Medium);
        assert_eq!(difficulty_for_rating(Some(1500)), Difficulty::Medium);
        assert_eq!(difficulty_for_rating(Some(1600)), Difficulty::Medium);
        assert_eq!(difficulty_for_rating(Some(1601)), Difficulty::Hard);
        assert_eq!(difficulty_for_rating(Some(3500)), Difficulty::Hard);
        assert_eq!(difficulty_for_rating(None), Difficulty::Medium);
    }

    #[test]
    fn test_find_in_catalog_matches_pair() {
        let problems = vec![
            CatalogProblem {
                contest_id: Some(1),
                index: "A".to_string(),
                name: "Theatre Square".to_string(),
                rating: Some(1000),
                tags: vec!["math".to_string()],
            },
            CatalogProblem {
                contest_id: Some(1),
                index: "B".to_string(),
                name: "Spreadsheet".to_string(),
                rating: Some(1600),
                tags: vec![],
            },
        ];

        let found = find_in_catalog(&problems, 1, "B").unwrap();
        assert_eq!(found.name, "Spreadsheet");

        // Index comparison ignores case
        assert!(find_in_catalog(&problems, 1, "a").is_some());

        // Unknown pair
        assert!(find_in_catalog(&problems, 2, "A").is_none());
    }

    #[test]
    fn test_catalog_response_deserializes_api_shape() {
        let body = r#"{
            "status": "OK",
            "result": {
                "problems": [
                    {"contestId": 1, "index": "A", "name": "Theatre Square",
                     "type": "PROGRAMMING", "points": 500.0, "rating": 1000,
                     "tags": ["math"]}
                ]
            }
        }"#;
        let response: CatalogResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, "OK");
        let problems = response.result.unwrap().problems;
        assert_eq!(problems[0].contest_id, Some(1));
        assert_eq!(problems[0].rating, Some(1000));
    }

    #[test]
    fn test_catalog_problem_without_rating() {
        let body = r#"{"contestId": 1234, "index": "A", "name": "Unrated"}"#;
        let problem: CatalogProblem = serde_json::from_str(body).unwrap();
        assert!(problem.rating.is_none());
        assert!(problem.tags.is_empty());
        assert_eq!(difficulty_for_rating(problem.rating), Difficulty::Medium);
    }
}
