//! # grindlog-judges
//!
//! Problem importer: given a judge URL, resolve normalized problem metadata
//! (title, difficulty, tags, platform). Dispatch is a tagged variant per
//! judge — two strategies is not enough to justify trait objects.
//!
//! Neither strategy touches the problem store; the importer only returns
//! metadata for the caller to log.

pub mod codeforces;
pub mod leetcode;

use grindlog_core::{Error, ImportedProblem, Result};

pub use codeforces::CodeforcesClient;

/// Supported judge, detected from the URL host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeKind {
    Codeforces,
    LeetCode,
}

impl JudgeKind {
    /// Detect the judge by substring match on the URL.
    pub fn detect(url: &str) -> Result<Self> {
        if url.contains("codeforces.com") {
            Ok(JudgeKind::Codeforces)
        } else if url.contains("leetcode.com") {
            Ok(JudgeKind::LeetCode)
        } else {
            Err(Error::UnsupportedPlatform(url.to_string()))
        }
    }
}

/// Front-end over the per-judge strategies.
pub struct ProblemImporter {
    codeforces: CodeforcesClient,
}

impl Default for ProblemImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemImporter {
    /// Importer against the real judge endpoints.
    pub fn new() -> Self {
        Self {
            codeforces: CodeforcesClient::new(),
        }
    }

    /// Importer with a custom Codeforces client (test servers).
    pub fn with_codeforces(codeforces: CodeforcesClient) -> Self {
        Self { codeforces }
    }

    /// Resolve a problem URL to normalized metadata.
    pub async fn import(&self, url: &str) -> Result<ImportedProblem> {
        match JudgeKind::detect(url)? {
            JudgeKind::Codeforces => self.codeforces.fetch_problem(url).await,
            JudgeKind::LeetCode => leetcode::lookup_problem(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grindlog_core::{Difficulty, Platform};

    #[test]
    fn test_detect_codeforces() {
        assert_eq!(
            JudgeKind::detect("https://codeforces.com/contest/1/A").unwrap(),
            JudgeKind::Codeforces
        );
    }

    #[test]
    fn test_detect_leetcode() {
        assert_eq!(
            JudgeKind::detect("https://leetcode.com/problems/two-sum").unwrap(),
            JudgeKind::LeetCode
        );
    }

    #[test]
    fn test_detect_unsupported() {
        let err = JudgeKind::detect("https://atcoder.jp/contests/abc001").unwrap_err();
        assert!(matches!(err, Error::UnsupportedPlatform(_)));
    }

    #[tokio::test]
    async fn test_import_leetcode_is_offline() {
        let importer = ProblemImporter::new();
        let imported = importer
            .import("https://leetcode.com/problems/two-sum")
            .await
            .unwrap();
        assert_eq!(imported.title, "Two Sum");
        assert_eq!(imported.difficulty, Difficulty::Easy);
        assert_eq!(imported.platform, Platform::LeetCode);
    }

    #[tokio::test]
    async fn test_import_unsupported_platform() {
        let importer = ProblemImporter::new();
        let err = importer
            .import("https://www.hackerrank.com/challenges/solve-me-first")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedPlatform(_)));
    }

    #[tokio::test]
    async fn test_import_codeforces_bad_url_fails_before_network() {
        // Pattern mismatch is rejected without hitting the catalog.
        let importer = ProblemImporter::new();
        let err = importer
            .import("https://codeforces.com/profile/tourist")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
