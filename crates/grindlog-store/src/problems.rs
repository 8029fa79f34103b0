//! Problem repository backed by Redis.
//!
//! Each user's problems live in one hash keyed
//! `{prefix}:{user_id}:problems`, one field per record. Mutations touch a
//! single field (HSET/HDEL), so concurrent writers for the same user can
//! only race on the same record, never clobber the whole collection.

use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;
use tracing::debug;
use uuid::Uuid;

use grindlog_core::{
    normalize_tags, CreateProblemRequest, Difficulty, Error, Problem, ProblemRepository,
    ProblemStatus, Result, UpdateProblemRequest,
};

use crate::client::RedisClient;

const COLLECTION: &str = "problems";

/// Redis implementation of [`ProblemRepository`].
pub struct RedisProblemRepository {
    client: RedisClient,
}

impl RedisProblemRepository {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, user_id: &str) -> String {
        self.client.collection_key(user_id, COLLECTION)
    }
}

/// Materialize a new record from a create request.
pub(crate) fn build_problem(req: CreateProblemRequest) -> Problem {
    let now = Utc::now();
    Problem {
        id: Uuid::now_v7(),
        title: req.title,
        platform: req.platform,
        url: req.url,
        status: req.status.unwrap_or(ProblemStatus::Attempted),
        difficulty: req.difficulty.unwrap_or(Difficulty::Medium),
        tags: normalize_tags(req.tags.unwrap_or_default()),
        solved_at: req.solved_at,
        created_at: now,
        updated_at: now,
    }
}

/// Sort records most recently touched first; UUIDv7 ids break timestamp
/// ties in creation order.
pub(crate) fn sort_recent_first(problems: &mut [Problem]) {
    problems.sort_by(|a, b| {
        b.touched_at()
            .cmp(&a.touched_at())
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl ProblemRepository for RedisProblemRepository {
    async fn list(&self, user_id: &str) -> Result<Vec<Problem>> {
        let mut conn = self.client.connection();
        let raw: Vec<String> = conn.hvals(self.key(user_id)).await?;

        let mut problems = raw
            .iter()
            .map(|value| serde_json::from_str::<Problem>(value))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        sort_recent_first(&mut problems);

        debug!(
            subsystem = "store",
            component = "redis",
            op = "list",
            user_id = %user_id,
            result_count = problems.len(),
            "Listed problems"
        );
        Ok(problems)
    }

    async fn create(&self, user_id: &str, req: CreateProblemRequest) -> Result<Problem> {
        let problem = build_problem(req);
        let value = serde_json::to_string(&problem)?;

        let mut conn = self.client.connection();
        let _: () = conn
            .hset(self.key(user_id), problem.id.to_string(), value)
            .await?;

        debug!(
            subsystem = "store",
            component = "redis",
            op = "create",
            user_id = %user_id,
            problem_id = %problem.id,
            "Created problem"
        );
        Ok(problem)
    }

    async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        req: UpdateProblemRequest,
    ) -> Result<Problem> {
        let key = self.key(user_id);
        let mut conn = self.client.connection();

        let raw: Option<String> = conn.hget(&key, id.to_string()).await?;
        let mut problem: Problem = match raw {
            Some(value) => serde_json::from_str(&value)?,
            None => return Err(Error::ProblemNotFound(id)),
        };

        req.apply(&mut problem);
        problem.updated_at = Utc::now();

        let value = serde_json::to_string(&problem)?;
        let _: () = conn.hset(&key, id.to_string(), value).await?;

        debug!(
            subsystem = "store",
            component = "redis",
            op = "update",
            user_id = %user_id,
            problem_id = %id,
            "Updated problem"
        );
        Ok(problem)
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<()> {
        let mut conn = self.client.connection();
        let removed: i64 = conn.hdel(self.key(user_id), id.to_string()).await?;
        if removed == 0 {
            return Err(Error::ProblemNotFound(id));
        }

        debug!(
            subsystem = "store",
            component = "redis",
            op = "delete",
            user_id = %user_id,
            problem_id = %id,
            "Deleted problem"
        );
        Ok(())
    }
}
