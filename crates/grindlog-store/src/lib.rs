//! # grindlog-store
//!
//! Storage backends for grindlog. The production backend is Redis: each
//! user's logical collection is one hash, one field per record, so
//! mutations are single-record and never rewrite the whole collection. An
//! in-memory backend with identical semantics serves the test suites.

pub mod client;
pub mod memory;
pub mod notes;
pub mod problems;

use std::sync::Arc;

use grindlog_core::{NoteRepository, ProblemRepository};

pub use client::{RedisClient, RedisConfig, DEFAULT_KEY_PREFIX, DEFAULT_REDIS_URL};
pub use memory::{MemoryNoteRepository, MemoryProblemRepository};
pub use notes::RedisNoteRepository;
pub use problems::RedisProblemRepository;

/// Bundle of repositories handed to the API layer.
#[derive(Clone)]
pub struct Store {
    /// Problem repository for CRUD operations.
    pub problems: Arc<dyn ProblemRepository>,
    /// Note repository for the knowledge base.
    pub notes: Arc<dyn NoteRepository>,
    /// Redis handle for readiness probes; `None` for the in-memory backend.
    redis: Option<RedisClient>,
}

impl Store {
    /// Build a store over a connected Redis client.
    pub fn redis(client: RedisClient) -> Self {
        Self {
            problems: Arc::new(RedisProblemRepository::new(client.clone())),
            notes: Arc::new(RedisNoteRepository::new(client.clone())),
            redis: Some(client),
        }
    }

    /// Build an in-memory store (tests, local development without Redis).
    pub fn memory() -> Self {
        Self {
            problems: Arc::new(MemoryProblemRepository::new()),
            notes: Arc::new(MemoryNoteRepository::new()),
            redis: None,
        }
    }

    /// Whether the backing store currently answers.
    ///
    /// The in-memory backend is always ready.
    pub async fn ready(&self) -> bool {
        match &self.redis {
            Some(client) => client.ping().await,
            None => true,
        }
    }
}
