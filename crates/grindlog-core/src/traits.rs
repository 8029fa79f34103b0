//! Repository traits for grindlog storage backends.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability. Every operation is
//! scoped to a `user_id` — collections are strictly per-user.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    CreateNoteRequest, CreateProblemRequest, Note, Problem, UpdateNoteRequest,
    UpdateProblemRequest,
};

/// Repository for per-user problem records.
#[async_trait]
pub trait ProblemRepository: Send + Sync {
    /// List all problems for a user, most recently touched first.
    async fn list(&self, user_id: &str) -> Result<Vec<Problem>>;

    /// Create a new problem record, assigning id and timestamps.
    async fn create(&self, user_id: &str, req: CreateProblemRequest) -> Result<Problem>;

    /// Shallow-merge an update into an existing record, refreshing
    /// `updated_at`. Fails with `Error::ProblemNotFound` if the id is
    /// unknown, leaving the store unchanged.
    async fn update(&self, user_id: &str, id: Uuid, req: UpdateProblemRequest)
        -> Result<Problem>;

    /// Remove a record by id. Fails with `Error::ProblemNotFound` if absent.
    async fn delete(&self, user_id: &str, id: Uuid) -> Result<()>;
}

/// Repository for per-user knowledge-base notes.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List all notes for a user, most recently touched first.
    async fn list(&self, user_id: &str) -> Result<Vec<Note>>;

    /// Fetch one note and increment its view count.
    async fn fetch(&self, user_id: &str, id: Uuid) -> Result<Note>;

    /// Create a new note, assigning id and timestamps.
    async fn create(&self, user_id: &str, req: CreateNoteRequest) -> Result<Note>;

    /// Shallow-merge an update into an existing note, refreshing
    /// `updated_at`. Fails with `Error::NoteNotFound` if the id is unknown.
    async fn update(&self, user_id: &str, id: Uuid, req: UpdateNoteRequest) -> Result<Note>;

    /// Remove a note by id. Fails with `Error::NoteNotFound` if absent.
    async fn delete(&self, user_id: &str, id: Uuid) -> Result<()>;
}
