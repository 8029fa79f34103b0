//! In-memory repositories with the same semantics as the Redis ones.
//!
//! Used by the test suites so handler and repository behavior can be
//! exercised without a running Redis instance.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use grindlog_core::{
    CreateNoteRequest, CreateProblemRequest, Error, Note, NoteRepository, Problem,
    ProblemRepository, Result, UpdateNoteRequest, UpdateProblemRequest,
};

use crate::notes::build_note;
use crate::problems::build_problem;

type UserMap<T> = HashMap<String, HashMap<Uuid, T>>;

/// In-memory implementation of [`ProblemRepository`].
#[derive(Default)]
pub struct MemoryProblemRepository {
    inner: Arc<RwLock<UserMap<Problem>>>,
}

impl MemoryProblemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProblemRepository for MemoryProblemRepository {
    async fn list(&self, user_id: &str) -> Result<Vec<Problem>> {
        let guard = self.inner.read().await;
        let mut problems: Vec<Problem> = guard
            .get(user_id)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default();
        crate::problems::sort_recent_first(&mut problems);
        Ok(problems)
    }

    async fn create(&self, user_id: &str, req: CreateProblemRequest) -> Result<Problem> {
        let problem = build_problem(req);
        let mut guard = self.inner.write().await;
        guard
            .entry(user_id.to_string())
            .or_default()
            .insert(problem.id, problem.clone());
        Ok(problem)
    }

    async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        req: UpdateProblemRequest,
    ) -> Result<Problem> {
        let mut guard = self.inner.write().await;
        let problem = guard
            .get_mut(user_id)
            .and_then(|records| records.get_mut(&id))
            .ok_or(Error::ProblemNotFound(id))?;

        req.apply(problem);
        problem.updated_at = Utc::now();
        Ok(problem.clone())
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<()> {
        let mut guard = self.inner.write().await;
        let removed = guard
            .get_mut(user_id)
            .and_then(|records| records.remove(&id));
        match removed {
            Some(_) => Ok(()),
            None => Err(Error::ProblemNotFound(id)),
        }
    }
}

/// In-memory implementation of [`NoteRepository`].
#[derive(Default)]
pub struct MemoryNoteRepository {
    inner: Arc<RwLock<UserMap<Note>>>,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn list(&self, user_id: &str) -> Result<Vec<Note>> {
        let guard = self.inner.read().await;
        let mut notes: Vec<Note> = guard
            .get(user_id)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default();
        crate::notes::sort_recent_first(&mut notes);
        Ok(notes)
    }

    async fn fetch(&self, user_id: &str, id: Uuid) -> Result<Note> {
        let mut guard = self.inner.write().await;
        let note = guard
            .get_mut(user_id)
            .and_then(|records| records.get_mut(&id))
            .ok_or(Error::NoteNotFound(id))?;
        note.view_count += 1;
        Ok(note.clone())
    }

    async fn create(&self, user_id: &str, req: CreateNoteRequest) -> Result<Note> {
        let note = build_note(req);
        let mut guard = self.inner.write().await;
        guard
            .entry(user_id.to_string())
            .or_default()
            .insert(note.id, note.clone());
        Ok(note)
    }

    async fn update(&self, user_id: &str, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        let mut guard = self.inner.write().await;
        let note = guard
            .get_mut(user_id)
            .and_then(|records| records.get_mut(&id))
            .ok_or(Error::NoteNotFound(id))?;

        req.apply(note);
        note.updated_at = Utc::now();
        Ok(note.clone())
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<()> {
        let mut guard = self.inner.write().await;
        let removed = guard
            .get_mut(user_id)
            .and_then(|records| records.remove(&id));
        match removed {
            Some(_) => Ok(()),
            None => Err(Error::NoteNotFound(id)),
        }
    }
}
