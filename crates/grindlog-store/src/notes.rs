//! Note repository backed by Redis.
//!
//! Same per-record hash layout as the problem repository:
//! `{prefix}:{user_id}:notes`, field = note id.

use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;
use tracing::debug;
use uuid::Uuid;

use grindlog_core::{
    normalize_tags, CreateNoteRequest, Error, Note, NoteKind, NoteRepository, Result,
    UpdateNoteRequest,
};

use crate::client::RedisClient;

const COLLECTION: &str = "notes";

/// Category used when a create request does not name one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Redis implementation of [`NoteRepository`].
pub struct RedisNoteRepository {
    client: RedisClient,
}

impl RedisNoteRepository {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, user_id: &str) -> String {
        self.client.collection_key(user_id, COLLECTION)
    }
}

/// Materialize a new note from a create request.
pub(crate) fn build_note(req: CreateNoteRequest) -> Note {
    let now = Utc::now();
    Note {
        id: Uuid::now_v7(),
        title: req.title,
        content: req.content,
        kind: req.kind.unwrap_or(NoteKind::Note),
        category: req.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        tags: normalize_tags(req.tags.unwrap_or_default()),
        difficulty: req.difficulty,
        favorite: req.favorite.unwrap_or(false),
        public: req.public.unwrap_or(false),
        view_count: 0,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn sort_recent_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| {
        b.touched_at()
            .cmp(&a.touched_at())
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl NoteRepository for RedisNoteRepository {
    async fn list(&self, user_id: &str) -> Result<Vec<Note>> {
        let mut conn = self.client.connection();
        let raw: Vec<String> = conn.hvals(self.key(user_id)).await?;

        let mut notes = raw
            .iter()
            .map(|value| serde_json::from_str::<Note>(value))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        sort_recent_first(&mut notes);

        debug!(
            subsystem = "store",
            component = "redis",
            op = "list",
            user_id = %user_id,
            result_count = notes.len(),
            "Listed notes"
        );
        Ok(notes)
    }

    async fn fetch(&self, user_id: &str, id: Uuid) -> Result<Note> {
        let key = self.key(user_id);
        let mut conn = self.client.connection();

        let raw: Option<String> = conn.hget(&key, id.to_string()).await?;
        let mut note: Note = match raw {
            Some(value) => serde_json::from_str(&value)?,
            None => return Err(Error::NoteNotFound(id)),
        };

        // Reads count as views; updated_at stays put.
        note.view_count += 1;
        let value = serde_json::to_string(&note)?;
        let _: () = conn.hset(&key, id.to_string(), value).await?;

        Ok(note)
    }

    async fn create(&self, user_id: &str, req: CreateNoteRequest) -> Result<Note> {
        let note = build_note(req);
        let value = serde_json::to_string(&note)?;

        let mut conn = self.client.connection();
        let _: () = conn
            .hset(self.key(user_id), note.id.to_string(), value)
            .await?;

        debug!(
            subsystem = "store",
            component = "redis",
            op = "create",
            user_id = %user_id,
            note_id = %note.id,
            "Created note"
        );
        Ok(note)
    }

    async fn update(&self, user_id: &str, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        let key = self.key(user_id);
        let mut conn = self.client.connection();

        let raw: Option<String> = conn.hget(&key, id.to_string()).await?;
        let mut note: Note = match raw {
            Some(value) => serde_json::from_str(&value)?,
            None => return Err(Error::NoteNotFound(id)),
        };

        req.apply(&mut note);
        note.updated_at = Utc::now();

        let value = serde_json::to_string(&note)?;
        let _: () = conn.hset(&key, id.to_string(), value).await?;

        debug!(
            subsystem = "store",
            component = "redis",
            op = "update",
            user_id = %user_id,
            note_id = %id,
            "Updated note"
        );
        Ok(note)
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<()> {
        let mut conn = self.client.connection();
        let removed: i64 = conn.hdel(self.key(user_id), id.to_string()).await?;
        if removed == 0 {
            return Err(Error::NoteNotFound(id));
        }

        debug!(
            subsystem = "store",
            component = "redis",
            op = "delete",
            user_id = %user_id,
            note_id = %id,
            "Deleted note"
        );
        Ok(())
    }
}
