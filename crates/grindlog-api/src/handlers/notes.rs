//! Knowledge-base note HTTP handlers.
//!
//! Same discipline as the problem handlers: per-user collections, 400 for
//! missing required fields, 404 for unknown ids.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use grindlog_core::{CreateNoteRequest, Difficulty, Note, NoteKind, UpdateNoteRequest};

use crate::auth::RequireAuth;
use crate::{ok, ApiError, AppState, Envelope};

/// Request body for creating a note.
#[derive(Debug, Deserialize)]
pub struct CreateNoteBody {
    pub title: Option<String>,
    pub content: Option<String>,
    pub kind: Option<NoteKind>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub difficulty: Option<Difficulty>,
    pub favorite: Option<bool>,
    pub public: Option<bool>,
}

impl CreateNoteBody {
    fn into_request(self) -> Result<CreateNoteRequest, ApiError> {
        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                return Err(ApiError::BadRequest(
                    "Missing required field: title".to_string(),
                ))
            }
        };
        let content = self.content.unwrap_or_default();

        Ok(CreateNoteRequest {
            title,
            content,
            kind: self.kind,
            category: self.category,
            tags: self.tags,
            difficulty: self.difficulty,
            favorite: self.favorite,
            public: self.public,
        })
    }
}

/// List the caller's notes, most recently touched first.
pub async fn list_notes(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Envelope<Vec<Note>>>, ApiError> {
    let notes = state.store.notes.list(&auth.user.id).await?;
    Ok(ok(notes))
}

/// Fetch one note, counting the read as a view.
///
/// # Returns
/// - 200 OK with the note (view count already incremented)
/// - 404 Not Found if the id is unknown
pub async fn get_note(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Note>>, ApiError> {
    let note = state.store.notes.fetch(&auth.user.id, id).await?;
    Ok(ok(note))
}

/// Create a note.
///
/// # Returns
/// - 201 Created with the stored note
/// - 400 Bad Request if the title is missing/empty
pub async fn create_note(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(body): Json<CreateNoteBody>,
) -> Result<(StatusCode, Json<Envelope<Note>>), ApiError> {
    let req = body.into_request()?;
    let note = state.store.notes.create(&auth.user.id, req).await?;
    Ok((StatusCode::CREATED, ok(note)))
}

/// Partially update a note (shallow field merge).
///
/// # Returns
/// - 200 OK with the updated note
/// - 404 Not Found if the id is unknown
pub async fn update_note(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<Json<Envelope<Note>>, ApiError> {
    let note = state.store.notes.update(&auth.user.id, id, req).await?;
    Ok(ok(note))
}

/// Delete a note.
///
/// # Returns
/// - 200 OK with a confirmation message
/// - 404 Not Found if the id is unknown
pub async fn delete_note(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<serde_json::Value>>, ApiError> {
    state.store.notes.delete(&auth.user.id, id).await?;
    Ok(ok(serde_json::json!({ "message": "Note deleted" })))
}
