//! Repository semantics tests against the in-memory backend.
//!
//! The Redis backend shares the record-building and sorting code with this
//! one; these tests pin the trait-level contract both must satisfy.

use grindlog_core::{
    CreateNoteRequest, CreateProblemRequest, Error, NoteRepository, Platform, ProblemRepository,
    ProblemStatus, UpdateNoteRequest, UpdateProblemRequest,
};
use grindlog_store::Store;
use uuid::Uuid;

const USER: &str = "user-1";
const OTHER_USER: &str = "user-2";

fn problem_req(title: &str) -> CreateProblemRequest {
    CreateProblemRequest {
        title: title.to_string(),
        platform: Platform::Codeforces,
        url: format!("https://codeforces.com/contest/1/{}", title),
        status: None,
        difficulty: None,
        tags: None,
        solved_at: None,
    }
}

fn note_req(title: &str) -> CreateNoteRequest {
    CreateNoteRequest {
        title: title.to_string(),
        content: "body".to_string(),
        kind: None,
        category: None,
        tags: None,
        difficulty: None,
        favorite: None,
        public: None,
    }
}

#[tokio::test]
async fn test_create_then_list_returns_record() {
    let store = Store::memory();
    let created = store.problems.create(USER, problem_req("A")).await.unwrap();

    let listed = store.problems.list(USER).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].status, ProblemStatus::Attempted);
}

#[tokio::test]
async fn test_list_is_most_recent_first() {
    let store = Store::memory();
    let a = store.problems.create(USER, problem_req("A")).await.unwrap();
    let b = store.problems.create(USER, problem_req("B")).await.unwrap();
    let c = store.problems.create(USER, problem_req("C")).await.unwrap();

    let listed = store.problems.list(USER).await.unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);

    // Updating an old record moves it to the front.
    store
        .problems
        .update(
            USER,
            a.id,
            UpdateProblemRequest {
                status: Some(ProblemStatus::Solved),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let listed = store.problems.list(USER).await.unwrap();
    assert_eq!(listed[0].id, a.id);
}

#[tokio::test]
async fn test_update_merges_and_refreshes_updated_at() {
    let store = Store::memory();
    let created = store.problems.create(USER, problem_req("A")).await.unwrap();

    let updated = store
        .problems
        .update(
            USER,
            created.id,
            UpdateProblemRequest {
                title: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.url, created.url);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found_and_store_unchanged() {
    let store = Store::memory();
    store.problems.create(USER, problem_req("A")).await.unwrap();
    let before = store.problems.list(USER).await.unwrap();

    let missing = Uuid::new_v4();
    let err = store
        .problems
        .update(
            USER,
            missing,
            UpdateProblemRequest {
                title: Some("nope".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ProblemNotFound(id) if id == missing));

    let after = store.problems.list(USER).await.unwrap();
    assert_eq!(before.len(), after.len());
    assert_eq!(before[0].title, after[0].title);
    assert_eq!(before[0].updated_at, after[0].updated_at);
}

#[tokio::test]
async fn test_delete_removes_record() {
    let store = Store::memory();
    let created = store.problems.create(USER, problem_req("A")).await.unwrap();

    store.problems.delete(USER, created.id).await.unwrap();
    assert!(store.problems.list(USER).await.unwrap().is_empty());

    // Second delete reports not found.
    let err = store.problems.delete(USER, created.id).await.unwrap_err();
    assert!(matches!(err, Error::ProblemNotFound(_)));
}

#[tokio::test]
async fn test_users_are_isolated() {
    let store = Store::memory();
    let created = store.problems.create(USER, problem_req("A")).await.unwrap();

    assert!(store.problems.list(OTHER_USER).await.unwrap().is_empty());
    let err = store
        .problems
        .delete(OTHER_USER, created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ProblemNotFound(_)));
    assert_eq!(store.problems.list(USER).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_note_fetch_increments_view_count() {
    let store = Store::memory();
    let created = store.notes.create(USER, note_req("CF tricks")).await.unwrap();
    assert_eq!(created.view_count, 0);

    let first = store.notes.fetch(USER, created.id).await.unwrap();
    let second = store.notes.fetch(USER, created.id).await.unwrap();
    assert_eq!(first.view_count, 1);
    assert_eq!(second.view_count, 2);
}

#[tokio::test]
async fn test_note_update_and_not_found() {
    let store = Store::memory();
    let created = store.notes.create(USER, note_req("draft")).await.unwrap();

    let updated = store
        .notes
        .update(
            USER,
            created.id,
            UpdateNoteRequest {
                favorite: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.favorite);

    let err = store
        .notes
        .update(USER, Uuid::new_v4(), UpdateNoteRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoteNotFound(_)));
}

#[tokio::test]
async fn test_memory_store_is_always_ready() {
    let store = Store::memory();
    assert!(store.ready().await);
}
