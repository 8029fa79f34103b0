//! Signup proxy handler.
//!
//! Account creation is owned by the external identity provider; this
//! endpoint forwards the request and wraps the created identity in the
//! standard envelope.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::auth::SignupRequest;
use crate::{ok, ApiError, AppState, Envelope};

/// Request body for account creation.
#[derive(Debug, Deserialize)]
pub struct SignupBody {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Create an account with the identity provider.
///
/// # Returns
/// - 201 Created with `{ "user": ... }`
/// - 400 Bad Request if email or password is missing, or the provider
///   rejects the signup
/// - 500 Internal Server Error if the provider is unreachable
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupBody>,
) -> Result<(StatusCode, Json<Envelope<serde_json::Value>>), ApiError> {
    let email = match body.email {
        Some(e) if !e.trim().is_empty() => e,
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required field: email".to_string(),
            ))
        }
    };
    let password = match body.password {
        Some(p) if !p.is_empty() => p,
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required field: password".to_string(),
            ))
        }
    };

    let user = state
        .auth
        .signup(&SignupRequest {
            email,
            password,
            name: body.name,
        })
        .await?;

    info!(
        subsystem = "api",
        op = "signup",
        user_id = %user.id,
        "Account created"
    );
    Ok((
        StatusCode::CREATED,
        ok(serde_json::json!({ "user": user })),
    ))
}
