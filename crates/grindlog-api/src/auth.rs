//! Authentication against an external identity provider.
//!
//! The provider owns accounts and credentials; this server only forwards
//! signups and validates bearer tokens. `AuthProvider` is a trait so the
//! test suites (and single-user dev mode) can run without a provider.

use std::time::Duration;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use grindlog_core::{AuthUser, Error, Result};

use crate::error::ApiError;
use crate::AppState;

/// Default per-request timeout against the identity provider, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Signup payload forwarded to the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Identity provider client.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create a new account with the provider.
    async fn signup(&self, req: &SignupRequest) -> Result<AuthUser>;

    /// Validate a bearer token. `Ok(None)` means the token is invalid or
    /// expired; `Err` means the provider could not be consulted.
    async fn validate(&self, token: &str) -> Result<Option<AuthUser>>;
}

// =============================================================================
// HTTP PROVIDER
// =============================================================================

/// `AuthProvider` over the provider's HTTP API.
///
/// Endpoints: `POST {base}/signup` and `GET {base}/user` (bearer token).
pub struct HttpAuthProvider {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpAuthProvider {
    pub fn new(base_url: String) -> Self {
        let timeout_secs = std::env::var("AUTH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn signup(&self, req: &SignupRequest) -> Result<AuthUser> {
        let response = self
            .client
            .post(format!("{}/signup", self.base_url))
            .timeout(self.timeout)
            .json(req)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Identity provider unreachable: {}", e)))?;

        let status = response.status();
        if status.is_client_error() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::InvalidInput(format!(
                "Signup rejected by identity provider: {}",
                message
            )));
        }
        if !status.is_success() {
            return Err(Error::Upstream(format!(
                "Identity provider returned HTTP {}",
                status
            )));
        }

        let user: AuthUser = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Malformed identity provider response: {}", e)))?;
        Ok(user)
    }

    async fn validate(&self, token: &str) -> Result<Option<AuthUser>> {
        let response = self
            .client
            .get(format!("{}/user", self.base_url))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Identity provider unreachable: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            debug!(
                subsystem = "auth",
                component = "provider",
                op = "validate",
                "Token rejected by identity provider"
            );
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::Upstream(format!(
                "Identity provider returned HTTP {}",
                status
            )));
        }

        let user: AuthUser = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Malformed identity provider response: {}", e)))?;
        Ok(Some(user))
    }
}

// =============================================================================
// STATIC PROVIDER (DEV MODE, TESTS)
// =============================================================================

/// Single-user provider accepting exactly one token.
///
/// Backs `AUTH_ENABLED=false` deployments and the test suites; never use
/// behind a shared endpoint.
pub struct StaticAuthProvider {
    token: String,
    user: AuthUser,
}

impl StaticAuthProvider {
    pub fn new(token: String, user: AuthUser) -> Self {
        Self { token, user }
    }

    /// Dev-mode provider with a fixed local identity.
    pub fn local(token: String) -> Self {
        Self::new(
            token,
            AuthUser {
                id: "local".to_string(),
                email: "local@grindlog.dev".to_string(),
                name: Some("Local User".to_string()),
            },
        )
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn signup(&self, _req: &SignupRequest) -> Result<AuthUser> {
        Ok(self.user.clone())
    }

    async fn validate(&self, token: &str) -> Result<Option<AuthUser>> {
        if token == self.token {
            Ok(Some(self.user.clone()))
        } else {
            Ok(None)
        }
    }
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// Extractor that requires a valid bearer token.
///
/// Usage:
/// ```ignore
/// async fn my_handler(auth: RequireAuth) -> impl IntoResponse {
///     // auth.user.id namespaces the caller's data
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth {
    pub user: AuthUser,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

        match state.auth.validate(token).await {
            Ok(Some(user)) => Ok(RequireAuth { user }),
            Ok(None) => Err(ApiError::Unauthorized("Invalid or expired token".to_string())),
            Err(e) => {
                warn!(
                    subsystem = "auth",
                    component = "provider",
                    op = "validate",
                    error = %e,
                    "Token validation failed"
                );
                Err(ApiError::from(e))
            }
        }
    }
}
