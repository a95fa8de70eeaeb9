//! services/app/src/adapters/http_auth.rs
//!
//! This module contains the HTTP adapter for the authentication backend.
//! It implements the `AuthApi` port from the `core` crate against the
//! `/user/login` and `/user/register` endpoints.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lawlens_core::domain::{Gender, Session};
use lawlens_core::ports::{AuthApi, LoginOutcome, PortError, PortResult};
use serde::{Deserialize, Serialize};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `AuthApi` port over HTTP.
#[derive(Clone)]
pub struct HttpAuthAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthAdapter {
    /// Creates a new `HttpAuthAdapter`. `base_url` is the API prefix, e.g.
    /// `http://localhost:8000/api/v1`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    gender: Gender,
}

#[derive(Deserialize)]
struct UserBody {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    email: String,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
}

/// Shared shape of the backend's auth responses. On failure only `success`
/// and `message` are populated.
#[derive(Deserialize)]
struct AuthResponseBody {
    success: bool,
    message: Option<String>,
    user: Option<UserBody>,
    token: Option<String>,
}

impl UserBody {
    fn into_domain(self) -> Session {
        Session {
            id: self.id,
            name: self.name,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

fn failure_message(body: &AuthResponseBody, fallback: &str) -> String {
    body.message.clone().unwrap_or_else(|| fallback.to_string())
}

//=========================================================================================
// `AuthApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl AuthApi for HttpAuthAdapter {
    async fn login(&self, email: &str, password: &str) -> PortResult<LoginOutcome> {
        let response = self
            .client
            .post(format!("{}/user/login", self.base_url))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        let body: AuthResponseBody = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if !status.is_success() || !body.success {
            let message = failure_message(&body, "Login failed");
            return if status == reqwest::StatusCode::UNAUTHORIZED {
                Err(PortError::Unauthorized(message))
            } else {
                Err(PortError::Unexpected(message))
            };
        }

        let user = body
            .user
            .ok_or_else(|| PortError::Unexpected("Login response missing user".to_string()))?;
        let token = body
            .token
            .ok_or_else(|| PortError::Unexpected("Login response missing token".to_string()))?;

        Ok(LoginOutcome {
            user: user.into_domain(),
            credential_token: token,
        })
    }

    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        gender: Gender,
    ) -> PortResult<Session> {
        let response = self
            .client
            .post(format!("{}/user/register", self.base_url))
            .json(&RegisterRequest {
                name,
                email,
                password,
                gender,
            })
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        let body: AuthResponseBody = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if !status.is_success() || !body.success {
            return Err(PortError::Unexpected(failure_message(&body, "Signup failed")));
        }

        let user = body
            .user
            .ok_or_else(|| PortError::Unexpected("Signup response missing user".to_string()))?;
        Ok(user.into_domain())
    }
}
