// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token authentication middleware.
//!
//! Tokens are issued by the external identity provider and signed with the
//! shared session key (HS256).

use crate::db::GoalStore;
use crate::error::AppError;
use crate::session::Session;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie carrying the session token for browser clients.
pub const SESSION_COOKIE: &str = "goals_token";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Display name, if the provider shares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar URL, if the provider shares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Session {
            user_id: claims.sub,
            display_name: claims.name,
            avatar_url: claims.picture,
        }
    }
}

/// Verify a session token and build the session it describes.
pub fn verify_token(token: &str, signing_key: &[u8]) -> Option<Session> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation).ok()?;
    if token_data.claims.sub.trim().is_empty() {
        return None;
    }
    Some(token_data.claims.into())
}

/// Middleware that requires a valid session token.
pub async fn require_auth<S: GoalStore>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) => token.to_string(),
            None => return Err(AppError::Unauthorized),
        }
    };

    let session = verify_token(&token, &state.config.session_signing_key)
        .ok_or(AppError::InvalidToken)?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

/// Create a session token. Used by local tooling and tests in place of the
/// identity provider.
pub fn create_jwt(
    user_id: &str,
    name: Option<&str>,
    picture: Option<&str>,
    signing_key: &[u8],
) -> jsonwebtoken::errors::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + 24 * 60 * 60, // 1 day
        name: name.map(str::to_string),
        picture: picture.map(str::to_string),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
}
