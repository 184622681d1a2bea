use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Resolved session identity for scoped operations.
///
/// Rejects with 401 when the request carries no usable token. A well-formed
/// token that was never seen before is accepted verbatim and simply scopes
/// to an empty record set.
#[derive(Debug)]
pub struct SessionId(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for SessionId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .map(SessionId)
            .ok_or(AppError::Unauthenticated)
    }
}

/// Creation-path variant: never rejects, so the handler can mint a fresh
/// token when none was presented.
pub struct OptionalSessionId(pub Option<Uuid>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalSessionId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalSessionId(resolve(parts, state)))
    }
}

fn resolve(parts: &Parts, state: &AppState) -> Option<Uuid> {
    let cookies = parts
        .headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?;
    let raw = cookie_value(cookies, &state.config.session.cookie_name)?;
    Uuid::parse_str(raw).ok()
}

fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Set-Cookie value for a freshly minted session token.
pub fn session_cookie(name: &str, id: Uuid, ttl_days: i64) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        name,
        id,
        ttl_days * 24 * 60 * 60
    )
}
