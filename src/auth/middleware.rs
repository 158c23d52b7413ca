//! Authentication middleware

use crate::api::extract::{is_form, parse_payload};
use crate::api::SharedState;
use crate::auth::{Claims, TokenService};
use crate::error::{Error, Result};
use axum::{
    body::Body,
    extract::{Query, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, Uri},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

/// Largest body buffered while looking for a `token` field
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Where a credential was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Header,
    Query,
    Body,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

fn non_empty(token: &str) -> Option<String> {
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn token_from_header(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    // Raw tokens are the norm; a Bearer scheme is tolerated.
    let value = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value);
    non_empty(value)
}

fn token_from_query(uri: &Uri) -> Option<String> {
    let Query(query) = Query::<TokenQuery>::try_from_uri(uri).ok()?;
    query.token.as_deref().and_then(non_empty)
}

fn token_from_body(headers: &HeaderMap, body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    let payload = parse_payload(body, is_form(headers)).ok()?;
    payload.get("token")?.as_str().and_then(non_empty)
}

/// Locate a credential: `Authorization` header, then `token` query
/// parameter, then `token` field of a JSON or form body. The first hit wins.
pub fn extract_token(headers: &HeaderMap, uri: &Uri, body: &[u8]) -> Option<(String, TokenSource)> {
    if let Some(token) = token_from_header(headers) {
        return Some((token, TokenSource::Header));
    }
    if let Some(token) = token_from_query(uri) {
        return Some((token, TokenSource::Query));
    }
    token_from_body(headers, body).map(|token| (token, TokenSource::Body))
}

/// Verify the request credential and hand back the rebuilt request
async fn authorize(tokens: &TokenService, req: Request) -> Result<(Claims, Request)> {
    let (parts, body) = req.into_parts();

    let (found, body) = match extract_token(&parts.headers, &parts.uri, &[]) {
        Some(found) => (Some(found), body),
        None => {
            let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
                .await
                .map_err(|e| Error::BadRequest(format!("Request body could not be read: {}", e)))?;
            let found =
                token_from_body(&parts.headers, &bytes).map(|token| (token, TokenSource::Body));
            (found, Body::from(bytes))
        }
    };

    let Some((token, source)) = found else {
        tracing::debug!(path = %parts.uri.path(), "Rejected request without token");
        return Err(Error::MissingAuth);
    };

    let claims = tokens.verify(&token)?;
    tracing::debug!(email = %claims.email, source = ?source, "Token accepted");

    Ok((claims, Request::from_parts(parts, body)))
}

/// Gate for read routes: any valid credential passes
pub async fn read_gate(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let (claims, mut req) = authorize(&state.tokens, req).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Gate for write routes: the credential must carry the admin flag
pub async fn write_gate(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let (claims, mut req) = authorize(&state.tokens, req).await?;
    if !claims.role().can_write() {
        tracing::debug!(email = %claims.email, "Rejected write without admin role");
        return Err(Error::InsufficientRole);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
