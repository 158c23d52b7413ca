//! Request extractors that report failures as JSON errors

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        FromRequest, Path, Query, Request,
    },
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde_json::Value;

use super::validation::Payload;
use crate::error::{Error, Result};

/// Whether the request declares an urlencoded form body
pub fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("application/x-www-form-urlencoded")
        })
        .unwrap_or(false)
}

/// Parse a request body into a payload object.
///
/// A blank body is an empty object. Form bodies yield string values. Any
/// other body must be a JSON object, whatever its declared content type.
pub fn parse_payload(bytes: &[u8], form: bool) -> Result<Payload> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::new());
    }

    if form {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(bytes)
            .map_err(|e| Error::BadRequest(format!("Failed to parse the request body as a form: {}", e)))?;
        return Ok(pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::BadRequest(
            "The request body must be a JSON object.".to_string(),
        )),
        Err(e) => Err(Error::BadRequest(format!(
            "Failed to parse the request body as JSON: {}",
            e
        ))),
    }
}

/// Write payload read from a JSON or urlencoded form body
pub struct RequestPayload(pub Payload);

impl<S> FromRequest<S> for RequestPayload
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let form = is_form(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
        parse_payload(&bytes, form).map(RequestPayload)
    }
}

/// Numeric path id; anything unparsable is the resource's 404
pub fn resource_id(
    path: std::result::Result<Path<i64>, PathRejection>,
    not_found: &str,
) -> Result<i64> {
    path.map(|Path(id)| id)
        .map_err(|_| Error::NotFound(not_found.to_string()))
}

/// Query string, with a malformed one reported as a 400
pub fn query<T>(extracted: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    extracted
        .map(|Query(value)| value)
        .map_err(|rejection| Error::BadRequest(rejection.body_text()))
}
