//! Request body interpretation.
//!
//! This module provides the body interpretation step: it buffers the request
//! payload, preserves the original bytes on the request as [`RawBody`], and for
//! the two recognized content types (`application/x-www-form-urlencoded` and
//! `application/json`) attaches a parsed [`StructuredBody`] value. A declared
//! form-urlencoded payload that is actually JSON is accepted as JSON; a declared
//! JSON payload that fails to parse is rejected with a client error.
//!
//! The content type is matched by exact string equality. A parameterized value
//! such as `application/json; charset=utf-8` matches neither constant and the
//! body passes through unparsed.
//!
//! # Examples
//!
//! ```rust
//! use intake::body::IntakeBody;
//! use intake::extractors::structured::StructuredBody;
//! use intake::interpret::interpret;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let req = http::Request::builder()
//!     .header("content-type", "application/json")
//!     .body(IntakeBody::from(r#"{"name":"intake"}"#))?;
//!
//! let req = interpret(req).await?;
//! assert!(req.extensions().get::<StructuredBody>().is_some());
//! # Ok(())
//! # }
//! ```

use std::pin::Pin;

use http::header::CONTENT_TYPE;
use http_body_util::BodyExt;
use hyper::StatusCode;
use serde_json::Value;

use crate::{
    body::IntakeBody,
    extractors::{raw_body::RawBody, structured::StructuredBody},
    responder::Responder,
    types::Request,
};

/// Errors reported by the interpretation step.
#[derive(Debug)]
pub enum InterpretError {
    /// The payload was declared `application/json` but failed to parse.
    InvalidJson(String),
    /// The body stream could not be read.
    BodyRead(String),
}

impl std::fmt::Display for InterpretError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpretError::InvalidJson(err) => write!(f, "Invalid JSON: {}", err),
            InterpretError::BodyRead(err) => {
                write!(f, "Failed to read request body: {}", err)
            }
        }
    }
}

impl std::error::Error for InterpretError {}

/// Converts interpretation errors into client error responses.
impl Responder for InterpretError {
    fn into_response(self) -> crate::types::Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// Buffers the request body and attaches the interpreted payload.
///
/// The original bytes are always preserved in the request extensions as
/// [`RawBody`], and the byte body itself is rebuilt from them so downstream
/// readers see the payload unchanged. When a recognized content type yields a
/// parse result, it is attached as [`StructuredBody`].
///
/// Returns `Ok` with the (possibly annotated) request to let the pipeline
/// proceed, or `Err` to abort it. The only failure for a readable body is a
/// declared JSON payload that does not parse.
pub async fn interpret(req: Request) -> Result<Request, InterpretError> {
    let (mut parts, body) = req.into_parts();

    let raw = body
        .collect()
        .await
        .map_err(|e| InterpretError::BodyRead(e.to_string()))?
        .to_bytes();

    parts.extensions.insert(RawBody(raw.clone()));

    if raw.is_empty() {
        tracing::trace!("empty body, nothing to interpret");
        return Ok(Request::from_parts(parts, IntakeBody::from(raw)));
    }

    // A header value that is not visible ASCII cannot equal either constant,
    // so it is treated the same as an absent header.
    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    match content_type {
        Some(ct) if ct == mime::APPLICATION_WWW_FORM_URLENCODED.as_ref() => {
            // Some clients declare form encoding and send JSON anyway. Prefer
            // the JSON reading and fall back to the query-string parse, which
            // is total over arbitrary input.
            let value = match serde_json::from_slice::<Value>(&raw) {
                Ok(value) => value,
                Err(_) => form_values(&raw),
            };
            parts.extensions.insert(StructuredBody(value));
        }
        Some(ct) if ct == mime::APPLICATION_JSON.as_ref() => {
            match serde_json::from_slice::<Value>(&raw) {
                Ok(value) => {
                    parts.extensions.insert(StructuredBody(value));
                }
                Err(err) => {
                    tracing::debug!("declared JSON body failed to parse: {}", err);
                    return Err(InterpretError::InvalidJson(err.to_string()));
                }
            }
        }
        Some(ct) => {
            tracing::trace!("unrecognized content type {}, passing body through", ct);
        }
        None => {
            tracing::trace!("no content-type header, passing body through");
        }
    }

    Ok(Request::from_parts(parts, IntakeBody::from(raw)))
}

/// Parses a query-string payload into a JSON object.
///
/// Repeated keys fold into arrays, so `a=1&a=2` becomes `{"a":["1","2"]}`.
/// This parse cannot fail; malformed input degrades to whatever pairs can be
/// decoded.
fn form_values(raw: &[u8]) -> Value {
    let mut map = serde_json::Map::new();

    for (key, value) in url::form_urlencoded::parse(raw) {
        let value = Value::String(value.into_owned());
        match map.entry(key.into_owned()) {
            serde_json::map::Entry::Vacant(slot) => {
                slot.insert(value);
            }
            serde_json::map::Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(items) => items.push(value),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            },
        }
    }

    Value::Object(map)
}

/// Builder for the interpretation middleware.
///
/// # Example
/// ```rust
/// use intake::interpret::BodyInterpreter;
/// use intake::pipeline::Pipeline;
///
/// let mut pipeline = Pipeline::new();
/// pipeline.middleware(BodyInterpreter::new().into_middleware());
/// ```
pub struct BodyInterpreter;

impl BodyInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// Wraps [`interpret`] in a cloneable closure matching the pipeline's
    /// middleware signature.
    pub fn into_middleware(
        self,
    ) -> impl Fn(Request) -> Pin<Box<dyn Future<Output = Result<Request, InterpretError>> + Send>>
    + Clone
    + Send
    + Sync
    + 'static {
        move |req: Request| Box::pin(interpret(req))
    }
}

impl Default for BodyInterpreter {
    fn default() -> Self {
        Self::new()
    }
}
