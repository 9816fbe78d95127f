/// This module provides the `RawBody` extractor, which exposes the request
/// payload exactly as it was received, before any interpretation.
use bytes::Bytes;
use hyper::StatusCode;

use crate::{extractors::FromRequest, responder::Responder, types::Request};

/// The original request payload, preserved by the interpretation step
/// regardless of whether a structured parse was attached.
///
/// # Example
///
/// ```rust
/// use intake::extractors::{FromRequest, raw_body::RawBody};
/// use intake::types::Request;
///
/// async fn handle_request(req: &mut Request) {
///     if let Ok(RawBody(bytes)) = RawBody::from_request(req).await {
///         println!("received {} bytes", bytes.len());
///     }
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct RawBody(pub Bytes);

/// Error returned when the raw payload was never preserved, meaning the
/// interpretation step has not run for this request.
#[derive(Debug)]
pub struct RawBodyMissing;

impl Responder for RawBodyMissing {
    fn into_response(self) -> crate::types::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Raw body not preserved; body interpretation did not run",
        )
            .into_response()
    }
}

impl<'a> FromRequest<'a> for RawBody {
    type Error = RawBodyMissing;

    fn from_request(
        req: &'a mut Request,
    ) -> impl core::future::Future<Output = core::result::Result<Self, Self::Error>> + Send + 'a {
        async move {
            req.extensions()
                .get::<RawBody>()
                .cloned()
                .ok_or(RawBodyMissing)
        }
    }
}
