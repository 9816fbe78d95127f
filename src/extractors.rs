//! Typed access to interpreted request data.
//!
//! This module defines the `FromRequest` trait and the extractors that expose
//! the interpretation step's output to downstream handlers: the preserved raw
//! payload and the structured parse result.
//!
//! # Examples
//!
//! ```rust
//! use intake::extractors::{FromRequest, structured::Structured};
//! use intake::types::Request;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Login {
//!     user: String,
//!     pass: String,
//! }
//!
//! async fn handler(req: &mut Request) -> Result<String, &'static str> {
//!     let Structured(login) = Structured::<Login>::from_request(req)
//!         .await
//!         .map_err(|_| "bad login payload")?;
//!     Ok(login.user)
//! }
//! ```

/// Preserved raw request payload extraction.
pub mod raw_body;

/// Structured (parsed) body extraction and deserialization.
pub mod structured;

/// Trait for extracting data from HTTP requests.
///
/// Extraction errors must implement `Responder` so a failed extraction can be
/// rendered directly as an HTTP response.
pub trait FromRequest<'a>: Sized {
    /// Error type returned when extraction fails.
    type Error: crate::responder::Responder;

    /// Extracts the type from the HTTP request.
    fn from_request(
        req: &'a mut crate::types::Request,
    ) -> impl core::future::Future<Output = core::result::Result<Self, Self::Error>> + Send + 'a;
}
