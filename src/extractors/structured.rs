/// This module provides the `Structured` extractor, which deserializes the
/// parse result attached by the interpretation step into a concrete type.
use hyper::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{extractors::FromRequest, responder::Responder, types::Request};

/// The parsed representation of the request payload, attached by the
/// interpretation step when a recognized content type matched.
///
/// JSON payloads keep their shape. Query-string payloads become an object
/// whose values are strings, or arrays of strings for repeated keys.
#[derive(Clone, Debug)]
pub struct StructuredBody(pub Value);

/// The `Structured` extractor deserializes the attached [`StructuredBody`]
/// into a strongly-typed structure.
///
/// # Example
///
/// ```rust
/// use intake::extractors::{FromRequest, structured::Structured};
/// use intake::types::Request;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct CreateUser {
///     name: String,
///     email: String,
/// }
///
/// async fn handle_request(req: &mut Request) {
///     if let Ok(Structured(user)) = Structured::<CreateUser>::from_request(req).await {
///         println!("creating {}", user.name);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Structured<T>(pub T);

/// Error types for structured body extraction.
#[derive(Debug)]
pub enum StructuredError {
    /// No parse result was attached to the request.
    Missing,
    /// The attached value did not match the target type.
    Deserialization(String),
}

impl Responder for StructuredError {
    /// Converts extraction errors into client error responses.
    fn into_response(self) -> crate::types::Response {
        match self {
            StructuredError::Missing => {
                (StatusCode::BAD_REQUEST, "No structured body attached").into_response()
            }
            StructuredError::Deserialization(err) => (
                StatusCode::BAD_REQUEST,
                format!("Failed to deserialize structured body: {}", err),
            )
                .into_response(),
        }
    }
}

impl<'a, T> FromRequest<'a> for Structured<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Error = StructuredError;

    fn from_request(
        req: &'a mut Request,
    ) -> impl core::future::Future<Output = core::result::Result<Self, Self::Error>> + Send + 'a {
        async move {
            let value = req
                .extensions()
                .get::<StructuredBody>()
                .ok_or(StructuredError::Missing)?
                .0
                .clone();

            let parsed = serde_json::from_value(value)
                .map_err(|e| StructuredError::Deserialization(e.to_string()))?;

            Ok(Structured(parsed))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::{body::IntakeBody, interpret::interpret};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Login {
        user: String,
        pass: String,
    }

    fn request(body: &str, content_type: &str) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", content_type)
            .body(IntakeBody::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn deserializes_a_json_payload() {
        let req = request(r#"{"user":"ada","pass":"s3cret"}"#, "application/json");
        let mut req = interpret(req).await.unwrap();

        let Structured(login) = Structured::<Login>::from_request(&mut req).await.unwrap();
        assert_eq!(
            login,
            Login {
                user: "ada".into(),
                pass: "s3cret".into()
            }
        );
    }

    #[tokio::test]
    async fn deserializes_a_form_payload() {
        let req = request("user=ada&pass=s3cret", "application/x-www-form-urlencoded");
        let mut req = interpret(req).await.unwrap();

        let Structured(login) = Structured::<Login>::from_request(&mut req).await.unwrap();
        assert_eq!(login.user, "ada");
    }

    #[tokio::test]
    async fn missing_structured_body_is_a_typed_error() {
        let req = request("plain text", "text/plain");
        let mut req = interpret(req).await.unwrap();

        let err = Structured::<Login>::from_request(&mut req)
            .await
            .unwrap_err();
        assert!(matches!(err, StructuredError::Missing));
    }

    #[tokio::test]
    async fn type_mismatch_is_a_deserialization_error() {
        let req = request(r#"{"user":"ada"}"#, "application/json");
        let mut req = interpret(req).await.unwrap();

        let err = Structured::<Login>::from_request(&mut req)
            .await
            .unwrap_err();
        assert!(matches!(err, StructuredError::Deserialization(_)));
    }
}
