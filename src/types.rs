use std::pin::Pin;

use bytes::Bytes;
use http_body_util::combinators::UnsyncBoxBody;

use crate::body::IntakeBody;

pub type BoxBody = UnsyncBoxBody<Bytes, BoxError>;
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Request = http::Request<IntakeBody>;
pub type Response = http::Response<IntakeBody>;

pub type BoxedRequestFuture = Pin<Box<dyn Future<Output = Result<Request, Response>> + Send>>;
pub type BoxedMiddleware = Box<dyn Fn(Request) -> BoxedRequestFuture + Send + Sync>;
