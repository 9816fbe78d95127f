/// This module provides the `IntakeBody` struct, which is a wrapper around a boxed HTTP body.
/// It includes utility methods for creating and replaying HTTP bodies, as well as
/// implementations for common traits like `Default` and `Body`.
use std::{
    pin::Pin,
    task::{Context, Poll},
};

use bytes::Bytes;

use http_body_util::{BodyExt, Empty};
use hyper::body::{Body, Frame, SizeHint};

use crate::types::{BoxBody, BoxError};

/// The `IntakeBody` struct is a wrapper around a boxed HTTP body (`BoxBody`).
/// It provides utility methods for creating empty bodies and converting various
/// buffer types into HTTP bodies, so a buffered payload can be put back onto a
/// request after it has been read.
///
/// # Example
///
/// ```rust
/// use intake::body::IntakeBody;
///
/// let empty_body = IntakeBody::empty();
/// let string_body = IntakeBody::from("a=1&b=2".to_string());
/// ```
pub struct IntakeBody(BoxBody);

impl IntakeBody {
    /// Creates a new `IntakeBody` from a given body.
    ///
    /// # Arguments
    ///
    /// * `body` - The body to wrap, which must implement the `Body` trait.
    ///
    /// # Example
    ///
    /// ```rust
    /// use intake::body::IntakeBody;
    /// use http_body_util::Full;
    /// use bytes::Bytes;
    ///
    /// let body = IntakeBody::new(Full::from(Bytes::from_static(b"{\"a\":1}")));
    /// ```
    pub fn new<B>(body: B) -> Self
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        Self(body.map_err(|e| e.into()).boxed_unsync())
    }

    /// Creates an empty `IntakeBody`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use intake::body::IntakeBody;
    ///
    /// let empty_body = IntakeBody::empty();
    /// ```
    pub fn empty() -> Self {
        Self::new(Empty::new())
    }
}

impl std::fmt::Debug for IntakeBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeBody").finish()
    }
}

/// Provides a default implementation for `IntakeBody`, which returns an empty body.
impl Default for IntakeBody {
    fn default() -> Self {
        Self::empty()
    }
}

/// Implements conversion from `()` to `IntakeBody`, resulting in an empty body.
impl From<()> for IntakeBody {
    fn from(_: ()) -> Self {
        Self::empty()
    }
}

macro_rules! body_from_impl {
    ($ty:ty) => {
        impl From<$ty> for IntakeBody {
            fn from(buf: $ty) -> Self {
                Self::new(http_body_util::Full::from(buf))
            }
        }
    };
}

body_from_impl!(String);
body_from_impl!(&'static str);
body_from_impl!(Vec<u8>);
body_from_impl!(Bytes);

/// Implements the `Body` trait for `IntakeBody`, allowing it to be used as an HTTP body.
///
/// This implementation delegates the actual body operations to the inner `BoxBody`.
impl Body for IntakeBody {
    type Data = Bytes;
    type Error = BoxError;

    #[inline]
    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Pin::new(&mut self.0).poll_frame(cx)
    }

    #[inline]
    fn size_hint(&self) -> SizeHint {
        self.0.size_hint()
    }

    #[inline]
    fn is_end_stream(&self) -> bool {
        self.0.is_end_stream()
    }
}
