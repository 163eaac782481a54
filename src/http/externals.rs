//! Capabilities supplied by the host environment.
//!
//! The decoder never constructs headers or responses on its own; it asks an
//! [`Externals`] bundle for them so that it can run on top of any HTTP stack
//! (or none, in tests).

use crate::base::apierror::ApiError;
use futures::future::BoxFuture;

/// Alias for the `Future` returned when reading a response body.
pub type ReadingText<'a> = BoxFuture<'a, Result<String, ApiError>>;

/// A mutable, appendable header collection with case-insensitive lookup.
pub trait Headers: Send {
    /// Append a value for `name`.
    fn append(&mut self, name: &str, value: &str);

    /// First value for `name`, if any.
    fn get(&self, name: &str) -> Option<&str>;
}

/// A response as handed over by the transport layer.
pub trait Response: Send {
    type Headers: Headers;

    /// Numeric status code.
    fn status(&self) -> u16;

    /// Status text (reason phrase), possibly empty.
    fn status_text(&self) -> &str;

    fn headers(&self) -> &Self::Headers;

    /// Success indicator. Defaults to the 2xx range.
    fn ok(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Read the full body as text.
    ///
    /// Callable at most once per response; transport failures are returned
    /// as-is.
    fn text(&mut self) -> ReadingText<'_>;
}

/// Options used to build a synthetic response.
#[derive(Debug, Clone)]
pub struct ResponseInit<H> {
    pub headers: H,
    pub status: u16,
    pub status_text: String,
}

/// Constructors for headers and responses, injected into every wrapper.
pub trait Externals: Send + Sync {
    /// Opaque originating request.
    type Request: Send;
    type Headers: Headers;
    type Response: Response<Headers = Self::Headers>;

    /// Create an empty header collection.
    fn new_headers(&self) -> Self::Headers;

    /// Create a response whose body is already in hand.
    fn new_response(&self, body: Option<String>, init: ResponseInit<Self::Headers>)
        -> Self::Response;
}
