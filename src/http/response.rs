//! HTTP Response with read-once body access.

use crate::base::apierror::ApiError;
use crate::http::externals::{ReadingText, Response};
use crate::http::headers::HeaderList;
use crate::http::ResponseBody;
use futures::FutureExt;
use http::{StatusCode, Version};
use hyper::body::Incoming;
use hyper::ext::ReasonPhrase;

enum BodyState {
    Streaming(ResponseBody),
    Buffered(Option<String>),
    Consumed,
}

/// HTTP Response implementing the [`Response`] capability.
///
/// Either wraps a live body (from hyper or any `http_body::Body`) or text
/// already in hand. The body can be read exactly once.
pub struct HttpResponse {
    status: u16,
    status_text: String,
    version: Version,
    headers: HeaderList,
    body: BodyState,
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl HttpResponse {
    /// Create from hyper Response<Incoming>.
    pub fn from_hyper(resp: http::Response<Incoming>) -> Self {
        Self::from_body(resp)
    }

    /// Create from any `http::Response` whose body yields `Bytes`.
    pub fn from_body<B>(resp: http::Response<B>) -> Self
    where
        B: http_body::Body<Data = bytes::Bytes> + Send + 'static,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let (parts, body) = resp.into_parts();
        Self {
            status: parts.status.as_u16(),
            status_text: reason(parts.status, &parts.extensions),
            version: parts.version,
            headers: HeaderList::from(&parts.headers),
            body: BodyState::Streaming(ResponseBody::new(body)),
        }
    }

    /// Create a response whose body text is already known.
    pub fn buffered(
        body: Option<String>,
        headers: HeaderList,
        status: u16,
        status_text: impl Into<String>,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            version: Version::HTTP_11,
            headers,
            body: BodyState::Buffered(body),
        }
    }

    /// Get the status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the status as an `http::StatusCode`, if it is in range.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status).ok()
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Get the HTTP version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderList {
        &self.headers
    }

    /// Whether the body has already been read.
    pub fn is_consumed(&self) -> bool {
        matches!(self.body, BodyState::Consumed)
    }

    /// Consume the body as text. Subsequent calls fail with
    /// [`ApiError::BodyAlreadyConsumed`].
    pub async fn read_text(&mut self) -> Result<String, ApiError> {
        match std::mem::replace(&mut self.body, BodyState::Consumed) {
            BodyState::Streaming(body) => body.text().await,
            BodyState::Buffered(text) => Ok(text.unwrap_or_default()),
            BodyState::Consumed => Err(ApiError::BodyAlreadyConsumed),
        }
    }
}

impl Response for HttpResponse {
    type Headers = HeaderList;

    fn status(&self) -> u16 {
        self.status
    }

    fn status_text(&self) -> &str {
        &self.status_text
    }

    fn headers(&self) -> &HeaderList {
        &self.headers
    }

    fn text(&mut self) -> ReadingText<'_> {
        self.read_text().boxed()
    }
}

/// The reason phrase sent on the wire, or the canonical one when hyper kept none.
fn reason(status: StatusCode, extensions: &http::Extensions) -> String {
    match extensions.get::<ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => status.canonical_reason().unwrap_or_default().to_string(),
    }
}
