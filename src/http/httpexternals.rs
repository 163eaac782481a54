//! Default capability bundle built on the `http` crate types.

use crate::http::externals::{Externals, ResponseInit};
use crate::http::headers::HeaderList;
use crate::http::response::HttpResponse;

/// [`Externals`] backed by [`HeaderList`] and [`HttpResponse`].
///
/// Real responses come from [`HttpResponse::from_hyper`]; synthetic ones
/// (batch parts) are built buffered.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpExternals;

impl HttpExternals {
    pub fn new() -> Self {
        Self
    }
}

impl Externals for HttpExternals {
    type Request = http::request::Parts;
    type Headers = HeaderList;
    type Response = HttpResponse;

    fn new_headers(&self) -> HeaderList {
        HeaderList::new()
    }

    fn new_response(&self, body: Option<String>, init: ResponseInit<HeaderList>) -> HttpResponse {
        HttpResponse::buffered(body, init.headers, init.status, init.status_text)
    }
}
