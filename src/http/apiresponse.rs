//! Uniform view over one platform HTTP exchange.
//!
//! An [`ApiResponse`] is either *real*, wrapping a response from the
//! transport whose body is materialized once by
//! [`receive_response`](ApiResponse::receive_response), or *synthetic*, built
//! from one part of a parent batch body with its text already in hand.
//! Accessors behave the same either way.

use crate::base::apierror::ApiError;
use crate::http::config::DecoderConfig;
use crate::http::contenttype;
use crate::http::externals::{Externals, Headers, Response, ResponseInit};
use crate::http::multipart;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, OnceLock};

const CONTENT_TYPE: &str = "Content-Type";
const UNAUTHORIZED_STATUS: u16 = 401;
const RATE_LIMIT_STATUS: u16 = 429;
const DEFAULT_PART_STATUS: u16 = 200;

/// Lazily-decoded response.
///
/// Text is read only for JSON and multipart content types. JSON and batch
/// parts are computed on first access and cached.
pub struct ApiResponse<E: Externals> {
    externals: Arc<E>,
    config: Arc<DecoderConfig>,
    request: Option<E::Request>,
    response: Option<E::Response>,
    text: String,
    json: OnceLock<Value>,
    multipart: OnceLock<Vec<ApiResponse<E>>>,
}

impl<E: Externals> std::fmt::Debug for ApiResponse<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiResponse")
            .field("status", &self.status())
            .field("content_type", &self.content_type())
            .field("text_len", &self.text.len())
            .field("json_cached", &self.json.get().is_some())
            .field("parts_cached", &self.multipart.get().map(Vec::len))
            .finish_non_exhaustive()
    }
}

impl<E: Externals> ApiResponse<E> {
    /// Create a wrapper for a request whose response has not arrived yet.
    pub fn new(externals: Arc<E>, request: Option<E::Request>) -> Self {
        Self {
            externals,
            config: Arc::new(DecoderConfig::default()),
            request,
            response: None,
            text: String::new(),
            json: OnceLock::new(),
            multipart: OnceLock::new(),
        }
    }

    /// Create a wrapper and materialize its body in one step.
    pub async fn receive(
        externals: Arc<E>,
        request: Option<E::Request>,
        response: E::Response,
    ) -> Result<Self, ApiError> {
        let mut api = Self::new(externals, request);
        api.receive_response(response).await?;
        Ok(api)
    }

    /// Use a non-default decoder configuration.
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    fn synthetic(parent: &Self, response: E::Response, text: String) -> Self {
        let mut api = Self {
            externals: parent.externals.clone(),
            config: parent.config.clone(),
            request: None,
            response: Some(response),
            text,
            json: OnceLock::new(),
            multipart: OnceLock::new(),
        };
        // Same policy as a real response: only textual bodies are kept.
        if !api.is_json() && !api.is_multipart() {
            api.text.clear();
        }
        api
    }

    /// Attach the transport's response and read its body if it is textual.
    ///
    /// Only JSON and multipart bodies are read; any other content type leaves
    /// the text empty. Call exactly once per real response: the body of a
    /// response can only be consumed once. Transport failures while reading
    /// are returned unchanged.
    pub async fn receive_response(&mut self, response: E::Response) -> Result<&str, ApiError> {
        self.response = Some(response);

        let textual = self.is_json() || self.is_multipart();
        self.text = match self.response.as_mut() {
            Some(resp) if textual => resp.text().await?,
            _ => String::new(),
        };

        tracing::trace!(
            status = self.status(),
            content_type = %self.content_type(),
            read = textual,
            len = self.text.len(),
            "response materialized"
        );

        Ok(&self.text)
    }

    /// The originating request, `None` for batch parts.
    pub fn request(&self) -> Option<&E::Request> {
        self.request.as_ref()
    }

    /// The underlying response, `None` until one is received.
    pub fn response(&self) -> Option<&E::Response> {
        self.response.as_ref()
    }

    /// Whether the underlying response reports success.
    pub fn ok(&self) -> bool {
        self.response.as_ref().is_some_and(|r| r.ok())
    }

    /// Status code, `0` when no response is attached.
    pub fn status(&self) -> u16 {
        self.response.as_ref().map_or(0, |r| r.status())
    }

    pub fn status_text(&self) -> &str {
        self.response.as_ref().map_or("", |r| r.status_text())
    }

    /// First value of a response header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.response.as_ref().and_then(|r| r.headers().get(name))
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == UNAUTHORIZED_STATUS
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == RATE_LIMIT_STATUS
    }

    fn content_type(&self) -> &str {
        self.header(CONTENT_TYPE).unwrap_or_default()
    }

    /// Whether the declared content type contains `kind`.
    pub fn is_content_type(&self, kind: &str) -> bool {
        contenttype::is_content_type(self.content_type(), kind)
    }

    pub fn is_json(&self) -> bool {
        self.is_content_type(&self.config.json_content_type)
    }

    pub fn is_multipart(&self) -> bool {
        self.is_content_type(&self.config.multipart_content_type)
    }

    pub fn is_urlencoded(&self) -> bool {
        self.is_content_type(&self.config.urlencoded_content_type)
    }

    /// Body text. Fails for content types whose body is never read.
    pub fn text(&self) -> Result<&str, ApiError> {
        if !self.is_json() && !self.is_multipart() {
            return Err(ApiError::NotTextual);
        }
        Ok(&self.text)
    }

    /// Parsed JSON body, computed on first call. An empty body yields `Null`.
    pub fn json(&self) -> Result<&Value, ApiError> {
        if !self.is_json() {
            return Err(ApiError::NotJson);
        }
        if let Some(json) = self.json.get() {
            return Ok(json);
        }

        let parsed = if self.text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&self.text)?
        };
        Ok(self.json.get_or_init(|| parsed))
    }

    /// Deserialize the JSON body into `T`.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(T::deserialize(self.json()?)?)
    }

    /// Human-readable error message, `None` for successful responses unless
    /// `skip_ok_check` is set.
    ///
    /// Starts from `"<status> <statusText>"` and is replaced by the body's
    /// `message`, then `error_description`, then `description` field,
    /// whichever are present; the last one present wins. Body parse failures
    /// are ignored.
    pub fn error(&self, skip_ok_check: bool) -> Option<String> {
        if self.ok() && !skip_ok_check {
            return None;
        }

        let mut msg = String::new();
        if self.status() != 0 {
            msg.push_str(&format!("{} ", self.status()));
        }
        msg.push_str(self.status_text());

        if let Ok(json) = self.json() {
            for field in ["message", "error_description", "description"] {
                if let Some(value) = json.get(field).and_then(Value::as_str) {
                    if !value.is_empty() {
                        msg = value.to_string();
                    }
                }
            }
        }

        Some(msg)
    }

    /// Treat any response as a batch: the parts of a multipart response, or
    /// the response itself otherwise.
    pub fn to_multipart(&self) -> Result<Vec<&ApiResponse<E>>, ApiError> {
        if self.is_multipart() {
            Ok(self.multipart()?.iter().collect())
        } else {
            Ok(vec![self])
        }
    }

    /// Split a batch response into one wrapper per call, computed on first
    /// call.
    ///
    /// The first segment is the envelope; its `response[i].status` gives the
    /// status of the i-th data part. The envelope itself is not returned.
    pub fn multipart(&self) -> Result<&[ApiResponse<E>], ApiError> {
        if !self.is_multipart() {
            return Err(ApiError::NotMultipart);
        }
        if let Some(parts) = self.multipart.get() {
            return Ok(parts);
        }

        let parts = self.split_multipart()?;
        Ok(self.multipart.get_or_init(|| parts))
    }

    fn split_multipart(&self) -> Result<Vec<ApiResponse<E>>, ApiError> {
        let text = self.text()?;
        if text.is_empty() {
            return Err(ApiError::NoBody);
        }

        let boundary =
            contenttype::boundary(self.content_type()).ok_or(ApiError::MissingBoundary)?;

        let segments = multipart::split_segments(text, boundary);
        let Some((envelope, data)) = segments.split_first() else {
            return Err(ApiError::NoParts);
        };

        tracing::debug!(
            boundary = %boundary,
            parts = data.len(),
            "splitting multipart response"
        );

        let envelope = self.create(envelope, self.status(), self.status_text());
        let statuses = envelope
            .json()?
            .get("response")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        data.iter()
            .enumerate()
            .map(|(index, segment)| -> Result<Self, ApiError> {
                let status = envelope_status(statuses, index)?;
                Ok(self.create(segment, status, &self.config.part_status_text))
            })
            .collect()
    }

    /// Build a synthetic wrapper from one raw batch segment.
    fn create(&self, segment: &str, status: u16, status_text: &str) -> Self {
        let part = multipart::parse_part(segment);

        let mut headers = self.externals.new_headers();
        for (name, value) in &part.headers {
            headers.append(name, value);
        }

        let text = part.body.clone().unwrap_or_default();
        let response = self.externals.new_response(
            part.body,
            ResponseInit {
                headers,
                status,
                status_text: status_text.to_string(),
            },
        );

        Self::synthetic(self, response, text)
    }
}

fn envelope_status(statuses: &[Value], index: usize) -> Result<u16, ApiError> {
    let Some(entry) = statuses.get(index) else {
        tracing::warn!(
            index,
            available = statuses.len(),
            "batch envelope has fewer statuses than parts"
        );
        return Err(ApiError::EnvelopeStatusMismatch {
            index,
            available: statuses.len(),
        });
    };

    match entry.get("status") {
        None | Some(Value::Null) => Ok(DEFAULT_PART_STATUS),
        Some(status) => status
            .as_u64()
            .and_then(|s| u16::try_from(s).ok())
            .ok_or(ApiError::InvalidEnvelope { index }),
    }
}
