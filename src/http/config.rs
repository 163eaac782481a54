//! Decoder configuration.

use std::borrow::Cow;

/// Content-type markers and defaults used by [`ApiResponse`](crate::http::ApiResponse).
///
/// Markers are matched by substring containment against the raw
/// `Content-Type` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Marker for JSON bodies (default: `application/json`)
    pub json_content_type: Cow<'static, str>,
    /// Marker for batch bodies (default: `multipart/mixed`)
    pub multipart_content_type: Cow<'static, str>,
    /// Marker for form bodies (default: `application/x-www-form-urlencoded`)
    pub urlencoded_content_type: Cow<'static, str>,
    /// Status text given to batch data parts, since the envelope carries
    /// only numeric codes (default: `OK`)
    pub part_status_text: Cow<'static, str>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            json_content_type: Cow::Borrowed("application/json"),
            multipart_content_type: Cow::Borrowed("multipart/mixed"),
            urlencoded_content_type: Cow::Borrowed("application/x-www-form-urlencoded"),
            part_status_text: Cow::Borrowed("OK"),
        }
    }
}

impl DecoderConfig {
    /// Create a config with default markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the JSON marker.
    pub fn json_content_type<S: Into<Cow<'static, str>>>(mut self, marker: S) -> Self {
        self.json_content_type = marker.into();
        self
    }

    /// Override the multipart marker.
    pub fn multipart_content_type<S: Into<Cow<'static, str>>>(mut self, marker: S) -> Self {
        self.multipart_content_type = marker.into();
        self
    }

    /// Override the form marker.
    pub fn urlencoded_content_type<S: Into<Cow<'static, str>>>(mut self, marker: S) -> Self {
        self.urlencoded_content_type = marker.into();
        self
    }

    /// Override the status text given to batch data parts.
    pub fn part_status_text<S: Into<Cow<'static, str>>>(mut self, text: S) -> Self {
        self.part_status_text = text.into();
        self
    }
}
