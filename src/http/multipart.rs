//! Batch (`multipart/mixed`) body support.
//!
//! The platform answers a batch request with a single body made of an
//! envelope part carrying per-call status codes, followed by one part per
//! bundled call:
//!
//! ```text
//! --batch_123
//! Content-Type: application/json
//!
//! {"response":[{"status":200},{"status":404}]}
//! --batch_123
//! Content-Type: application/json
//!
//! {"id":1}
//! --batch_123
//! Content-Type: application/json
//!
//! {"message":"Not found"}
//! --batch_123--
//! ```
//!
//! Parsing lives in [`split_segments`] and [`parse_part`]; [`BatchBuilder`]
//! produces bodies of this shape for mocks and tests.

use serde_json::json;

const DELIMITER_PREFIX: &str = "--";
const CLOSE_SUFFIX: &str = "--";
const HEADER_SEPARATOR: char = ':';
const BODY_SEPARATOR: &str = "\n\n";

/// Split a batch body into raw segments on `--<boundary>`.
///
/// A leading empty segment (delimiter at position zero) and the trailing
/// `--` left by the closing delimiter are dropped.
pub fn split_segments<'a>(text: &'a str, boundary: &str) -> Vec<&'a str> {
    let delimiter = format!("{DELIMITER_PREFIX}{boundary}");
    let mut segments: Vec<&str> = text.split(delimiter.as_str()).collect();

    if segments.first().is_some_and(|s| s.trim().is_empty()) {
        segments.remove(0);
    }
    if segments.last().is_some_and(|s| s.trim() == CLOSE_SUFFIX) {
        segments.pop();
    }

    segments
}

/// Headers and body of one batch segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPart {
    pub headers: Vec<(String, String)>,
    /// `None` when the segment has no blank line separating headers and body.
    pub body: Option<String>,
}

/// Separate a segment's header block from its payload.
///
/// Carriage returns are stripped first. The segment is cut at the first blank
/// line; each header line is split on its first colon with both sides trimmed,
/// and lines with an empty name are skipped.
pub fn parse_part(segment: &str) -> RawPart {
    let normalized = segment.replace('\r', "");

    let Some((head, body)) = normalized.split_once(BODY_SEPARATOR) else {
        return RawPart {
            headers: Vec::new(),
            body: None,
        };
    };

    let headers = head
        .split('\n')
        .filter_map(|line| {
            let line = line.trim();
            let (name, value) = line.split_once(HEADER_SEPARATOR).unwrap_or((line, ""));
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_string(), value.trim().to_string()))
        })
        .collect();

    RawPart {
        headers,
        body: Some(body.to_string()),
    }
}

/// One call result inside a [`BatchBuilder`] body.
#[derive(Debug, Clone)]
pub struct BatchPart {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl BatchPart {
    /// A JSON part with the given status.
    pub fn json<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.into(),
        }
    }

    /// A part with no headers.
    pub fn raw<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Add a header.
    pub fn header<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }
}

/// Encoder for batch response bodies.
///
/// # Example
/// ```
/// use apiresponse::http::multipart::{BatchBuilder, BatchPart};
///
/// let batch = BatchBuilder::with_boundary("batch_123")
///     .part(BatchPart::json(200, r#"{"id":1}"#))
///     .part(BatchPart::json(404, r#"{"message":"Not found"}"#));
///
/// assert_eq!(batch.content_type(), "multipart/mixed; boundary=batch_123");
/// assert!(batch.into_body().ends_with("--batch_123--\r\n"));
/// ```
#[derive(Debug, Clone)]
pub struct BatchBuilder {
    boundary: String,
    parts: Vec<BatchPart>,
}

impl Default for BatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchBuilder {
    /// Create an empty batch with a generated boundary.
    pub fn new() -> Self {
        Self::with_boundary(generate_boundary())
    }

    pub fn with_boundary<S: Into<String>>(boundary: S) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Get the boundary string.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn part(mut self, part: BatchPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Get the Content-Type header value.
    pub fn content_type(&self) -> String {
        format!("multipart/mixed; boundary={}", self.boundary)
    }

    /// The envelope document listing each part's status.
    pub fn envelope(&self) -> String {
        let statuses: Vec<_> = self
            .parts
            .iter()
            .map(|p| json!({ "status": p.status }))
            .collect();
        json!({ "response": statuses }).to_string()
    }

    /// Render the full body: envelope first, then each part, then the
    /// closing delimiter.
    pub fn into_body(self) -> String {
        let mut output = String::new();

        let envelope = BatchPart::json(0, self.envelope());
        write_part(&mut output, &self.boundary, &envelope);
        for part in &self.parts {
            write_part(&mut output, &self.boundary, part);
        }

        // Final boundary
        output.push_str(DELIMITER_PREFIX);
        output.push_str(&self.boundary);
        output.push_str("--\r\n");

        output
    }
}

fn write_part(output: &mut String, boundary: &str, part: &BatchPart) {
    // --boundary\r\n
    output.push_str(DELIMITER_PREFIX);
    output.push_str(boundary);
    output.push_str("\r\n");

    for (name, value) in &part.headers {
        output.push_str(name);
        output.push_str(": ");
        output.push_str(value);
        output.push_str("\r\n");
    }
    output.push_str("\r\n");

    output.push_str(&part.body);
    output.push_str("\r\n");
}

/// Generate a boundary string unlikely to appear in part bodies.
fn generate_boundary() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();

    format!("Boundary_{:016x}{:08x}", nanos, std::process::id())
}
