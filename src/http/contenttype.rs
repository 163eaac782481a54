//! Content-Type classification.
//!
//! Checks are plain substring containment against the raw header value, so
//! parameters such as `; charset=utf-8` are tolerated without being parsed.

const BOUNDARY_PARAM: &str = "boundary=";

/// Whether `content_type` declares the given kind.
///
/// An absent header is passed as the empty string and matches no non-empty kind.
pub fn is_content_type(content_type: &str, kind: &str) -> bool {
    content_type.contains(kind)
}

/// Extract the multipart boundary token from a `Content-Type` value.
///
/// The parameter name is matched case-insensitively and the token runs up to
/// the next `;` or the end of the value. Returns `None` when no occurrence of
/// `boundary=` is followed by a non-empty token.
pub fn boundary(content_type: &str) -> Option<&str> {
    // ASCII lowering keeps byte offsets aligned with the original value.
    let lowered = content_type.to_ascii_lowercase();
    let mut from = 0;

    while let Some(pos) = lowered[from..].find(BOUNDARY_PARAM) {
        let start = from + pos + BOUNDARY_PARAM.len();
        let rest = &content_type[start..];
        let end = rest.find(';').unwrap_or(rest.len());
        if end > 0 {
            return Some(&rest[..end]);
        }
        from = start;
    }

    None
}
