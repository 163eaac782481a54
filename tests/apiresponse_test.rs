//! ApiResponse Coverage Tests
//!
//! Covers:
//! - Body materialization policy by content type
//! - `text` / `json` / `ok` / `error` accessors
//! - `to_multipart` on single responses

use apiresponse::http::{ApiResponse, HeaderList, HttpExternals, HttpResponse};
use apiresponse::ApiError;
use bytes::Bytes;
use futures::stream;
use http_body::Frame;
use http_body_util::{Full, StreamBody};
use hyper::ext::ReasonPhrase;
use serde::Deserialize;
use std::sync::Arc;

fn live(status: u16, content_type: Option<&str>, body: &'static str) -> HttpResponse {
    let mut builder = http::Response::builder().status(status);
    if let Some(ct) = content_type {
        builder = builder.header("Content-Type", ct);
    }
    HttpResponse::from_body(builder.body(Full::new(Bytes::from(body))).unwrap())
}

async fn receive(
    status: u16,
    content_type: Option<&str>,
    body: &'static str,
) -> ApiResponse<HttpExternals> {
    ApiResponse::receive(Arc::new(HttpExternals), None, live(status, content_type, body))
        .await
        .unwrap()
}

// === Materialization ===

#[tokio::test]
async fn test_json_body_is_read() {
    let api = receive(200, Some("application/json"), "{\"id\":7}").await;
    assert_eq!(api.text().unwrap(), "{\"id\":7}");
    assert_eq!(api.json().unwrap()["id"], 7);
}

#[tokio::test]
async fn test_non_textual_body_is_skipped() {
    let mut api = ApiResponse::new(Arc::new(HttpExternals), None);
    let text = api
        .receive_response(live(200, Some("image/png"), "\u{1}binary"))
        .await
        .unwrap()
        .to_string();

    assert_eq!(text, "");
    assert_eq!(api.text().unwrap_err(), ApiError::NotTextual);
    assert_eq!(api.json().unwrap_err(), ApiError::NotJson);
}

#[tokio::test]
async fn test_body_read_failure_propagates() {
    let mut resp = live(200, Some("application/json"), "{}");
    resp.read_text().await.unwrap();

    let result = ApiResponse::receive(Arc::new(HttpExternals), None, resp).await;
    assert_eq!(result.unwrap_err(), ApiError::BodyAlreadyConsumed);
}

#[tokio::test]
async fn test_body_stream_error_propagates() {
    let chunks: Vec<Result<Frame<Bytes>, std::io::Error>> = vec![
        Ok(Frame::data(Bytes::from_static(b"{\"id\":"))),
        Err(std::io::Error::other("connection reset")),
    ];
    let raw = http::Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(StreamBody::new(stream::iter(chunks)))
        .unwrap();

    let result =
        ApiResponse::receive(Arc::new(HttpExternals), None, HttpResponse::from_body(raw)).await;
    assert_eq!(
        result.unwrap_err(),
        ApiError::BodyRead("connection reset".into())
    );
}

#[tokio::test]
async fn test_request_kept() {
    let (parts, ()) = http::Request::get("https://platform.example.com/restapi/v1.0")
        .body(())
        .unwrap()
        .into_parts();
    let api = ApiResponse::receive(
        Arc::new(HttpExternals),
        Some(parts),
        live(200, None, ""),
    )
    .await
    .unwrap();

    assert_eq!(api.request().unwrap().method, http::Method::GET);
    assert!(api.response().is_some());
}

// === Accessors ===

#[tokio::test]
async fn test_ok_follows_status() {
    assert!(receive(204, None, "").await.ok());
    assert!(!receive(500, None, "").await.ok());
}

#[test]
fn test_not_received_is_not_ok() {
    let api: ApiResponse<HttpExternals> = ApiResponse::new(Arc::new(HttpExternals), None);
    assert!(!api.ok());
    assert_eq!(api.status(), 0);
    assert_eq!(api.error(false).as_deref(), Some(""));
}

#[tokio::test]
async fn test_json_empty_body_is_null() {
    let api = receive(200, Some("application/json"), "").await;
    assert!(api.json().unwrap().is_null());
}

#[tokio::test]
async fn test_json_requires_json_content_type() {
    for ct in [None, Some("text/plain"), Some("multipart/mixed; boundary=x")] {
        let api = receive(200, ct, "{\"a\":1}").await;
        assert_eq!(api.json().unwrap_err(), ApiError::NotJson);
    }
}

#[tokio::test]
async fn test_json_with_charset() {
    let api = receive(200, Some("application/json; charset=utf-8"), "[1,2]").await;
    assert_eq!(api.json().unwrap().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_json_as() {
    #[derive(Deserialize)]
    struct Extension {
        id: u64,
        name: String,
    }

    let api = receive(200, Some("application/json"), r#"{"id":42,"name":"Front desk"}"#).await;
    let ext: Extension = api.json_as().unwrap();
    assert_eq!(ext.id, 42);
    assert_eq!(ext.name, "Front desk");
}

#[tokio::test]
async fn test_status_helpers() {
    let api = receive(401, None, "").await;
    assert!(api.is_unauthorized());
    assert!(!api.is_rate_limited());

    let api = receive(429, None, "").await;
    assert!(api.is_rate_limited());
}

#[tokio::test]
async fn test_content_type_checks() {
    let api = receive(200, Some("application/x-www-form-urlencoded"), "a=1").await;
    assert!(api.is_urlencoded());
    assert!(!api.is_json());
    assert!(!api.is_multipart());
    assert_eq!(
        api.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
}

// === Error messages ===

#[tokio::test]
async fn test_error_none_when_ok() {
    let api = receive(200, Some("application/json"), "{\"message\":\"fine\"}").await;
    assert_eq!(api.error(false), None);
    assert_eq!(api.error(true).as_deref(), Some("fine"));
}

#[tokio::test]
async fn test_error_default_message() {
    let api = receive(500, Some("text/html"), "<h1>oops</h1>").await;
    assert_eq!(api.error(false).as_deref(), Some("500 Internal Server Error"));
}

#[tokio::test]
async fn test_error_field_precedence() {
    // The last field present wins: description > error_description > message.
    let api = receive(
        400,
        Some("application/json"),
        r#"{"message":"A","error_description":"B","description":"C"}"#,
    )
    .await;
    assert_eq!(api.error(false).as_deref(), Some("C"));

    let api = receive(
        400,
        Some("application/json"),
        r#"{"message":"A","error_description":"B"}"#,
    )
    .await;
    assert_eq!(api.error(false).as_deref(), Some("B"));

    let api = receive(400, Some("application/json"), r#"{"message":"A"}"#).await;
    assert_eq!(api.error(false).as_deref(), Some("A"));
}

#[tokio::test]
async fn test_error_ignores_empty_fields() {
    let api = receive(
        400,
        Some("application/json"),
        r#"{"message":"A","description":""}"#,
    )
    .await;
    assert_eq!(api.error(false).as_deref(), Some("A"));
}

#[tokio::test]
async fn test_error_swallows_parse_failure() {
    let api = receive(502, Some("application/json"), "<html>gateway</html>").await;
    assert_eq!(api.error(false).as_deref(), Some("502 Bad Gateway"));
}

#[tokio::test]
async fn test_error_uses_wire_reason_phrase() {
    let mut raw = http::Response::builder()
        .status(400)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from("{}")))
        .unwrap();
    raw.extensions_mut()
        .insert(ReasonPhrase::from_static(b"Invalid Extension Id"));

    let api = ApiResponse::receive(Arc::new(HttpExternals), None, HttpResponse::from_body(raw))
        .await
        .unwrap();
    assert_eq!(api.status_text(), "Invalid Extension Id");
    assert_eq!(api.error(false).as_deref(), Some("400 Invalid Extension Id"));
}

#[tokio::test]
async fn test_error_uncommon_status_without_phrase() {
    let api = receive(499, Some("application/json"), "{}").await;
    assert_eq!(api.error(false).as_deref(), Some("499 "));
}

#[test]
fn test_error_without_status_text() {
    let mut api = ApiResponse::new(Arc::new(HttpExternals), None);
    let resp = HttpResponse::buffered(None, HeaderList::new(), 418, "");
    futures::executor::block_on(api.receive_response(resp)).unwrap();
    assert_eq!(api.error(false).as_deref(), Some("418 "));
}

// === Uniform view ===

#[tokio::test]
async fn test_to_multipart_single() {
    let api = receive(200, Some("application/json"), "{}").await;
    let parts = api.to_multipart().unwrap();
    assert_eq!(parts.len(), 1);
    assert!(std::ptr::eq(parts[0], &api));
}

#[tokio::test]
async fn test_multipart_rejects_single() {
    let api = receive(200, Some("application/json"), "{}").await;
    assert_eq!(api.multipart().unwrap_err(), ApiError::NotMultipart);
}
