//! Decode a batch response into per-call results.
//!
//! Builds a canned `multipart/mixed` body, feeds it through the decoder the
//! way a transport would, and prints each call's outcome.

use apiresponse::http::multipart::{BatchBuilder, BatchPart};
use apiresponse::http::{ApiResponse, HttpExternals, HttpResponse};
use bytes::Bytes;
use http_body_util::Full;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let batch = BatchBuilder::new()
        .part(BatchPart::json(200, r#"{"id":101,"name":"Reception"}"#))
        .part(BatchPart::json(
            404,
            r#"{"errorCode":"CMN-102","message":"Resource for parameter [extensionId] is not found"}"#,
        ));

    let raw = http::Response::builder()
        .status(207)
        .header("Content-Type", batch.content_type())
        .body(Full::new(Bytes::from(batch.into_body())))?;

    let api = ApiResponse::receive(
        Arc::new(HttpExternals),
        None,
        HttpResponse::from_body(raw),
    )
    .await?;

    for (i, part) in api.to_multipart()?.into_iter().enumerate() {
        match part.error(false) {
            Some(msg) => println!("call {i}: {} {msg}", part.status()),
            None => println!("call {i}: {} {}", part.status(), part.json()?),
        }
    }

    Ok(())
}
