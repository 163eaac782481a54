//! # apiresponse
//!
//! Response decoding for a REST platform client.
//!
//! The platform lets a client bundle several API calls into one HTTP request
//! and answers with a single `multipart/mixed` body: an envelope part with
//! per-call status codes, followed by one part per call. [`ApiResponse`]
//! hides the difference so that callers always see "one or more results".
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apiresponse::http::{ApiResponse, HttpExternals, HttpResponse};
//! use std::sync::Arc;
//!
//! let response = HttpResponse::from_hyper(hyper_response);
//! let api = ApiResponse::receive(Arc::new(HttpExternals), None, response).await?;
//!
//! for part in api.to_multipart()? {
//!     match part.error(false) {
//!         Some(msg) => eprintln!("call failed: {msg}"),
//!         None => println!("{}", part.json()?),
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`http`] - Response wrapper, capabilities, headers, and batch parsing
//!
//! Transport, authentication, and retries live outside this crate; the
//! decoder only needs a response whose body can be read once as text.

pub mod base;
pub mod http;

pub use crate::base::apierror::ApiError;
pub use crate::http::ApiResponse;
