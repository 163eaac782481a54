//! Base types and error handling.
//!
//! - [`ApiError`](apierror::ApiError): failures raised while decoding responses

pub mod apierror;
