//! HTTP response decoding.
//!
//! - [`ApiResponse`]: lazily-decoded view over one exchange or batch part
//! - [`externals`]: capabilities the host environment supplies
//! - [`HttpExternals`]: default capabilities on top of `http`/`hyper` types
//! - [`multipart`]: batch body splitting and encoding

pub mod apiresponse;
pub mod config;
pub mod contenttype;
pub mod externals;
pub mod headers;
pub mod httpexternals;
pub mod multipart;
pub mod response;
pub mod responsebody;

// Re-exports for convenience
pub use apiresponse::ApiResponse;
pub use config::DecoderConfig;
pub use externals::{Externals, Headers, ReadingText, Response, ResponseInit};
pub use headers::HeaderList;
pub use httpexternals::HttpExternals;
pub use response::HttpResponse;
pub use responsebody::ResponseBody;
