//! REST API access
//!
//! - `transport`: the HTTP seam (`fetch` in the browser)
//! - `client`: typed endpoint calls
//! - `error`: the failure type surfaced to the UI

mod client;
mod error;
mod transport;

pub use client::{ApiClient, encode_path_segment};
pub use error::ApiError;
pub use transport::{ApiRequest, ApiResponse, FetchTransport, Method, Transport};

#[cfg(test)]
pub(crate) use transport::testing;

/// Client used by the browser build
pub type BrowserClient = ApiClient<FetchTransport>;
