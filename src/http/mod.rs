//! HTTP transport construction and request execution.
mod client;
mod execution;
mod tls;
mod transport;


pub use client::{build_client, build_transport};
pub use execution::estimate_headers_size;
pub use transport::{Exchange, ReqwestTransport, RequestError, Transport};
