//! Transport layer for the Apollo SDK.

pub mod http;

pub use http::HttpTransport;
