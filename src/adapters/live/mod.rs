//! Live adapters backed by the real network and standard output.

pub mod http;
pub mod sink;

pub use http::LiveHttpTransport;
pub use sink::StdioSink;
