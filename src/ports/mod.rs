//! Port traits for the two external boundaries of a tracker call: the
//! network and the host that displays our one-line replies.

pub mod http;
pub mod sink;

pub use http::{HttpRequest, HttpResponse, HttpTransport, RequestAuth};
pub use sink::{MemorySink, ReplySink};
