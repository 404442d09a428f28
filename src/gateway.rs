//! Orchestrates one tracker call from prepared request to reported line.
//!
//! Every call walks the same stages: attach auth (already resolved into
//! the request by the backend), send exactly one request, decode, then
//! report. There is no retry, no shared state between calls, and the
//! worker blocks until the transport answers.
//!
//! Reporting is deliberately split: the user sees one line — validation
//! text when the tracker authored it, a generic phrase otherwise — while
//! the full diagnostic detail (URI, status, raw body) goes to the tracing
//! log for operators only.

use tracing::{debug, error};

use crate::context::ServiceContext;
use crate::ports::http::HttpRequest;
use crate::protocol::{envelope, Payload, ResponseDecoder};
use crate::ticket::TrackerError;

/// Sends one query request and decodes its response.
///
/// # Errors
///
/// Returns [`TrackerError::Transport`] when the request produced no HTTP
/// response, otherwise whatever classification the decoder assigns.
pub fn fetch(
    ctx: &ServiceContext,
    request: &HttpRequest,
    decoder: ResponseDecoder,
) -> Result<Payload, TrackerError> {
    let response = ctx
        .http
        .execute(request)
        .map_err(|e| TrackerError::Transport(format!("request to {} failed: {e}", request.url)))?;
    debug!(url = %request.url, status = response.status, "tracker response received");
    decoder.decode(response.status, &response.body)
}

/// Sends one mutation request, discarding the body on success.
///
/// # Errors
///
/// Non-2xx responses are classified through the JSON error envelope (all
/// mutating backends speak it); transport failures are
/// [`TrackerError::Transport`].
pub fn mutate(ctx: &ServiceContext, request: &HttpRequest) -> Result<(), TrackerError> {
    let response = ctx
        .http
        .execute(request)
        .map_err(|e| TrackerError::Transport(format!("request to {} failed: {e}", request.url)))?;
    if response.is_success() {
        debug!(url = %request.url, status = response.status, "mutation accepted");
        Ok(())
    } else {
        Err(envelope::decode_error(response.status, &response.body))
    }
}

/// Reports a failure: one safe line to the user, the whole story to the
/// log.
pub fn report_failure(ctx: &ServiceContext, err: &TrackerError, uri: &str, fallback: &str) {
    error!(uri = %uri, detail = %err, "tracker call failed");
    ctx.sink.emit_error(&err.user_text(fallback));
}
