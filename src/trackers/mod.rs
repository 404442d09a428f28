//! Backend-specific request templates, projections, and operations.
//!
//! Each tracker module owns the full flow for its backend: build the
//! request (auth resolved from configuration), hand it to the gateway,
//! project the decoded payload into a [`crate::ticket::TicketRecord`],
//! and emit the summary line or the failure report.

pub mod jira;
pub mod redmine;
pub mod rt;

/// Joins a base URI and a relative path with exactly one slash.
#[must_use]
pub fn join_uri(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}
