//! Redmine issue lookup over the anonymous JSON endpoint.

use tracing::debug;

use crate::config::RedmineConfig;
use crate::context::ServiceContext;
use crate::gateway;
use crate::ports::http::HttpRequest;
use crate::protocol::envelope;
use crate::summary::{format_summary, ResolutionJoin, SummaryStyle};
use crate::ticket::{TicketRecord, TrackerError};

use super::join_uri;

const FALLBACK: &str = "failed to retrieve issue data";

fn style() -> SummaryStyle {
    SummaryStyle {
        label: "Issue",
        placeholder: "(no subject)",
        resolution_join: ResolutionJoin::Parenthesized,
        security_label: "Security",
        high_priority: None,
    }
}

/// Looks up one issue and emits its summary line.
///
/// Redmine answers plain 404s for unknown issues (no error envelope), so
/// any 4xx becomes a not-found report naming the issue number.
///
/// # Errors
///
/// Currently none beyond the `Result` shape shared by command handlers.
pub fn get_issue(ctx: &ServiceContext, config: &RedmineConfig, issue_id: u32) -> Result<(), String> {
    if !config.enabled {
        debug!("Redmine backend is disabled; skipping");
        return Ok(());
    }

    let rest_uri = join_uri(&config.base_uri, &format!("issues/{issue_id}.json"));
    let request = HttpRequest::get(&rest_uri);
    match lookup(ctx, config, &request, issue_id) {
        Ok(summary) => ctx.sink.emit_line(&summary),
        Err(err) => gateway::report_failure(ctx, &err, &rest_uri, FALLBACK),
    }
    Ok(())
}

fn lookup(
    ctx: &ServiceContext,
    config: &RedmineConfig,
    request: &HttpRequest,
    issue_id: u32,
) -> Result<String, TrackerError> {
    let response = ctx
        .http
        .execute(request)
        .map_err(|e| TrackerError::Transport(format!("request to {} failed: {e}", request.url)))?;
    if !response.is_success() {
        if (400..500).contains(&response.status) {
            return Err(TrackerError::NotFound(format!("issue {issue_id} does not exist.")));
        }
        return Err(TrackerError::Transport(format!("HTTP {}", response.status)));
    }

    let issue = envelope::decode_success(&response.body, Some("issue"))?;
    let id = issue_id.to_string();
    let web_url = join_uri(&config.base_uri, &format!("issues/{id}"));
    let mut record = TicketRecord::new(id.clone(), web_url);
    record.status = envelope::string_at(&issue, &["status", "name"]);
    record.subject = envelope::string_at(&issue, &["subject"]);
    Ok(format_summary(&record, &id, &style()))
}
