//! JIRA issue lookup and mutation over the v2 REST API.
//!
//! Mutations share one shape: validate the key, send the mutating
//! request, then post a best-effort audit comment naming the actor and
//! the action. The audit comment is not transactionally linked to the
//! mutation — if it fails the mutation stands and only the failure is
//! reported.

use serde_json::{json, Value};
use tracing::debug;

use crate::config::JiraConfig;
use crate::context::ServiceContext;
use crate::gateway;
use crate::ports::http::{HttpRequest, RequestAuth};
use crate::protocol::{envelope, Payload, ResponseDecoder};
use crate::summary::{format_summary, ResolutionJoin, SummaryStyle};
use crate::ticket::{TicketRecord, TrackerError};

use super::join_uri;

const LOOKUP_FALLBACK: &str = "Failed to retrieve issue data";
const ASSIGN_FALLBACK: &str = "Failed to set issue assignee";
const TRANSITION_FALLBACK: &str = "Failed to transition issue";
const COMMENT_FALLBACK: &str = "Failed to comment on issue";
const UPDATE_FALLBACK: &str = "Failed to update issue";

fn style(config: &JiraConfig) -> SummaryStyle {
    SummaryStyle {
        label: "Issue",
        placeholder: "(no summary)",
        resolution_join: ResolutionJoin::Parenthesized,
        security_label: "Security",
        high_priority: Some(config.high_priority.clone()),
    }
}

/// Issue keys look like `OPS-1234`: at least two letters, a dash, digits.
fn valid_issue_key(key: &str) -> bool {
    let Some((prefix, number)) = key.split_once('-') else {
        return false;
    };
    prefix.len() >= 2
        && prefix.chars().all(|c| c.is_ascii_alphabetic())
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
}

fn request_auth(config: &JiraConfig) -> RequestAuth {
    if config.username.is_empty() || config.password.is_empty() {
        RequestAuth::Anonymous
    } else {
        RequestAuth::Basic {
            username: config.username.clone(),
            password: config.password.clone(),
            realm: None,
        }
    }
}

/// JIRA is case-sensitive on issue keys; normalize before building paths.
fn issue_path(config: &JiraConfig, key: &str, suffix: &str) -> String {
    join_uri(&config.base_uri, &format!("rest/api/2/issue/{key}{suffix}"))
}

/// Rejects an invalid key before any request is built. Returns the
/// normalized key when valid.
fn checked_key(ctx: &ServiceContext, raw: &str) -> Option<String> {
    if valid_issue_key(raw) {
        Some(raw.to_uppercase())
    } else {
        ctx.sink.emit_error(&format!("'{raw}' is not a valid issue key."));
        None
    }
}

/// Looks up one issue and emits its summary line.
///
/// # Errors
///
/// Currently none beyond the `Result` shape shared by command handlers.
pub fn get_issue(ctx: &ServiceContext, config: &JiraConfig, issue_key: &str) -> Result<(), String> {
    if !config.enabled {
        debug!("JIRA backend is disabled; skipping");
        return Ok(());
    }
    let Some(key) = checked_key(ctx, issue_key) else {
        return Ok(());
    };

    let uri = issue_path(config, &key, "");
    let request = HttpRequest::get(&uri).with_auth(request_auth(config));
    match lookup(ctx, config, &request, &key) {
        Ok(summary) => ctx.sink.emit_line(&summary),
        Err(err) => gateway::report_failure(ctx, &err, &uri, LOOKUP_FALLBACK),
    }
    Ok(())
}

fn lookup(
    ctx: &ServiceContext,
    config: &JiraConfig,
    request: &HttpRequest,
    requested_key: &str,
) -> Result<String, TrackerError> {
    let payload = gateway::fetch(ctx, request, ResponseDecoder::JsonEnvelope { root: None })?;
    let Payload::Document(issue) = payload else {
        return Err(TrackerError::Undecodable("unexpected payload shape".into()));
    };
    let record = project_record(&issue, config)?;
    Ok(format_summary(&record, requested_key, &style(config)))
}

fn project_record(issue: &Value, config: &JiraConfig) -> Result<TicketRecord, TrackerError> {
    let key = envelope::string_at(issue, &["key"])
        .ok_or_else(|| TrackerError::Undecodable(format!("response carried no issue key: {issue}")))?;
    let web_url = join_uri(&config.base_uri, &format!("browse/{key}"));
    let mut record = TicketRecord::new(key, web_url);
    record.status = envelope::string_at(issue, &["fields", "status", "name"]);
    record.resolution = envelope::string_at(issue, &["fields", "resolution", "name"]);
    record.subject = envelope::string_at(issue, &["fields", "summary"]);
    record.priority = envelope::string_at(issue, &["fields", "priority", "name"]);
    if config.security_field_id > 0 {
        let field = format!("customfield_{}", config.security_field_id);
        record.security = envelope::string_at(issue, &["fields", field.as_str(), "value"])
            .is_some_and(|v| v.eq_ignore_ascii_case("yes"));
    }
    Ok(record)
}

/// Assigns an issue and logs who did it.
///
/// # Errors
///
/// Currently none beyond the `Result` shape shared by command handlers.
pub fn assign(
    ctx: &ServiceContext,
    config: &JiraConfig,
    issue_key: &str,
    assignee: &str,
    actor: &str,
    comment: Option<&str>,
) -> Result<(), String> {
    if !config.enabled {
        debug!("JIRA backend is disabled; skipping");
        return Ok(());
    }
    let Some(key) = checked_key(ctx, issue_key) else {
        return Ok(());
    };

    let uri = issue_path(config, &key, "/assignee");
    let request = HttpRequest::put(&uri, json!({ "name": assignee }).to_string())
        .with_auth(request_auth(config));
    if let Err(err) = gateway::mutate(ctx, &request) {
        gateway::report_failure(ctx, &err, &uri, ASSIGN_FALLBACK);
        return Ok(());
    }

    let audit = audit_body(&format!("Assigned to {assignee} by {actor}"), comment);
    finish_with_audit(ctx, config, &key, &audit, ASSIGN_FALLBACK);
    Ok(())
}

/// Performs a workflow transition, optionally setting a resolution, and
/// logs who did it. JIRA rejects a resolution on transitions that do not
/// take one; that rejection flows back as validation text.
///
/// # Errors
///
/// Currently none beyond the `Result` shape shared by command handlers.
pub fn transition(
    ctx: &ServiceContext,
    config: &JiraConfig,
    issue_key: &str,
    transition_id: u32,
    resolution: Option<&str>,
    actor: &str,
    comment: Option<&str>,
) -> Result<(), String> {
    if !config.enabled {
        debug!("JIRA backend is disabled; skipping");
        return Ok(());
    }
    let Some(key) = checked_key(ctx, issue_key) else {
        return Ok(());
    };

    let mut body = json!({ "transition": { "id": transition_id } });
    if let Some(resolution) = resolution {
        body["fields"] = json!({ "resolution": { "name": resolution } });
    }
    let uri = issue_path(config, &key, "/transitions");
    let request = HttpRequest::post(&uri, body.to_string()).with_auth(request_auth(config));
    if let Err(err) = gateway::mutate(ctx, &request) {
        gateway::report_failure(ctx, &err, &uri, TRANSITION_FALLBACK);
        return Ok(());
    }

    let audit = audit_body(&format!("Status updated by {actor}"), comment);
    finish_with_audit(ctx, config, &key, &audit, TRANSITION_FALLBACK);
    Ok(())
}

/// Adds a comment attributed to the actor.
///
/// # Errors
///
/// Currently none beyond the `Result` shape shared by command handlers.
pub fn comment(
    ctx: &ServiceContext,
    config: &JiraConfig,
    issue_key: &str,
    actor: &str,
    text: &str,
) -> Result<(), String> {
    if !config.enabled {
        debug!("JIRA backend is disabled; skipping");
        return Ok(());
    }
    let Some(key) = checked_key(ctx, issue_key) else {
        return Ok(());
    };

    let uri = issue_path(config, &key, "/comment");
    let body = json!({ "body": format!("Comment from {actor}:\n\n{text}") });
    let request = HttpRequest::post(&uri, body.to_string()).with_auth(request_auth(config));
    match gateway::mutate(ctx, &request) {
        Ok(()) => ctx.sink.emit_line("Ok."),
        Err(err) => gateway::report_failure(ctx, &err, &uri, COMMENT_FALLBACK),
    }
    Ok(())
}

/// Sets a field and logs who did it. A parenthesized comma-delimited
/// value becomes a list of named values; anything else a single one.
///
/// # Errors
///
/// Currently none beyond the `Result` shape shared by command handlers.
pub fn set_field(
    ctx: &ServiceContext,
    config: &JiraConfig,
    issue_key: &str,
    field: &str,
    raw_value: &str,
    actor: &str,
) -> Result<(), String> {
    if !config.enabled {
        debug!("JIRA backend is disabled; skipping");
        return Ok(());
    }
    let Some(key) = checked_key(ctx, issue_key) else {
        return Ok(());
    };

    let uri = issue_path(config, &key, "");
    let body = json!({ "fields": { field: field_value(raw_value) } });
    let request = HttpRequest::put(&uri, body.to_string()).with_auth(request_auth(config));
    if let Err(err) = gateway::mutate(ctx, &request) {
        gateway::report_failure(ctx, &err, &uri, UPDATE_FALLBACK);
        return Ok(());
    }

    finish_with_audit(ctx, config, &key, &format!("Field updated by {actor}"), UPDATE_FALLBACK);
    Ok(())
}

/// Field values use the `name` key throughout; `(a, b)` becomes a list.
fn field_value(raw: &str) -> Value {
    if raw.starts_with('(') && raw.ends_with(')') {
        let inner = raw.trim_matches(|c| c == '(' || c == ')');
        Value::Array(inner.split(',').map(|v| json!({ "name": v.trim() })).collect())
    } else {
        json!({ "name": raw })
    }
}

fn audit_body(action: &str, comment: Option<&str>) -> String {
    match comment {
        Some(comment) => format!("{action}\n\n{comment}"),
        None => action.to_string(),
    }
}

/// Posts the audit comment for a mutation that already succeeded. The
/// mutation is not rolled back when this fails; the user just sees the
/// failure instead of the acknowledgement.
fn finish_with_audit(
    ctx: &ServiceContext,
    config: &JiraConfig,
    key: &str,
    body_text: &str,
    fallback: &str,
) {
    let uri = issue_path(config, key, "/comment");
    let request = HttpRequest::post(&uri, json!({ "body": body_text }).to_string())
        .with_auth(request_auth(config));
    match gateway::mutate(ctx, &request) {
        Ok(()) => ctx.sink.emit_line("Ok."),
        Err(err) => gateway::report_failure(ctx, &err, &uri, fallback),
    }
}
