//! RT ticket lookup over the REST 1.0 line protocol.

use tracing::debug;

use crate::auth::AuthMode;
use crate::config::RtConfig;
use crate::context::ServiceContext;
use crate::gateway;
use crate::ports::http::{HttpRequest, RequestAuth};
use crate::protocol::{line, Payload, ResponseDecoder};
use crate::summary::{format_summary, ResolutionJoin, SummaryStyle};
use crate::ticket::{TicketRecord, TrackerError};

use super::join_uri;

/// Generic phrase shown when a lookup fails for reasons the tracker did
/// not explain.
const FALLBACK: &str = "failed to retrieve ticket data";

fn style() -> SummaryStyle {
    SummaryStyle {
        label: "Ticket",
        placeholder: "(no subject)",
        resolution_join: ResolutionJoin::Arrow,
        security_label: "security",
        high_priority: None,
    }
}

/// Looks up one ticket and emits its summary line.
///
/// A disabled backend returns silently. Failures are reported through the
/// sink; this function only errs on host-level problems.
///
/// # Errors
///
/// Currently none beyond the `Result` shape shared by command handlers.
pub fn get_ticket(ctx: &ServiceContext, config: &RtConfig, ticket_id: u32) -> Result<(), String> {
    if !config.enabled {
        debug!("RT backend is disabled; skipping");
        return Ok(());
    }

    let rest_uri = join_uri(&config.base_uri, &format!("REST/1.0/ticket/{ticket_id}"));
    let auth = match AuthMode::parse(&config.auth_type) {
        Ok(mode) => request_auth(mode, config),
        Err(err) => {
            gateway::report_failure(ctx, &err, &rest_uri, FALLBACK);
            return Ok(());
        }
    };
    let request = HttpRequest::get(&rest_uri).with_auth(auth);

    match lookup(ctx, config, &request, ticket_id) {
        Ok(summary) => ctx.sink.emit_line(&summary),
        Err(err) => gateway::report_failure(ctx, &err, &rest_uri, FALLBACK),
    }
    Ok(())
}

fn lookup(
    ctx: &ServiceContext,
    config: &RtConfig,
    request: &HttpRequest,
    ticket_id: u32,
) -> Result<String, TrackerError> {
    let payload = gateway::fetch(ctx, request, ResponseDecoder::LineProtocol)?;
    let Payload::Attributes(attrs) = payload else {
        return Err(TrackerError::Undecodable("unexpected payload shape".into()));
    };
    let record = project_record(&attrs, &config.base_uri)?;
    Ok(format_summary(&record, &ticket_id.to_string(), &style()))
}

fn project_record(
    attrs: &std::collections::BTreeMap<String, String>,
    base_uri: &str,
) -> Result<TicketRecord, TrackerError> {
    let id = line::ticket_id(attrs)?;
    let web_url = join_uri(base_uri, &format!("Ticket/Display.html?id={id}"));
    let mut record = TicketRecord::new(id, web_url);
    record.status = non_empty(attrs.get("Status"));
    record.resolution = non_empty(attrs.get("Resolution"));
    record.subject = non_empty(attrs.get("Subject"));
    record.priority = non_empty(attrs.get("Priority"));
    record.security =
        attrs.get("CF.{Security}").is_some_and(|v| v.eq_ignore_ascii_case("yes"));
    record.security_detail = non_empty(attrs.get("CF.{Security Threat}"));
    Ok(record)
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

fn request_auth(mode: AuthMode, config: &RtConfig) -> RequestAuth {
    match mode {
        AuthMode::None => RequestAuth::Anonymous,
        AuthMode::Basic => RequestAuth::Basic {
            username: config.username.clone(),
            password: config.password.clone(),
            realm: Some(config.realm.clone()),
        },
        AuthMode::Digest => RequestAuth::Digest {
            username: config.username.clone(),
            password: config.password.clone(),
        },
        AuthMode::BuiltinLogin => RequestAuth::CookieLogin {
            login_url: join_uri(&config.base_uri, "REST/1.0/"),
            username: config.username.clone(),
            password: config.password.clone(),
        },
    }
}
