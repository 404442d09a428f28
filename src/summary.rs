//! Renders a normalized ticket record as a single display line.
//!
//! Output shape, tokens space-joined with empty segments omitted:
//!
//! ```text
//! Ticket *99 (resolved->fixed, security): printer on fire - https://rt.example/Ticket/Display.html?id=99
//! ```
//!
//! The formatter is pure and total; every tracker difference (label,
//! placeholder, how resolution attaches to status, flag spellings) is
//! carried in a [`SummaryStyle`].

use crate::ticket::TicketRecord;

/// Statuses that are allowed to carry a resolution in the flag list.
pub const CLOSED_LIKE_STATUSES: [&str; 3] = ["Release Pending", "Resolved", "Closed"];

/// How a resolution attaches to its closed-like status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionJoin {
    /// `Resolved (Won't Fix)` — the JSON backends.
    Parenthesized,
    /// `Resolved->Won't Fix` — the line-protocol backend.
    Arrow,
}

/// Per-backend rendering choices.
#[derive(Debug, Clone)]
pub struct SummaryStyle {
    /// Leading label: `Ticket` or `Issue`.
    pub label: &'static str,
    /// Subject placeholder: `(no subject)` or `(no summary)`.
    pub placeholder: &'static str,
    /// Status/resolution join.
    pub resolution_join: ResolutionJoin,
    /// Spelling of the security flag (`security` vs `Security`).
    pub security_label: &'static str,
    /// Priority name that earns its own flag, when configured.
    pub high_priority: Option<String>,
}

/// Formats one record into its display line.
///
/// `requested_id` is the caller's input after normalization; when the
/// tracker resolved it to a different identifier the rendered id gets a
/// `*` prefix so the substitution is visible.
#[must_use]
pub fn format_summary(record: &TicketRecord, requested_id: &str, style: &SummaryStyle) -> String {
    let mut bits: Vec<String> = vec![style.label.to_string()];
    if record.id == requested_id {
        bits.push(record.id.clone());
    } else {
        bits.push(format!("*{}", record.id));
    }

    let flags = assemble_flags(record, style);
    if !flags.is_empty() {
        bits.push(format!("({})", flags.join(", ")));
    }
    // The colon rides on whatever token precedes the subject.
    if let Some(last) = bits.last_mut() {
        last.push(':');
    }

    match record.subject.as_deref().filter(|s| !s.is_empty()) {
        Some(subject) => bits.push(subject.to_string()),
        None => bits.push(style.placeholder.to_string()),
    }
    bits.push("-".to_string());
    bits.push(record.web_url.clone());
    bits.join(" ")
}

/// Flag list in its fixed order: status (with resolution when closed-like),
/// high-priority, security, threat detail.
fn assemble_flags(record: &TicketRecord, style: &SummaryStyle) -> Vec<String> {
    let mut flags = Vec::new();
    if let Some(status) = record.status.as_deref().filter(|s| !s.is_empty()) {
        match record.resolution.as_deref().filter(|r| !r.is_empty()) {
            Some(resolution) if CLOSED_LIKE_STATUSES.contains(&status) => {
                flags.push(match style.resolution_join {
                    ResolutionJoin::Parenthesized => format!("{status} ({resolution})"),
                    ResolutionJoin::Arrow => format!("{status}->{resolution}"),
                });
            }
            _ => flags.push(status.to_string()),
        }
    }
    if let (Some(high), Some(priority)) = (style.high_priority.as_deref(), record.priority.as_deref())
    {
        if priority == high {
            flags.push(high.to_string());
        }
    }
    if record.security {
        flags.push(style.security_label.to_string());
    }
    if let Some(threat) = record.security_detail.as_deref().filter(|t| !t.is_empty()) {
        flags.push(format!("threat={threat}"));
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rt_style() -> SummaryStyle {
        SummaryStyle {
            label: "Ticket",
            placeholder: "(no subject)",
            resolution_join: ResolutionJoin::Arrow,
            security_label: "security",
            high_priority: None,
        }
    }

    fn jira_style() -> SummaryStyle {
        SummaryStyle {
            label: "Issue",
            placeholder: "(no summary)",
            resolution_join: ResolutionJoin::Parenthesized,
            security_label: "Security",
            high_priority: Some("Blocker".into()),
        }
    }

    fn record(id: &str) -> TicketRecord {
        TicketRecord::new(id, format!("https://tracker.example/view/{id}"))
    }

    #[test]
    fn matching_id_renders_without_the_substitution_marker() {
        let mut rec = record("42");
        rec.subject = Some("printer on fire".into());
        let line = format_summary(&rec, "42", &rt_style());
        assert_eq!(line, "Ticket 42: printer on fire - https://tracker.example/view/42");
        assert!(!line.contains('*'));
    }

    #[test]
    fn resolved_id_mismatch_always_carries_the_marker() {
        let mut rec = record("99");
        rec.status = Some("open".into());
        rec.subject = Some("merged ticket".into());
        let line = format_summary(&rec, "42", &rt_style());
        assert_eq!(line, "Ticket *99 (open): merged ticket - https://tracker.example/view/99");
    }

    #[test]
    fn resolution_joins_with_arrow_for_the_line_backend() {
        let mut rec = record("7");
        rec.status = Some("Resolved".into());
        rec.resolution = Some("Won't Fix".into());
        rec.subject = Some("wontfix".into());
        let line = format_summary(&rec, "7", &rt_style());
        assert!(line.contains("(Resolved->Won't Fix):"), "{line}");
    }

    #[test]
    fn resolution_joins_parenthesized_for_the_json_backend() {
        let mut rec = record("OPS-1");
        rec.status = Some("Resolved".into());
        rec.resolution = Some("Won't Fix".into());
        rec.subject = Some("wontfix".into());
        let line = format_summary(&rec, "OPS-1", &jira_style());
        assert!(line.contains("(Resolved (Won't Fix)):"), "{line}");
    }

    #[test]
    fn resolution_is_ignored_outside_the_closed_like_set() {
        let mut rec = record("OPS-2");
        rec.status = Some("In Progress".into());
        rec.resolution = Some("Fixed".into());
        let line = format_summary(&rec, "OPS-2", &jira_style());
        assert!(line.contains("(In Progress):"), "{line}");
        assert!(!line.contains("Fixed"));
    }

    #[test]
    fn high_priority_flag_requires_an_exact_name_match() {
        let mut rec = record("OPS-3");
        rec.status = Some("Open".into());
        rec.priority = Some("Blocker".into());
        let line = format_summary(&rec, "OPS-3", &jira_style());
        assert!(line.contains("(Open, Blocker):"), "{line}");

        rec.priority = Some("Critical".into());
        let line = format_summary(&rec, "OPS-3", &jira_style());
        assert!(line.contains("(Open):"), "{line}");
    }

    #[test]
    fn security_flag_and_threat_detail_render_in_order() {
        let mut rec = record("12");
        rec.status = Some("open".into());
        rec.security = true;
        rec.security_detail = Some("high".into());
        let line = format_summary(&rec, "12", &rt_style());
        assert!(line.contains("(open, security, threat=high):"), "{line}");
    }

    #[test]
    fn empty_subject_takes_the_placeholder() {
        let mut rec = record("5");
        rec.subject = Some(String::new());
        let line = format_summary(&rec, "5", &rt_style());
        assert!(line.contains("5: (no subject) -"), "{line}");

        let line = format_summary(&record("OPS-9"), "OPS-9", &jira_style());
        assert!(line.contains("OPS-9: (no summary) -"), "{line}");
    }

    #[test]
    fn without_flags_the_colon_rides_on_the_id() {
        let mut rec = record("8");
        rec.subject = Some("quiet".into());
        let line = format_summary(&rec, "8", &rt_style());
        assert_eq!(line, "Ticket 8: quiet - https://tracker.example/view/8");
    }
}
