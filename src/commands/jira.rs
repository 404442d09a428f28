//! `tix jira` subcommands.

use std::env;

use crate::cli::JiraAction;
use crate::config::JiraConfig;
use crate::context::ServiceContext;
use crate::trackers;

/// Execute a `jira` subcommand.
///
/// # Errors
///
/// Returns an error string when the JIRA configuration is incomplete.
pub fn run(ctx: &ServiceContext, action: &JiraAction) -> Result<(), String> {
    let config = JiraConfig::from_env()?;
    match action {
        JiraAction::Get { key } => trackers::jira::get_issue(ctx, &config, key),
        JiraAction::Assign { key, assignee, actor, comment } => trackers::jira::assign(
            ctx,
            &config,
            key,
            assignee,
            &actor_name(actor.as_deref()),
            joined(comment).as_deref(),
        ),
        JiraAction::Transition { key, transition_id, resolution, actor, comment } => {
            trackers::jira::transition(
                ctx,
                &config,
                key,
                *transition_id,
                resolution.as_deref(),
                &actor_name(actor.as_deref()),
                joined(comment).as_deref(),
            )
        }
        JiraAction::Comment { key, actor, text } => trackers::jira::comment(
            ctx,
            &config,
            key,
            &actor_name(actor.as_deref()),
            joined(text).as_deref().unwrap_or_default(),
        ),
        JiraAction::SetField { key, field, value, actor } => trackers::jira::set_field(
            ctx,
            &config,
            key,
            field,
            joined(value).as_deref().unwrap_or_default(),
            &actor_name(actor.as_deref()),
        ),
    }
}

/// Audit comments name whoever ran the command: `--actor`, then
/// `TIX_ACTOR`, then the login name.
fn actor_name(explicit: Option<&str>) -> String {
    if let Some(actor) = explicit {
        return actor.to_string();
    }
    env::var("TIX_ACTOR")
        .or_else(|_| env::var("USER"))
        .unwrap_or_else(|_| "someone".to_string())
}

fn joined(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
