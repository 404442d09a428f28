//! `tix redmine` command.

use crate::config::RedmineConfig;
use crate::context::ServiceContext;
use crate::trackers;

/// Execute the `redmine` command: look up one issue and reply with its
/// summary line.
///
/// # Errors
///
/// Returns an error string when the Redmine configuration is incomplete.
pub fn run(ctx: &ServiceContext, issue_id: u32) -> Result<(), String> {
    let config = RedmineConfig::from_env()?;
    trackers::redmine::get_issue(ctx, &config, issue_id)
}
