//! `tix rt` command.

use crate::config::RtConfig;
use crate::context::ServiceContext;
use crate::trackers;

/// Execute the `rt` command: look up one ticket and reply with its
/// summary line.
///
/// # Errors
///
/// Returns an error string when the RT configuration is incomplete.
pub fn run(ctx: &ServiceContext, ticket_id: u32) -> Result<(), String> {
    let config = RtConfig::from_env()?;
    trackers::rt::get_ticket(ctx, &config, ticket_id)
}
