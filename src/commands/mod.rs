//! Command dispatch and handlers.

pub mod jira;
pub mod redmine;
pub mod rt;
pub mod weather;

use std::env;
use std::path::PathBuf;

use crate::cli::Command;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `TIX_RECORD` is set to a file path, HTTP interactions are
/// recorded to a cassette there; when `TIX_REPLAY` is set, the command
/// runs against that cassette instead of the network.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = if let Ok(path) = env::var("TIX_RECORD") {
        ServiceContext::recording(&PathBuf::from(path))
    } else if let Ok(path) = env::var("TIX_REPLAY") {
        ServiceContext::replaying(&PathBuf::from(path))?
    } else {
        ServiceContext::live()
    };
    dispatch_with_context(command, &ctx)
}

/// Dispatch a command with the given service context.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Rt { id } => rt::run(ctx, *id),
        Command::Redmine { id } => redmine::run(ctx, *id),
        Command::Jira { action } => jira::run(ctx, action),
        Command::Weather { location } => weather::run(ctx, location.as_deref()),
    }
}
