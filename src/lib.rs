//! Core library entry for the `tix` CLI.
//!
//! `tix` answers chat-style one-liners about tickets: it queries an issue
//! tracker (RT, JIRA, Redmine) or the legacy weather endpoint, normalizes
//! whatever the backend answered, and replies with a single summary line
//! and a deep link.

pub mod adapters;
pub mod auth;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod gateway;
pub mod ports;
pub mod protocol;
pub mod summary;
pub mod ticket;
pub mod trackers;
pub mod weather;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command
/// execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // Help and version requests are not failures.
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["tix", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_on_missing_arguments() {
        let result = run(["tix", "rt"]);
        assert!(result.is_err());
    }
}
