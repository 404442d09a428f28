//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `tix`.
#[derive(Debug, Parser)]
#[command(name = "tix", version, about = "Query and update issue trackers")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Display an RT ticket along with a link to it on the web.
    Rt {
        /// Ticket number.
        id: u32,
    },
    /// Display a Redmine issue along with a link to it on the web.
    Redmine {
        /// Issue number.
        id: u32,
    },
    /// Look up or update JIRA issues.
    Jira {
        /// The JIRA operation to perform.
        #[command(subcommand)]
        action: JiraAction,
    },
    /// Display the current weather conditions in a location.
    Weather {
        /// Location to look up; the configured default when omitted.
        location: Option<String>,
    },
}

/// JIRA operations.
#[derive(Debug, Subcommand)]
pub enum JiraAction {
    /// Display an issue along with a link to it on the web.
    Get {
        /// Issue key, e.g. OPS-1234.
        key: String,
    },
    /// Assign an issue to someone (their JIRA account name).
    Assign {
        /// Issue key.
        key: String,
        /// Assignee's JIRA account name.
        assignee: String,
        /// Who to attribute the change to; defaults to TIX_ACTOR or the
        /// login name.
        #[arg(long)]
        actor: Option<String>,
        /// Optional free-text comment appended to the audit trail.
        comment: Vec<String>,
    },
    /// Perform a workflow transition on an issue.
    Transition {
        /// Issue key.
        key: String,
        /// Numeric transition id.
        transition_id: u32,
        /// Resolution to set, for transitions that take one.
        #[arg(long)]
        resolution: Option<String>,
        /// Who to attribute the change to; defaults to TIX_ACTOR or the
        /// login name.
        #[arg(long)]
        actor: Option<String>,
        /// Optional free-text comment appended to the audit trail.
        comment: Vec<String>,
    },
    /// Add a comment to an issue.
    Comment {
        /// Issue key.
        key: String,
        /// Who to attribute the comment to; defaults to TIX_ACTOR or the
        /// login name.
        #[arg(long)]
        actor: Option<String>,
        /// Comment text.
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Set a field of an issue. The value can be a string or a
    /// comma-delimited list surrounded by parentheses.
    SetField {
        /// Issue key.
        key: String,
        /// Field name, e.g. fixVersions.
        field: String,
        /// Who to attribute the change to; defaults to TIX_ACTOR or the
        /// login name.
        #[arg(long)]
        actor: Option<String>,
        /// Field value.
        #[arg(required = true)]
        value: Vec<String>,
    },
}
