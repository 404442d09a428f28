//! Normalized ticket data and failure classification shared by all backends.

use thiserror::Error;

/// Normalized result of a successful ticket lookup.
///
/// Decoders for every backend project their wire payload into this one
/// shape; the summary formatter consumes it without knowing which tracker
/// produced it. A record lives for exactly one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRecord {
    /// Tracker-native identifier. May differ from what the caller asked
    /// for (RT resolves merged tickets to a different number), so the
    /// formatter compares it against the requested id.
    pub id: String,
    /// Current status name, when the tracker reported one.
    pub status: Option<String>,
    /// Resolution name; only rendered alongside a closed-like status.
    pub resolution: Option<String>,
    /// One-line subject. The formatter substitutes a placeholder when
    /// this is absent or empty.
    pub subject: Option<String>,
    /// Priority name, compared against the configured high-priority label.
    pub priority: Option<String>,
    /// Whether the tracker's security custom field evaluated to yes.
    pub security: bool,
    /// Extra security detail (RT's threat classification), rendered as a
    /// `threat=<value>` flag.
    pub security_detail: Option<String>,
    /// Browser-facing URL, always derivable from the base URI and `id`.
    pub web_url: String,
}

impl TicketRecord {
    /// Creates a record with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<String>, web_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: None,
            resolution: None,
            subject: None,
            priority: None,
            security: false,
            security_detail: None,
            web_url: web_url.into(),
        }
    }
}

/// Normalized failure from any stage of a tracker call.
///
/// Exactly one variant describes each failure. Variants that carry free
/// text hold operator-facing detail; what the end user sees is decided by
/// [`TrackerError::user_text`], which never leaks internals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// The request never completed, or the tracker answered with a
    /// non-2xx status carrying no decodable validation payload.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Credentials were rejected. Never echoes the credentials.
    #[error("authentication rejected: {0}")]
    Authentication(String),
    /// The tracker does not know the requested identifier or location.
    #[error("{0}")]
    NotFound(String),
    /// The tracker explicitly rejected the request and said why. These
    /// messages are tracker-authored and safe to show verbatim.
    #[error("{}", messages.join("  "))]
    Validation {
        /// Messages extracted from the backend's error payload.
        messages: Vec<String>,
    },
    /// The response body could not be decoded at all.
    #[error("undecodable response: {0}")]
    Undecodable(String),
    /// The call was misconfigured (for example an unsupported auth mode)
    /// and no request was attempted.
    #[error("{0}")]
    Config(String),
}

impl TrackerError {
    /// The single line shown to the end user for this failure.
    ///
    /// Validation text is tracker-authored and shown verbatim (messages
    /// joined with two spaces); not-found and configuration problems carry
    /// their own wording; everything else collapses to the caller's
    /// generic `fallback` phrase so that internal detail stays in the log.
    #[must_use]
    pub fn user_text(&self, fallback: &str) -> String {
        match self {
            Self::Validation { messages } => messages.join("  "),
            Self::NotFound(text) | Self::Config(text) => text.clone(),
            Self::Transport(_) | Self::Authentication(_) | Self::Undecodable(_) => {
                fallback.to_string()
            }
        }
    }

    /// Convenience constructor for a single-message validation failure.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { messages: vec![message.into()] }
    }
}
