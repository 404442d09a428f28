//! Response decoding for the two wire formats trackers speak.
//!
//! The backend set is fixed, so the decoder variants form a closed enum
//! dispatched with a `match` rather than an open trait: one line-oriented
//! text protocol (RT) and one JSON envelope shape shared by the REST
//! backends (JIRA, Redmine).

pub mod envelope;
pub mod line;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::ticket::TrackerError;

/// Which decoder a backend's responses go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDecoder {
    /// Banner / comment / `key: value` text lines.
    LineProtocol,
    /// JSON body; errors arrive as an `errorMessages`/`errors` envelope.
    JsonEnvelope {
        /// Key of the nested object holding the record on success, or
        /// `None` when the top-level document is the record itself.
        root: Option<&'static str>,
    },
}

/// Decoded payload of a successful response, before the backend projects
/// it into a [`crate::ticket::TicketRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Attribute map accumulated from `key: value` lines (last write wins).
    Attributes(BTreeMap<String, String>),
    /// Extracted JSON object.
    Document(Value),
}

impl ResponseDecoder {
    /// Decodes a raw response into a payload or a classified failure.
    ///
    /// # Errors
    ///
    /// Returns the [`TrackerError`] classification the wire format calls
    /// for; see [`line::decode`] and the [`envelope`] functions.
    pub fn decode(self, status: u16, body: &str) -> Result<Payload, TrackerError> {
        match self {
            Self::LineProtocol => line::decode(status, body).map(Payload::Attributes),
            Self::JsonEnvelope { root } => {
                if (200..300).contains(&status) {
                    envelope::decode_success(body, root).map(Payload::Document)
                } else {
                    Err(envelope::decode_error(status, body))
                }
            }
        }
    }
}
