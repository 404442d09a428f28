//! Replaying adapter for the `HttpTransport` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::http::{HttpRequest, HttpResponse, HttpTransport};

/// Serves recorded HTTP responses from a cassette, in order.
pub struct ReplayingHttpTransport {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingHttpTransport {
    /// Creates a replaying transport backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Creates a replaying transport directly from a cassette.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self::new(Arc::new(Mutex::new(CassetteReplayer::new(cassette))))
    }

    /// Creates a replaying transport with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl HttpTransport for ReplayingHttpTransport {
    fn execute(
        &self,
        _request: &HttpRequest,
    ) -> Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(self.replayer.as_ref(), "http", "execute");
        replay_result(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    use crate::cassette::format::Interaction;

    #[test]
    fn replays_ok_and_err_outputs() {
        let cassette = Cassette {
            name: "replay".into(),
            recorded_at: Utc::now(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "http".into(),
                    method: "execute".into(),
                    input: json!({}),
                    output: json!({"Ok": {"status": 404, "body": "{}"}}),
                },
                Interaction {
                    seq: 1,
                    port: "http".into(),
                    method: "execute".into(),
                    input: json!({}),
                    output: json!({"Err": "connection refused"}),
                },
            ],
        };
        let transport = ReplayingHttpTransport::from_cassette(&cassette);
        let request = HttpRequest::get("https://jira.example/rest/api/2/issue/OPS-1");

        let first = transport.execute(&request).unwrap();
        assert_eq!(first.status, 404);

        let second = transport.execute(&request).unwrap_err();
        assert_eq!(second.to_string(), "connection refused");
    }

    #[test]
    #[should_panic(expected = "not configured")]
    fn unconfigured_transport_panics_with_clear_message() {
        let transport = ReplayingHttpTransport::unconfigured();
        let _ = transport.execute(&HttpRequest::get("https://rt.example"));
    }
}
