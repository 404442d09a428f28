//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::{LiveHttpTransport, StdioSink};
use crate::adapters::recording::RecordingHttpTransport;
use crate::adapters::replaying::ReplayingHttpTransport;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::http::HttpTransport;
use crate::ports::sink::ReplySink;

/// Bundles the two ports a tracker command touches.
///
/// Constructors wire up different adapter combinations: live network and
/// stdio, recording (live wrapped by a cassette recorder), or replaying
/// from a cassette file.
pub struct ServiceContext {
    /// Outbound HTTP.
    pub http: Box<dyn HttpTransport>,
    /// Where the one-line replies go.
    pub sink: Box<dyn ReplySink>,
    /// Optional cassette recorder; flushed to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Live context: real network, stdout/stderr replies.
    #[must_use]
    pub fn live() -> Self {
        Self { http: Box::new(LiveHttpTransport::new()), sink: Box::new(StdioSink), recorder: None }
    }

    /// Recording context: live adapters, HTTP interactions captured to a
    /// cassette written at `path` when this context is dropped. This is
    /// the developer-only mechanism behind the `TIX_RECORD` env var.
    #[must_use]
    pub fn recording(path: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "tix-session")));
        let http = RecordingHttpTransport::new(
            Box::new(LiveHttpTransport::new()),
            Arc::clone(&recorder),
        );
        Self { http: Box::new(http), sink: Box::new(StdioSink), recorder: Some(recorder) }
    }

    /// Replaying context from a cassette file: no network is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::replay_cassette(&cassette, Box::new(StdioSink)))
    }

    /// Replaying context over an in-memory cassette with a caller-chosen
    /// sink; the shape used by gateway tests.
    #[must_use]
    pub fn replay_cassette(cassette: &Cassette, sink: Box<dyn ReplySink>) -> Self {
        Self::with_ports(Box::new(ReplayingHttpTransport::from_cassette(cassette)), sink)
    }

    /// Context over arbitrary port implementations, for tests that wire
    /// their own adapter combinations.
    #[must_use]
    pub fn with_ports(http: Box<dyn HttpTransport>, sink: Box<dyn ReplySink>) -> Self {
        Self { http, sink, recorder: None }
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        if let Some(recorder) = self.recorder.take() {
            let result = recorder.lock().expect("recorder lock poisoned").finish();
            if let Err(e) = result {
                eprintln!("Warning: failed to write cassette: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    use crate::cassette::format::Interaction;
    use crate::ports::http::HttpRequest;
    use crate::ports::sink::MemorySink;

    fn lookup_cassette() -> Cassette {
        Cassette {
            name: "ctx-test".into(),
            recorded_at: Utc::now(),
            interactions: vec![Interaction {
                seq: 0,
                port: "http".into(),
                method: "execute".into(),
                input: json!({}),
                output: json!({"Ok": {"status": 200, "body": "id: ticket/42\n"}}),
            }],
        }
    }

    #[test]
    fn replaying_context_serves_recorded_responses() {
        let sink = Arc::new(MemorySink::new());
        let ctx = ServiceContext::replay_cassette(&lookup_cassette(), Box::new(Arc::clone(&sink)));
        let response =
            ctx.http.execute(&HttpRequest::get("https://rt.example/REST/1.0/ticket/42")).unwrap();
        assert_eq!(response.status, 200);
        assert!(response.body.contains("ticket/42"));
    }

    #[test]
    fn replaying_context_from_file_round_trips() {
        let dir = std::env::temp_dir().join("tix_ctx_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("lookup.cassette.yaml");
        let yaml = serde_yaml::to_string(&lookup_cassette()).unwrap();
        std::fs::write(&path, yaml).unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        let response =
            ctx.http.execute(&HttpRequest::get("https://rt.example/REST/1.0/ticket/42")).unwrap();
        assert_eq!(response.status, 200);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn recording_context_writes_a_cassette_on_drop() {
        let dir = std::env::temp_dir().join("tix_ctx_record_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.cassette.yaml");

        {
            let _ctx = ServiceContext::recording(&path);
            // No interactions; the cassette is still written on drop.
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.name, "tix-session");
        assert!(cassette.interactions.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
