//! Recording adapter for the `HttpTransport` port.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::http::{HttpRequest, HttpResponse, HttpTransport};

/// Records HTTP interactions while delegating to an inner transport.
///
/// Requests carry credentials, so the recorded input is redacted: any
/// `password` field inside the auth variant is replaced before it can
/// reach a cassette on disk.
pub struct RecordingHttpTransport {
    inner: Box<dyn HttpTransport>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingHttpTransport {
    /// Creates a recording transport wrapping the given implementation.
    pub fn new(inner: Box<dyn HttpTransport>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl HttpTransport for RecordingHttpTransport {
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.execute(request);
        record_result(&self.recorder, "http", "execute", redacted_input(request), &result);
        result
    }
}

/// Serializes a request for the cassette with passwords blanked out.
fn redacted_input(request: &HttpRequest) -> Value {
    let mut input = serde_json::to_value(request).expect("failed to serialize http request");
    if let Some(auth) = input.get_mut("auth").and_then(Value::as_object_mut) {
        for variant in auth.values_mut() {
            if let Some(fields) = variant.as_object_mut() {
                if fields.contains_key("password") {
                    fields.insert("password".into(), Value::String("<redacted>".into()));
                }
            }
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::http::RequestAuth;

    struct CannedTransport;

    impl HttpTransport for CannedTransport {
        fn execute(
            &self,
            _request: &HttpRequest,
        ) -> Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>> {
            Ok(HttpResponse { status: 200, body: "id: ticket/1\n".into() })
        }
    }

    #[test]
    fn records_the_interaction_and_redacts_the_password() {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new("/dev/null", "test")));
        let transport =
            RecordingHttpTransport::new(Box::new(CannedTransport), Arc::clone(&recorder));

        let request = HttpRequest::get("https://rt.example/REST/1.0/ticket/1").with_auth(
            RequestAuth::Basic {
                username: "bot".into(),
                password: "hunter2".into(),
                realm: Some("RT Access".into()),
            },
        );
        let response = transport.execute(&request).unwrap();
        assert_eq!(response.status, 200);

        let guard = recorder.lock().unwrap();
        let recorded = &guard.interactions()[0];
        assert_eq!(recorded.port, "http");
        let serialized = recorded.input.to_string();
        assert!(serialized.contains("<redacted>"));
        assert!(!serialized.contains("hunter2"));
        assert_eq!(recorded.output["Ok"]["status"], 200);
    }
}
