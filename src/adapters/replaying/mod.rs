//! Replaying adapters that serve recorded interactions.

pub mod http;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

pub use http::ReplayingHttpTransport;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Pulls the next recorded output for a port/method pair.
///
/// Panics with a clear message when no replayer is configured — a test
/// that reaches an unrecorded port should fail loudly, not hang on the
/// network.
pub(crate) fn next_output(
    replayer: Option<&Arc<Mutex<CassetteReplayer>>>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let replayer = replayer.unwrap_or_else(|| {
        panic!("{port} port not configured — no cassette loaded for {port}::{method}")
    });
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output.clone()
}

/// Decodes a recorded output following the Ok/Err JSON convention used by
/// the recording adapters.
pub(crate) fn replay_result<T: DeserializeOwned>(output: serde_json::Value) -> Result<T, BoxError> {
    if let Some(err) = output.get("Err") {
        let message = err.as_str().map_or_else(|| err.to_string(), str::to_string);
        return Err(message.into());
    }
    let ok = output.get("Ok").cloned().unwrap_or(output);
    serde_json::from_value(ok).map_err(|e| -> BoxError { format!("malformed cassette output: {e}").into() })
}
