//! HTTP transport port.
//!
//! The gateway describes a request as plain data — method, URL, optional
//! JSON body, and how it authenticates — and hands it to this port.
//! Abstracting the transport allows deterministic replay and testing
//! without touching a real tracker.

use serde::{Deserialize, Serialize};

/// How one outbound request authenticates.
///
/// The live transport interprets each variant; replaying transports
/// ignore it (the recorded response already reflects it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestAuth {
    /// No credentials attached.
    Anonymous,
    /// HTTP Basic credential pair. With a realm set, the credential is
    /// presented only in answer to a 401 challenge naming that realm —
    /// get the realm wrong and the credential is silently withheld,
    /// longstanding behavior callers rely on to detect misconfiguration.
    /// Without a realm the header is attached preemptively.
    Basic {
        /// Account name.
        username: String,
        /// Account password.
        password: String,
        /// Realm the credential is scoped to, or `None` for preemptive.
        realm: Option<String>,
    },
    /// HTTP Digest: answer the server's 401 challenge once.
    Digest {
        /// Account name.
        username: String,
        /// Account password.
        password: String,
    },
    /// Cookie-session login: a preliminary form POST of `user`/`pass` to
    /// `login_url` fills a jar scoped to this one call.
    CookieLogin {
        /// Where the login form is posted.
        login_url: String,
        /// Account name.
        username: String,
        /// Account password.
        password: String,
    },
}

/// One outbound request, fully described as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// HTTP method (`GET`, `PUT`, `POST`).
    pub method: String,
    /// Absolute request URL.
    pub url: String,
    /// JSON body, sent with an `application/json` content type.
    pub body: Option<String>,
    /// Authentication for this request.
    pub auth: RequestAuth,
}

impl HttpRequest {
    /// A GET with no body and no credentials.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: "GET".into(), url: url.into(), body: None, auth: RequestAuth::Anonymous }
    }

    /// A POST carrying a JSON body.
    #[must_use]
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: "POST".into(),
            url: url.into(),
            body: Some(body.into()),
            auth: RequestAuth::Anonymous,
        }
    }

    /// A PUT carrying a JSON body.
    #[must_use]
    pub fn put(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: "PUT".into(),
            url: url.into(),
            body: Some(body.into()),
            auth: RequestAuth::Anonymous,
        }
    }

    /// Attaches authentication, consuming and returning the request.
    #[must_use]
    pub fn with_auth(mut self, auth: RequestAuth) -> Self {
        self.auth = auth;
        self
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes outbound HTTP requests.
///
/// One call to [`HttpTransport::execute`] is one logical request; auth
/// handshakes (digest challenge, cookie login) happen inside the call so
/// that a cassette records a single interaction.
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the final status and body.
    ///
    /// Non-2xx statuses are returned as responses, not errors; the error
    /// path is for requests that produced no HTTP response at all.
    ///
    /// # Errors
    ///
    /// Returns an error when the request could not be completed (DNS,
    /// connect, TLS, or mid-body failures).
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>>;
}
