//! Live adapter for the `HttpTransport` port using a blocking reqwest
//! client.
//!
//! Auth handshakes are resolved inside `execute` so that one port call is
//! one logical request regardless of how many wire round trips the mode
//! needs: digest answers a 401 challenge once, and the builtin cookie
//! login posts credentials to the login path with a jar that lives only
//! for this call.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::Url;

use crate::auth::{basic_realm, DigestChallenge};
use crate::ports::http::{HttpRequest, HttpResponse, HttpTransport, RequestAuth};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Live HTTP transport.
pub struct LiveHttpTransport {
    client: Client,
}

impl LiveHttpTransport {
    /// Creates a transport with a plain client (no cookie store; the
    /// builtin-login mode builds its own per call).
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    fn builder(client: &Client, request: &HttpRequest) -> Result<RequestBuilder, BoxError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())?;
        let mut builder = client.request(method, &request.url);
        if let Some(body) = &request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body.clone());
        }
        Ok(builder)
    }

    fn send_plain(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        into_response(Self::builder(&self.client, request)?.send()?)
    }

    /// With a realm: sends once unauthenticated and answers a Basic
    /// challenge only when its realm matches the configured one, so a
    /// mismatched `realm` setting surfaces as the 401 it causes. Without
    /// a realm: attaches the header preemptively.
    fn send_basic(
        &self,
        request: &HttpRequest,
        username: &str,
        password: &str,
        realm: Option<&str>,
    ) -> Result<HttpResponse, BoxError> {
        let Some(realm) = realm else {
            let builder =
                Self::builder(&self.client, request)?.basic_auth(username, Some(password));
            return into_response(builder.send()?);
        };
        let first = Self::builder(&self.client, request)?.send()?;
        if first.status().as_u16() != 401 {
            return into_response(first);
        }
        let challenge_realm = first
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok())
            .and_then(basic_realm);
        if challenge_realm.as_deref() != Some(realm) {
            return into_response(first);
        }
        let retry = Self::builder(&self.client, request)?.basic_auth(username, Some(password));
        into_response(retry.send()?)
    }

    /// Sends once unauthenticated; on a digest challenge, answers it and
    /// sends again. A 401 without a parsable digest challenge is returned
    /// as-is for the decoder to classify.
    fn send_digest(
        &self,
        request: &HttpRequest,
        username: &str,
        password: &str,
    ) -> Result<HttpResponse, BoxError> {
        let first = Self::builder(&self.client, request)?.send()?;
        if first.status().as_u16() != 401 {
            return into_response(first);
        }
        let challenge = first
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok())
            .and_then(DigestChallenge::parse);
        let Some(challenge) = challenge else {
            return into_response(first);
        };

        let url = Url::parse(&request.url)?;
        let mut uri = url.path().to_string();
        if let Some(query) = url.query() {
            uri.push('?');
            uri.push_str(query);
        }
        let cnonce = uuid::Uuid::new_v4().simple().to_string();
        let header =
            challenge.authorization(username, password, &request.method, &uri, &cnonce);
        let retry = Self::builder(&self.client, request)?.header(AUTHORIZATION, header);
        into_response(retry.send()?)
    }

    /// Builtin cookie-session login: form-posts `user`/`pass` to the
    /// login path, then replays the real request through the same client
    /// so the captured cookies ride along. The jar belongs to this call
    /// alone and is dropped with the client.
    fn send_cookie_login(
        &self,
        request: &HttpRequest,
        login_url: &str,
        username: &str,
        password: &str,
    ) -> Result<HttpResponse, BoxError> {
        let session = Client::builder().cookie_store(true).build()?;
        session
            .post(login_url)
            .form(&[("user", username), ("pass", password)])
            .send()?;
        into_response(Self::builder(&session, request)?.send()?)
    }
}

impl Default for LiveHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for LiveHttpTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        match &request.auth {
            RequestAuth::Anonymous => self.send_plain(request),
            RequestAuth::Basic { username, password, realm } => {
                self.send_basic(request, username, password, realm.as_deref())
            }
            RequestAuth::Digest { username, password } => {
                self.send_digest(request, username, password)
            }
            RequestAuth::CookieLogin { login_url, username, password } => {
                self.send_cookie_login(request, login_url, username, password)
            }
        }
    }
}

fn into_response(response: Response) -> Result<HttpResponse, BoxError> {
    let status = response.status().as_u16();
    let body = response.text()?;
    Ok(HttpResponse { status, body })
}
