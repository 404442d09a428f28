//! Authentication modes and the digest challenge/response computation.
//!
//! A backend declares how its requests authenticate via a mode string in
//! configuration. The mode set is closed: anything unrecognized is a
//! configuration error reported before any request is attempted.

use md5::{Digest, Md5};

use crate::ticket::TrackerError;

/// How outbound requests to a backend authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Send the request as-is.
    None,
    /// HTTP Basic. The credential is scoped to the configured realm and
    /// base URI; if either does not match the server's challenge the
    /// credential is silently not presented.
    Basic,
    /// HTTP Digest, keyed by the base URI only (no realm parameter).
    Digest,
    /// Tracker-specific cookie session: a preliminary form login request
    /// captures Set-Cookie headers into a jar scoped to the one call.
    BuiltinLogin,
}

impl AuthMode {
    /// Parses a configured mode string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Config`] naming the invalid mode; callers
    /// must report it and abort without sending a request.
    pub fn parse(raw: &str) -> Result<Self, TrackerError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "basic" => Ok(Self::Basic),
            "digest" => Ok(Self::Digest),
            "builtin" => Ok(Self::BuiltinLogin),
            _ => Err(TrackerError::Config(format!("'{raw}' is not a valid authType."))),
        }
    }
}

/// A parsed `WWW-Authenticate: Digest ...` challenge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DigestChallenge {
    /// Protection realm named by the server.
    pub realm: String,
    /// Server nonce.
    pub nonce: String,
    /// Opaque blob to echo back, when present.
    pub opaque: Option<String>,
    /// Quality-of-protection options offered by the server.
    pub qop: Option<String>,
}

impl DigestChallenge {
    /// Parses the parameter list of a digest challenge header.
    ///
    /// `header` is the full `WWW-Authenticate` value. Returns `None` when
    /// the scheme is not `Digest` or the required parameters are missing.
    #[must_use]
    pub fn parse(header: &str) -> Option<Self> {
        let rest = header.trim().strip_prefix("Digest")?.trim_start();
        let mut challenge = Self::default();
        for (key, value) in split_challenge_params(rest) {
            match key.as_str() {
                "realm" => challenge.realm = value,
                "nonce" => challenge.nonce = value,
                "opaque" => challenge.opaque = Some(value),
                "qop" => challenge.qop = Some(value),
                _ => {}
            }
        }
        if challenge.nonce.is_empty() {
            return None;
        }
        Some(challenge)
    }

    /// Computes the `Authorization` header answering this challenge.
    ///
    /// Implements RFC 2617 MD5 with `qop=auth` when the server offers it,
    /// falling back to the legacy computation otherwise. `uri` is the
    /// request path sent on the wire; `cnonce` is caller-supplied so the
    /// computation stays deterministic under test.
    #[must_use]
    pub fn authorization(
        &self,
        username: &str,
        password: &str,
        method: &str,
        uri: &str,
        cnonce: &str,
    ) -> String {
        const NC: &str = "00000001";
        let ha1 = md5_hex(&format!("{username}:{}:{password}", self.realm));
        let ha2 = md5_hex(&format!("{method}:{uri}"));
        let use_qop = self.qop.as_deref().is_some_and(|q| q.split(',').any(|o| o.trim() == "auth"));
        let response = if use_qop {
            md5_hex(&format!("{ha1}:{}:{NC}:{cnonce}:auth:{ha2}", self.nonce))
        } else {
            md5_hex(&format!("{ha1}:{}:{ha2}", self.nonce))
        };

        let mut header = format!(
            "Digest username=\"{username}\", realm=\"{}\", nonce=\"{}\", uri=\"{uri}\", response=\"{response}\", algorithm=MD5",
            self.realm, self.nonce
        );
        if use_qop {
            header.push_str(&format!(", qop=auth, nc={NC}, cnonce=\"{cnonce}\""));
        }
        if let Some(opaque) = &self.opaque {
            header.push_str(&format!(", opaque=\"{opaque}\""));
        }
        header
    }
}

/// Extracts the realm of a `WWW-Authenticate: Basic ...` challenge.
#[must_use]
pub fn basic_realm(header: &str) -> Option<String> {
    let rest = header.trim().strip_prefix("Basic")?.trim_start();
    split_challenge_params(rest)
        .into_iter()
        .find(|(key, _)| key == "realm")
        .map(|(_, value)| value)
}

/// Splits `key=value, key="quoted, value"` parameter lists.
fn split_challenge_params(input: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = input.chars().peekable();
    loop {
        // Key runs up to '='.
        let mut key = String::new();
        for c in chars.by_ref() {
            if c == '=' {
                break;
            }
            key.push(c);
        }
        let key = key.trim().trim_start_matches(',').trim().to_ascii_lowercase();
        if key.is_empty() {
            break;
        }

        let mut value = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                value.push(c);
            }
            // Consume the trailing comma, if any.
            while chars.peek().is_some_and(|c| *c == ',' || c.is_whitespace()) {
                chars.next();
            }
        } else {
            while chars.peek().is_some_and(|c| *c != ',') {
                value.push(chars.next().unwrap_or(','));
            }
            chars.next();
            value = value.trim().to_string();
        }
        params.push((key, value));
        if chars.peek().is_none() {
            break;
        }
    }
    params
}

/// Lowercase hex MD5 of the input.
fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hasher.finalize().iter().map(|b| format!("{b:02x}")).collect()
}
