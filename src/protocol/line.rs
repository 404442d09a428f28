//! Decoder for RT's line-oriented REST 1.0 responses.
//!
//! RT answers over HTTP 200 even when the real outcome is a failure; the
//! truth is in the body. Three line forms matter:
//!
//! ```text
//! RT/3.8.8 200 Ok          <- banner carrying the real response code
//! # Ticket 0 does not exist.   <- authoritative error message
//! Subject: printer on fire     <- attribute
//! ```

use std::collections::BTreeMap;

use crate::ticket::TrackerError;

/// Prefix of the banner line carrying RT's real response code.
const BANNER_PREFIX: &str = "RT/";

/// Decodes a line-protocol body into its attribute map.
///
/// Banner lines with a 4xx/5xx code mark the response as a transport
/// failure even under an HTTP 200; malformed banners are skipped. A `#`
/// comment line is an authoritative error: it wins over any banner seen
/// earlier and stops decoding immediately. Attribute lines accumulate
/// with last-occurrence-wins; anything else is ignored.
///
/// # Errors
///
/// - [`TrackerError::Transport`] for a non-2xx HTTP status or a 4xx/5xx
///   banner code.
/// - [`TrackerError::Validation`] carrying the text of the first comment
///   line.
pub fn decode(status: u16, body: &str) -> Result<BTreeMap<String, String>, TrackerError> {
    if !(200..300).contains(&status) {
        return Err(TrackerError::Transport(format!("HTTP {status}")));
    }

    let mut attrs = BTreeMap::new();
    let mut banner_failure = None;
    for raw in body.lines() {
        if raw.starts_with(BANNER_PREFIX) {
            let mut tokens = raw.split_whitespace();
            if let (Some(server), Some(code)) = (tokens.next(), tokens.next()) {
                let message = tokens.collect::<Vec<_>>().join(" ");
                if !message.is_empty() && (code.starts_with('4') || code.starts_with('5')) {
                    banner_failure = Some(TrackerError::Transport(format!(
                        "{server} reported {code} {message}"
                    )));
                }
            }
            // Banners without all three parts are noise, never fatal.
        } else if let Some(rest) = raw.strip_prefix('#') {
            return Err(TrackerError::validation(rest.trim()));
        } else if let Some((key, value)) = raw.split_once(':') {
            attrs.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    match banner_failure {
        Some(err) => Err(err),
        None => Ok(attrs),
    }
}

/// Extracts the numeric ticket id from the decoded attributes.
///
/// The `id` attribute looks like `ticket/123`; the numeric suffix is the
/// tracker-native identifier.
///
/// # Errors
///
/// Returns [`TrackerError::Undecodable`] when the attribute is missing or
/// not of the `<namespace>/<number>` form.
pub fn ticket_id(attrs: &BTreeMap<String, String>) -> Result<String, TrackerError> {
    attrs
        .get("id")
        .and_then(|id| id.split_once('/'))
        .map(|(_, number)| number.to_string())
        .ok_or_else(|| TrackerError::Undecodable("response carried no ticket id".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_attributes_and_resolves_the_id() {
        let body = "RT/3.8.8 200 Ok\n\nid: ticket/99\nStatus: open\nSubject: printer on fire\n";
        let attrs = decode(200, body).unwrap();
        assert_eq!(ticket_id(&attrs).unwrap(), "99");
        assert_eq!(attrs.get("Subject").map(String::as_str), Some("printer on fire"));
    }

    #[test]
    fn last_occurrence_wins_for_repeated_keys() {
        let body = "id: ticket/1\nStatus: open\nStatus: resolved\n";
        let attrs = decode(200, body).unwrap();
        assert_eq!(attrs.get("Status").map(String::as_str), Some("resolved"));
    }

    #[test]
    fn attribute_order_does_not_matter_for_distinct_keys() {
        let forward = decode(200, "id: ticket/2\nStatus: open\nQueue: General\n").unwrap();
        let reversed = decode(200, "Queue: General\nStatus: open\nid: ticket/2\n").unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn banner_with_error_code_fails_even_under_http_200() {
        let err = decode(200, "RT/3.8.8 401 Credentials required\n").unwrap_err();
        assert_eq!(
            err,
            TrackerError::Transport("RT/3.8.8 reported 401 Credentials required".into())
        );
    }

    #[test]
    fn malformed_banner_is_skipped() {
        let body = "RT/3.8.8\nid: ticket/3\n";
        let attrs = decode(200, body).unwrap();
        assert_eq!(ticket_id(&attrs).unwrap(), "3");
    }

    #[test]
    fn comment_line_wins_over_an_earlier_banner_and_stops_decoding() {
        let body = "RT/3.8.8 500 Internal\n# Ticket 0 does not exist.\nid: ticket/4\n";
        let err = decode(200, body).unwrap_err();
        assert_eq!(err, TrackerError::validation("Ticket 0 does not exist."));
    }

    #[test]
    fn non_2xx_status_is_a_transport_failure() {
        assert_eq!(decode(502, "").unwrap_err(), TrackerError::Transport("HTTP 502".into()));
    }

    #[test]
    fn missing_id_is_undecodable() {
        let attrs = decode(200, "Status: open\n").unwrap();
        assert!(matches!(ticket_id(&attrs), Err(TrackerError::Undecodable(_))));
    }

    #[test]
    fn lines_without_separator_are_ignored() {
        let attrs = decode(200, "--- ticket metadata ---\nid: ticket/6\n").unwrap();
        assert_eq!(ticket_id(&attrs).unwrap(), "6");
    }
}
