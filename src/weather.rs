//! Current-conditions lookup against the legacy weather endpoint.
//!
//! The same query/decode/format pattern as the trackers, with a twist in
//! the formatter: instead of a flag list, three optional groups —
//! condition/temperature, wind/humidity, and place — join with
//! `" and "` / `" with "` / `" in "`. When every group is empty the
//! location is treated as unknown and nothing is emitted but the
//! not-found line.

use tracing::{debug, error};

use crate::config::WeatherConfig;
use crate::context::ServiceContext;
use crate::gateway;
use crate::ports::http::HttpRequest;
use crate::ticket::TrackerError;

const NOT_FOUND: &str = "I can't seem to find that location.";

/// Decoded current-conditions fields; all optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherReport {
    /// Sky condition, e.g. `Clear`.
    pub condition: Option<String>,
    /// Temperature, already suffixed with its unit.
    pub temperature: Option<String>,
    /// Wind line, lower-cased to read mid-sentence.
    pub wind: Option<String>,
    /// Humidity line, reordered to read mid-sentence.
    pub humidity: Option<String>,
    /// Resolved place name.
    pub place: Option<String>,
}

/// Looks up current conditions and emits the one-line report.
///
/// # Errors
///
/// Currently none beyond the `Result` shape shared by command handlers.
pub fn current_conditions(
    ctx: &ServiceContext,
    config: &WeatherConfig,
    location: Option<&str>,
) -> Result<(), String> {
    if !config.enabled {
        debug!("weather backend is disabled; skipping");
        return Ok(());
    }
    let location = location.unwrap_or(&config.default_location);
    if !valid_location(location) {
        error!(location, "location does not match the accepted charset");
        ctx.sink.emit_error(NOT_FOUND);
        return Ok(());
    }

    let url = format!(
        "{}?weather={}",
        config.base_uri.trim_end_matches('/'),
        encode_location(location)
    );
    match lookup(ctx, &url, location) {
        Ok(report) => ctx.sink.emit_line(&report),
        Err(err) => gateway::report_failure(ctx, &err, &url, NOT_FOUND),
    }
    Ok(())
}

fn lookup(ctx: &ServiceContext, url: &str, location: &str) -> Result<String, TrackerError> {
    let request = HttpRequest::get(url);
    let response = ctx
        .http
        .execute(&request)
        .map_err(|e| TrackerError::Transport(format!("request to {url} failed: {e}")))?;
    if !response.is_success() {
        return Err(TrackerError::Transport(format!("HTTP {}", response.status)));
    }

    let report = decode_report(&response.body);
    format_conditions(&report).ok_or_else(|| {
        error!(location, "no weather data in response");
        TrackerError::NotFound(NOT_FOUND.into())
    })
}

/// Extracts the report fields from the XML body.
///
/// The handful of interesting values all live in `data="..."` attributes;
/// the first occurrence of each element is the current-conditions one
/// (forecast blocks repeat some of them further down).
#[must_use]
pub fn decode_report(body: &str) -> WeatherReport {
    WeatherReport {
        condition: element_data(body, "condition"),
        temperature: element_data(body, "temp_f").map(|t| format!("{t} F")),
        wind: element_data(body, "wind_condition").map(|w| w.replace("Wind:", "wind")),
        humidity: element_data(body, "humidity").map(|h| {
            h.replace("Humidity:", "humidity")
                .split_whitespace()
                .rev()
                .collect::<Vec<_>>()
                .join(" ")
        }),
        place: element_data(body, "city"),
    }
}

/// Joins the present groups into the display line, or `None` when there
/// is nothing to say.
#[must_use]
pub fn format_conditions(report: &WeatherReport) -> Option<String> {
    let sky = join_present(&[&report.condition, &report.temperature]);
    let air = join_present(&[&report.wind, &report.humidity]);
    let mut message = match (sky.is_empty(), air.is_empty()) {
        (false, false) => format!("{sky} with {air}"),
        (false, true) => sky,
        (true, false) => air,
        (true, true) => String::new(),
    };
    if let Some(place) = report.place.as_deref().filter(|p| !p.is_empty()) {
        message = if message.is_empty() {
            place.to_string()
        } else {
            format!("{message} in {place}")
        };
    }
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

fn join_present(parts: &[&Option<String>]) -> String {
    parts
        .iter()
        .filter_map(|p| p.as_deref())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" and ")
}

/// The legacy endpoint accepted word characters, spaces, and `',.-`.
fn valid_location(location: &str) -> bool {
    !location.is_empty()
        && location
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | ' ' | '\'' | ',' | '.' | '-'))
}

/// Query-string encoding: spaces become `+`, everything outside the
/// unreserved set is percent-encoded.
fn encode_location(location: &str) -> String {
    let mut out = String::new();
    for c in location.chars() {
        if c == ' ' {
            out.push('+');
        } else if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '~') {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    out
}

/// Value of the first `<element ... data="...">` attribute in the body.
fn element_data(body: &str, element: &str) -> Option<String> {
    let tag = format!("<{element}");
    let mut search_from = 0;
    while let Some(offset) = body[search_from..].find(&tag) {
        let start = search_from + offset + tag.len();
        let rest = &body[start..];
        // Reject prefix matches such as `<temp_f` against `<temp_flag`.
        if rest.chars().next().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            search_from = start;
            continue;
        }
        let tag_end = rest.find('>')?;
        let attrs = &rest[..tag_end];
        let value = attrs.find("data=\"").map(|pos| {
            let after = &attrs[pos + 6..];
            after.find('"').map_or(after, |end| &after[..end])
        });
        return value.map(str::to_string).filter(|v| !v.is_empty());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::Arc;

    use crate::cassette::format::{Cassette, Interaction};
    use crate::ports::sink::MemorySink;

    const SAMPLE: &str = concat!(
        "<xml_api_reply version=\"1\"><weather><forecast_information>",
        "<city data=\"Goleta, CA\"/><postal_code data=\"93117\"/>",
        "</forecast_information><current_conditions>",
        "<condition data=\"Clear\"/><temp_f data=\"68\"/><temp_c data=\"20\"/>",
        "<humidity data=\"Humidity: 55%\"/>",
        "<wind_condition data=\"Wind: NW at 10 mph\"/>",
        "</current_conditions></weather></xml_api_reply>",
    );

    #[test]
    fn decodes_and_transforms_every_field() {
        let report = decode_report(SAMPLE);
        assert_eq!(report.condition.as_deref(), Some("Clear"));
        assert_eq!(report.temperature.as_deref(), Some("68 F"));
        assert_eq!(report.wind.as_deref(), Some("wind NW at 10 mph"));
        assert_eq!(report.humidity.as_deref(), Some("55% humidity"));
        assert_eq!(report.place.as_deref(), Some("Goleta, CA"));
    }

    #[test]
    fn full_report_joins_with_and_with_in() {
        let report = decode_report(SAMPLE);
        assert_eq!(
            format_conditions(&report).as_deref(),
            Some("Clear and 68 F with wind NW at 10 mph and 55% humidity in Goleta, CA")
        );
    }

    #[test]
    fn partial_groups_render_alone() {
        let report = WeatherReport {
            condition: Some("Clear".into()),
            place: Some("Goleta, CA".into()),
            ..WeatherReport::default()
        };
        assert_eq!(format_conditions(&report).as_deref(), Some("Clear in Goleta, CA"));

        let report = WeatherReport {
            wind: Some("wind NW at 10 mph".into()),
            ..WeatherReport::default()
        };
        assert_eq!(format_conditions(&report).as_deref(), Some("wind NW at 10 mph"));
    }

    #[test]
    fn empty_report_formats_to_none() {
        assert_eq!(format_conditions(&WeatherReport::default()), None);
    }

    #[test]
    fn location_charset_is_enforced() {
        assert!(valid_location("Goleta, CA"));
        assert!(valid_location("St. John's"));
        assert!(!valid_location(""));
        assert!(!valid_location("Goleta; DROP TABLE"));
        assert!(!valid_location("a/b"));
    }

    #[test]
    fn locations_encode_for_the_query_string() {
        assert_eq!(encode_location("Goleta, CA"), "Goleta%2C+CA");
        assert_eq!(encode_location("St. John's"), "St.+John%27s");
    }

    #[test]
    fn element_data_skips_prefix_matches() {
        let body = "<temp_flag data=\"x\"/><temp_f data=\"68\"/>";
        assert_eq!(element_data(body, "temp_f").as_deref(), Some("68"));
    }

    fn ctx_replaying(status: u16, body: &str) -> (ServiceContext, Arc<MemorySink>) {
        let cassette = Cassette {
            name: "weather-test".into(),
            recorded_at: Utc::now(),
            interactions: vec![Interaction {
                seq: 0,
                port: "http".into(),
                method: "execute".into(),
                input: json!({}),
                output: json!({"Ok": {"status": status, "body": body}}),
            }],
        };
        let sink = Arc::new(MemorySink::new());
        let ctx = ServiceContext::replay_cassette(&cassette, Box::new(Arc::clone(&sink)));
        (ctx, sink)
    }

    fn config() -> WeatherConfig {
        WeatherConfig {
            base_uri: "http://weather.example/api".into(),
            default_location: "Goleta, CA".into(),
            enabled: true,
        }
    }

    #[test]
    fn end_to_end_emits_the_joined_report() {
        let (ctx, sink) = ctx_replaying(200, SAMPLE);
        current_conditions(&ctx, &config(), Some("Goleta, CA")).unwrap();
        assert_eq!(
            sink.lines(),
            vec!["Clear and 68 F with wind NW at 10 mph and 55% humidity in Goleta, CA"]
        );
    }

    #[test]
    fn unrecognized_location_reports_not_found() {
        let (ctx, sink) = ctx_replaying(200, "<xml_api_reply><weather/></xml_api_reply>");
        current_conditions(&ctx, &config(), Some("Nowhereville")).unwrap();
        assert_eq!(sink.errors(), vec!["I can't seem to find that location."]);
    }

    #[test]
    fn invalid_location_never_reaches_the_transport() {
        let cassette =
            Cassette { name: "empty".into(), recorded_at: Utc::now(), interactions: vec![] };
        let sink = Arc::new(MemorySink::new());
        let ctx = ServiceContext::replay_cassette(&cassette, Box::new(Arc::clone(&sink)));
        current_conditions(&ctx, &config(), Some("a/b")).unwrap();
        assert_eq!(sink.errors(), vec!["I can't seem to find that location."]);
    }
}
