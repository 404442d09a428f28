//! Read-only configuration snapshots, one per backend.
//!
//! Configuration comes from the environment (a `.env` file is honored at
//! startup). Each command invocation takes one immutable snapshot; the
//! core never mutates it. All keys live under the `TIX_` prefix:
//!
//! ```text
//! TIX_RT_URI        TIX_JIRA_URI                  TIX_REDMINE_URI
//! TIX_RT_AUTHTYPE   TIX_JIRA_USERNAME             TIX_REDMINE_ENABLED
//! TIX_RT_USERNAME   TIX_JIRA_PASSWORD
//! TIX_RT_PASSWORD   TIX_JIRA_SECURITY_FIELD_ID    TIX_WEATHER_URI
//! TIX_RT_REALM      TIX_JIRA_PRIORITY             TIX_WEATHER_LOCATION
//! TIX_RT_ENABLED    TIX_JIRA_ENABLED              TIX_WEATHER_ENABLED
//! ```

use std::env;

/// RT configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtConfig {
    /// Base URI of the RT instance.
    pub base_uri: String,
    /// Auth mode string: `none`, `basic`, `digest`, or `builtin`.
    pub auth_type: String,
    /// Account name for authenticated modes.
    pub username: String,
    /// Account password for authenticated modes.
    pub password: String,
    /// Basic-auth realm; must match the server's challenge.
    pub realm: String,
    /// Whether the backend is enabled at all.
    pub enabled: bool,
}

impl RtConfig {
    /// Loads the snapshot from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error string when `TIX_RT_URI` is not set.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(&env_lookup)
    }

    /// Loads the snapshot through an arbitrary lookup, for tests.
    ///
    /// # Errors
    ///
    /// Returns an error string when the base URI is missing.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, String> {
        Ok(Self {
            base_uri: require(lookup, "TIX_RT_URI")?,
            auth_type: lookup("TIX_RT_AUTHTYPE").unwrap_or_default(),
            username: lookup("TIX_RT_USERNAME").unwrap_or_default(),
            password: lookup("TIX_RT_PASSWORD").unwrap_or_default(),
            realm: lookup("TIX_RT_REALM").unwrap_or_default(),
            enabled: flag(lookup("TIX_RT_ENABLED")),
        })
    }
}

/// JIRA configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraConfig {
    /// Base URI of the JIRA instance.
    pub base_uri: String,
    /// Account name; credentials are attached only when both the name
    /// and password are set.
    pub username: String,
    /// Account password.
    pub password: String,
    /// Numeric id of the boolean security custom field; ids ≤ 0 disable
    /// the security flag entirely.
    pub security_field_id: i64,
    /// Priority name that earns its own flag in summaries.
    pub high_priority: String,
    /// Whether the backend is enabled at all.
    pub enabled: bool,
}

impl JiraConfig {
    /// Loads the snapshot from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error string when `TIX_JIRA_URI` is not set or the
    /// security field id is not an integer.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(&env_lookup)
    }

    /// Loads the snapshot through an arbitrary lookup, for tests.
    ///
    /// # Errors
    ///
    /// Returns an error string when the base URI is missing or the
    /// security field id is not an integer.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, String> {
        let security_field_id = match lookup("TIX_JIRA_SECURITY_FIELD_ID") {
            None => 0,
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| format!("TIX_JIRA_SECURITY_FIELD_ID must be an integer, got '{raw}'"))?,
        };
        Ok(Self {
            base_uri: require(lookup, "TIX_JIRA_URI")?,
            username: lookup("TIX_JIRA_USERNAME").unwrap_or_default(),
            password: lookup("TIX_JIRA_PASSWORD").unwrap_or_default(),
            security_field_id,
            high_priority: lookup("TIX_JIRA_PRIORITY").unwrap_or_else(|| "Blocker".into()),
            enabled: flag(lookup("TIX_JIRA_ENABLED")),
        })
    }
}

/// Redmine configuration snapshot. The lookup endpoint is anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedmineConfig {
    /// Base URI of the Redmine instance.
    pub base_uri: String,
    /// Whether the backend is enabled at all.
    pub enabled: bool,
}

impl RedmineConfig {
    /// Loads the snapshot from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error string when `TIX_REDMINE_URI` is not set.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(&env_lookup)
    }

    /// Loads the snapshot through an arbitrary lookup, for tests.
    ///
    /// # Errors
    ///
    /// Returns an error string when the base URI is missing.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, String> {
        Ok(Self {
            base_uri: require(lookup, "TIX_REDMINE_URI")?,
            enabled: flag(lookup("TIX_REDMINE_ENABLED")),
        })
    }
}

/// Legacy weather endpoint default.
const DEFAULT_WEATHER_URI: &str = "http://www.google.com/ig/api";
/// Default lookup location when the caller names none.
const DEFAULT_WEATHER_LOCATION: &str = "Goleta, CA";

/// Weather configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    /// Query endpoint; the location rides in the `weather` query
    /// parameter.
    pub base_uri: String,
    /// Location used when the caller gives none.
    pub default_location: String,
    /// Whether the backend is enabled at all.
    pub enabled: bool,
}

impl WeatherConfig {
    /// Loads the snapshot from the process environment; every key has a
    /// default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    /// Loads the snapshot through an arbitrary lookup, for tests.
    #[must_use]
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        Self {
            base_uri: lookup("TIX_WEATHER_URI").unwrap_or_else(|| DEFAULT_WEATHER_URI.into()),
            default_location: lookup("TIX_WEATHER_LOCATION")
                .unwrap_or_else(|| DEFAULT_WEATHER_LOCATION.into()),
            enabled: flag(lookup("TIX_WEATHER_ENABLED")),
        }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn require(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<String, String> {
    lookup(key).ok_or_else(|| format!("{key} environment variable not set"))
}

/// Enabled unless explicitly turned off.
fn flag(value: Option<String>) -> bool {
    match value {
        None => true,
        Some(raw) => !matches!(raw.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no" | "off"),
    }
}
