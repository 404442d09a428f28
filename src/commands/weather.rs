//! `tix weather` command.

use crate::config::WeatherConfig;
use crate::context::ServiceContext;
use crate::weather;

/// Execute the `weather` command for the given location (or the
/// configured default).
///
/// # Errors
///
/// Returns an error string if the handler fails at the host level;
/// lookup failures are reported through the sink instead.
pub fn run(ctx: &ServiceContext, location: Option<&str>) -> Result<(), String> {
    let config = WeatherConfig::from_env();
    weather::current_conditions(ctx, &config, location)
}
