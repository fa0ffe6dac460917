//! Engine configuration.
//!
//! All tunables come from environment variables with sensible defaults,
//! so an embedding application can run the engine without any setup.
//!
//! - `CLASSTIME_FIRST_HOUR`: first visible hour row (default: 6)
//! - `CLASSTIME_LAST_HOUR`: last visible hour row, inclusive (default: 22)
//! - `CLASSTIME_CONTAINER_TOLERANCE_MIN`: near-match tolerance in minutes
//!   for container resolution (default: 30)
//! - `CLASSTIME_FETCH_CONCURRENCY`: bound on concurrent per-event session
//!   fetches (default: 4)
//! - `CLASSTIME_WEEK_START`: `sunday` or `monday` (default: sunday)

use chrono::Weekday;
use eyre::{eyre, Result, WrapErr};
use std::env;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// First hour row shown on the week/day grid.
    pub first_hour: u32,

    /// Last hour row shown on the week/day grid (inclusive).
    pub last_hour: u32,

    /// How far an event's start may drift from a requested session start
    /// and still count as a near-miss host match. A tunable, not a
    /// guarantee.
    pub container_tolerance_min: i64,

    /// Maximum concurrent per-event session fetches during a store load.
    pub fetch_concurrency: usize,

    /// First day of the week for week and month grids.
    pub week_start: Weekday,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            first_hour: 6,
            last_hour: 22,
            container_tolerance_min: 30,
            fetch_concurrency: 4,
            week_start: Weekday::Sun,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Fails if a set variable cannot be parsed, or if the visible hour
    /// range is inverted or out of bounds.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let first_hour = match env::var("CLASSTIME_FIRST_HOUR") {
            Ok(v) => v.parse().wrap_err("Invalid CLASSTIME_FIRST_HOUR value")?,
            Err(_) => defaults.first_hour,
        };
        let last_hour = match env::var("CLASSTIME_LAST_HOUR") {
            Ok(v) => v.parse().wrap_err("Invalid CLASSTIME_LAST_HOUR value")?,
            Err(_) => defaults.last_hour,
        };
        let container_tolerance_min = match env::var("CLASSTIME_CONTAINER_TOLERANCE_MIN") {
            Ok(v) => v
                .parse()
                .wrap_err("Invalid CLASSTIME_CONTAINER_TOLERANCE_MIN value")?,
            Err(_) => defaults.container_tolerance_min,
        };
        let fetch_concurrency = match env::var("CLASSTIME_FETCH_CONCURRENCY") {
            Ok(v) => v
                .parse()
                .wrap_err("Invalid CLASSTIME_FETCH_CONCURRENCY value")?,
            Err(_) => defaults.fetch_concurrency,
        };
        let week_start = match env::var("CLASSTIME_WEEK_START") {
            Ok(v) => match v.to_lowercase().as_str() {
                "sunday" | "sun" => Weekday::Sun,
                "monday" | "mon" => Weekday::Mon,
                other => return Err(eyre!("Invalid CLASSTIME_WEEK_START value: {other}")),
            },
            Err(_) => defaults.week_start,
        };

        let config = Self {
            first_hour,
            last_hour,
            container_tolerance_min,
            fetch_concurrency,
            week_start,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.last_hour > 23 {
            return Err(eyre!("last visible hour must be at most 23"));
        }
        if self.first_hour >= self.last_hour {
            return Err(eyre!("first visible hour must precede the last"));
        }
        if self.container_tolerance_min < 0 {
            return Err(eyre!("container tolerance cannot be negative"));
        }
        Ok(())
    }
}
