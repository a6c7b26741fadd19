//! Configuration management for the park service.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::ATTRACTION_ID_BASE;
use serde::{Deserialize, Serialize};
use std::env;

/// Default tracing filter when neither `RUST_LOG` nor `PARK_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "park=info,park_runtime=info";

/// Park configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkConfig {
    /// Attraction ids start right above this value (default: 100)
    pub attraction_id_base: u32,
    /// Create the default demo attractions at startup (default: true)
    pub seed_defaults: bool,
    /// Tracing filter directives (default: `park=info,park_runtime=info`)
    pub log_filter: String,
}

impl ParkConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PARK_ATTRACTION_ID_BASE`
    /// - `PARK_SEED_DEFAULTS` (`true`/`false`/`1`/`0`/`yes`/`no`)
    /// - `PARK_LOG`
    ///
    /// Unset or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, with the same fallbacks as
    /// [`from_env`](Self::from_env).
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            attraction_id_base: lookup("PARK_ATTRACTION_ID_BASE")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(ATTRACTION_ID_BASE),
            seed_defaults: lookup("PARK_SEED_DEFAULTS")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(true),
            log_filter: lookup("PARK_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

impl Default for ParkConfig {
    fn default() -> Self {
        Self {
            attraction_id_base: ATTRACTION_ID_BASE,
            seed_defaults: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
