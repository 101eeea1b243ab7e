//! Server configuration from environment variables.

use std::time::Duration;

/// Longest accepted idle TTL (one year).
const MAX_TTL_HOURS: u64 = 24 * 365;
/// Longest accepted sweep interval (one day).
const MAX_CLEANUP_MINUTES: u64 = 24 * 60;

/// Runtime settings for the web binary. Every field has a default.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Events not touched for this long are dropped from memory.
    pub event_ttl: Duration,
    /// How often the idle-event sweep runs.
    pub cleanup_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            event_ttl: Duration::from_secs(12 * 3600),
            cleanup_interval: Duration::from_secs(30 * 60),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `EVENT_TTL_HOURS` and `CLEANUP_INTERVAL_MINUTES`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing or unparseable values keep their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = parse_or("PORT", &lookup, defaults.port);
        let ttl_hours = parse_or("EVENT_TTL_HOURS", &lookup, defaults.event_ttl.as_secs() / 3600);
        let cleanup_minutes = parse_or(
            "CLEANUP_INTERVAL_MINUTES",
            &lookup,
            defaults.cleanup_interval.as_secs() / 60,
        );
        let ttl_hours = clamp_or_warn("EVENT_TTL_HOURS", ttl_hours, MAX_TTL_HOURS);
        let cleanup_minutes = clamp_or_warn("CLEANUP_INTERVAL_MINUTES", cleanup_minutes, MAX_CLEANUP_MINUTES);
        Self {
            host,
            port,
            event_ttl: Duration::from_secs(ttl_hours.saturating_mul(3600)),
            cleanup_interval: Duration::from_secs(cleanup_minutes.saturating_mul(60)),
        }
    }
}

/// Keep `value` within `1..=max`. Zero would sweep every event (or spin the sweep loop).
fn clamp_or_warn(key: &str, value: u64, max: u64) -> u64 {
    let clamped = value.clamp(1, max);
    if clamped != value {
        log::warn!("{}={} is out of range, using {}", key, value, clamped);
    }
    clamped
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}
