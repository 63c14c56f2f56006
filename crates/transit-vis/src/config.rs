//! Session configuration.

use std::str::FromStr;
use std::time::Duration;

use transit_graph::{Color, DEFAULT_NODE_RADIUS};
use transit_motion::MotionConfig;

use crate::error::{Error, Result};

/// Configuration for a sandbox session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Hit-test radius for stations
    pub node_radius: f32,
    /// Leg duration and junction seed
    pub motion: MotionConfig,
    /// Tokens spawned when the first edge of the session is created
    pub bootstrap_tokens: usize,
    /// Interval between server-driven ticks
    pub frame_interval: Duration,
    /// Logical canvas size; clients scale pointer input to this
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub station_color: Color,
    pub edge_color: Color,
    pub token_color: Color,
    pub preview_color: Color,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            node_radius: DEFAULT_NODE_RADIUS,
            motion: MotionConfig::default(),
            bootstrap_tokens: 3,
            frame_interval: Duration::from_millis(16),
            canvas_width: 800.0,
            canvas_height: 800.0,
            station_color: Color::WHITE,
            edge_color: Color::BLUE,
            token_color: Color::RED,
            preview_color: Color::GREEN,
        }
    }
}

impl SessionConfig {
    /// Defaults overridden by `TRANSIT_*` environment variables.
    ///
    /// - `TRANSIT_NODE_RADIUS`
    /// - `TRANSIT_TRAVERSAL_SECS`
    /// - `TRANSIT_BOOTSTRAP_TOKENS`
    /// - `TRANSIT_SEED`
    /// - `TRANSIT_FRAME_MS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(radius) = parse(&lookup, "TRANSIT_NODE_RADIUS")? {
            config.node_radius = radius;
        }
        if let Some(secs) = parse::<f32, _>(&lookup, "TRANSIT_TRAVERSAL_SECS")? {
            if !(secs.is_finite() && secs > 0.0) {
                return Err(Error::Config {
                    var: "TRANSIT_TRAVERSAL_SECS",
                    value: secs.to_string(),
                });
            }
            config.motion.traversal_duration = secs;
        }
        if let Some(count) = parse(&lookup, "TRANSIT_BOOTSTRAP_TOKENS")? {
            config.bootstrap_tokens = count;
        }
        if let Some(seed) = parse(&lookup, "TRANSIT_SEED")? {
            config.motion.seed = seed;
        }
        if let Some(ms) = parse::<u64, _>(&lookup, "TRANSIT_FRAME_MS")? {
            if ms == 0 {
                return Err(Error::Config {
                    var: "TRANSIT_FRAME_MS",
                    value: ms.to_string(),
                });
            }
            config.frame_interval = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

fn parse<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = SessionConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.bootstrap_tokens, 3);
        assert_eq!(config.node_radius, 5.0);
    }

    #[test]
    fn overrides_apply() {
        let config = SessionConfig::from_lookup(lookup(&[
            ("TRANSIT_NODE_RADIUS", "8.5"),
            ("TRANSIT_TRAVERSAL_SECS", "2"),
            ("TRANSIT_BOOTSTRAP_TOKENS", "5"),
            ("TRANSIT_SEED", "1234"),
            ("TRANSIT_FRAME_MS", " 33 "),
        ]))
        .unwrap();

        assert_eq!(config.node_radius, 8.5);
        assert_eq!(config.motion.traversal_duration, 2.0);
        assert_eq!(config.bootstrap_tokens, 5);
        assert_eq!(config.motion.seed, 1234);
        assert_eq!(config.frame_interval, Duration::from_millis(33));
    }

    #[test]
    fn malformed_value_is_reported() {
        let err = SessionConfig::from_lookup(lookup(&[("TRANSIT_SEED", "abc")])).unwrap_err();
        assert!(matches!(err, Error::Config { var: "TRANSIT_SEED", .. }));
    }

    #[test]
    fn non_positive_traversal_is_rejected() {
        let err =
            SessionConfig::from_lookup(lookup(&[("TRANSIT_TRAVERSAL_SECS", "0")])).unwrap_err();
        assert!(matches!(err, Error::Config { var: "TRANSIT_TRAVERSAL_SECS", .. }));

        let err = SessionConfig::from_lookup(lookup(&[("TRANSIT_FRAME_MS", "0")])).unwrap_err();
        assert!(matches!(err, Error::Config { var: "TRANSIT_FRAME_MS", .. }));
    }
}
