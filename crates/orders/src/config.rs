//! Queue configuration.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Env var: only orders handed out by `next()` may be processed/fulfilled.
pub const ENV_REQUIRE_DEQUEUED: &str = "POSQ_REQUIRE_DEQUEUED";
/// Env var: reject submissions containing a zero-quantity purchase.
pub const ENV_REJECT_ZERO_QUANTITY: &str = "POSQ_REJECT_ZERO_QUANTITY";
/// Env var: maximum pending orders (`0` means unbounded).
pub const ENV_MAX_PENDING: &str = "POSQ_MAX_PENDING";

/// Order queue configuration.
///
/// Every strictness knob defaults to off, so a default queue accepts any order
/// with a customer and at least one purchase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Reject `process`/`fulfill` for orders this queue never dequeued.
    pub require_dequeued: bool,
    /// Reject `add` when any purchase has quantity zero.
    pub reject_zero_quantity: bool,
    /// Upper bound on orders waiting for `next()`. `None` (or `0`) is unbounded.
    #[serde(deserialize_with = "deserialize_limit")]
    pub max_pending: Option<usize>,
}

impl QueueConfig {
    pub fn with_require_dequeued(mut self, enabled: bool) -> Self {
        self.require_dequeued = enabled;
        self
    }

    pub fn with_reject_zero_quantity(mut self, enabled: bool) -> Self {
        self.reject_zero_quantity = enabled;
        self
    }

    /// Cap pending orders at `max`; `0` removes the cap.
    pub fn with_max_pending(mut self, max: usize) -> Self {
        self.max_pending = normalize_limit(max);
        self
    }

    /// Effective pending limit, treating `Some(0)` as unbounded.
    pub fn pending_limit(&self) -> Option<usize> {
        self.max_pending.filter(|&max| max > 0)
    }

    /// Read overrides from the process environment.
    ///
    /// Unset variables keep the default; unparsable ones are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(enabled) = lookup_flag(&lookup, ENV_REQUIRE_DEQUEUED) {
            config.require_dequeued = enabled;
        }

        if let Some(enabled) = lookup_flag(&lookup, ENV_REJECT_ZERO_QUANTITY) {
            config.reject_zero_quantity = enabled;
        }

        if let Some(raw) = lookup(ENV_MAX_PENDING) {
            match raw.trim().parse::<usize>() {
                Ok(max) => config.max_pending = normalize_limit(max),
                Err(err) => {
                    warn!(var = ENV_MAX_PENDING, value = %raw, error = %err, "ignoring invalid limit")
                }
            }
        }

        config
    }
}

fn normalize_limit(max: usize) -> Option<usize> {
    (max > 0).then_some(max)
}

fn deserialize_limit<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<usize>::deserialize(deserializer)?;
    Ok(raw.and_then(normalize_limit))
}

fn lookup_flag<F>(lookup: &F, var: &'static str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(var)?;
    let parsed = parse_flag(&raw);
    if parsed.is_none() {
        warn!(var, value = %raw, "ignoring invalid boolean");
    }
    parsed
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_is_permissive_and_unbounded() {
        let config = QueueConfig::default();
        assert!(!config.require_dequeued);
        assert!(!config.reject_zero_quantity);
        assert_eq!(config.max_pending, None);
    }

    #[test]
    fn builders_set_fields() {
        let config = QueueConfig::default()
            .with_require_dequeued(true)
            .with_reject_zero_quantity(true)
            .with_max_pending(3);
        assert!(config.require_dequeued);
        assert!(config.reject_zero_quantity);
        assert_eq!(config.max_pending, Some(3));
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = QueueConfig::from_lookup(lookup_from(&[
            (ENV_REQUIRE_DEQUEUED, "Yes"),
            (ENV_REJECT_ZERO_QUANTITY, "on"),
            (ENV_MAX_PENDING, " 25 "),
        ]));
        assert!(config.require_dequeued);
        assert!(config.reject_zero_quantity);
        assert_eq!(config.max_pending, Some(25));
    }

    #[test]
    fn zero_limit_means_unbounded_from_every_source() {
        let from_env = QueueConfig::from_lookup(lookup_from(&[(ENV_MAX_PENDING, "0")]));
        assert_eq!(from_env.max_pending, None);

        let from_builder = QueueConfig::default().with_max_pending(5).with_max_pending(0);
        assert_eq!(from_builder.max_pending, None);

        let from_json: QueueConfig = serde_json::from_str(r#"{"max_pending": 0}"#).unwrap();
        assert_eq!(from_json.max_pending, None);

        let literal = QueueConfig {
            max_pending: Some(0),
            ..QueueConfig::default()
        };
        assert_eq!(literal.pending_limit(), None);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = QueueConfig::from_lookup(lookup_from(&[
            (ENV_REQUIRE_DEQUEUED, "maybe"),
            (ENV_REJECT_ZERO_QUANTITY, "2"),
            (ENV_MAX_PENDING, "-4"),
        ]));
        assert_eq!(config, QueueConfig::default());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: QueueConfig = serde_json::from_str(r#"{"max_pending": 10}"#).unwrap();
        assert!(!config.require_dequeued);
        assert!(!config.reject_zero_quantity);
        assert_eq!(config.max_pending, Some(10));

        let config: QueueConfig = serde_json::from_str(r#"{"max_pending": null}"#).unwrap();
        assert_eq!(config.max_pending, None);
    }
}
