//! Runtime configuration: defaults, overridable from the environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const SCAN_LATENCY_ENV: &str = "PANTRY_SCAN_LATENCY_MS";
pub const SEED_DEMO_ENV: &str = "PANTRY_SEED_DEMO";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    /// Artificial delay of the demo barcode catalog, in milliseconds.
    pub scan_latency_ms: u64,
    /// Start with the demo pantry contents.
    pub seed_demo_data: bool,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            scan_latency_ms: 1000,
            seed_demo_data: true,
        }
    }
}

impl KitchenConfig {
    /// Defaults with `PANTRY_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    pub fn apply_env_overrides(&mut self) {
        override_u64(&mut self.scan_latency_ms, SCAN_LATENCY_ENV);
        override_bool(&mut self.seed_demo_data, SEED_DEMO_ENV);
    }

    pub fn scan_latency(&self) -> Duration {
        Duration::from_millis(self.scan_latency_ms)
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => *target = true,
            "0" | "false" | "no" | "off" => *target = false,
            _ => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.trim().parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_behaviour() {
        let config = KitchenConfig::default();
        assert_eq!(config.scan_latency(), Duration::from_secs(1));
        assert!(config.seed_demo_data);
    }

    #[test]
    fn override_u64_parses_and_ignores_garbage() {
        let mut value = 5;
        // SAFETY: keys are unique to this test.
        unsafe { std::env::set_var("PANTRY_TEST_U64_OK", " 250 ") };
        override_u64(&mut value, "PANTRY_TEST_U64_OK");
        assert_eq!(value, 250);

        unsafe { std::env::set_var("PANTRY_TEST_U64_BAD", "soon") };
        override_u64(&mut value, "PANTRY_TEST_U64_BAD");
        assert_eq!(value, 250);

        override_u64(&mut value, "PANTRY_TEST_U64_UNSET");
        assert_eq!(value, 250);
    }

    #[test]
    fn override_bool_accepts_common_spellings() {
        let mut value = true;
        // SAFETY: keys are unique to this test.
        unsafe { std::env::set_var("PANTRY_TEST_BOOL_OFF", "off") };
        override_bool(&mut value, "PANTRY_TEST_BOOL_OFF");
        assert!(!value);

        unsafe { std::env::set_var("PANTRY_TEST_BOOL_BAD", "maybe") };
        override_bool(&mut value, "PANTRY_TEST_BOOL_BAD");
        assert!(!value);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: KitchenConfig = serde_json::from_str(r#"{"scan_latency_ms": 10}"#).unwrap();
        assert_eq!(config.scan_latency_ms, 10);
        assert!(config.seed_demo_data);
    }
}
