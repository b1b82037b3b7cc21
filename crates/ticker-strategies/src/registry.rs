//! Policy registry for selecting a signal policy by name.

use crate::{BandTrendConfig, BandTrendPolicy, StochCrossConfig, StochCrossPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ticker_core::{error::PolicyError, traits::PolicyConfig, traits::SignalPolicy};
use tracing::debug;

/// Name of the policy used when none is configured.
pub const DEFAULT_POLICY: &str = "band_trend";

/// Information about a registered policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyInfo {
    /// Registry key
    pub key: String,
    /// Display name
    pub name: String,
    /// Policy description
    pub description: String,
    /// Default configuration as JSON
    pub default_config: serde_json::Value,
}

/// Registry for available signal policies.
pub struct PolicyRegistry {
    policies: BTreeMap<String, PolicyInfo>,
}

impl PolicyRegistry {
    /// Create a new registry with all built-in policies.
    pub fn new() -> Self {
        let mut policies = BTreeMap::new();

        let band_trend = BandTrendPolicy::default();
        policies.insert(
            DEFAULT_POLICY.to_string(),
            PolicyInfo {
                key: DEFAULT_POLICY.to_string(),
                name: band_trend.name().to_string(),
                description: band_trend.description().to_string(),
                default_config: serde_json::to_value(band_trend.config()).unwrap_or_default(),
            },
        );

        let stoch_cross = StochCrossPolicy::default();
        policies.insert(
            "stoch_cross".to_string(),
            PolicyInfo {
                key: "stoch_cross".to_string(),
                name: stoch_cross.name().to_string(),
                description: stoch_cross.description().to_string(),
                default_config: serde_json::to_value(stoch_cross.config()).unwrap_or_default(),
            },
        );

        Self { policies }
    }

    /// List all available policies, ordered by key.
    pub fn list(&self) -> Vec<&PolicyInfo> {
        self.policies.values().collect()
    }

    /// Get policy info by key.
    pub fn get(&self, key: &str) -> Option<&PolicyInfo> {
        self.policies.get(key)
    }

    /// Create a policy instance from configuration.
    ///
    /// A `null` config selects the policy's defaults; missing fields in an
    /// object fall back to their defaults.
    pub fn create(
        &self,
        key: &str,
        config: serde_json::Value,
    ) -> Result<Box<dyn SignalPolicy>, PolicyError> {
        let config = if config.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            config
        };
        debug!(policy = key, %config, "creating signal policy");

        match key {
            "band_trend" => {
                let config: BandTrendConfig = serde_json::from_value(config)
                    .map_err(|e| PolicyError::InvalidConfig(e.to_string()))?;
                config.validate()?;
                Ok(Box::new(BandTrendPolicy::new(config)))
            }
            "stoch_cross" => {
                let config: StochCrossConfig = serde_json::from_value(config)
                    .map_err(|e| PolicyError::InvalidConfig(e.to_string()))?;
                config.validate()?;
                Ok(Box::new(StochCrossPolicy::new(config)))
            }
            _ => Err(PolicyError::NotFound(key.to_string())),
        }
    }

    /// Create a policy with default configuration.
    pub fn create_default(&self, key: &str) -> Result<Box<dyn SignalPolicy>, PolicyError> {
        let info = self
            .get(key)
            .ok_or_else(|| PolicyError::NotFound(key.to_string()))?;
        self.create(key, info.default_config.clone())
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_list() {
        let registry = PolicyRegistry::new();
        let keys: Vec<_> = registry.list().iter().map(|p| p.key.as_str()).collect();

        assert_eq!(keys, vec!["band_trend", "stoch_cross"]);
    }

    #[test]
    fn test_create_default() {
        let registry = PolicyRegistry::new();

        let policy = registry.create_default(DEFAULT_POLICY).unwrap();
        assert_eq!(policy.name(), "Band Trend");
    }

    #[test]
    fn test_create_with_partial_config() {
        let registry = PolicyRegistry::new();

        let config = serde_json::json!({ "adx_threshold": 25.0 });
        assert!(registry.create("band_trend", config).is_ok());
        assert!(registry.create("stoch_cross", serde_json::Value::Null).is_ok());
    }

    #[test]
    fn test_create_invalid_config() {
        let registry = PolicyRegistry::new();

        let config = serde_json::json!({ "mfi_oversold": 90.0, "mfi_overbought": 80.0 });
        assert!(matches!(
            registry.create("band_trend", config),
            Err(PolicyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_create_unknown_policy() {
        let registry = PolicyRegistry::new();

        assert!(matches!(
            registry.create_default("unknown"),
            Err(PolicyError::NotFound(_))
        ));
    }
}
