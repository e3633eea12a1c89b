//! Planner configuration.
//!
//! Selects the partitioning strategy and the boundary convention. Loaded
//! from a JSON file or built in code:
//!
//! ```
//! use u_stage::config::PlannerConfig;
//! use u_stage::models::BoundaryPolicy;
//! use u_stage::partitioning::Strategy;
//!
//! let config = PlannerConfig::default()
//!     .with_strategy(Strategy::LinearScan)
//!     .with_boundary(BoundaryPolicy::Exclusive);
//! assert_eq!(config.strategy, Strategy::LinearScan);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{BoundaryPolicy, Event, Partition};
use crate::partitioning::Strategy;

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid configuration document.
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// How events are partitioned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Partitioning strategy.
    pub strategy: Strategy,
    /// Whether a shared boundary instant conflicts.
    pub boundary: BoundaryPolicy,
}

impl PlannerConfig {
    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the boundary convention.
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Partitions `events` with the configured strategy.
///
/// Sorts a copy of the input; the caller's slice is left untouched.
pub fn plan(events: &[Event], config: &PlannerConfig) -> Partition {
    let span = tracing::debug_span!(
        "plan",
        strategy = %config.strategy,
        boundary = %config.boundary,
        events = events.len()
    );
    let _guard = span.enter();

    config.strategy.partitioner(config.boundary).partition(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.strategy, Strategy::Heap);
        assert_eq!(config.boundary, BoundaryPolicy::Inclusive);
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: PlannerConfig = serde_json::from_str(r#"{"boundary":"exclusive"}"#).unwrap();
        assert_eq!(config.strategy, Strategy::Heap);
        assert_eq!(config.boundary, BoundaryPolicy::Exclusive);

        let config: PlannerConfig = serde_json::from_str(r#"{"strategy":"linear-scan"}"#).unwrap();
        assert_eq!(config.strategy, Strategy::LinearScan);
    }

    #[test]
    fn test_config_from_file() {
        let path = std::env::temp_dir().join(format!("u-stage-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"strategy":"linear-scan","boundary":"exclusive"}"#).unwrap();
        let config = PlannerConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            config,
            PlannerConfig::default()
                .with_strategy(Strategy::LinearScan)
                .with_boundary(BoundaryPolicy::Exclusive)
        );
    }

    #[test]
    fn test_config_bad_file() {
        let err = PlannerConfig::from_json_file(Path::new("/nonexistent/u-stage.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let path = std::env::temp_dir().join(format!("u-stage-badcfg-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"strategy":"random"}"#).unwrap();
        let err = PlannerConfig::from_json_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_plan_uses_boundary() {
        let events = vec![Event::new("a", 0, 2), Event::new("b", 2, 4)];
        for strategy in Strategy::ALL {
            let inclusive = plan(&events, &PlannerConfig::default().with_strategy(strategy));
            assert_eq!(inclusive.stage_count(), 2);

            let exclusive = plan(
                &events,
                &PlannerConfig::default()
                    .with_strategy(strategy)
                    .with_boundary(BoundaryPolicy::Exclusive),
            );
            assert_eq!(exclusive.stage_count(), 1);
        }
    }
}
