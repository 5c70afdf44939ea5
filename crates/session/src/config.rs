//! Session configuration: every tunable constant named in the component
//! design, gathered into one value instead of free-floating literals.

use crate::error::SessionError;
use std::path::PathBuf;

/// Configuration for a [`crate::SessionController`].
///
/// Construct with [`SessionConfig::new`] and adjust with the `with_*`
/// builder methods, or use [`SessionConfig::for_testing`] for a config
/// pointed at a throwaway directory with a small snapshot interval.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Root of the durable store directory.
    pub data_dir: PathBuf,
    /// Number of snapshots retained before the oldest is evicted.
    pub max_snapshots: usize,
    /// Mutating requests between automatic snapshots.
    pub snapshot_interval: u32,
    /// Temperature `get_pair` uses when the caller doesn't override it.
    pub default_temperature: f64,
    /// RNG seed for a fresh session; ignored on recovery, where the
    /// persisted RNG state in the latest snapshot wins.
    pub rng_seed: u64,
}

impl SessionConfig {
    /// Defaults: `max_snapshots = 16`, `snapshot_interval = 50`,
    /// `default_temperature = 1.0`, `rng_seed = 0`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            max_snapshots: 16,
            snapshot_interval: 50,
            default_temperature: 1.0,
            rng_seed: 0,
        }
    }

    /// Override `max_snapshots`.
    pub fn with_max_snapshots(mut self, max_snapshots: usize) -> Self {
        self.max_snapshots = max_snapshots;
        self
    }

    /// Override `snapshot_interval`.
    pub fn with_snapshot_interval(mut self, snapshot_interval: u32) -> Self {
        self.snapshot_interval = snapshot_interval;
        self
    }

    /// Override `default_temperature`.
    pub fn with_default_temperature(mut self, default_temperature: f64) -> Self {
        self.default_temperature = default_temperature;
        self
    }

    /// Override `rng_seed`.
    pub fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// A config suited to tests: small `snapshot_interval` so recovery
    /// paths are easy to exercise without hundreds of requests.
    pub fn for_testing(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(data_dir).with_snapshot_interval(5)
    }

    /// Reject configurations that can never produce a working session.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.max_snapshots == 0 {
            return Err(SessionError::InvalidConfig(
                "max_snapshots must be at least 1".to_string(),
            ));
        }
        if self.snapshot_interval == 0 {
            return Err(SessionError::InvalidConfig(
                "snapshot_interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = SessionConfig::new("/tmp/x");
        assert_eq!(config.max_snapshots, 16);
        assert_eq!(config.snapshot_interval, 50);
        assert_eq!(config.default_temperature, 1.0);
    }

    #[test]
    fn builders_override_fields() {
        let config = SessionConfig::new("/tmp/x")
            .with_max_snapshots(4)
            .with_snapshot_interval(10)
            .with_default_temperature(0.5)
            .with_rng_seed(42);
        assert_eq!(config.max_snapshots, 4);
        assert_eq!(config.snapshot_interval, 10);
        assert_eq!(config.default_temperature, 0.5);
        assert_eq!(config.rng_seed, 42);
    }

    #[test]
    fn validate_rejects_zero_max_snapshots() {
        let config = SessionConfig::new("/tmp/x").with_max_snapshots(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_snapshot_interval() {
        let config = SessionConfig::new("/tmp/x").with_snapshot_interval(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn for_testing_uses_a_small_snapshot_interval() {
        let config = SessionConfig::for_testing("/tmp/x");
        assert_eq!(config.snapshot_interval, 5);
    }
}
