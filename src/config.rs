//! Per-run scheduler configuration.
//!
//! Both values are fixed for the lifetime of a run. They are injected at
//! construction time instead of being compiled in so tests can vary them.

use serde::{Deserialize, Serialize};

use crate::{
    core::state::{Level, Ticks, clamp_priority},
    error::SimError,
};

/// Round-Robin allowance within a level.
pub const DEFAULT_QUANTUM: Ticks = 2;
/// Highest priority level; levels run `0..=DEFAULT_MAX_LEVEL`.
pub const DEFAULT_MAX_LEVEL: Level = 10;
/// Largest accepted `max_level`. Selection scans every level each tick.
pub const MAX_LEVEL_LIMIT: Level = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MlqConfig {
    pub quantum: Ticks,
    pub max_level: Level,
}

impl Default for MlqConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}

impl MlqConfig {
    pub fn new(quantum: Ticks, max_level: Level) -> Self {
        Self { quantum, max_level }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.quantum == 0 {
            return Err(SimError::ZeroQuantum);
        }
        if self.max_level > MAX_LEVEL_LIMIT {
            return Err(SimError::TooManyLevels {
                max_level: self.max_level,
                limit: MAX_LEVEL_LIMIT,
            });
        }
        Ok(())
    }

    pub fn num_levels(&self) -> usize {
        self.max_level.saturating_add(1)
    }

    pub fn clamp(&self, priority: i64) -> Level {
        clamp_priority(priority, self.max_level)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
