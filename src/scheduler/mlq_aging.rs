use log::debug;

use super::SchedulingPolicy;
use crate::{
    config::MlqConfig,
    core::{MlqCore, Process, Ticks},
    error::SimError,
};

/// Multi-level queues with per-tick aging and Round-Robin inside a level.
#[derive(Debug, Clone, Copy, Default)]
pub struct MlqAging {
    config: MlqConfig,
}

impl MlqAging {
    pub fn new(config: MlqConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MlqConfig {
        &self.config
    }
}

impl SchedulingPolicy for MlqAging {
    fn name(&self) -> &'static str {
        "mlq-aging"
    }

    /// This policy does not honor the externally supplied quantum.
    /// Its Round-Robin allowance is `MlqConfig::quantum`, fixed per run.
    fn schedule(&self, processes: &mut [Process], external_quantum: Ticks) -> Result<(), SimError> {
        debug!(
            "{}: ignoring external quantum {}, internal quantum is {}",
            self.name(),
            external_quantum,
            self.config.quantum
        );

        let mut core = MlqCore::new(processes, self.config)?;
        core.run();
        Ok(())
    }
}
