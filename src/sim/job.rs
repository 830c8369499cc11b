use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::{
    config::MlqConfig,
    core::state::{Pid, Process, Ticks},
    error::SimError,
};

/// Caller-supplied description of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    // Any value is accepted; the scheduler clamps it into its level range
    #[serde(default)]
    pub priority: i64,
}

impl From<Job> for Process {
    fn from(job: Job) -> Self {
        Process::new(job.pid, job.arrival_time, job.burst_time, job.priority)
    }
}

/// A configuration plus the jobs to run under it, as read from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workload {
    #[serde(default)]
    pub config: MlqConfig,
    pub jobs: Vec<Job>,
}

impl Workload {
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let workload: Self = serde_json::from_str(json)?;
        workload.config.validate()?;
        Ok(workload)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}
