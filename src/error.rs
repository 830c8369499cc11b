use thiserror::Error;

use crate::core::state::{Level, Pid};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("quantum must be at least one tick")]
    ZeroQuantum,

    #[error("max_level {max_level} exceeds the limit of {limit}")]
    TooManyLevels { max_level: Level, limit: Level },

    /// A process that needs no CPU time would never be retired by the loop.
    #[error("process {pid} has a zero-length burst")]
    ZeroBurst { pid: Pid },

    #[error("invalid workload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
