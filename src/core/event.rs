use serde::Serialize;

use crate::core::{Level, ProcessId, Ticks};

/// What happened to whom during a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEvent {
    Admitted {
        process: ProcessId,
        level: Level,
    },
    Dispatched {
        process: ProcessId,
        level: Level,
        first_run: bool,
    },
    Executed {
        process: ProcessId,
        remaining: Ticks,
    },
    Aged {
        process: ProcessId,
        from: Level,
        to: Level,
    },
    QuantumExpired {
        process: ProcessId,
    },
    Requeued {
        process: ProcessId,
        level: Level,
    },
    Finished {
        process: ProcessId,
        finish_time: Ticks,
    },
    // Nothing ready at any level
    CpuIdle,
}
