//! Completion statistics for a finished (or partially finished) run.
//!
//! | Metric     | Definition                    |
//! |------------|-------------------------------|
//! | Turnaround | finish - arrival              |
//! | Waiting    | turnaround - burst            |
//! | Response   | first dispatch - arrival      |
//! | Makespan   | latest finish time            |
//! | Utilization| busy ticks / makespan         |
//!
//! Averages only cover processes that have the relevant time recorded.

use average::{Estimate, Mean};
use serde::Serialize;

use crate::core::state::{Level, Pid, Process, Ticks};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessStats {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub start_time: Option<Ticks>,
    pub finish_time: Option<Ticks>,
    pub turnaround_time: Option<Ticks>,
    pub waiting_time: Option<Ticks>,
    pub response_time: Option<Ticks>,
    pub final_priority: Level,
    /// Contiguous stretches of execution; one means the process was never
    /// interrupted.
    pub runs: usize,
}

impl From<&Process> for ProcessStats {
    fn from(process: &Process) -> Self {
        Self {
            pid: process.pid,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            start_time: process.start_time,
            finish_time: process.finish_time,
            turnaround_time: process.turnaround_time(),
            waiting_time: process.waiting_time(),
            response_time: process.response_time(),
            final_priority: process.dynamic_priority,
            runs: process.runs().len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub processes: Vec<ProcessStats>,
    pub makespan: Ticks,
    pub busy_ticks: Ticks,
    pub idle_ticks: Ticks,
    pub utilization: f64,
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
    pub longest_idle: Ticks,
}

impl RunReport {
    pub fn from_processes(processes: &[Process]) -> Self {
        let stats: Vec<ProcessStats> = processes.iter().map(ProcessStats::from).collect();

        let makespan = processes
            .iter()
            .filter_map(|process| process.finish_time)
            .max()
            .unwrap_or(0);
        let busy_ticks: Ticks = processes.iter().map(Process::executed_time).sum();
        let idle_ticks = makespan.saturating_sub(busy_ticks);
        let utilization = if makespan == 0 {
            0.0
        } else {
            busy_ticks as f64 / makespan as f64
        };

        Self {
            avg_turnaround: avg(stats.iter().filter_map(|s| s.turnaround_time)),
            avg_waiting: avg(stats.iter().filter_map(|s| s.waiting_time)),
            avg_response: avg(stats.iter().filter_map(|s| s.response_time)),
            longest_idle: longest_idle(processes, makespan),
            processes: stats,
            makespan,
            busy_ticks,
            idle_ticks,
            utilization,
        }
    }
}

fn avg(iter: impl Iterator<Item = Ticks>) -> f64 {
    let mean: Mean = iter.map(|ticks| ticks as f64).collect();
    if mean.is_empty() { 0.0 } else { mean.estimate() }
}

// Longest stretch in [0, makespan) with no slice running
fn longest_idle(processes: &[Process], makespan: Ticks) -> Ticks {
    let mut busy: Vec<(Ticks, Ticks)> = processes
        .iter()
        .flat_map(|process| process.slices.iter())
        .map(|slice| (slice.start, slice.end()))
        .collect();
    busy.sort_unstable();

    let mut longest = 0;
    let mut cursor = 0;
    for (start, end) in busy {
        longest = longest.max(start.saturating_sub(cursor));
        cursor = cursor.max(end);
    }
    longest.max(makespan.saturating_sub(cursor))
}
