use serde::Serialize;

// Index into the caller's process slice
pub type ProcessId = usize;
// Caller-chosen label, only used for reporting
pub type Pid = u64;
pub type Ticks = u64;
pub type Level = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    Pending,
    Ready,
    Running,
    Finished,
}

/// One contiguous stretch of execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub start: Ticks,
    pub duration: Ticks,
}

impl Slice {
    pub fn end(&self) -> Ticks {
        self.start + self.duration
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Process {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub static_priority: i64,

    pub state: ProcessState,
    pub remaining_time: Ticks,
    pub dynamic_priority: Level,
    pub quantum_left: Ticks,
    pub start_time: Option<Ticks>,
    pub finish_time: Option<Ticks>,
    pub slices: Vec<Slice>,
}

pub fn clamp_priority(priority: i64, max_level: Level) -> Level {
    let max = i64::try_from(max_level).unwrap_or(i64::MAX);
    // Non-negative and at most max_level, so the cast back is lossless.
    priority.clamp(0, max) as Level
}

impl Process {
    pub fn new(pid: Pid, arrival_time: Ticks, burst_time: Ticks, static_priority: i64) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            static_priority,
            state: ProcessState::Pending,
            remaining_time: burst_time,
            dynamic_priority: 0,
            quantum_left: 0,
            start_time: None,
            finish_time: None,
            slices: Vec::new(),
        }
    }

    /// Discard any state left over from a previous run.
    ///
    /// The dynamic priority is clamped here already, so it stays inside
    /// `0..=max_level` for the whole run, not only from the first enqueue on.
    pub fn reset(&mut self, quantum: Ticks, max_level: Level) {
        self.state = ProcessState::Pending;
        self.remaining_time = self.burst_time;
        self.dynamic_priority = clamp_priority(self.static_priority, max_level);
        self.quantum_left = quantum;
        self.start_time = None;
        self.finish_time = None;
        self.slices.clear();
    }

    pub fn is_finished(&self) -> bool {
        self.state == ProcessState::Finished
    }

    pub fn executed_time(&self) -> Ticks {
        self.slices.iter().map(|slice| slice.duration).sum()
    }

    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.finish_time
            .map(|finish| finish.saturating_sub(self.arrival_time))
    }

    pub fn waiting_time(&self) -> Option<Ticks> {
        self.turnaround_time()
            .map(|turnaround| turnaround.saturating_sub(self.burst_time))
    }

    pub fn response_time(&self) -> Option<Ticks> {
        self.start_time
            .map(|start| start.saturating_sub(self.arrival_time))
    }

    /// Slices with adjacent ones merged, i.e. the stretches a timeline
    /// renderer would draw as a single bar.
    pub fn runs(&self) -> Vec<Slice> {
        let mut runs: Vec<Slice> = Vec::new();
        for slice in &self.slices {
            match runs.last_mut() {
                Some(last) if last.end() == slice.start => last.duration += slice.duration,
                _ => runs.push(*slice),
            }
        }
        runs
    }
}
