use super::{
    job::{Job, Workload},
    stats::RunReport,
};
use crate::{
    config::MlqConfig,
    core::{MlqCore, Process, SimEvent, Ticks},
    error::SimError,
};

pub type Trace = Vec<(Ticks, SimEvent)>;

/// One simulation run over its own copy of the processes.
pub struct Sim {
    processes: Vec<Process>,
    config: MlqConfig,
    trace: Trace,
}

impl Sim {
    pub fn new(jobs: Vec<Job>, config: MlqConfig) -> Self {
        Self {
            processes: jobs.into_iter().map(Process::from).collect(),
            config,
            trace: Vec::new(),
        }
    }

    pub fn from_workload(workload: Workload) -> Self {
        Self::new(workload.jobs, workload.config)
    }

    /// Runs to completion, recording every event with the tick it happened in.
    pub fn run(&mut self) -> Result<&Trace, SimError> {
        self.run_with(|_, _| {})
    }

    /// Like [`run`](Self::run), additionally handing each event to `on_event`
    /// as soon as its tick completes.
    pub fn run_with<F>(&mut self, mut on_event: F) -> Result<&Trace, SimError>
    where
        F: FnMut(Ticks, &SimEvent),
    {
        self.trace.clear();
        let mut core = MlqCore::new(&mut self.processes, self.config)?;

        while !core.all_finished() {
            let now = core.now();
            for event in core.step() {
                on_event(now, &event);
                self.trace.push((now, event));
            }
        }

        Ok(&self.trace)
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn config(&self) -> &MlqConfig {
        &self.config
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.processes.iter().all(Process::is_finished)
    }

    pub fn jobs_map<F>(&self, f: F) -> impl Iterator<Item = f64>
    where
        F: Fn(&Process) -> f64,
    {
        self.processes.iter().map(f)
    }

    pub fn report(&self) -> RunReport {
        RunReport::from_processes(&self.processes)
    }
}
