use log::{debug, trace};

use super::{
    event::SimEvent,
    observer::Observer,
    queues::LevelQueues,
    state::{Level, Process, ProcessId, ProcessState, Slice, Ticks},
};
use crate::{config::MlqConfig, error::SimError};

/// Multi-level queue scheduling loop with aging.
///
/// Borrows the caller's processes for the whole run and mutates them in
/// place. Every [`step`](Self::step) simulates exactly one time unit:
/// admit arrivals, select the highest non-empty level, run its head for one
/// tick, age it, then requeue or retire it.
pub struct MlqCore<'p> {
    processes: &'p mut [Process],
    queues: LevelQueues,
    config: MlqConfig,
    now: Ticks,
    finished: usize,
    // Process ids sorted by arrival; same-tick arrivals keep collection order
    arrival_order: Vec<ProcessId>,
    arrival_cursor: usize,
    observer: Observer,
}

impl<'p> MlqCore<'p> {
    /// Resets every process to a fresh run state.
    ///
    /// Rejects a zero quantum and zero-length bursts, since either would keep
    /// the loop from ever finishing.
    pub fn new(processes: &'p mut [Process], config: MlqConfig) -> Result<Self, SimError> {
        config.validate()?;
        if let Some(process) = processes.iter().find(|process| process.burst_time == 0) {
            return Err(SimError::ZeroBurst { pid: process.pid });
        }

        for process in processes.iter_mut() {
            process.reset(config.quantum, config.max_level);
        }

        let mut arrival_order: Vec<ProcessId> = (0..processes.len()).collect();
        arrival_order.sort_by_key(|&id| processes[id].arrival_time);

        debug!(
            "MLQ core: {} processes, quantum={}, levels=0..={}",
            processes.len(),
            config.quantum,
            config.max_level
        );

        Ok(Self {
            processes,
            queues: LevelQueues::new(config.max_level),
            config,
            now: 0,
            finished: 0,
            arrival_order,
            arrival_cursor: 0,
            observer: Observer::new(),
        })
    }

    /// Simulates one time unit and returns what happened during it.
    ///
    /// Once [`all_finished`](Self::all_finished) holds, further steps only
    /// report the CPU as idle.
    pub fn step(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        self.admit_arrivals(&mut events);

        let dispatched = match self.queues.highest_non_empty() {
            Some(level) => {
                let id = self
                    .queues
                    .dequeue(level)
                    .expect("Selected level must be non-empty");
                self.run_tick(id, level, &mut events);
                Some(id)
            }
            None => {
                trace!("t={} cpu idle", self.now);
                events.push(SimEvent::CpuIdle);
                None
            }
        };

        self.observer
            .observe(self.processes, &self.queues, self.finished, dispatched);
        self.now += 1;
        events
    }

    /// Steps until every process has finished.
    pub fn run(&mut self) {
        while !self.all_finished() {
            self.step();
        }
        debug!(
            "MLQ run complete at t={} after {} steps",
            self.now,
            self.observer.steps()
        );
    }

    fn admit_arrivals(&mut self, events: &mut Vec<SimEvent>) {
        // Arrival order is sorted, so arrivals for `now` are contiguous
        while let Some(&id) = self.arrival_order.get(self.arrival_cursor) {
            let process = &mut self.processes[id];
            if process.arrival_time > self.now {
                break;
            }

            let level = process.dynamic_priority.min(self.config.max_level);
            process.state = ProcessState::Ready;
            self.queues.enqueue(level, id);
            self.arrival_cursor += 1;

            trace!("t={} admit process {} at level {}", self.now, process.pid, level);
            events.push(SimEvent::Admitted { process: id, level });
        }
    }

    fn run_tick(&mut self, id: ProcessId, level: Level, events: &mut Vec<SimEvent>) {
        let now = self.now;
        let process = &mut self.processes[id];

        let first_run = process.start_time.is_none();
        if first_run {
            process.start_time = Some(now);
        }
        process.state = ProcessState::Running;
        events.push(SimEvent::Dispatched {
            process: id,
            level,
            first_run,
        });

        process.remaining_time -= 1;
        process.quantum_left -= 1;
        process.slices.push(Slice {
            start: now,
            duration: 1,
        });
        events.push(SimEvent::Executed {
            process: id,
            remaining: process.remaining_time,
        });

        // Aging applies on every executed tick, independent of the quantum
        if process.dynamic_priority > 0 {
            let from = process.dynamic_priority;
            process.dynamic_priority -= 1;
            events.push(SimEvent::Aged {
                process: id,
                from,
                to: process.dynamic_priority,
            });
        }

        if process.remaining_time == 0 {
            let finish_time = now + 1;
            process.finish_time = Some(finish_time);
            process.state = ProcessState::Finished;
            self.finished += 1;

            trace!("t={} process {} finished", now, process.pid);
            events.push(SimEvent::Finished {
                process: id,
                finish_time,
            });
            return;
        }

        if process.quantum_left == 0 {
            process.quantum_left = self.config.quantum;
            events.push(SimEvent::QuantumExpired { process: id });
        }

        let next = process.dynamic_priority.min(self.config.max_level);
        process.state = ProcessState::Ready;
        trace!(
            "t={} process {} ran at level {}, requeued at {}",
            now, process.pid, level, next
        );
        self.queues.enqueue(next, id);
        events.push(SimEvent::Requeued {
            process: id,
            level: next,
        });
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn finished(&self) -> usize {
        self.finished
    }

    pub fn all_finished(&self) -> bool {
        self.finished == self.processes.len()
    }

    pub fn config(&self) -> &MlqConfig {
        &self.config
    }

    pub fn queues(&self) -> &LevelQueues {
        &self.queues
    }

    pub fn processes(&self) -> &[Process] {
        self.processes
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_zero_burst() {
        let mut processes = vec![Process::new(1, 0, 2, 0), Process::new(2, 0, 0, 0)];
        let err = MlqCore::new(&mut processes, MlqConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, SimError::ZeroBurst { pid: 2 }));
    }

    #[test]
    fn rejects_zero_quantum() {
        let mut processes = vec![Process::new(1, 0, 2, 0)];
        let err = MlqCore::new(&mut processes, MlqConfig::new(0, 10))
            .err()
            .unwrap();
        assert!(matches!(err, SimError::ZeroQuantum));
    }

    #[test]
    fn rejects_level_count_before_allocating_queues() {
        let mut processes = vec![Process::new(1, 0, 2, 0)];
        let err = MlqCore::new(&mut processes, MlqConfig::new(2, usize::MAX))
            .err()
            .unwrap();
        assert!(matches!(err, SimError::TooManyLevels { .. }));
    }

    #[test]
    fn empty_input_is_already_finished() {
        let mut processes: Vec<Process> = Vec::new();
        let mut core = MlqCore::new(&mut processes, MlqConfig::default()).unwrap();
        assert!(core.all_finished());
        core.run();
        assert_eq!(core.now(), 0);
    }

    #[test]
    fn first_step_events() {
        let mut processes = vec![Process::new(1, 0, 3, 4)];
        let mut core = MlqCore::new(&mut processes, MlqConfig::default()).unwrap();

        assert_eq!(
            core.step(),
            vec![
                SimEvent::Admitted { process: 0, level: 4 },
                SimEvent::Dispatched {
                    process: 0,
                    level: 4,
                    first_run: true
                },
                SimEvent::Executed {
                    process: 0,
                    remaining: 2
                },
                SimEvent::Aged {
                    process: 0,
                    from: 4,
                    to: 3
                },
                SimEvent::Requeued { process: 0, level: 3 },
            ]
        );
        assert_eq!(core.now(), 1);
        assert_eq!(core.queues().level_of(0), Some(3));
    }

    #[test]
    fn quantum_expiry_does_not_change_priority() {
        let mut processes = vec![Process::new(1, 0, 5, 0)];
        let mut core = MlqCore::new(&mut processes, MlqConfig::new(2, 10)).unwrap();

        core.step();
        let events = core.step();
        assert!(events.contains(&SimEvent::QuantumExpired { process: 0 }));
        assert!(events.contains(&SimEvent::Requeued { process: 0, level: 0 }));
        assert_eq!(core.processes()[0].quantum_left, 2);
        assert_eq!(core.processes()[0].dynamic_priority, 0);
    }

    #[test]
    fn idle_until_first_arrival() {
        let mut processes = vec![Process::new(1, 3, 1, 0)];
        let mut core = MlqCore::new(&mut processes, MlqConfig::default()).unwrap();

        for _ in 0..3 {
            assert_eq!(core.step(), vec![SimEvent::CpuIdle]);
            assert_eq!(core.finished(), 0);
        }
        let events = core.step();
        assert!(events.contains(&SimEvent::Finished {
            process: 0,
            finish_time: 4
        }));
        assert!(core.all_finished());
    }

    #[test]
    fn higher_level_wins_selection() {
        let mut processes = vec![Process::new(1, 0, 2, 1), Process::new(2, 0, 2, 6)];
        let mut core = MlqCore::new(&mut processes, MlqConfig::default()).unwrap();

        let events = core.step();
        assert!(events.contains(&SimEvent::Dispatched {
            process: 1,
            level: 6,
            first_run: true
        }));
        assert_eq!(core.queues().level_of(0), Some(1));
    }

    #[test]
    fn rerun_resets_previous_results() {
        let mut processes = vec![Process::new(1, 0, 2, 3)];
        MlqCore::new(&mut processes, MlqConfig::default())
            .unwrap()
            .run();
        let first = processes[0].clone();

        MlqCore::new(&mut processes, MlqConfig::default())
            .unwrap()
            .run();
        assert_eq!(processes[0].slices, first.slices);
        assert_eq!(processes[0].finish_time, Some(2));
        assert_eq!(processes[0].dynamic_priority, 1);
    }
}
