use super::{
    queues::LevelQueues,
    state::{Process, ProcessId, ProcessState},
};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    // Called at the end of every tick, when nothing should be Running.
    // Only `dispatched` gained a slice this tick, so only its history is checked.
    pub fn observe(
        &mut self,
        processes: &[Process],
        queues: &LevelQueues,
        finished: usize,
        dispatched: Option<ProcessId>,
    ) {
        self.step += 1;
        if !cfg!(debug_assertions) {
            return;
        }

        if let Some(id) = dispatched {
            let process = &processes[id];
            debug_assert_eq!(
                process.executed_time() + process.remaining_time,
                process.burst_time,
                "Process {id} executed + remaining time must equal its burst"
            );
            if let [.., previous, last] = process.slices.as_slice() {
                debug_assert!(
                    previous.end() <= last.start,
                    "Process {id} slices out of order"
                );
            }
        }

        let mut finished_seen = 0;
        for (id, process) in processes.iter().enumerate() {
            debug_assert!(
                process.dynamic_priority <= queues.max_level(),
                "Process {id} dynamic priority {} above max level {}",
                process.dynamic_priority,
                queues.max_level()
            );
            debug_assert_ne!(
                process.state,
                ProcessState::Running,
                "Process {id} still Running after its tick"
            );
            debug_assert_eq!(
                process.state == ProcessState::Ready,
                queues.contains(id),
                "Process {id} is {:?} but queue membership says {:?}",
                process.state,
                queues.level_of(id)
            );
            if process.is_finished() {
                finished_seen += 1;
            }
        }
        debug_assert_eq!(
            finished, finished_seen,
            "Finished count out of sync with process states"
        );

        let mut per_level = vec![0usize; queues.max_level() + 1];
        for (_, level) in queues.memberships() {
            per_level[level] += 1;
        }
        for (level, &count) in per_level.iter().enumerate() {
            debug_assert_eq!(
                count,
                queues.len(level),
                "Membership claims {count} processes in level {level}, queue holds {}",
                queues.len(level)
            );
        }
        debug_assert_eq!(
            per_level.iter().sum::<usize>(),
            queues.total_len(),
            "Queued process count out of sync with membership"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Slice;

    fn ready_at(queues: &mut LevelQueues, id: ProcessId, level: usize) -> Process {
        let mut process = Process::new(id as u64, 0, 3, level as i64);
        process.reset(2, queues.max_level());
        process.state = ProcessState::Ready;
        queues.enqueue(level, id);
        process
    }

    #[test]
    fn consistent_state_passes() {
        let mut queues = LevelQueues::new(3);
        let mut processes = vec![ready_at(&mut queues, 0, 2), ready_at(&mut queues, 1, 2)];

        queues.dequeue(2);
        let runner = &mut processes[0];
        runner.slices.push(Slice { start: 0, duration: 1 });
        runner.remaining_time -= 1;
        runner.dynamic_priority = 1;
        queues.enqueue(1, 0);

        let mut observer = Observer::new();
        observer.observe(&processes, &queues, 0, Some(0));
        assert_eq!(observer.steps(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "executed + remaining")]
    fn dispatched_process_must_account_for_its_burst() {
        let mut queues = LevelQueues::new(3);
        let mut processes = vec![ready_at(&mut queues, 0, 1)];
        // A slice recorded without charging remaining time
        processes[0].slices.push(Slice { start: 0, duration: 1 });

        Observer::new().observe(&processes, &queues, 0, Some(0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "queue membership")]
    fn ready_process_must_be_queued() {
        let mut queues = LevelQueues::new(3);
        let processes = vec![ready_at(&mut queues, 0, 1)];
        queues.dequeue(1);

        Observer::new().observe(&processes, &queues, 0, None);
    }
}
