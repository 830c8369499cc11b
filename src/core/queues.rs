//! Ready queues, one FIFO per priority level.
//!
//! FIFO order within a level is what gives Round-Robin service among
//! processes of equal dynamic priority.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use super::state::{Level, ProcessId};

#[derive(Debug)]
pub struct LevelQueues {
    levels: Vec<VecDeque<ProcessId>>,
    // A process sits in at most one queue at a time
    membership: FxHashMap<ProcessId, Level>,
}

impl LevelQueues {
    /// Creates `max_level + 1` empty queues.
    pub fn new(max_level: Level) -> Self {
        Self {
            levels: (0..=max_level).map(|_| VecDeque::new()).collect(),
            membership: FxHashMap::default(),
        }
    }

    pub fn max_level(&self) -> Level {
        self.levels.len() - 1
    }

    /// Appends `process` to the tail of `level`.
    ///
    /// # Panics
    ///
    /// If `level` is above [`max_level`](Self::max_level) or `process` is
    /// already queued. Callers clamp priorities before enqueueing.
    pub fn enqueue(&mut self, level: Level, process: ProcessId) {
        assert!(
            level <= self.max_level(),
            "Level {level} out of range 0..={}",
            self.max_level()
        );
        assert!(
            !self.membership.contains_key(&process),
            "Process {process} already present in level {:?}",
            self.membership.get(&process)
        );

        self.levels[level].push_back(process);
        self.membership.insert(process, level);
    }

    pub fn is_empty(&self, level: Level) -> bool {
        self.levels.get(level).is_none_or(VecDeque::is_empty)
    }

    pub fn dequeue(&mut self, level: Level) -> Option<ProcessId> {
        let process = self.levels.get_mut(level)?.pop_front()?;

        let removed = self.membership.remove(&process);
        debug_assert_eq!(
            removed,
            Some(level),
            "Process {process} missing level membership"
        );

        Some(process)
    }

    /// Strict priority: the highest level holding at least one process.
    pub fn highest_non_empty(&self) -> Option<Level> {
        self.levels.iter().rposition(|queue| !queue.is_empty())
    }

    pub fn len(&self, level: Level) -> usize {
        self.levels.get(level).map_or(0, VecDeque::len)
    }

    pub fn total_len(&self) -> usize {
        self.membership.len()
    }

    pub fn contains(&self, process: ProcessId) -> bool {
        self.membership.contains_key(&process)
    }

    pub fn level_of(&self, process: ProcessId) -> Option<Level> {
        self.membership.get(&process).copied()
    }

    /// Queue contents of `level`, head first.
    pub fn iter_level(&self, level: Level) -> impl Iterator<Item = ProcessId> + '_ {
        self.levels.get(level).into_iter().flatten().copied()
    }

    pub(crate) fn memberships(&self) -> impl Iterator<Item = (ProcessId, Level)> + '_ {
        self.membership.iter().map(|(&process, &level)| (process, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_queues_are_empty() {
        let queues = LevelQueues::new(3);
        assert_eq!(queues.max_level(), 3);
        assert!((0..=3).all(|level| queues.is_empty(level)));
        assert_eq!(queues.highest_non_empty(), None);
        assert_eq!(queues.total_len(), 0);
    }

    #[test]
    fn fifo_within_level() {
        let mut queues = LevelQueues::new(2);
        queues.enqueue(1, 4);
        queues.enqueue(1, 2);
        queues.enqueue(1, 9);

        assert_eq!(queues.iter_level(1).collect::<Vec<_>>(), vec![4, 2, 9]);
        assert_eq!(queues.dequeue(1), Some(4));
        assert_eq!(queues.dequeue(1), Some(2));
        assert_eq!(queues.dequeue(1), Some(9));
        assert_eq!(queues.dequeue(1), None);
    }

    #[test]
    fn highest_non_empty_prefers_upper_levels() {
        let mut queues = LevelQueues::new(5);
        queues.enqueue(0, 0);
        queues.enqueue(3, 1);
        assert_eq!(queues.highest_non_empty(), Some(3));

        queues.dequeue(3);
        assert_eq!(queues.highest_non_empty(), Some(0));
    }

    #[test]
    fn membership_follows_queue_contents() {
        let mut queues = LevelQueues::new(4);
        queues.enqueue(4, 1);
        assert!(queues.contains(1));
        assert_eq!(queues.level_of(1), Some(4));
        assert_eq!(queues.len(4), 1);

        queues.dequeue(4);
        assert!(!queues.contains(1));
        assert_eq!(queues.level_of(1), None);

        // Re-entering after removal is fine
        queues.enqueue(0, 1);
        assert_eq!(queues.level_of(1), Some(0));
    }

    #[test]
    fn out_of_range_level_reads_as_empty() {
        let mut queues = LevelQueues::new(1);
        assert!(queues.is_empty(7));
        assert_eq!(queues.len(7), 0);
        assert_eq!(queues.dequeue(7), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn enqueue_above_max_level_panics() {
        let mut queues = LevelQueues::new(2);
        queues.enqueue(3, 0);
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn double_enqueue_panics() {
        let mut queues = LevelQueues::new(2);
        queues.enqueue(0, 5);
        queues.enqueue(2, 5);
    }
}
