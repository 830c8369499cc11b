//! Scheduling policies behind one swappable entry point.

pub mod mlq_aging;

use crate::{
    core::{Process, Ticks},
    error::SimError,
};
pub use mlq_aging::MlqAging;

pub trait SchedulingPolicy {
    fn name(&self) -> &'static str;

    /// Schedules `processes` to completion, mutating them in place.
    ///
    /// `quantum` is the time quantum chosen by the front end. It is part of
    /// the shared signature; policies with their own fixed quantum ignore it.
    fn schedule(&self, processes: &mut [Process], quantum: Ticks) -> Result<(), SimError>;
}
