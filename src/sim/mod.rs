pub mod driver;
pub mod job;
pub mod stats;

pub use driver::{Sim, Trace};
pub use job::{Job, Workload};
pub use stats::{ProcessStats, RunReport};
