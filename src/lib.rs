//! Discrete-time model of a multi-level queue CPU scheduler with aging.
//!
//! Processes are admitted on their arrival tick into the queue matching their
//! dynamic priority. Every tick the head of the highest non-empty level runs
//! for one unit, loses one priority level, and goes back to the tail of the
//! queue its (possibly lowered) priority selects. A fixed quantum forces
//! periodic re-insertion, which gives Round-Robin service among peers.

pub mod config;
pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use crate::core::{MlqCore, Process, SimEvent};
pub use config::MlqConfig;
pub use error::SimError;
pub use scheduler::{MlqAging, SchedulingPolicy};
pub use sim::{Job, Sim};
