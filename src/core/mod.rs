pub mod driver;
pub mod event;
pub mod observer;
pub mod queues;
pub mod state;

pub use driver::MlqCore;
pub use event::SimEvent;
pub use queues::LevelQueues;
pub use state::{Level, Pid, Process, ProcessId, ProcessState, Slice, Ticks};
