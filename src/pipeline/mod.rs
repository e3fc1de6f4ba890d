//! The polling pipeline: one prober per target feeding a single recorder
//! through an unbounded channel, all owned by the supervisor.

pub mod prober;
pub mod recorder;
pub mod supervisor;

pub use supervisor::Supervisor;
