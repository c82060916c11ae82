//! Workout engine.
//!
//! This module contains the timing core:
//! - `timer`: 10 ms countdown primitive with epoch-based tick invalidation
//! - `session`: Phase state machine over a generated sequence
//! - `runner`: Async tick loop and command handling

pub mod runner;
pub mod session;
pub mod timer;

pub use runner::{EngineCommand, WorkoutEngine};
pub use session::{SessionController, SessionEvent, SessionSummary, WARNING_THRESHOLD};
pub use timer::{IntervalTimer, TickOutcome, TICK_QUANTUM};
