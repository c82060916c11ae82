//! Workout sequence generation.
//!
//! Turns a difficulty and an exercise library into an ordered sequence of
//! exercise and long-pause items:
//!
//! - Exercises are drawn from a shuffled pool without repeats inside a pass
//! - Paired groups are always scheduled back to back
//! - Long pauses are spread evenly between exercises

mod error;
mod generator;

pub use error::WorkoutError;
pub use generator::{generate, generate_plan, generate_workout, pause_positions, resolve_config};
