//! CLI module for the workout timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `session`: Interactive terminal session driving the engine

pub mod commands;
pub mod display;
pub mod session;

pub use commands::{Cli, Commands, GenerateArgs, SourceArgs, StartArgs, WorkoutArgs};
pub use display::Display;
pub use session::{parse_key, KeyAction, SessionView, WorkoutContext};
