//! Platform abstraction layer
//!
//! Turns raw browser input (keys, button clicks) into the abstract commands
//! the session understands. Every source maps to the same `Command`.

pub mod input;

pub use input::{Command, command_for_key};
