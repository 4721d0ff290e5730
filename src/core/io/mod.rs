//! Process execution helpers

pub mod runner;

pub use runner::{CommandOutput, CommandRunner};
