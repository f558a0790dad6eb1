//! CLI module for the Pomodoro widget host.
//!
//! - `commands`: Command definitions using clap derive
//! - `display`: Banner, status and error output

pub mod commands;
pub mod display;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
