//! CLI argument parsing and command dispatch.

pub mod args;
pub mod default_model;
pub mod session;

pub use args::{Cli, Commands, DefaultModelArgs, SessionArgs};
