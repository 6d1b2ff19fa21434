#![forbid(unsafe_code)]

//! Console driver for rtview sessions.

pub mod cli;
pub mod error;

pub use cli::{Cli, run, run_from_env};
pub use error::{DemoError, Result};
