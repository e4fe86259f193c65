#![forbid(unsafe_code)]

//! End-to-end replay harness for the sidepane workspace host.

pub mod cli;
pub mod error;
pub mod script;

pub use cli::run_from_env;
pub use error::{ReplayError, Result};
pub use script::{HostEvent, ReplayReport};
