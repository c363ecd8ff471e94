pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git_ops;
pub mod release;
pub mod runner;
pub mod toolchain;
pub mod ui;

pub use error::{PdgError, Result};
