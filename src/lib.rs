//! Uniform line sampling of large newline-delimited files.
//!
//! Only byte offsets of line starts are held in memory; selected lines are
//! re-read from the file when they are written out.

pub mod config;
pub mod core;
pub mod emit;
pub mod error;
pub mod pipeline;
pub mod sampling;

pub use config::{Backend, Config, OrderMode, Replacement};
pub use error::{ErrorKind, Result, SampleError};
pub use pipeline::{run, RunReport};
