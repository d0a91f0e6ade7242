//! huffpress: command-line shell around `huffpress-core`.
//!
//! The shell reads input (a file or generated sample text), runs the core
//! compressor, writes the packed result as raw bytes or as a framed `.huff`
//! container, and reports the size reduction as text or JSON.

pub mod config;
pub mod container;
pub mod error;
pub mod input_gen;
pub mod report;
pub mod run;

pub use error::{AppError, ContainerError, Result};
