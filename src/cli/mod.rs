//! Command Line Interface (CLI) layer for SPECTRAPRO.
//!
//! This module defines argument parsing (`args`), error types and user-facing
//! messages (`errors`), and the orchestration logic (`runner`) for single-file
//! and batch processing flows. It is the only place where classified library
//! errors become display strings.
//!
//! If you are embedding SPECTRAPRO into another application, prefer using
//! the high-level `spectrapro::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use errors::user_message;
pub use runner::run;
