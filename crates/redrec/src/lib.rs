//! Terminal session recorder that files captures by operation.
//!
//! ## Usage
//!
//! ```text
//! redrec bash                  # record under the last used operation
//! redrec bash new_operation    # record under `new_operation`
//! redrec bash -s               # choose a previous operation interactively
//! ```
//!
//! Recordings land in `<workspace>/<operation>/session_<YYYYMMDD>_<HHMMSS>.cast`
//! and every operation used is appended once to `<workspace>/operations`.
//!
//! ## Environment
//!
//! - `REDREC_WORKSPACE` overrides the workspace (default `$HOME/workspace`).
//! - `REDREC_RECORDER` overrides the recorder program (default `asciinema`).
//!   It is invoked as `<program> rec -c <command> <file>`.
//! - `REDREC_LOG` sets the `tracing` filter for stderr diagnostics (default `warn`).
//! - `REDREC_TUI_WRITE_LOG` mirrors every byte the selector writes into a file.
//!
//! Command-line flags take precedence over the environment.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod paths;
pub mod recorder;
