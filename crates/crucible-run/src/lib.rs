//! Execution and reporting side of the crucible harness.
//!
//! This crate provides:
//! - bounded-wait execution of compiled test binaries, with exit
//!   classification (clean exit, SEGFAULT, TIMEOUT, raw code)
//! - best-effort pattern extraction from captured test output
//! - the fixed-width result table and its JSON form
//!
//! The textual contract with every compiled test program: stdout embeds
//! `-<name>-`, optionally `<count> errors`, and optionally
//! `performance: <value> ` (trailing delimiter included).

mod error;
mod parse;
mod report;
mod runner;

pub use error::{Result, RunError};
pub use parse::{parse_output, TestOutput};
pub use report::{header_row, render_row, render_summary, ExitOutcome, TestCaseResult};
pub use runner::{classify_exit, run_binary, RunCapture};
