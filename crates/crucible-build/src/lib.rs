//! Build-side plumbing for the crucible harness.
//!
//! This crate provides:
//! - Harness configuration format (`crucible.toml`)
//! - Numbered emission of synthesized translation units
//! - External C++ toolchain invocation with diagnostic sniffing
//!
//! # Example
//!
//! ```toml
//! # crucible.toml
//! candidate_path = "./test_data/pack1"
//! test_folder = "./tests"
//! flags = ["-Wall", "-Werror", "-Wextra", "-std=c++98"]
//! iterations = 1000
//! timeout_secs = 30
//!
//! [[suite]]
//! name = "vector"
//! header = "vector_tests.hpp"
//! source = "vector_tests.cpp"
//! ```

mod compiler;
mod config;
mod emit;
mod error;

pub use compiler::{diagnostics_indicate_failure, CompileStatus, CxxCompiler};
pub use config::{HarnessConfig, SuiteConfig};
pub use emit::{binary_file_name, log_file_name, source_file_name, SourceEmitter};
pub use error::{BuildError, Result};
