//! Test-case extraction and translation-unit synthesis.
//!
//! This crate is the text-only core of the crucible harness:
//! - scanning a declarations file for test prototypes
//! - slicing brace-balanced function bodies out of the implementation file
//! - assembling each body into a standalone compilable program
//!
//! Extraction is deliberately not a C++ parser: function boundaries are
//! found by counting literal brace characters, which is sufficient for the
//! constrained suite sources it runs against. A brace or prototype pattern
//! inside a comment or string literal still counts. The functions here form
//! a narrow seam, so a real tokenizer could replace them later without
//! touching callers.

mod error;
mod extract;
mod scan;
mod synth;

pub use error::{ExtractError, Result};
pub use extract::{declared_name, extract_body, find_definition};
pub use scan::{prototype_name, PrototypeScanner};
pub use synth::{suite_includes, synthesize};
