//! Numbered emission of synthesized translation units.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name of the synthesized source for sequence number `seq`.
pub fn source_file_name(seq: u32) -> String {
    format!("outfile_{seq}.cpp")
}

/// File name of the compiled binary for sequence number `seq`.
pub fn binary_file_name(seq: u32) -> String {
    format!("a_{seq}.out")
}

/// File name of the compile-error log for sequence number `seq`.
pub fn log_file_name(seq: u32) -> String {
    format!("compile_error_{seq}.txt")
}

/// Writes synthesized programs to numbered files in a working directory.
///
/// The emitter owns the sequence counter: it starts at zero, is incremented
/// once per emitted unit, and is never reset, so one emitter instance hands
/// out the strictly increasing, gapless sequence 1..k. Downstream stages
/// iterate `1..=count()`.
pub struct SourceEmitter {
    dir: PathBuf,
    count: u32,
}

impl SourceEmitter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            count: 0,
        }
    }

    /// Write one unit, returning its sequence number. The working directory
    /// is created on demand.
    pub fn emit(&mut self, unit: &str) -> Result<u32> {
        self.count += 1;
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(source_file_name(self.count)), unit)?;
        Ok(self.count)
    }

    /// Total number of units emitted so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Path of an emitted source file.
    pub fn source_path(&self, seq: u32) -> PathBuf {
        self.dir.join(source_file_name(seq))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
