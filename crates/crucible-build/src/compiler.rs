//! External C++ toolchain invocation.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::HarnessConfig;
use crate::emit::{binary_file_name, log_file_name, source_file_name};
use crate::error::{BuildError, Result};

/// Outcome of one compile attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileStatus {
    Ok,
    Failed,
}

impl CompileStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, CompileStatus::Ok)
    }
}

/// Failure detection is diagnostic-text sniffing, not exit-status checks:
/// non-empty diagnostics containing the literal `error` mean the attempt
/// failed. The flag profile turns warnings into errors, so warning-only
/// output (which would pass here) is effectively unreachable.
pub fn diagnostics_indicate_failure(diagnostics: &str) -> bool {
    !diagnostics.is_empty() && diagnostics.contains("error")
}

/// Invokes the external toolchain on synthesized units.
///
/// Each unit is compiled together with the shared suite utilities source,
/// against the candidate and suite include directories, under the
/// configured flag profile. Compilation has no timeout.
pub struct CxxCompiler {
    compiler: PathBuf,
    temp_dir: PathBuf,
    log_dir: PathBuf,
    utils_source: PathBuf,
    candidate_include: PathBuf,
    tests_include: PathBuf,
    flags: Vec<String>,
}

impl CxxCompiler {
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            compiler: config
                .compiler
                .clone()
                .unwrap_or_else(|| PathBuf::from("c++")),
            temp_dir: config.temp_folder.clone(),
            log_dir: config.log_folder.clone(),
            utils_source: config.utils_path(),
            candidate_include: config.candidate_path.clone(),
            tests_include: config.test_folder.clone(),
            flags: config.flags.clone(),
        }
    }

    pub fn compiler_path(&self) -> &Path {
        &self.compiler
    }

    /// The full command line for sequence number `seq`, program first.
    pub fn command_line(&self, seq: u32) -> Vec<String> {
        let mut line = vec![
            self.compiler.display().to_string(),
            self.temp_dir.join(source_file_name(seq)).display().to_string(),
            self.utils_source.display().to_string(),
            format!("-I{}", self.candidate_include.display()),
            format!("-I{}", self.tests_include.display()),
            "-o".to_string(),
            self.temp_dir.join(binary_file_name(seq)).display().to_string(),
        ];
        line.extend(self.flags.iter().cloned());
        line
    }

    /// Compile unit `seq`, sniffing the captured diagnostics for failure.
    /// On failure a log file keyed by `seq` is written containing the
    /// declared test name and the full diagnostic text.
    pub fn compile(&self, seq: u32) -> Result<CompileStatus> {
        let line = self.command_line(seq);
        if std::env::var("CRUCIBLE_DEBUG").is_ok() {
            eprintln!("DEBUG: Running {:?}", line);
        }

        let output = Command::new(&line[0])
            .args(&line[1..])
            .output()
            .map_err(|source| BuildError::CompilerSpawn {
                compiler: line[0].clone(),
                source,
            })?;

        let diagnostics = String::from_utf8_lossy(&output.stderr);
        if diagnostics_indicate_failure(&diagnostics) {
            self.write_error_log(seq, &diagnostics)?;
            return Ok(CompileStatus::Failed);
        }
        Ok(CompileStatus::Ok)
    }

    fn write_error_log(&self, seq: u32, diagnostics: &str) -> Result<()> {
        fs::create_dir_all(&self.log_dir)?;
        let source = fs::read_to_string(self.temp_dir.join(source_file_name(seq)))?;
        let name = crucible_extract::declared_name(&source).unwrap_or("");
        fs::write(
            self.log_dir.join(log_file_name(seq)),
            format!("{name}\n\n{diagnostics}"),
        )?;
        Ok(())
    }

    /// Path of the binary produced for `seq`, if compilation succeeded.
    pub fn binary_path(&self, seq: u32) -> PathBuf {
        self.temp_dir.join(binary_file_name(seq))
    }
}
