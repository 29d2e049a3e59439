//! Pipeline orchestration: one full extract → synthesize → compile → run
//! pass per suite.
//!
//! The driver owns no policy of its own: extraction semantics live in
//! `crucible-extract`, toolchain invocation in `crucible-build`, execution
//! and classification in `crucible-run`. What it adds is the wiring (fresh
//! working directories, include collection, per-test failure containment)
//! and the guarantee that the result rows come back in discovery order.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use miette::{miette, Result};
use smol_str::SmolStr;

use crucible_build::{CxxCompiler, HarnessConfig, SourceEmitter};
use crucible_extract::{
    declared_name, find_definition, prototype_name, suite_includes, synthesize, PrototypeScanner,
};
use crucible_run::{parse_output, run_binary, ExitOutcome, TestCaseResult};

/// One discovered test after the preparation phase.
enum Prepared {
    /// Synthesized and written as unit `seq`.
    Emitted { seq: u32 },
    /// Extraction failed; only the declaration name survives.
    Failed { name: SmolStr },
}

/// Harness entry point: runs configured suites against one candidate.
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run one full pipeline pass for `suite_name`.
    ///
    /// Setup problems (unknown suite, missing input files) abort before any
    /// test runs. Everything after that, from extraction failures to compile
    /// errors, crashes, and timeouts, is contained in the per-test rows,
    /// which are returned in discovery order.
    pub fn run_suite(&self, suite_name: &str) -> Result<Vec<TestCaseResult>> {
        let config = &self.config;
        let suite = config
            .find_suite(suite_name)
            .ok_or_else(|| miette!("Suite not found: {suite_name}"))?;

        // Fresh working directories for every run.
        let _ = fs::remove_dir_all(&config.temp_folder);
        let _ = fs::remove_dir_all(&config.log_folder);

        let header = read_input(&config.suite_header_path(suite))?;
        let source = read_input(&config.suite_source_path(suite))?;
        if !config.utils_path().is_file() {
            return Err(miette!(
                "Input file not found: {}",
                config.utils_path().display()
            ));
        }
        if !config.candidate_path.is_dir() {
            return Err(miette!(
                "Candidate path is not a directory: {}",
                config.candidate_path.display()
            ));
        }

        let header_lines: Vec<&str> = header.lines().collect();
        let source_lines: Vec<&str> = source.lines().collect();

        let mut includes = suite_includes(&header_lines);
        includes.extend(candidate_includes(&config.candidate_path)?);

        let mut emitter = SourceEmitter::new(&config.temp_folder);
        let prepared = self.prepare_tests(&header_lines, &source_lines, &includes, &mut emitter)?;
        println!("generated {} temp files", emitter.count());

        self.compile_tests(&prepared)?;
        Ok(self.run_tests(&prepared, &emitter))
    }

    /// Remove the temp directory (synthesized sources and binaries).
    /// Compile-error logs are kept for inspection.
    pub fn cleanup(&self) {
        let _ = fs::remove_dir_all(&self.config.temp_folder);
    }

    fn prepare_tests(
        &self,
        header_lines: &[&str],
        source_lines: &[&str],
        includes: &[String],
        emitter: &mut SourceEmitter,
    ) -> Result<Vec<Prepared>> {
        let mut prepared = Vec::new();
        let mut scanner = PrototypeScanner::new(header_lines);
        while let Some(idx) = scanner.next_prototype() {
            let Some(name) = prototype_name(header_lines[idx]) else {
                prepared.push(Prepared::Failed {
                    name: SmolStr::default(),
                });
                continue;
            };
            match find_definition(source_lines, &name) {
                Ok(body) => {
                    let unit = synthesize(includes, &body, &name, self.config.iterations);
                    let seq = emitter
                        .emit(&unit)
                        .map_err(|e| miette!("Failed to write synthesized source: {e}"))?;
                    prepared.push(Prepared::Emitted { seq });
                }
                Err(err) => {
                    eprintln!("skipping `{name}`: {err}");
                    prepared.push(Prepared::Failed { name });
                }
            }
        }
        Ok(prepared)
    }

    fn compile_tests(&self, prepared: &[Prepared]) -> Result<()> {
        let compiler = CxxCompiler::from_config(&self.config);
        let total = prepared
            .iter()
            .filter(|p| matches!(p, Prepared::Emitted { .. }))
            .count();
        if total == 0 {
            return Ok(());
        }

        println!("Compiling tests with {} flags", self.config.flags.join(" "));
        let mut done = 0;
        for p in prepared {
            if let Prepared::Emitted { seq } = p {
                done += 1;
                print!("Compiling test {done}/{total}\r");
                let _ = std::io::stdout().flush();
                let status = compiler
                    .compile(*seq)
                    .map_err(|e| miette!("Compiler invocation failed: {e}"))?;
                if !status.is_ok() {
                    println!("Test {seq} compile failed, see compile log for details");
                }
            }
        }
        println!();
        Ok(())
    }

    fn run_tests(&self, prepared: &[Prepared], emitter: &SourceEmitter) -> Vec<TestCaseResult> {
        let compiler = CxxCompiler::from_config(&self.config);
        let timeout = Duration::from_secs(self.config.timeout_secs);

        let mut results = Vec::with_capacity(prepared.len());
        for (row, p) in prepared.iter().enumerate() {
            let row_no = (row + 1) as u32;
            match p {
                Prepared::Failed { name } => {
                    results.push(TestCaseResult::not_run(row_no, name.clone()));
                }
                Prepared::Emitted { seq } => {
                    let binary = compiler.binary_path(*seq);
                    if !binary.is_file() {
                        results.push(TestCaseResult::not_run(
                            row_no,
                            recovered_name(emitter, *seq),
                        ));
                        continue;
                    }
                    match run_binary(&binary, timeout) {
                        Ok(capture) => {
                            let parsed = parse_output(&capture.stdout);
                            results.push(TestCaseResult {
                                seq: row_no,
                                name: parsed.name,
                                compiled: true,
                                errors: parsed.errors,
                                exit: capture.outcome,
                                perf: parsed.perf,
                            });
                        }
                        Err(err) => {
                            eprintln!("failed to run test {row_no}: {err}");
                            results.push(TestCaseResult {
                                seq: row_no,
                                name: recovered_name(emitter, *seq),
                                compiled: true,
                                errors: None,
                                exit: ExitOutcome::NotRun,
                                perf: None,
                            });
                        }
                    }
                }
            }
        }
        results
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| miette!("Failed to read {}: {}", path.display(), e))
}

/// One generated include directive per `.hpp` file directly inside the
/// candidate directory, sorted by file name so synthesis stays
/// deterministic across platforms.
fn candidate_includes(dir: &Path) -> Result<Vec<String>> {
    let entries =
        fs::read_dir(dir).map_err(|e| miette!("Failed to scan {}: {}", dir.display(), e))?;

    let mut headers = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| miette!("Failed to scan {}: {}", dir.display(), e))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "hpp") {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                headers.push(name.to_string());
            }
        }
    }
    headers.sort();
    Ok(headers
        .into_iter()
        .map(|h| format!("#include\"{h}\""))
        .collect())
}

/// Best-effort name recovery from an emitted source, hyphens trimmed.
fn recovered_name(emitter: &SourceEmitter, seq: u32) -> SmolStr {
    fs::read_to_string(emitter.source_path(seq))
        .ok()
        .and_then(|source| {
            declared_name(&source).map(|name| SmolStr::new(name.trim_matches('-')))
        })
        .unwrap_or_default()
}
