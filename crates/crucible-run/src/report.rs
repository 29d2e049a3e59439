//! Result records and table rendering.

use serde::Serialize;
use smol_str::SmolStr;

const NC: &str = "\x1B[0m";
const COL_RED: &str = "\x1B[0;31m";
const COL_YEL: &str = "\x1B[0;33m";

const ROW_FORMAT_WIDTHS: (usize, usize, usize, usize, usize) = (3, 40, 8, 10, 10);

/// How one test case finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitOutcome {
    /// Zero exit code.
    Ok,
    /// Terminated by the segmentation-fault signal.
    Segfault,
    /// Killed by the harness after the wall-clock bound expired.
    Timeout,
    /// Any other non-zero exit or signal; signals carry the negated raw
    /// signal number.
    Code(i32),
    /// The binary was never spawned (compile or extraction failure).
    NotRun,
}

impl ExitOutcome {
    fn render(self) -> String {
        match self {
            ExitOutcome::Ok => "OK".to_string(),
            ExitOutcome::Segfault => format!("{COL_RED}SEGFAULT{NC}"),
            ExitOutcome::Timeout => format!("{COL_YEL}TIMEOUT{NC}"),
            ExitOutcome::Code(code) => format!("CODE: {code}"),
            ExitOutcome::NotRun => "NONE".to_string(),
        }
    }
}

/// One row of the final matrix. Created once per discovered test and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct TestCaseResult {
    /// 1-based position in discovery order, stable across the run.
    pub seq: u32,
    /// Declared test name; empty when recovery failed.
    pub name: SmolStr,
    pub compiled: bool,
    /// `None` is the unknown sentinel, distinct from zero.
    pub errors: Option<u32>,
    pub exit: ExitOutcome,
    /// `None` is the unknown sentinel.
    pub perf: Option<String>,
}

impl TestCaseResult {
    /// Row for a test that never produced a runnable binary.
    pub fn not_run(seq: u32, name: SmolStr) -> Self {
        Self {
            seq,
            name,
            compiled: false,
            errors: None,
            exit: ExitOutcome::NotRun,
            perf: None,
        }
    }

    pub fn passed(&self) -> bool {
        self.compiled && self.errors == Some(0) && self.exit == ExitOutcome::Ok
    }
}

/// Column headers, matching the row widths.
pub fn header_row() -> String {
    let (w0, w1, w2, w3, w4) = ROW_FORMAT_WIDTHS;
    format!(
        "{:<w0$} {:<w1$} {:<w2$} {:<w3$} {:<w4$} {}",
        "No.", "Name", "Compiled", "Errors", "Exit", "Perf"
    )
}

/// Render one row: number, name, compiled indicator, error indicator,
/// exit outcome, performance figure.
pub fn render_row(result: &TestCaseResult) -> String {
    let compiled = if result.compiled { "✅" } else { "❌" };
    let errors = match result.errors {
        Some(0) => "✅",
        None => "🆖",
        Some(_) => "❌",
    };
    let perf = match (&result.perf, result.exit) {
        (Some(value), _) => value.clone(),
        (None, ExitOutcome::NotRun) => "NONE".to_string(),
        (None, _) => "🆖".to_string(),
    };
    let (w0, w1, w2, w3, w4) = ROW_FORMAT_WIDTHS;
    format!(
        "{:<w0$} {:<w1$} {:<w2$} {:<w3$} {:<w4$} {}",
        result.seq,
        result.name,
        compiled,
        errors,
        result.exit.render(),
        perf
    )
}

/// Summary line across all rows.
pub fn render_summary(results: &[TestCaseResult]) -> String {
    let passed = results.iter().filter(|r| r.passed()).count();
    format!(
        "{passed} passed, {} failed of {}",
        results.len() - passed,
        results.len()
    )
}
