//! Best-effort pattern extraction from captured test output.

use smol_str::SmolStr;

const ERRORS_MARKER: &str = "errors";
const PERF_MARKER: &str = "performance: ";

/// Fields recovered from one test program's stdout.
///
/// The three scans are independent and first-occurrence-wins; a missing or
/// malformed pattern degrades that field to its sentinel (`""` for the
/// name, `None` otherwise) and never fails the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TestOutput {
    /// Text strictly between the first two `-` characters.
    pub name: SmolStr,
    /// Count from the first `<digits> errors` occurrence. `None` means
    /// unknown, which is distinct from zero.
    pub errors: Option<u32>,
    /// Text after the first `performance: ` up to the next whitespace.
    pub perf: Option<String>,
}

/// Scan the whole captured text as one block.
pub fn parse_output(text: &str) -> TestOutput {
    TestOutput {
        name: parse_name(text),
        errors: parse_errors(text),
        perf: parse_perf(text),
    }
}

fn parse_name(text: &str) -> SmolStr {
    let Some(first) = text.find('-') else {
        return SmolStr::default();
    };
    let rest = &text[first + 1..];
    match rest.find('-') {
        Some(second) => SmolStr::new(&rest[..second]),
        None => SmolStr::default(),
    }
}

fn parse_errors(text: &str) -> Option<u32> {
    for (at, _) in text.match_indices(ERRORS_MARKER) {
        let Some(before) = text[..at].strip_suffix(' ') else {
            continue;
        };
        let stripped = before.trim_end_matches(|c: char| c.is_ascii_digit());
        let digits = &before[stripped.len()..];
        if digits.is_empty() {
            continue;
        }
        return digits.parse().ok();
    }
    None
}

fn parse_perf(text: &str) -> Option<String> {
    let at = text.find(PERF_MARKER)?;
    let rest = &text[at + PERF_MARKER.len()..];
    // The wire contract requires a delimiter after the value; without one
    // the field stays unknown.
    let end = rest.find(char::is_whitespace)?;
    Some(rest[..end].to_string())
}
