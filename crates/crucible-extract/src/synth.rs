//! Translation-unit assembly.

/// Collect the `#include` lines of a suite header, in order of appearance.
pub fn suite_includes(header_lines: &[&str]) -> Vec<String> {
    header_lines
        .iter()
        .filter(|line| line.trim_start().starts_with("#include"))
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// Assemble a standalone program around one extracted test function.
///
/// The unit is a deterministic concatenation: the include lines, an extern
/// declaration for the `test_name` string shared with the suite sources,
/// the function body verbatim, and a generated `main` invoking the test
/// with the configured iteration count. Synthesizing twice with identical
/// inputs yields identical bytes. The body is not validated here; malformed
/// input surfaces at compile time downstream.
pub fn synthesize(includes: &[String], body: &str, name: &str, iterations: u32) -> String {
    let mut unit = String::new();
    for include in includes {
        unit.push_str(include);
        unit.push('\n');
    }
    unit.push_str("extern std::string\ttest_name;\n");
    unit.push_str(body);
    unit.push('\n');
    unit.push_str(&format!("int main(){{\n\t{name}({iterations});\n}}\n"));
    unit
}
