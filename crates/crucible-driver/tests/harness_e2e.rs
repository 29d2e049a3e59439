//! End-to-end pipeline tests with a stand-in toolchain.
//!
//! A shell script takes the place of `c++`: it parses `-o` out of the
//! command line and installs a tiny executable that prints the suite's
//! wire-format line. That keeps the full pipeline (scan, extract,
//! synthesize, emit, compile, run, parse, report) observable without a
//! real C++ toolchain.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crucible_build::HarnessConfig;
use crucible_driver::Harness;
use crucible_run::ExitOutcome;
use tempfile::TempDir;

const SUITE_HEADER: &str = "#ifndef VECTOR_TESTS_HPP\n\
# define VECTOR_TESTS_HPP\n\
#include <string>\n\
#include <vector>\n\
\n\
void testAppend(int iters);\n\
void testMissing(int iters);\n\
\n\
#endif\n";

const SUITE_SOURCE: &str = "#include \"vector_tests.hpp\"\n\
\n\
void testAppend(int iters)\n\
{\n\
\ttest_name = \"-testAppend-\";\n\
\tint x = 0;\n\
\tx++;\n\
\t(void)iters;\n\
}\n";

const FAKE_CC_OK: &str = r#"#!/bin/sh
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "-o" ]; then out="$a"; fi
  prev="$a"
done
cat > "$out" <<'EOF'
#!/bin/sh
printf -- '-testAppend- 0 errors performance: 5ms '
EOF
chmod +x "$out"
exit 0
"#;

const FAKE_CC_FAILS: &str = "#!/bin/sh\necho 'outfile_1.cpp:3:1: error: boom' >&2\nexit 1\n";

fn write_executable(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn fixture(root: &Path, fake_cc: &str) -> HarnessConfig {
    let tests = root.join("tests");
    let include = root.join("include");
    fs::create_dir_all(&tests).unwrap();
    fs::create_dir_all(&include).unwrap();

    fs::write(tests.join("vector_tests.hpp"), SUITE_HEADER).unwrap();
    fs::write(tests.join("vector_tests.cpp"), SUITE_SOURCE).unwrap();
    fs::write(tests.join("test_utils.cpp"), "std::string test_name;\n").unwrap();
    fs::write(include.join("vector.hpp"), "// candidate header\n").unwrap();

    let cc = root.join("cc");
    write_executable(&cc, fake_cc);

    HarnessConfig {
        candidate_path: include,
        test_folder: tests,
        temp_folder: root.join("tmp"),
        log_folder: root.join("log"),
        compiler: Some(cc),
        timeout_secs: 5,
        ..HarnessConfig::default()
    }
}

#[test]
fn pipeline_produces_pass_and_fail_rows() {
    let temp = TempDir::new().unwrap();
    let config = fixture(temp.path(), FAKE_CC_OK);
    let harness = Harness::new(config);

    let results = harness.run_suite("vector").unwrap();
    assert_eq!(results.len(), 2);

    // The extracted and compiled test ran and reported cleanly.
    let first = &results[0];
    assert_eq!(first.seq, 1);
    assert_eq!(first.name, "testAppend");
    assert!(first.compiled);
    assert_eq!(first.errors, Some(0));
    assert_eq!(first.exit, ExitOutcome::Ok);
    assert_eq!(first.perf.as_deref(), Some("5ms"));

    // The prototype without a definition degrades to a FAIL row and does
    // not abort the run.
    let second = &results[1];
    assert_eq!(second.seq, 2);
    assert_eq!(second.name, "testMissing");
    assert!(!second.compiled);
    assert_eq!(second.exit, ExitOutcome::NotRun);
    assert_eq!(second.perf, None);
}

#[test]
fn synthesized_unit_carries_suite_and_candidate_includes() {
    let temp = TempDir::new().unwrap();
    let config = fixture(temp.path(), FAKE_CC_OK);
    let outfile = config.temp_folder.join("outfile_1.cpp");
    let harness = Harness::new(config);

    harness.run_suite("vector").unwrap();

    let unit = fs::read_to_string(outfile).unwrap();
    assert!(unit.contains("#include <string>"));
    assert!(unit.contains("#include <vector>"));
    assert!(unit.contains("#include\"vector.hpp\""));
    assert!(unit.contains("extern std::string\ttest_name;"));
    assert!(unit.contains("int main(){\n\ttestAppend(1000);\n}"));
}

#[test]
fn compile_failure_becomes_a_named_fail_row_with_log() {
    let temp = TempDir::new().unwrap();
    let config = fixture(temp.path(), FAKE_CC_FAILS);
    let log_file: PathBuf = config.log_folder.join("compile_error_1.txt");
    let harness = Harness::new(config);

    let results = harness.run_suite("vector").unwrap();

    let first = &results[0];
    assert!(!first.compiled);
    // Name recovered from the synthesized source, hyphens trimmed.
    assert_eq!(first.name, "testAppend");
    assert_eq!(first.exit, ExitOutcome::NotRun);

    let log = fs::read_to_string(log_file).unwrap();
    assert!(log.starts_with("-testAppend-\n\n"));
    assert!(log.contains("error: boom"));
}

#[test]
fn unknown_suite_is_a_setup_error() {
    let temp = TempDir::new().unwrap();
    let config = fixture(temp.path(), FAKE_CC_OK);
    let harness = Harness::new(config);

    assert!(harness.run_suite("deque").is_err());
}

#[test]
fn missing_suite_files_abort_before_any_test() {
    let temp = TempDir::new().unwrap();
    let mut config = fixture(temp.path(), FAKE_CC_OK);
    config.test_folder = temp.path().join("nowhere");
    let harness = Harness::new(config);

    assert!(harness.run_suite("vector").is_err());
}

#[test]
fn cleanup_removes_temp_but_keeps_logs() {
    let temp = TempDir::new().unwrap();
    let config = fixture(temp.path(), FAKE_CC_FAILS);
    let temp_folder = config.temp_folder.clone();
    let log_folder = config.log_folder.clone();
    let harness = Harness::new(config);

    harness.run_suite("vector").unwrap();
    assert!(temp_folder.exists());

    harness.cleanup();
    assert!(!temp_folder.exists());
    assert!(log_folder.exists());
}
