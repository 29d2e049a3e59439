//! Harness configuration types (crucible.toml format).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root harness configuration.
///
/// Every field has a default, so an absent or empty `crucible.toml` yields
/// the stock profile: the five container suites under `./tests`, strict
/// C++98 flags, 1000 iterations per test, a 30 second run timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Include directory of the candidate implementation under test.
    /// Overridden by the CLI's positional argument.
    #[serde(default = "default_candidate_path")]
    pub candidate_path: PathBuf,

    /// Directory holding the versioned suite sources.
    #[serde(default = "default_test_folder")]
    pub test_folder: PathBuf,

    /// Working directory for synthesized sources and binaries.
    #[serde(default = "default_temp_folder")]
    pub temp_folder: PathBuf,

    /// Directory for compile-error logs.
    #[serde(default = "default_log_folder")]
    pub log_folder: PathBuf,

    /// C++ toolchain executable. `None` resolves to `c++` on PATH.
    #[serde(default)]
    pub compiler: Option<PathBuf>,

    /// Compiler flag profile. Candidate code must compile cleanly under it.
    #[serde(default = "default_flags")]
    pub flags: Vec<String>,

    /// Iteration count passed to every generated `main`.
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Wall-clock bound for one test binary, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Shared compilation-support source, relative to `test_folder`.
    #[serde(default = "default_utils_source")]
    pub utils_source: String,

    /// Test suites (declaration/implementation file pairs).
    #[serde(rename = "suite", default = "default_suites")]
    pub suites: Vec<SuiteConfig>,
}

/// One suite: a declarations header and an implementations source, both
/// relative to `test_folder`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    pub name: String,
    pub header: String,
    pub source: String,
}

fn default_candidate_path() -> PathBuf {
    PathBuf::from("./test_data/pack1")
}

fn default_test_folder() -> PathBuf {
    PathBuf::from("./tests")
}

fn default_temp_folder() -> PathBuf {
    PathBuf::from("./tmp")
}

fn default_log_folder() -> PathBuf {
    PathBuf::from("./log")
}

fn default_flags() -> Vec<String> {
    ["-Wall", "-Werror", "-Wextra", "-std=c++98"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_iterations() -> u32 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_utils_source() -> String {
    "test_utils.cpp".to_string()
}

fn default_suites() -> Vec<SuiteConfig> {
    ["vector", "stack", "map", "set", "utility"]
        .iter()
        .map(|name| SuiteConfig {
            name: name.to_string(),
            header: format!("{name}_tests.hpp"),
            source: format!("{name}_tests.cpp"),
        })
        .collect()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            candidate_path: default_candidate_path(),
            test_folder: default_test_folder(),
            temp_folder: default_temp_folder(),
            log_folder: default_log_folder(),
            compiler: None,
            flags: default_flags(),
            iterations: default_iterations(),
            timeout_secs: default_timeout_secs(),
            utils_source: default_utils_source(),
            suites: default_suites(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: HarnessConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find a suite by name.
    pub fn find_suite(&self, name: &str) -> Option<&SuiteConfig> {
        self.suites.iter().find(|s| s.name == name)
    }

    /// Path to a suite's declarations header.
    pub fn suite_header_path(&self, suite: &SuiteConfig) -> PathBuf {
        self.test_folder.join(&suite.header)
    }

    /// Path to a suite's implementations source.
    pub fn suite_source_path(&self, suite: &SuiteConfig) -> PathBuf {
        self.test_folder.join(&suite.source)
    }

    /// Path to the shared compilation-support source.
    pub fn utils_path(&self) -> PathBuf {
        self.test_folder.join(&self.utils_source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_all_suites() {
        let config = HarnessConfig::default();
        assert_eq!(config.suites.len(), 5);
        for name in ["vector", "stack", "map", "set", "utility"] {
            let suite = config.find_suite(name).unwrap();
            assert_eq!(suite.header, format!("{name}_tests.hpp"));
            assert_eq!(suite.source, format!("{name}_tests.cpp"));
        }
        assert_eq!(
            config.flags,
            vec!["-Wall", "-Werror", "-Wextra", "-std=c++98"]
        );
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
candidate_path = "/opt/containers/include"
test_folder = "suite"
compiler = "clang++"
flags = ["-Wall", "-std=c++11"]
timeout_secs = 5

[[suite]]
name = "vector"
header = "vec.hpp"
source = "vec.cpp"
        "#;

        let config: HarnessConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.candidate_path, PathBuf::from("/opt/containers/include"));
        assert_eq!(config.compiler, Some(PathBuf::from("clang++")));
        assert_eq!(config.flags, vec!["-Wall", "-std=c++11"]);
        assert_eq!(config.timeout_secs, 5);
        // An explicit suite list replaces the default one entirely.
        assert_eq!(config.suites.len(), 1);

        let vec_suite = config.find_suite("vector").unwrap();
        assert_eq!(
            config.suite_header_path(vec_suite),
            PathBuf::from("suite/vec.hpp")
        );
        assert_eq!(config.utils_path(), PathBuf::from("suite/test_utils.cpp"));
    }

    #[test]
    fn test_unknown_suite_lookup() {
        let config = HarnessConfig::default();
        assert!(config.find_suite("deque").is_none());
    }
}
