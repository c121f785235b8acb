use serde::{Deserialize, Serialize};

/// Raw result of one container run: the only shape the backend contract
/// allows. Anything else coming back from a backend is a contract
/// violation surfaced as a service-kind error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOutput {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Process exit code (`-1` when the process died to a signal).
    pub exit_code: i32,
}

impl RawOutput {
    /// Create a raw output record.
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// An empty, successful output.
    pub fn empty() -> Self {
        Self::new("", "", 0)
    }

    /// Whether the tool exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Non-empty, trimmed stdout lines.
    pub fn stdout_lines(&self) -> impl Iterator<Item = &str> {
        self.stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }

    /// Whether a non-zero exit matches a component-documented "no results"
    /// condition.
    ///
    /// Several scanners exit non-zero when they simply found nothing; the
    /// component declares the marker string its tool prints in that case
    /// and checks here before treating the exit as a failure.
    pub fn matches_no_results(&self, marker: &str) -> bool {
        !marker.is_empty() && (self.stderr.contains(marker) || self.stdout.contains(marker))
    }
}
