use serde::{Deserialize, Serialize};

/// A volume mount descriptor: pure data consumed by the container runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountSpec {
    /// Host-side source: the volume's backing directory.
    pub source: String,
    /// Absolute path inside the container.
    pub target: String,
    /// Whether the container sees the mount read-only.
    pub read_only: bool,
}

impl MountSpec {
    /// Create a mount descriptor.
    pub fn new(source: impl Into<String>, target: impl Into<String>, read_only: bool) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            read_only,
        }
    }

    /// Render in `source:target[:ro]` form as used by container CLIs.
    pub fn render(&self) -> String {
        if self.read_only {
            format!("{}:{}:ro", self.source, self.target)
        } else {
            format!("{}:{}", self.source, self.target)
        }
    }
}
