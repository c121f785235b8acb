use argus_core::{ComponentKey, RunId};

/// Port trait for component-level logging.
///
/// Components log through this instead of a concrete subscriber so the
/// engine can capture per-run logs for the execution timeline. Logging is
/// side-effecting and non-blocking; implementations must never fail.
pub trait ComponentLogger: Send + Sync {
    /// Log a debug message.
    fn debug(&self, message: &str);
    /// Log an info message.
    fn info(&self, message: &str);
    /// Log a warning.
    fn warn(&self, message: &str);
    /// Log an error.
    fn error(&self, message: &str);
}

/// Default [`ComponentLogger`] forwarding to `tracing` with the run and
/// component identifiers attached as structured fields.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    run_id: RunId,
    component: ComponentKey,
}

impl TracingLogger {
    /// Create a logger for one invocation.
    pub fn new(run_id: RunId, component: ComponentKey) -> Self {
        Self { run_id, component }
    }
}

impl ComponentLogger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(run_id = %self.run_id, component = %self.component, "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(run_id = %self.run_id, component = %self.component, "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(run_id = %self.run_id, component = %self.component, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(run_id = %self.run_id, component = %self.component, "{message}");
    }
}
