use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use argus_core::{ComponentKey, RunId, TenantId};
use argus_error::ClassifiedError;
use argus_runner::Runner;
use argus_volume::VolumeManager;

use crate::progress::{ProgressEmitter, ProgressUpdate};
use crate::provider::ComponentLogger;

/// Per-invocation capability bundle.
///
/// Constructed by the engine before invoking a component; read-only from
/// the component's perspective except for the two effectful members
/// (logging and progress emission, both non-blocking). Never persisted,
/// never shared across invocations.
///
/// Components **must** call [`check_cancelled`](Self::check_cancelled) in
/// long-running loops; container runs and outbound HTTP calls observe the
/// same token through their own plumbing.
pub struct ExecutionContext {
    run_id: RunId,
    tenant_id: TenantId,
    component: ComponentKey,
    /// Cancellation signal, checked cooperatively by components.
    pub cancellation: CancellationToken,
    http: reqwest::Client,
    progress: ProgressEmitter,
    logger: Option<Arc<dyn ComponentLogger>>,
    runner: Option<Arc<Runner>>,
    volumes: Option<Arc<VolumeManager>>,
}

impl ExecutionContext {
    /// Create a context with the given identities and defaults for
    /// everything else (fresh token, shared-nothing HTTP client, default
    /// progress queue, no logger, no runner, no volume manager).
    pub fn new(run_id: RunId, tenant_id: TenantId, component: ComponentKey) -> Self {
        Self {
            run_id,
            tenant_id,
            component,
            cancellation: CancellationToken::new(),
            http: reqwest::Client::new(),
            progress: ProgressEmitter::default(),
            logger: None,
            runner: None,
            volumes: None,
        }
    }

    /// Use a pre-existing cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Use a shared HTTP client.
    ///
    /// The engine supplies one client for connection pooling and to bound
    /// every outbound call with its configured request deadline.
    pub fn with_http(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Use the engine's progress emitter.
    pub fn with_progress(mut self, progress: ProgressEmitter) -> Self {
        self.progress = progress;
        self
    }

    /// Attach a logger.
    pub fn with_logger(mut self, logger: Arc<dyn ComponentLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Attach the container runner.
    pub fn with_runner(mut self, runner: Arc<Runner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Attach the isolated volume manager.
    pub fn with_volumes(mut self, volumes: Arc<VolumeManager>) -> Self {
        self.volumes = Some(volumes);
        self
    }

    /// This invocation's run identifier.
    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// The tenant the invocation belongs to.
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// The component being executed.
    pub fn component(&self) -> &ComponentKey {
        &self.component
    }

    /// Outbound HTTP client for inline components.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The progress emitter.
    pub fn progress(&self) -> &ProgressEmitter {
        &self.progress
    }

    /// Emit a progress event. Fire-and-forget; never blocks, never fails.
    pub fn emit_progress(&self, update: ProgressUpdate) {
        self.progress.emit(update);
    }

    /// Check whether the invocation has been cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifiedError::cancelled`] once the token has fired.
    pub fn check_cancelled(&self) -> Result<(), ClassifiedError> {
        if self.cancellation.is_cancelled() {
            Err(ClassifiedError::cancelled())
        } else {
            Ok(())
        }
    }

    /// The container runner.
    ///
    /// Absent on engines that host only inline components; a container
    /// component running there is a deployment mistake, reported as a
    /// configuration error.
    pub fn runner(&self) -> Result<&Runner, ClassifiedError> {
        self.runner.as_deref().ok_or_else(|| {
            ClassifiedError::configuration(
                "no container runner attached to execution context",
                "runner",
            )
        })
    }

    /// The isolated volume manager.
    pub fn volumes(&self) -> Result<&VolumeManager, ClassifiedError> {
        self.volumes.as_deref().ok_or_else(|| {
            ClassifiedError::configuration(
                "no volume manager attached to execution context",
                "volumes",
            )
        })
    }

    /// Log a debug message. No-op if no logger is attached.
    pub fn log_debug(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.debug(message);
        }
    }

    /// Log an info message. No-op if no logger is attached.
    pub fn log_info(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.info(message);
        }
    }

    /// Log a warning. No-op if no logger is attached.
    pub fn log_warn(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.warn(message);
        }
    }

    /// Log an error. No-op if no logger is attached.
    pub fn log_error(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.error(message);
        }
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("run_id", &self.run_id)
            .field("tenant_id", &self.tenant_id)
            .field("component", &self.component)
            .field("cancelled", &self.cancellation.is_cancelled())
            .field("has_runner", &self.runner.is_some())
            .field("has_volumes", &self.volumes.is_some())
            .finish_non_exhaustive()
    }
}
