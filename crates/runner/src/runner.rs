use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use argus_error::ClassifiedError;

use crate::backend::ContainerBackend;
use crate::output::RawOutput;
use crate::spec::{ContainerSpec, RunnerSpec};

/// How long a cancelled backend gets to confirm container termination
/// before the runner stops waiting for it.
const TERMINATION_GRACE: Duration = Duration::from_secs(5);

/// The single dispatch point between a runner spec and its execution
/// strategy.
///
/// Stateless apart from the backend handle; safe to share behind an `Arc`
/// across concurrent invocations. The runner — not the backend — owns
/// timeout enforcement: when the spec's deadline passes, the backend's
/// cancellation token is cancelled, the container's termination is awaited
/// (bounded by a grace period), and a timeout-kind error propagates.
pub struct Runner {
    backend: Arc<dyn ContainerBackend>,
}

impl Runner {
    /// Create a runner over the given container backend.
    pub fn new(backend: Arc<dyn ContainerBackend>) -> Self {
        Self { backend }
    }

    /// Execute one runner spec.
    ///
    /// Exhaustive over the strategy: inline components do their own work,
    /// so `Inline` yields `None`; `Container` launches the described
    /// container and yields its raw output.
    pub async fn dispatch(
        &self,
        spec: &RunnerSpec,
        cancel: &CancellationToken,
    ) -> Result<Option<RawOutput>, ClassifiedError> {
        match spec {
            RunnerSpec::Inline => Ok(None),
            RunnerSpec::Container(container) => {
                self.run_container(container, cancel).await.map(Some)
            }
        }
    }

    /// Launch one container and wait for its output, honoring the spec's
    /// timeout and the caller's cancellation token.
    pub async fn run_container(
        &self,
        spec: &ContainerSpec,
        cancel: &CancellationToken,
    ) -> Result<RawOutput, ClassifiedError> {
        let child = cancel.child_token();
        let mut run = pin!(self.backend.run(spec, &child));

        let error = tokio::select! {
            result = &mut run => return result,
            () = tokio::time::sleep(spec.timeout) => {
                warn!(
                    image = %spec.image,
                    timeout_s = spec.timeout.as_secs(),
                    "container run exceeded its deadline"
                );
                ClassifiedError::timeout(format!(
                    "container run exceeded {}s deadline",
                    spec.timeout.as_secs()
                ))
            }
            () = cancel.cancelled() => {
                debug!(image = %spec.image, "container run cancelled by caller");
                ClassifiedError::cancelled()
            }
        };

        // Deadline passed or the caller cancelled: tell the backend to stop
        // the container and wait for it to confirm, so termination is
        // guaranteed before the error propagates.
        child.cancel();
        if tokio::time::timeout(TERMINATION_GRACE, &mut run)
            .await
            .is_err()
        {
            warn!(
                image = %spec.image,
                "backend did not confirm container termination within grace period"
            );
        }
        Err(error)
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner").finish_non_exhaustive()
    }
}
