use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use argus_error::ClassifiedError;

use crate::output::RawOutput;
use crate::spec::ContainerSpec;

/// Port trait for the concrete container engine.
///
/// The engine daemon is a shared, externally rate- and capacity-limited
/// resource: implementations must surface transient daemon-busy conditions
/// as service-kind errors (retryable) rather than blocking, and must honor
/// the cancellation token by terminating the container before returning.
///
/// Timeout enforcement is **not** the backend's job — the
/// [`Runner`](crate::Runner) cancels the token when the spec's deadline
/// passes.
#[async_trait]
pub trait ContainerBackend: Send + Sync {
    /// Launch one container, wait for exit, and return the raw output.
    async fn run(
        &self,
        spec: &ContainerSpec,
        cancel: &CancellationToken,
    ) -> Result<RawOutput, ClassifiedError>;
}
