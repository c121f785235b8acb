use async_trait::async_trait;

use argus_error::ClassifiedError;
use argus_resilience::RetryPolicy;
use argus_runner::RunnerSpec;
use argus_schema::PortSchema;

use crate::context::ExecutionContext;
use crate::metadata::ComponentMetadata;
use crate::request::ResolvedRequest;

/// The contract every tool wrapper satisfies.
///
/// A component declares its typed surface (input, parameter and output
/// schemas), its retry policy, and an execute function. The engine resolves
/// the component through the [`ComponentRegistry`](crate::ComponentRegistry),
/// validates the request against the schemas, builds an
/// [`ExecutionContext`], and calls [`execute`](Self::execute).
///
/// # Object Safety
///
/// The trait is object-safe; the registry stores components as
/// `Arc<dyn Component>`.
///
/// # Output contract
///
/// `execute` must return a value conforming to the declared output schema
/// and must degrade gracefully on malformed upstream output: skip bad
/// NDJSON lines, fall back to a documented plain-text heuristic, and
/// report partial-failure diagnostics in an `errors` field instead of
/// failing the scan (see [`normalize`](crate::normalize())). A fully empty
/// upstream result is a valid zero-count output, not an error.
#[async_trait]
pub trait Component: Send + Sync + 'static {
    /// Static metadata describing this component type.
    fn metadata(&self) -> &ComponentMetadata;

    /// Schema for values arriving over graph edges.
    fn inputs(&self) -> &PortSchema;

    /// Schema for editor-configured parameters.
    fn parameters(&self) -> &PortSchema;

    /// Schema of the value `execute` resolves with.
    fn outputs(&self) -> &PortSchema;

    /// Retry policy consulted by the engine after a failed attempt.
    ///
    /// Defaults to three attempts with exponential backoff and the
    /// conventionally non-retryable kinds excluded.
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
    }

    /// The static runner-configuration template.
    ///
    /// `Inline` (the default) for components whose execute function does
    /// everything in-process. Container components return a
    /// `RunnerSpec::Container` carrying the invocation-independent parts
    /// (image, network policy, timeout); `execute` clones it and adds the
    /// request-specific arguments, environment and mounts before
    /// dispatching. The template itself is never mutated.
    fn runner_template(&self) -> RunnerSpec {
        RunnerSpec::Inline
    }

    /// Execute one validated request.
    ///
    /// Every failure must leave this function as a [`ClassifiedError`];
    /// wrap anything foreign at the boundary (the `From` impls on
    /// `ClassifiedError` cover io, JSON and HTTP transport errors).
    async fn execute(
        &self,
        request: ResolvedRequest,
        ctx: &ExecutionContext,
    ) -> Result<serde_json::Value, ClassifiedError>;
}
