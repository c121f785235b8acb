//! # Argus Component System
//!
//! The uniform contract every tool wrapper satisfies, and the runtime
//! pieces an invocation needs: registry lookup, request validation,
//! execution context, progress emission and output normalization.
//!
//! This crate defines **what** components are and **how they talk to** the
//! workflow engine, not how the engine sequences them. Ports & drivers:
//! core types live here, the container engine and volume backend sit
//! behind port traits in `argus-runner` / `argus-volume`.
//!
//! ## Core Types
//!
//! - [`Component`] — object-safe trait: schemas, retry policy, execute
//! - [`ComponentMetadata`] — static descriptor (key, name, category)
//! - [`ComponentRegistry`] — process-wide catalogue, fail-fast on
//!   duplicate keys, read-only after startup
//! - [`ExecutionRequest`] / [`ResolvedRequest`] — caller values, validated
//!   wholesale against the component's schemas
//! - [`ExecutionContext`] — per-invocation capability bundle (identifiers,
//!   cancellation, HTTP client, progress, logger, runner, volumes)
//! - [`ProgressEmitter`] — bounded, drop-oldest advisory progress queue
//! - [`normalize()`] — tolerant raw-output normalization (NDJSON, JSON
//!   document, plain-text fallback)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use argus_component::*;
//! use async_trait::async_trait;
//!
//! struct DnsResolve {
//!     meta: ComponentMetadata,
//!     inputs: PortSchema,
//!     params: PortSchema,
//!     outputs: PortSchema,
//! }
//!
//! #[async_trait]
//! impl Component for DnsResolve {
//!     fn metadata(&self) -> &ComponentMetadata { &self.meta }
//!     fn inputs(&self) -> &PortSchema { &self.inputs }
//!     fn parameters(&self) -> &PortSchema { &self.params }
//!     fn outputs(&self) -> &PortSchema { &self.outputs }
//!
//!     async fn execute(
//!         &self,
//!         request: ResolvedRequest,
//!         ctx: &ExecutionContext,
//!     ) -> Result<serde_json::Value, ClassifiedError> {
//!         ctx.check_cancelled()?;
//!         // ... build a ContainerSpec, dispatch, normalize ...
//!         Ok(serde_json::json!({ "records": [], "errors": [] }))
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// The component trait.
pub mod component;
/// Per-invocation execution context.
pub mod context;
/// Static component metadata.
pub mod metadata;
/// Raw-output normalization helpers.
pub mod normalize;
/// Progress events and the bounded drop-oldest emitter.
pub mod progress;
/// Dependency-injection port traits (logging).
pub mod provider;
/// Execution requests and wholesale validation.
pub mod request;
/// Process-wide component registry.
pub mod registry;

// ── Public re-exports ───────────────────────────────────────────────────────

pub use component::Component;
pub use context::ExecutionContext;
pub use metadata::ComponentMetadata;
pub use normalize::{Normalized, normalize};
pub use progress::{ProgressEmitter, ProgressLevel, ProgressUpdate};
pub use provider::{ComponentLogger, TracingLogger};
pub use request::{ExecutionRequest, ResolvedRequest};
pub use registry::ComponentRegistry;

// Re-export the contract's building blocks so component authors depend on
// one crate.
pub use argus_core::{ComponentKey, RunId, TenantId};
pub use argus_error::{ClassifiedError, ErrorDetails, ErrorKind, classify_status, classify_transport};
pub use argus_resilience::RetryPolicy;
pub use argus_runner::{ContainerBackend, ContainerSpec, NetworkMode, RawOutput, Runner, RunnerSpec};
pub use argus_schema::{Port, PortSchema, ValueMap, ValueType};
pub use argus_volume::{MountSpec, ScopedVolume, VolumeManager};
