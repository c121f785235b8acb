//! # Argus Runner Abstraction
//!
//! Executes a component's external work and returns raw output.
//!
//! Two interchangeable strategies exist, represented by [`RunnerSpec`]:
//!
//! - **Inline** — the component's own code does everything in-process
//!   (HTTP-API-backed lookups). Trusted code path only; the runner has
//!   nothing to do.
//! - **Container** — a named image is launched with a constructed argument
//!   vector, mounted volumes, a network mode and a mandatory timeout, and
//!   the combined stdout/stderr/exit-code comes back as [`RawOutput`].
//!
//! [`Runner`] is the single place that dispatches on the spec; components
//! never branch on runner kind themselves. The concrete container engine
//! sits behind the [`ContainerBackend`] port trait; [`DockerCli`] is the
//! reference implementation over the docker command-line client.
//!
//! Argument vectors are always constructed by the calling component —
//! never by concatenating user input into a shell string — and
//! user-controlled content travels via files on the isolated volume, not
//! inline arguments.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Container backend port trait.
pub mod backend;
/// Docker CLI reference backend.
pub mod docker;
/// Raw execution output.
pub mod output;
/// The runner: dispatch, timeout enforcement, cancellation.
pub mod runner;
/// Runner configuration types.
pub mod spec;

pub use backend::ContainerBackend;
pub use docker::DockerCli;
pub use output::RawOutput;
pub use runner::Runner;
pub use spec::{ContainerSpec, NetworkMode, RunnerSpec};
