//! # Argus Isolated Volume Manager
//!
//! Gives each container invocation a private scratch filesystem scoped to
//! one (tenant, run) pair, so one tenant's scan inputs and outputs are
//! never visible to another tenant's container.
//!
//! ## Lifecycle
//!
//! 1. **allocate** — [`VolumeManager::allocate`] derives a
//!    collision-resistant volume name from the tenant and run identifiers
//!    and creates the backing directory. Repeating the call for the same
//!    pair reattaches to the same volume; distinct pairs never collide.
//! 2. **populate** — [`ScopedVolume::populate`] writes named files into the
//!    volume, rejecting any path that could escape the mount root
//!    (absolute paths, `..` traversal) before a single byte is written.
//! 3. **mount** — [`ScopedVolume::mount_spec`] produces the pure
//!    [`MountSpec`] data the container runner consumes.
//! 4. **destroy** — [`ScopedVolume::cleanup`] removes the volume. The
//!    guard's `Drop` impl is the backstop: if an invocation unwinds or
//!    errors before calling `cleanup`, the volume is still removed, and a
//!    cleanup failure is logged rather than masking the primary error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Volume-local error type.
pub mod error;
/// Volume manager: naming and allocation.
pub mod manager;
/// Pure mount descriptor consumed by the container runner.
pub mod mount;
/// Scoped volume guard: populate, mount, guaranteed cleanup.
pub mod scoped;

pub use error::VolumeError;
pub use manager::VolumeManager;
pub use mount::MountSpec;
pub use scoped::ScopedVolume;
