use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use argus_core::{RunId, TenantId};

use crate::error::VolumeError;
use crate::scoped::ScopedVolume;

/// Allocates isolated, (tenant, run)-scoped scratch volumes under a root
/// directory the container backend can bind-mount from.
///
/// Stateless apart from the configured root; safe to share behind an `Arc`
/// and call concurrently from any number of invocations.
#[derive(Debug, Clone)]
pub struct VolumeManager {
    root: PathBuf,
}

impl VolumeManager {
    /// Create a manager rooted at the given directory.
    ///
    /// The root itself is created lazily on first allocation.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Derive the volume name for a (tenant, run) pair.
    ///
    /// The name is a truncated SHA-256 over both identifiers with a
    /// separator byte, so distinct pairs cannot collide by concatenation
    /// tricks and the same pair always maps to the same name.
    pub fn volume_name(tenant: &TenantId, run: &RunId) -> String {
        let mut hasher = Sha256::new();
        hasher.update(tenant.as_str().as_bytes());
        hasher.update([0x1f]);
        hasher.update(run.as_uuid().as_bytes());
        let digest = hasher.finalize();
        format!("argus-{}", &hex::encode(digest)[..24])
    }

    /// Allocate (or reattach to) the volume for a (tenant, run) pair.
    ///
    /// Idempotent: a second call for the same pair returns a guard over
    /// the same directory instead of erroring. Callers own the returned
    /// [`ScopedVolume`] for the remainder of the invocation; dropping it
    /// destroys the volume.
    pub async fn allocate(
        &self,
        tenant: &TenantId,
        run: &RunId,
    ) -> Result<ScopedVolume, VolumeError> {
        let name = Self::volume_name(tenant, run);
        let path = self.root.join(&name);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|source| VolumeError::io(&path, source))?;
        debug!(volume = %name, tenant = %tenant, run = %run, "volume allocated");
        Ok(ScopedVolume::new(name, path))
    }
}
