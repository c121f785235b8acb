use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::error::VolumeError;
use crate::mount::MountSpec;

/// A live volume owned by one invocation, destroyed when that invocation
/// ends.
///
/// Cleanup is scoped, not sprinkled: call [`cleanup`](Self::cleanup) on the
/// happy path, and the `Drop` impl removes the directory on every other
/// exit path (error return, panic, cancelled future). A failed removal is
/// logged and never masks the invocation's primary result.
#[derive(Debug)]
pub struct ScopedVolume {
    name: String,
    path: PathBuf,
    cleaned: bool,
}

impl ScopedVolume {
    pub(crate) fn new(name: String, path: PathBuf) -> Self {
        Self {
            name,
            path,
            cleaned: false,
        }
    }

    /// The derived volume name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The backing directory on the host.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write named files into the volume.
    ///
    /// Every relative path is vetted **before** any file is written: an
    /// absolute path, a `..` segment, or any other non-plain component
    /// rejects the whole batch. This guards against container-image inputs
    /// (e.g. attacker-supplied archive listings) escaping the mount root.
    /// Nested relative paths are allowed; parent directories are created
    /// as needed.
    pub async fn populate<I, K, V>(&self, files: I) -> Result<(), VolumeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[u8]>,
    {
        // Vet the full batch first so a traversal attempt writes nothing.
        let mut entries: Vec<(PathBuf, V)> = Vec::new();
        for (relative, content) in files {
            let safe = safe_relative(relative.as_ref())?;
            entries.push((self.path.join(safe), content));
        }

        for (path, content) in entries {
            if let Some(parent) = path.parent()
                && parent != self.path
            {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| VolumeError::io(parent, source))?;
            }
            tokio::fs::write(&path, content.as_ref())
                .await
                .map_err(|source| VolumeError::io(&path, source))?;
        }
        Ok(())
    }

    /// Produce the mount descriptor exposing this volume inside a
    /// container. Pure data; the volume itself is untouched.
    pub fn mount_spec(&self, target: impl Into<String>, read_only: bool) -> MountSpec {
        MountSpec::new(self.path.display().to_string(), target, read_only)
    }

    /// Destroy the volume.
    ///
    /// Consumes the guard, so cleanup cannot run twice. An already-removed
    /// directory (reattached guard cleaned up by its sibling) is not an
    /// error.
    pub async fn cleanup(mut self) -> Result<(), VolumeError> {
        self.cleaned = true;
        match tokio::fs::remove_dir_all(&self.path).await {
            Ok(()) => {
                debug!(volume = %self.name, "volume destroyed");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(VolumeError::io(&self.path, source)),
        }
    }
}

impl Drop for ScopedVolume {
    fn drop(&mut self) {
        if self.cleaned {
            return;
        }
        // Backstop for non-cleanup exits. Synchronous removal is fine here:
        // volumes are small scratch trees and this path only runs when the
        // invocation is already unwinding.
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(volume = %self.name, "volume destroyed by scope guard"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(volume = %self.name, error = %err, "volume cleanup failed"),
        }
    }
}

/// Validate a caller-supplied relative path.
///
/// Only plain path segments are allowed: no absolute paths, no `..`, no
/// `.`, no prefixes, and no empty paths.
fn safe_relative(raw: &str) -> Result<PathBuf, VolumeError> {
    let reject = |reason: &str| {
        Err(VolumeError::UnsafePath {
            path: raw.to_owned(),
            reason: reason.to_owned(),
        })
    };

    if raw.is_empty() {
        return reject("empty path");
    }
    let path = Path::new(raw);
    if path.is_absolute() {
        return reject("absolute path");
    }
    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            Component::ParentDir => return reject("parent directory traversal"),
            _ => return reject("non-plain path component"),
        }
    }
    Ok(path.to_path_buf())
}
