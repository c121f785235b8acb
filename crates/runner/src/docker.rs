use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use argus_error::ClassifiedError;

use crate::backend::ContainerBackend;
use crate::output::RawOutput;
use crate::spec::ContainerSpec;

/// Exit code the docker client reserves for its own failures (daemon
/// unreachable, image pull refused, run setup error) as opposed to the
/// containerized tool's exit code.
const DOCKER_CLIENT_ERROR: i32 = 125;

/// Reference [`ContainerBackend`] over the docker command-line client.
///
/// Each run gets a generated container name so that cancellation can
/// address the container directly (`docker kill <name>`) instead of only
/// killing the CLI process and orphaning the container.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    /// Backend using `docker` from `PATH`.
    pub fn new() -> Self {
        Self::with_binary("docker")
    }

    /// Backend using an explicit client binary (e.g. `podman`).
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The full `docker run` argument vector for a spec.
    ///
    /// Always a vector — nothing here ever passes through a shell.
    fn run_args(spec: &ContainerSpec, name: &str) -> Vec<String> {
        let mut args = vec![
            "run".to_owned(),
            "--rm".to_owned(),
            "--name".to_owned(),
            name.to_owned(),
            "--network".to_owned(),
            spec.network.as_str().to_owned(),
        ];
        if let Some(entrypoint) = &spec.entrypoint {
            args.push("--entrypoint".to_owned());
            args.push(entrypoint.clone());
        }
        for mount in &spec.volumes {
            args.push("-v".to_owned());
            args.push(mount.render());
        }
        for (key, value) in &spec.env {
            args.push("-e".to_owned());
            args.push(format!("{key}={value}"));
        }
        args.push(spec.image.clone());
        args.extend(spec.command.iter().cloned());
        args
    }

    /// Map a finished client process onto the backend contract.
    fn map_exit(exit_code: i32, stdout: String, stderr: String) -> Result<RawOutput, ClassifiedError> {
        if exit_code == DOCKER_CLIENT_ERROR {
            let reason = stderr.lines().next().unwrap_or("unknown client error");
            return Err(ClassifiedError::service(format!(
                "container engine failed to start the run: {reason}"
            ))
            .with_exit_code(exit_code));
        }
        Ok(RawOutput::new(stdout, stderr, exit_code))
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerBackend for DockerCli {
    async fn run(
        &self,
        spec: &ContainerSpec,
        cancel: &CancellationToken,
    ) -> Result<RawOutput, ClassifiedError> {
        let name = format!("argus-run-{}", Uuid::new_v4().simple());
        let args = Self::run_args(spec, &name);

        debug!(image = %spec.image, container = %name, "launching container");
        let child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => ClassifiedError::configuration(
                    format!("container engine binary `{}` not found", self.binary),
                    "container_engine",
                ),
                _ => ClassifiedError::service(format!("failed to launch container: {err}")),
            })?;

        let mut wait = std::pin::pin!(child.wait_with_output());
        let finished = tokio::select! {
            finished = &mut wait => finished,
            () = cancel.cancelled() => {
                debug!(container = %name, "terminating container on cancellation");
                let _ = Command::new(&self.binary)
                    .args(["kill", &name])
                    .output()
                    .await;
                wait.await
            }
        };

        let output = finished
            .map_err(|err| ClassifiedError::service(format!("container wait failed: {err}")))?;
        Self::map_exit(
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        )
    }
}
