use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use argus_volume::MountSpec;

// ── NetworkMode ─────────────────────────────────────────────────────────────

/// Container network policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkMode {
    /// Default bridged networking.
    Bridge,
    /// No network access at all (offline tools, untrusted inputs).
    None,
    /// Share the host network namespace.
    Host,
    /// A named network created by the operator.
    #[serde(untagged)]
    Custom(String),
}

impl NetworkMode {
    /// The value passed to the container engine's `--network` flag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bridge => "bridge",
            Self::None => "none",
            Self::Host => "host",
            Self::Custom(name) => name,
        }
    }
}

impl Default for NetworkMode {
    fn default() -> Self {
        Self::Bridge
    }
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ContainerSpec ───────────────────────────────────────────────────────────

/// One container launch, fully described.
///
/// Built fresh per invocation from the component's static template plus
/// request-specific data (computed flags, generated file mounts); never
/// shared across invocations.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    /// Image reference (e.g. `"projectdiscovery/dnsx:latest"`).
    pub image: String,
    /// Entrypoint override, if the image default is not wanted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<String>,
    /// Argument vector. Always constructed as a vector — user input is
    /// never string-concatenated into a shell.
    #[serde(default)]
    pub command: Vec<String>,
    /// Environment variables. May carry secrets; redacted in `Debug`.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Volume mounts.
    #[serde(default)]
    pub volumes: Vec<MountSpec>,
    /// Network policy.
    #[serde(default)]
    pub network: NetworkMode,
    /// Hard deadline for the whole container run. Mandatory.
    pub timeout: Duration,
}

impl ContainerSpec {
    /// Create a spec for an image with the mandatory timeout.
    ///
    /// Defaults: image entrypoint, empty command, no env, no mounts,
    /// bridge network.
    pub fn new(image: impl Into<String>, timeout: Duration) -> Self {
        Self {
            image: image.into(),
            entrypoint: None,
            command: Vec::new(),
            env: BTreeMap::new(),
            volumes: Vec::new(),
            network: NetworkMode::Bridge,
            timeout,
        }
    }

    /// Override the image entrypoint.
    pub fn with_entrypoint(mut self, entrypoint: impl Into<String>) -> Self {
        self.entrypoint = Some(entrypoint.into());
        self
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.command.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Attach a volume mount.
    pub fn mount(mut self, mount: MountSpec) -> Self {
        self.volumes.push(mount);
        self
    }

    /// Set the network policy.
    pub fn with_network(mut self, network: NetworkMode) -> Self {
        self.network = network;
        self
    }
}

// Env values may hold credentials injected from secret ports; Debug output
// lands in logs, so values are masked and only the keys survive.
impl fmt::Debug for ContainerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerSpec")
            .field("image", &self.image)
            .field("entrypoint", &self.entrypoint)
            .field("command", &self.command)
            .field("env_keys", &self.env.keys().collect::<Vec<_>>())
            .field("volumes", &self.volumes)
            .field("network", &self.network)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ── RunnerSpec ──────────────────────────────────────────────────────────────

/// The execution strategy for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunnerSpec {
    /// The component's execute function does everything in-process.
    Inline,
    /// Launch one container as described.
    Container(ContainerSpec),
}

impl RunnerSpec {
    /// Whether this is the inline strategy.
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline)
    }

    /// The container spec, if this is the container strategy.
    pub fn as_container(&self) -> Option<&ContainerSpec> {
        match self {
            Self::Inline => None,
            Self::Container(spec) => Some(spec),
        }
    }
}
