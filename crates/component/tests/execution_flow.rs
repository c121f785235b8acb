//! End-to-end invocation flow against fake backends.
//!
//! Covers the whole path the workflow engine drives: registry lookup,
//! wholesale request validation, volume allocation and population,
//! container spec construction, dispatch, output normalization, and
//! guaranteed volume cleanup — without a real container engine.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use argus_component::{
    ClassifiedError, Component, ComponentMetadata, ComponentRegistry, ContainerBackend,
    ContainerSpec, ErrorKind, ExecutionContext, ExecutionRequest, Port, PortSchema, RawOutput,
    ResolvedRequest, RunId, Runner, RunnerSpec, TenantId, ValueType, VolumeManager,
    classify_status, normalize,
};

// ── Fake backends ───────────────────────────────────────────────────────────

/// Records every launched spec and returns a canned output.
struct RecordingBackend {
    specs: Mutex<Vec<ContainerSpec>>,
    output: RawOutput,
}

impl RecordingBackend {
    fn new(output: RawOutput) -> Arc<Self> {
        Arc::new(Self {
            specs: Mutex::new(Vec::new()),
            output,
        })
    }

    fn launches(&self) -> usize {
        self.specs.lock().len()
    }

    fn last_spec(&self) -> ContainerSpec {
        self.specs.lock().last().expect("a container launch").clone()
    }
}

#[async_trait]
impl ContainerBackend for RecordingBackend {
    async fn run(
        &self,
        spec: &ContainerSpec,
        _cancel: &CancellationToken,
    ) -> Result<RawOutput, ClassifiedError> {
        self.specs.lock().push(spec.clone());
        Ok(self.output.clone())
    }
}

/// Hangs until cancelled, then reports termination.
struct HangingBackend {
    terminated: AtomicBool,
}

impl HangingBackend {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            terminated: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl ContainerBackend for HangingBackend {
    async fn run(
        &self,
        _spec: &ContainerSpec,
        cancel: &CancellationToken,
    ) -> Result<RawOutput, ClassifiedError> {
        cancel.cancelled().await;
        self.terminated.store(true, Ordering::SeqCst);
        Err(ClassifiedError::service("container terminated"))
    }
}

// ── Demo container component: subdomain enumeration ─────────────────────────

struct SubdomainScan {
    meta: ComponentMetadata,
    inputs: PortSchema,
    params: PortSchema,
    outputs: PortSchema,
    template: ContainerSpec,
}

impl SubdomainScan {
    fn new() -> Self {
        Self {
            meta: ComponentMetadata::new(
                "subdomain.enumerate",
                "Subdomain Enumerator",
                "Enumerate subdomains of the given apex domains",
            )
            .with_category("recon"),
            inputs: PortSchema::builder()
                .port(Port::list("targets", "Targets", ValueType::Text).required())
                .build(),
            params: PortSchema::builder()
                .port(
                    Port::number("rate_limit", "Rate Limit")
                        .with_default(150)
                        .coercible(),
                )
                .build(),
            outputs: PortSchema::builder()
                .port(Port::list("records", "Records", ValueType::Json))
                .port(Port::list("errors", "Errors", ValueType::Text))
                .build(),
            template: ContainerSpec::new("scanner/subenum:latest", Duration::from_secs(600)),
        }
    }
}

#[async_trait]
impl Component for SubdomainScan {
    fn metadata(&self) -> &ComponentMetadata {
        &self.meta
    }
    fn inputs(&self) -> &PortSchema {
        &self.inputs
    }
    fn parameters(&self) -> &PortSchema {
        &self.params
    }
    fn outputs(&self) -> &PortSchema {
        &self.outputs
    }
    fn runner_template(&self) -> RunnerSpec {
        RunnerSpec::Container(self.template.clone())
    }

    async fn execute(
        &self,
        request: ResolvedRequest,
        ctx: &ExecutionContext,
    ) -> Result<Value, ClassifiedError> {
        ctx.check_cancelled()?;
        let targets = request.input_strings("targets");
        let rate_limit = request.param_i64("rate_limit").unwrap_or(150);

        let volume = ctx
            .volumes()?
            .allocate(ctx.tenant_id(), ctx.run_id())
            .await?;
        volume
            .populate([("targets.txt", targets.join("\n").into_bytes())])
            .await?;

        let spec = self
            .template
            .clone()
            .args(["-list", "/work/targets.txt"])
            .args(["-rate-limit", &rate_limit.to_string()])
            .arg("-json")
            .mount(volume.mount_spec("/work", true));

        let raw = ctx.runner()?.run_container(&spec, &ctx.cancellation).await?;
        if let Err(err) = volume.cleanup().await {
            ctx.log_warn(&format!("volume cleanup failed: {err}"));
        }

        let normalized = normalize(&raw.stdout);
        Ok(json!({
            "records": normalized.records,
            "errors": normalized.errors,
        }))
    }
}

// ── Demo container component: file-payload scanner ──────────────────────────

/// Writes caller-named files into the volume before scanning them — the
/// path where attacker-controlled names must be stopped.
struct FileScan {
    meta: ComponentMetadata,
    inputs: PortSchema,
    params: PortSchema,
    outputs: PortSchema,
    template: ContainerSpec,
}

impl FileScan {
    fn new() -> Self {
        Self {
            meta: ComponentMetadata::new(
                "secrets.scan",
                "Secret Scanner",
                "Scan supplied files for leaked credentials",
            )
            .with_category("secrets"),
            inputs: PortSchema::builder()
                .port(Port::json("files", "Files").required())
                .build(),
            params: PortSchema::empty(),
            outputs: PortSchema::builder()
                .port(Port::list("records", "Records", ValueType::Json))
                .build(),
            template: ContainerSpec::new("scanner/secrets:latest", Duration::from_secs(300)),
        }
    }
}

#[async_trait]
impl Component for FileScan {
    fn metadata(&self) -> &ComponentMetadata {
        &self.meta
    }
    fn inputs(&self) -> &PortSchema {
        &self.inputs
    }
    fn parameters(&self) -> &PortSchema {
        &self.params
    }
    fn outputs(&self) -> &PortSchema {
        &self.outputs
    }
    fn runner_template(&self) -> RunnerSpec {
        RunnerSpec::Container(self.template.clone())
    }

    async fn execute(
        &self,
        request: ResolvedRequest,
        ctx: &ExecutionContext,
    ) -> Result<Value, ClassifiedError> {
        let files = request
            .input("files")
            .and_then(Value::as_object)
            .ok_or_else(|| ClassifiedError::validation("files must be an object"))?;

        let volume = ctx
            .volumes()?
            .allocate(ctx.tenant_id(), ctx.run_id())
            .await?;
        let entries: Vec<(String, Vec<u8>)> = files
            .iter()
            .map(|(name, content)| {
                let bytes = content.as_str().unwrap_or_default().as_bytes().to_vec();
                (name.clone(), bytes)
            })
            .collect();
        volume.populate(entries).await?;

        let spec = self
            .template
            .clone()
            .args(["filesystem", "/work", "--json"])
            .mount(volume.mount_spec("/work", true));
        let raw = ctx.runner()?.run_container(&spec, &ctx.cancellation).await?;
        if let Err(err) = volume.cleanup().await {
            ctx.log_warn(&format!("volume cleanup failed: {err}"));
        }

        Ok(json!({ "records": normalize(&raw.stdout).records }))
    }
}

// ── Demo inline component: reputation lookup ────────────────────────────────

/// HTTP-API-backed inline lookup. Documents its 404 contract: the upstream
/// uses 404 for "no reputation data", which is a valid zero-score result.
struct IntelLookup {
    meta: ComponentMetadata,
    inputs: PortSchema,
    params: PortSchema,
    outputs: PortSchema,
}

impl IntelLookup {
    fn new() -> Self {
        Self {
            meta: ComponentMetadata::new(
                "intel.lookup",
                "Reputation Lookup",
                "Look up an IP's abuse reputation",
            )
            .with_category("intel"),
            inputs: PortSchema::builder()
                .port(Port::text("ip", "IP Address").required())
                .build(),
            params: PortSchema::builder()
                .port(Port::text("api_url", "API URL").required())
                .build(),
            outputs: PortSchema::builder()
                .port(Port::number("score", "Score"))
                .port(Port::boolean("found", "Found"))
                .build(),
        }
    }
}

#[async_trait]
impl Component for IntelLookup {
    fn metadata(&self) -> &ComponentMetadata {
        &self.meta
    }
    fn inputs(&self) -> &PortSchema {
        &self.inputs
    }
    fn parameters(&self) -> &PortSchema {
        &self.params
    }
    fn outputs(&self) -> &PortSchema {
        &self.outputs
    }

    async fn execute(
        &self,
        request: ResolvedRequest,
        ctx: &ExecutionContext,
    ) -> Result<Value, ClassifiedError> {
        let ip = request
            .input_str("ip")
            .ok_or_else(|| ClassifiedError::validation("ip must be text"))?;
        let api_url = request.param_str("api_url").unwrap_or_default();

        let response = ctx
            .http()
            .get(format!("{api_url}/check/{ip}"))
            .send()
            .await?;

        // Upstream semantics: 404 means "no data on this indicator".
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(json!({ "score": 0, "found": false }));
        }
        if !response.status().is_success() {
            return Err(classify_status(response.status(), "reputation lookup"));
        }

        let body: Value = response.json().await?;
        Ok(json!({ "score": body["score"], "found": true }))
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry.register(Arc::new(SubdomainScan::new()));
    registry.register(Arc::new(FileScan::new()));
    registry.register(Arc::new(IntelLookup::new()));
    registry
}

fn context(backend: Arc<dyn ContainerBackend>, volume_root: &Path, key: &str) -> ExecutionContext {
    ExecutionContext::new(RunId::new(), TenantId::new("acme"), key.into())
        .with_runner(Arc::new(Runner::new(backend)))
        .with_volumes(Arc::new(VolumeManager::new(volume_root)))
}

fn volume_entries(root: &Path) -> usize {
    std::fs::read_dir(root).map(|dir| dir.count()).unwrap_or(0)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn default_rate_limit_reaches_container_command() {
    let ndjson = "{\"host\":\"a.example.com\"}\ngarbage line {{\n{\"host\":\"b.example.com\"}\n";
    let backend = RecordingBackend::new(RawOutput::new(ndjson, "", 0));
    let root = tempfile::tempdir().unwrap();

    let registry = registry();
    let component = registry.get("subdomain.enumerate").unwrap();

    let resolved = ExecutionRequest::new()
        .with_input("targets", json!(["example.com"]))
        .resolve(component.as_ref())
        .unwrap();
    assert_eq!(resolved.param_i64("rate_limit"), Some(150));

    let ctx = context(backend.clone(), root.path(), "subdomain.enumerate");
    let output = component.execute(resolved, &ctx).await.unwrap();

    // The declared default became a literal flag pair in the command.
    let spec = backend.last_spec();
    assert!(
        spec.command
            .windows(2)
            .any(|pair| pair == ["-rate-limit", "150"]),
        "command was {:?}",
        spec.command
    );
    assert_eq!(spec.image, "scanner/subenum:latest");

    // The volume was mounted read-only at the documented target.
    assert_eq!(spec.volumes.len(), 1);
    assert_eq!(spec.volumes[0].target, "/work");
    assert!(spec.volumes[0].read_only);

    // Malformed line skipped, valid lines kept, diagnostics surfaced.
    assert_eq!(output["records"].as_array().unwrap().len(), 2);
    assert_eq!(output["errors"].as_array().unwrap().len(), 1);

    // The volume is gone once the invocation ends.
    assert_eq!(volume_entries(root.path()), 0);
}

#[tokio::test]
async fn explicit_rate_limit_overrides_default() {
    let backend = RecordingBackend::new(RawOutput::empty());
    let root = tempfile::tempdir().unwrap();

    let registry = registry();
    let component = registry.get("subdomain.enumerate").unwrap();
    let resolved = ExecutionRequest::new()
        .with_input("targets", json!(["example.com"]))
        .with_param("rate_limit", json!("25")) // form-field string, coerced
        .resolve(component.as_ref())
        .unwrap();

    let ctx = context(backend.clone(), root.path(), "subdomain.enumerate");
    component.execute(resolved, &ctx).await.unwrap();

    let spec = backend.last_spec();
    assert!(
        spec.command
            .windows(2)
            .any(|pair| pair == ["-rate-limit", "25"])
    );
}

#[tokio::test]
async fn empty_tool_output_is_valid_zero_count() {
    let backend = RecordingBackend::new(RawOutput::empty());
    let root = tempfile::tempdir().unwrap();

    let registry = registry();
    let component = registry.get("subdomain.enumerate").unwrap();
    let resolved = ExecutionRequest::new()
        .with_input("targets", json!(["example.com"]))
        .resolve(component.as_ref())
        .unwrap();

    let ctx = context(backend, root.path(), "subdomain.enumerate");
    let output = component.execute(resolved, &ctx).await.unwrap();

    assert_eq!(output["records"].as_array().unwrap().len(), 0);
    assert_eq!(output["errors"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn traversal_filename_rejected_before_container_starts() {
    let backend = RecordingBackend::new(RawOutput::empty());
    let root = tempfile::tempdir().unwrap();

    let registry = registry();
    let component = registry.get("secrets.scan").unwrap();
    let resolved = ExecutionRequest::new()
        .with_input(
            "files",
            json!({
                "notes.txt": "aws_secret_key = ...",
                "../../etc/passwd": "pwned"
            }),
        )
        .resolve(component.as_ref())
        .unwrap();

    let ctx = context(backend.clone(), root.path(), "secrets.scan");
    let err = component.execute(resolved, &ctx).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.message().contains("../../etc/passwd"));
    // No container was ever launched, and no volume survived the failure.
    assert_eq!(backend.launches(), 0);
    assert_eq!(volume_entries(root.path()), 0);
}

#[tokio::test(start_paused = true)]
async fn timeout_classifies_and_cleans_up_volume() {
    let backend = HangingBackend::new();
    let root = tempfile::tempdir().unwrap();

    let registry = registry();
    let component = registry.get("subdomain.enumerate").unwrap();
    let resolved = ExecutionRequest::new()
        .with_input("targets", json!(["example.com"]))
        .resolve(component.as_ref())
        .unwrap();

    let ctx = context(backend.clone(), root.path(), "subdomain.enumerate");
    let err = component.execute(resolved, &ctx).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    // The backend saw the cancel and terminated the container.
    assert!(backend.terminated.load(Ordering::SeqCst));
    // The scope guard removed the volume even on the error path.
    assert_eq!(volume_entries(root.path()), 0);
}

#[tokio::test]
async fn missing_runner_surfaces_configuration_error() {
    let registry = registry();
    let component = registry.get("subdomain.enumerate").unwrap();
    let resolved = ExecutionRequest::new()
        .with_input("targets", json!(["example.com"]))
        .resolve(component.as_ref())
        .unwrap();

    let root = tempfile::tempdir().unwrap();
    // Volumes attached, but no runner.
    let ctx = ExecutionContext::new(
        RunId::new(),
        TenantId::new("acme"),
        "subdomain.enumerate".into(),
    )
    .with_volumes(Arc::new(VolumeManager::new(root.path())));

    let err = component.execute(resolved, &ctx).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[tokio::test]
async fn wholesale_validation_reports_every_field() {
    let registry = registry();
    let component = registry.get("subdomain.enumerate").unwrap();

    let err = ExecutionRequest::new()
        .with_param("rate_limit", json!("fast"))
        .with_param("surprise", json!(1))
        .resolve(component.as_ref())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    let fields = err.field_errors().unwrap();
    assert!(fields.contains_key("targets"));
    assert!(fields.contains_key("rate_limit"));
    assert!(fields.contains_key("surprise"));
}

// ── Inline component against a live HTTP server ─────────────────────────────

mod inline {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn inline_context(key: &str) -> ExecutionContext {
        ExecutionContext::new(RunId::new(), TenantId::new("acme"), key.into())
    }

    fn resolved_for(server: &MockServer, ip: &str) -> ResolvedRequest {
        let registry = registry();
        let component = registry.get("intel.lookup").unwrap();
        ExecutionRequest::new()
            .with_input("ip", json!(ip))
            .with_param("api_url", json!(server.uri()))
            .resolve(component.as_ref())
            .unwrap()
    }

    #[tokio::test]
    async fn successful_lookup_returns_score() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check/1.2.3.4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"score": 87})))
            .mount(&server)
            .await;

        let registry = registry();
        let component = registry.get("intel.lookup").unwrap();
        let resolved = resolved_for(&server, "1.2.3.4");

        let output = component
            .execute(resolved, &inline_context("intel.lookup"))
            .await
            .unwrap();
        assert_eq!(output, json!({"score": 87, "found": true}));
    }

    #[tokio::test]
    async fn not_found_is_a_zero_score_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let registry = registry();
        let component = registry.get("intel.lookup").unwrap();
        let resolved = resolved_for(&server, "10.0.0.1");

        let output = component
            .execute(resolved, &inline_context("intel.lookup"))
            .await
            .unwrap();
        assert_eq!(output, json!({"score": 0, "found": false}));
    }

    #[tokio::test]
    async fn upstream_outage_classifies_as_service() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let registry = registry();
        let component = registry.get("intel.lookup").unwrap();
        let resolved = resolved_for(&server, "1.2.3.4");

        let err = component
            .execute(resolved, &inline_context("intel.lookup"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert!(err.is_retryable_by_convention());
    }
}
