use serde::{Deserialize, Serialize};
use serde_json::Value;

use argus_error::ClassifiedError;
use argus_schema::ValueMap;

use crate::component::Component;

/// Caller-supplied values for one invocation, keyed by port identifier.
///
/// Transient and unvalidated; [`resolve`](Self::resolve) turns it into a
/// [`ResolvedRequest`] or rejects it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Values arriving over graph edges, keyed by input port.
    #[serde(default)]
    pub inputs: ValueMap,
    /// Editor-configured values, keyed by parameter port.
    #[serde(default)]
    pub params: ValueMap,
}

impl ExecutionRequest {
    /// An empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one input value.
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }

    /// Set one parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Validate this request against a component's schemas.
    ///
    /// Both schemas are checked even when the first fails, so the caller
    /// sees every violation at once — the request is rejected wholesale,
    /// never silently coerced field-by-field.
    pub fn resolve(self, component: &dyn Component) -> Result<ResolvedRequest, ClassifiedError> {
        let inputs = component.inputs().parse(&self.inputs);
        let params = component.parameters().parse(&self.params);

        match (inputs, params) {
            (Ok(inputs), Ok(params)) => Ok(ResolvedRequest { inputs, params }),
            (Err(failure), Ok(_)) | (Ok(_), Err(failure)) => Err(failure.into()),
            (Err(input_failure), Err(param_failure)) => {
                Err(input_failure.merge(param_failure).into())
            }
        }
    }
}

/// A request that passed schema validation: defaults applied, coercions
/// done, every required port present and type-valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRequest {
    inputs: ValueMap,
    params: ValueMap,
}

impl ResolvedRequest {
    /// The validated input record.
    pub fn inputs(&self) -> &ValueMap {
        &self.inputs
    }

    /// The validated parameter record.
    pub fn params(&self) -> &ValueMap {
        &self.params
    }

    /// One input value.
    pub fn input(&self, key: &str) -> Option<&Value> {
        self.inputs.get(key)
    }

    /// One parameter value.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// A `list<text>` input as owned strings. Empty when absent.
    pub fn input_strings(&self, key: &str) -> Vec<String> {
        self.input(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A text input.
    pub fn input_str(&self, key: &str) -> Option<&str> {
        self.input(key).and_then(Value::as_str)
    }

    /// A text parameter.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.param(key).and_then(Value::as_str)
    }

    /// An integer parameter.
    pub fn param_i64(&self, key: &str) -> Option<i64> {
        self.param(key).and_then(Value::as_i64)
    }

    /// A float parameter (integers widen).
    pub fn param_f64(&self, key: &str) -> Option<f64> {
        self.param(key).and_then(Value::as_f64)
    }

    /// A boolean parameter.
    pub fn param_bool(&self, key: &str) -> Option<bool> {
        self.param(key).and_then(Value::as_bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ExecutionContext;
    use crate::metadata::ComponentMetadata;
    use argus_error::ErrorKind;
    use argus_schema::{Port, PortSchema, ValueType};
    use async_trait::async_trait;
    use serde_json::json;

    struct Probe {
        meta: ComponentMetadata,
        inputs: PortSchema,
        params: PortSchema,
        outputs: PortSchema,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                meta: ComponentMetadata::new("test.probe", "Probe", "test"),
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
                outputs: PortSchema::empty(),
            }
        }
    }

    #[async_trait]
    impl Component for Probe {
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
            _request: ResolvedRequest,
            _ctx: &ExecutionContext,
        ) -> Result<Value, ClassifiedError> {
            Ok(json!({}))
        }
    }

    #[test]
    fn resolve_applies_defaults() {
        let component = Probe::new();
        let resolved = ExecutionRequest::new()
            .with_input("targets", json!(["example.com"]))
            .resolve(&component)
            .unwrap();

        assert_eq!(resolved.param_i64("rate_limit"), Some(150));
        assert_eq!(resolved.input_strings("targets"), vec!["example.com"]);
    }

    #[test]
    fn resolve_collects_violations_from_both_schemas() {
        let component = Probe::new();
        let err = ExecutionRequest::new()
            .with_param("rate_limit", json!("fast"))
            .resolve(&component)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        let fields = err.field_errors().unwrap();
        assert!(fields.contains_key("targets"), "missing input reported");
        assert!(fields.contains_key("rate_limit"), "bad parameter reported");
    }

    #[test]
    fn resolve_coerces_marked_params() {
        let component = Probe::new();
        let resolved = ExecutionRequest::new()
            .with_input("targets", json!(["example.com"]))
            .with_param("rate_limit", json!("25"))
            .resolve(&component)
            .unwrap();

        assert_eq!(resolved.param_i64("rate_limit"), Some(25));
    }

    #[test]
    fn typed_accessors() {
        let component = Probe::new();
        let resolved = ExecutionRequest::new()
            .with_input("targets", json!(["a.com", "b.com"]))
            .with_param("rate_limit", json!(10))
            .resolve(&component)
            .unwrap();

        assert_eq!(resolved.input_strings("targets"), vec!["a.com", "b.com"]);
        assert_eq!(resolved.param_f64("rate_limit"), Some(10.0));
        assert!(resolved.param_bool("rate_limit").is_none());
        assert!(resolved.input_str("missing").is_none());
        assert!(resolved.input_strings("missing").is_empty());
    }

    #[test]
    fn serde_round_trip() {
        let request = ExecutionRequest::new()
            .with_input("targets", json!(["example.com"]))
            .with_param("rate_limit", json!(25));
        let json = serde_json::to_string(&request).unwrap();
        let back: ExecutionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
