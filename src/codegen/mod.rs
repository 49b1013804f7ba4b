pub mod integrations;
pub mod methods;
pub mod resources;

use crate::error::GenerationError;
use crate::ir::{EndpointDescriptor, HttpMethod};
use crate::tree::ResourceTree;
use std::collections::HashSet;

pub const HEADER: &str = "# AWS API Gateway Resources\n\n";
pub const REST_API_ID: &str = "aws_api_gateway_rest_api.this.id";
pub const ROOT_RESOURCE_ID: &str = "aws_api_gateway_rest_api.this.root_resource_id";

/// Resource names already written during one generation call.
#[derive(Debug, Default)]
pub struct GenerationState {
    emitted: HashSet<String>,
}

impl GenerationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_emitted(&self, name: &str) -> bool {
        self.emitted.contains(name)
    }

    /// Returns `false` if the name was already recorded.
    pub fn mark_emitted(&mut self, name: &str) -> bool {
        self.emitted.insert(name.to_string())
    }

    pub fn emitted_count(&self) -> usize {
        self.emitted.len()
    }
}

pub(crate) fn resource_ref(name: &str) -> String {
    format!("aws_api_gateway_resource.{}", name)
}

pub(crate) fn method_name(resource: &str, method: HttpMethod) -> String {
    format!("{}_{}", resource, method.as_lower())
}

/// Build the full Terraform configuration for a set of endpoints.
///
/// Resource blocks for every path prefix come first (shared prefixes once),
/// then one method block and one integration block per endpoint. Any failure
/// aborts the whole call.
pub fn generate_terraform(endpoints: &[EndpointDescriptor]) -> Result<String, GenerationError> {
    let mut state = GenerationState::new();
    let result = generate_with_state(endpoints, &mut state);
    if let Err(e) = &result {
        tracing::warn!(error = %e, "terraform generation failed");
    }
    result
}

fn generate_with_state(
    endpoints: &[EndpointDescriptor],
    state: &mut GenerationState,
) -> Result<String, GenerationError> {
    let tree = ResourceTree::build(endpoints)?;

    let resources = resources::generate_resources(&tree, state)?;
    let methods = methods::generate_methods(endpoints)?;
    let integrations = integrations::generate_integrations(endpoints)?;

    tracing::info!(
        endpoints = endpoints.len(),
        resources = state.emitted_count(),
        "generated terraform configuration"
    );

    let mut out = String::with_capacity(
        HEADER.len() + resources.len() + methods.len() + integrations.len(),
    );
    out.push_str(HEADER);
    out.push_str(&resources);
    out.push_str(&methods);
    out.push_str(&integrations);
    Ok(out)
}

/// Configuration for a single endpoint without an API key.
pub fn generate_single(
    path: &str,
    method: HttpMethod,
    backend_uri: &str,
) -> Result<String, GenerationError> {
    generate_terraform(&[EndpointDescriptor::new(path, method, backend_uri)])
}
