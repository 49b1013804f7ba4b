pub mod codegen;
pub mod error;
pub mod ir;
pub mod tree;

pub use codegen::{generate_single, generate_terraform, GenerationState};
pub use error::{EmitError, GenerationError, ValidationError};
pub use ir::{EndpointDescriptor, HttpMethod};
pub use tree::{resource_name, segment_path, ResourceTree};

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use url::Url;

/// Load endpoints from a TOML file.
///
/// Rows with a blank path or backend URI are skipped. Paths and URIs are
/// trimmed, and each kept backend URI must parse as an absolute URL.
pub fn load_endpoints(path: &str) -> Result<Vec<EndpointDescriptor>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read endpoints file {}", path))?;
    let raw: ir::EndpointsFile =
        toml::from_str(&text).with_context(|| format!("failed to parse endpoints file {}", path))?;
    tracing::debug!(file = path, rows = raw.endpoints.len(), "loaded endpoints file");
    validate_rows(raw.endpoints)
}

/// Turn raw rows into descriptors, applying the same checks as [`load_endpoints`].
pub fn validate_rows(rows: Vec<ir::EndpointRow>) -> Result<Vec<EndpointDescriptor>> {
    let total = rows.len();
    let kept: Vec<_> = rows
        .into_iter()
        .filter(|row| !row.path.trim().is_empty() && !row.backend_uri.trim().is_empty())
        .collect();
    if kept.len() < total {
        tracing::warn!(
            skipped = total - kept.len(),
            "skipping endpoints without both a path and a backend URI"
        );
    }
    if kept.is_empty() {
        anyhow::bail!(
            "Please add at least one valid endpoint with both endpoint path and backend URI"
        );
    }

    let mut endpoints = Vec::with_capacity(kept.len());
    for (index, row) in kept.into_iter().enumerate() {
        let backend_uri = row.backend_uri.trim();
        if Url::parse(backend_uri).is_err() {
            anyhow::bail!(
                "Endpoint {}: Please enter a valid backend URI (e.g., https://api.example.com/path)",
                index + 1
            );
        }
        endpoints.push(EndpointDescriptor {
            path: row.path.trim().to_string(),
            method: row.method,
            backend_uri: backend_uri.to_string(),
            api_key_required: row.api_key_required,
        });
    }
    Ok(endpoints)
}

/// Force the API key requirement on (or off) for every endpoint.
pub fn apply_api_key_override(endpoints: &mut [EndpointDescriptor], required: bool) {
    for endpoint in endpoints {
        endpoint.api_key_required = required;
    }
}

/// Report problems generation does not reject on its own: distinct paths that
/// normalize to the same resource name, and endpoints that produce the same
/// method block.
pub fn lint_endpoints(endpoints: &[EndpointDescriptor]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut tree = ResourceTree::default();
    let mut method_owners: BTreeMap<String, Vec<usize>> = BTreeMap::new();

    for (index, endpoint) in endpoints.iter().enumerate() {
        match segment_path(&endpoint.path) {
            Ok(segments) => {
                tree.insert_segments(&segments);
                let name = codegen::method_name(&resource_name(&segments), endpoint.method);
                method_owners.entry(name).or_default().push(index + 1);
            }
            Err(e) => errors.push(format!("Endpoint {}: {}", index + 1, e)),
        }
    }

    let mut paths_by_name: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
    for node in tree.nodes() {
        paths_by_name
            .entry(node.identifier.as_str())
            .or_default()
            .insert(node.path());
    }
    for (name, paths) in &paths_by_name {
        if paths.len() > 1 {
            errors.push(format!(
                "Paths {} all map to resource name {}",
                paths.iter().cloned().collect::<Vec<_>>().join(", "),
                name
            ));
        }
    }

    for (name, owners) in &method_owners {
        if owners.len() > 1 {
            errors.push(format!(
                "Endpoints {} all define method {}",
                owners
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                name
            ));
        }
    }

    errors
}

/// Sample endpoint set covering shared prefixes and multiple verbs on one path.
pub fn example_endpoints() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::new(
            "/person/users/api/auth",
            HttpMethod::Post,
            "https://personapi.api.com/person/users/api/auth",
        )
        .with_api_key(true),
        EndpointDescriptor::new(
            "/person/users/api/profile",
            HttpMethod::Get,
            "https://personapi.api.com/person/users/api/profile",
        )
        .with_api_key(true),
        EndpointDescriptor::new(
            "/person/users/api/profile",
            HttpMethod::Put,
            "https://personapi.api.com/person/users/api/profile",
        )
        .with_api_key(true),
        EndpointDescriptor::new(
            "/orders/api/create",
            HttpMethod::Post,
            "https://orderapi.api.com/orders/api/create",
        ),
        EndpointDescriptor::new(
            "/orders/api/status",
            HttpMethod::Get,
            "https://orderapi.api.com/orders/api/status",
        ),
    ]
}

/// [`example_endpoints`] rendered as an endpoints file.
pub fn example_endpoints_toml() -> Result<String> {
    let file = ir::EndpointsFile {
        endpoints: example_endpoints()
            .into_iter()
            .map(|e| ir::EndpointRow {
                path: e.path,
                method: e.method,
                backend_uri: e.backend_uri,
                api_key_required: e.api_key_required,
            })
            .collect(),
    };
    Ok(toml::to_string_pretty(&file)?)
}
