use super::{resource_ref, GenerationState, REST_API_ID, ROOT_RESOURCE_ID};
use crate::error::EmitError;
use crate::tree::{ParentPath, ResourceTree};

/// Emit one `aws_api_gateway_resource` block per path prefix, shallowest first.
///
/// Names already recorded in `state` are skipped, so two prefixes that normalize
/// to the same name produce a single block.
pub fn generate_resources(tree: &ResourceTree, state: &mut GenerationState) -> Result<String, EmitError> {
    let mut out = String::new();

    for node in tree.by_depth() {
        if state.is_emitted(&node.identifier) {
            tracing::debug!(path = %node.path(), name = %node.identifier, "resource already emitted");
            continue;
        }

        let parent_name = match &node.parent {
            ParentPath::Root => None,
            ParentPath::Path(parent_path) => {
                let parent = tree.get(parent_path).ok_or_else(|| EmitError::MissingParent {
                    path: node.path(),
                    parent: parent_path.clone(),
                })?;
                Some(parent.identifier.as_str())
            }
        };
        let parent_reference = match parent_name {
            None => ROOT_RESOURCE_ID.to_string(),
            Some(name) => format!("{}.id", resource_ref(name)),
        };

        out.push_str(&format!(
            "resource \"aws_api_gateway_resource\" \"{}\" {{\n",
            node.identifier
        ));
        out.push_str(&format!("  rest_api_id = {}\n", REST_API_ID));
        out.push_str(&format!("  parent_id   = {}\n", parent_reference));
        out.push_str(&format!("  path_part   = \"{}\"\n", node.last_segment));
        if let Some(name) = parent_name {
            out.push_str(&format!("  depends_on  = [{}]\n", resource_ref(name)));
        }
        out.push_str("}\n\n");

        state.mark_emitted(&node.identifier);
    }

    Ok(out)
}
