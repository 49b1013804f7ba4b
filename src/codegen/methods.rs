use super::{method_name, resource_ref, REST_API_ID};
use crate::error::EmitError;
use crate::ir::EndpointDescriptor;
use crate::tree::{resource_name, segment_path};

/// Emit one `aws_api_gateway_method` block per endpoint, in input order.
pub fn generate_methods(endpoints: &[EndpointDescriptor]) -> Result<String, EmitError> {
    let mut out = String::new();

    for endpoint in endpoints {
        let resource = resource_name(&segment_path(&endpoint.path)?);
        let name = method_name(&resource, endpoint.method);

        out.push_str(&format!("resource \"aws_api_gateway_method\" \"{}\" {{\n", name));
        out.push_str(&format!("  rest_api_id   = {}\n", REST_API_ID));
        out.push_str(&format!("  resource_id   = {}.id\n", resource_ref(&resource)));
        out.push_str(&format!("  http_method   = \"{}\"\n", endpoint.method.as_str()));
        out.push_str("  authorization = \"NONE\"\n");
        out.push_str(&format!("  api_key_required = {}\n", endpoint.api_key_required));
        out.push_str(&format!("  depends_on    = [{}]\n", resource_ref(&resource)));
        out.push_str("}\n\n");
    }

    Ok(out)
}
