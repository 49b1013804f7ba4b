use super::{method_name, resource_ref, REST_API_ID};
use crate::error::EmitError;
use crate::ir::EndpointDescriptor;
use crate::tree::{resource_name, segment_path};

/// Emit one HTTP_PROXY `aws_api_gateway_integration` block per endpoint.
/// The backend URI is written as given.
pub fn generate_integrations(endpoints: &[EndpointDescriptor]) -> Result<String, EmitError> {
    let mut out = String::new();

    for endpoint in endpoints {
        let resource = resource_name(&segment_path(&endpoint.path)?);
        let method = method_name(&resource, endpoint.method);
        let method_ref = format!("aws_api_gateway_method.{}", method);

        out.push_str(&format!(
            "resource \"aws_api_gateway_integration\" \"{}_integration\" {{\n",
            method
        ));
        out.push_str(&format!("  rest_api_id = {}\n", REST_API_ID));
        out.push_str(&format!("  resource_id = {}.id\n", resource_ref(&resource)));
        out.push_str(&format!("  http_method = {}.http_method\n", method_ref));
        out.push('\n');
        out.push_str(&format!(
            "  integration_http_method = \"{}\"\n",
            endpoint.method.as_str()
        ));
        out.push_str("  type                    = \"HTTP_PROXY\"\n");
        out.push_str(&format!("  uri                     = \"{}\"\n", endpoint.backend_uri));
        out.push_str(&format!("  depends_on              = [{}]\n", method_ref));
        out.push_str("}\n\n");
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::HttpMethod;

    #[test]
    fn integration_block_layout() {
        let endpoints = vec![EndpointDescriptor::new(
            "/orders/api/create",
            HttpMethod::Post,
            "https://orderapi.api.com/orders/api/create?x=1&y=%20",
        )];
        let out = generate_integrations(&endpoints).unwrap();
        let expected = "\
resource \"aws_api_gateway_integration\" \"orders_api_create_post_integration\" {
  rest_api_id = aws_api_gateway_rest_api.this.id
  resource_id = aws_api_gateway_resource.orders_api_create.id
  http_method = aws_api_gateway_method.orders_api_create_post.http_method

  integration_http_method = \"POST\"
  type                    = \"HTTP_PROXY\"
  uri                     = \"https://orderapi.api.com/orders/api/create?x=1&y=%20\"
  depends_on              = [aws_api_gateway_method.orders_api_create_post]
}

";
        assert_eq!(out, expected);
    }
}
