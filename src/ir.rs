use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP verbs an API Gateway method can be bound to.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Lowercase form used in Terraform block names (`users_get`).
    pub fn as_lower(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| format!("unsupported HTTP method {}", s))
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

/// One API route to expose through the gateway.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub path: String,
    pub method: HttpMethod,
    /// Absolute URI of the HTTP backend. Emitted verbatim.
    pub backend_uri: String,
    #[serde(default)]
    pub api_key_required: bool,
}

impl EndpointDescriptor {
    pub fn new(path: impl Into<String>, method: HttpMethod, backend_uri: impl Into<String>) -> Self {
        EndpointDescriptor {
            path: path.into(),
            method,
            backend_uri: backend_uri.into(),
            api_key_required: false,
        }
    }

    pub fn with_api_key(mut self, required: bool) -> Self {
        self.api_key_required = required;
        self
    }
}

/// Raw row as it appears in an endpoints file, before blank rows are dropped.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EndpointRow {
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_method")]
    pub method: HttpMethod,
    #[serde(default)]
    pub backend_uri: String,
    #[serde(default)]
    pub api_key_required: bool,
}

fn default_method() -> HttpMethod {
    HttpMethod::Get
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct EndpointsFile {
    #[serde(default)]
    pub endpoints: Vec<EndpointRow>,
}
