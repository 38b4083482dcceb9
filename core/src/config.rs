//! Region and endpoint resolution for the client.

use serde::Deserialize;

/// Region used for signing and endpoint resolution when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Service endpoint prefix API calls are made to.
pub const SERVICE_NAME: &str = "api.mediatailor";

/// Service id for regions and endpoints metadata.
pub const ENDPOINTS_ID: &str = SERVICE_NAME;

/// User-facing client settings. Unset (or empty) values fall back to
/// `DEFAULT_REGION` and the public regional endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

impl ClientConfig {
    /// Read `AWS_REGION` (then `AWS_DEFAULT_REGION`) and `MEDIATAILOR_ENDPOINT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            region: non_empty("AWS_REGION").or_else(|| non_empty("AWS_DEFAULT_REGION")),
            endpoint: non_empty("MEDIATAILOR_ENDPOINT"),
        }
    }

    pub fn resolved_region(&self) -> String {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REGION)
            .to_string()
    }

    pub fn resolved_endpoint(&self) -> String {
        match self.endpoint.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{SERVICE_NAME}.{}.amazonaws.com", self.resolved_region()),
        }
    }
}
