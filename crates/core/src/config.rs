//! Storage client configuration
//!
//! Collected by the CLI from flags and environment, consumed by the S3
//! adapter when it builds its client.

use crate::credentials::Credentials;

/// Region used for bucket lookups when nothing else is configured
pub const DEFAULT_REGION: &str = "us-west-2";

/// Settings for building a storage client
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Region of the bootstrap client; per-request regions come from the
    /// region cache
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services
    pub endpoint_url: Option<String>,

    /// Static credentials; the SDK default chain is used when absent
    pub credentials: Option<Credentials>,
}

impl ClientConfig {
    /// Whether requests must use path-style addressing
    ///
    /// S3-compatible endpoints rarely support virtual-hosted buckets.
    pub fn force_path_style(&self) -> bool {
        self.endpoint_url.is_some()
    }
}
