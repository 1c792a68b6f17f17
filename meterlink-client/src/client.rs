//! The resource-client capability trait and call outcomes.

use thiserror::Error;

use meterlink_common::ResourceAddress;

use crate::resources::{Resource, ResourceKind};

/// Errors raised by a resource client.
///
/// These cover the transport only; a CSE that answers with a non-success
/// status code is NOT an error (see [`Outcome`]), so the best-effort caller
/// can log the status and carry on.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid base URL: {0}")]
    BaseUrl(String),

    #[error("Invalid address '{0}'")]
    Address(String),

    #[error("Invalid header value: {0}")]
    Header(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Outcome of a create or retrieve call.
///
/// Inspected for logging and diagnostics only; callers never branch on it
/// beyond success/failure reporting.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// oneM2M response status code from `X-M2M-RSC` (e.g. 2001 "created"),
    /// falling back to the HTTP status when the CSE omits the header.
    pub status: u16,

    /// Resource type tagged in the response body envelope, when present.
    pub response_type: Option<ResourceKind>,

    /// Raw response body, kept for diagnostics.
    pub body: String,
}

impl Outcome {
    /// Whether the status code signals success (oneM2M 2xxx or HTTP 2xx).
    pub fn is_success(&self) -> bool {
        matches!(self.status, 200..=299 | 2000..=2999)
    }
}

/// Capability set for talking to the remote resource tree.
///
/// The provisioning pass and the publisher loop are written against this
/// trait; tests substitute a recording fake, production uses
/// [`crate::HttpResourceClient`]. The `ticket` is the opaque per-request
/// identifier the CSE requires; it is forwarded verbatim, never interpreted.
#[allow(async_fn_in_trait)]
pub trait ResourceClient {
    /// Create `resource` as a child of `parent`.
    async fn create_resource(
        &self,
        parent: &ResourceAddress,
        ticket: &str,
        resource: &Resource,
    ) -> Result<Outcome, ClientError>;

    /// Retrieve the resource at `target`.
    async fn retrieve_resource(
        &self,
        target: &ResourceAddress,
        ticket: &str,
    ) -> Result<Outcome, ClientError>;
}
