//! Hand-crafted oneM2M HTTP-binding client.
//!
//! Create is a POST whose content type carries the resource-type code
//! (`application/json;ty=2`); retrieve is a GET. The originator rides in
//! `X-M2M-Origin`, the request ticket in `X-M2M-RI`, and the CSE reports
//! its own status in `X-M2M-RSC` alongside the HTTP status.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

use meterlink_common::{Credentials, ResourceAddress, ServerEndpoint};

use crate::client::{ClientError, Outcome, ResourceClient};
use crate::resources::{Resource, ResourceKind};

/// Request header carrying the originator credentials.
const HDR_ORIGIN: &str = "X-M2M-Origin";
/// Request header carrying the opaque request ticket.
const HDR_REQUEST_ID: &str = "X-M2M-RI";
/// Response header carrying the oneM2M status code.
const HDR_STATUS: &str = "X-M2M-RSC";

/// Async oneM2M client over the HTTP binding.
pub struct HttpResourceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpResourceClient {
    /// Build a client for the given CSE endpoint.
    ///
    /// The originator header is injected on every request; `timeout`
    /// bounds each individual call.
    pub fn new(
        endpoint: &ServerEndpoint,
        credentials: &Credentials,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();

        let origin = HeaderValue::from_str(&credentials.originator())
            .map_err(|e| ClientError::Header(format!("originator: {}", e)))?;
        headers.insert(HDR_ORIGIN, origin);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let base_url = Url::parse(&format!("http://{}/", endpoint.authority()))
            .map_err(|e| ClientError::BaseUrl(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// Resolve a resource address against the CSE base URL.
    fn url(&self, address: &ResourceAddress) -> Result<Url, ClientError> {
        self.base_url
            .join(address.as_str())
            .map_err(|_| ClientError::Address(address.as_str().to_string()))
    }

    /// Fold an HTTP response into an [`Outcome`].
    async fn outcome(resp: reqwest::Response) -> Result<Outcome, ClientError> {
        let http_status = resp.status().as_u16();

        let rsc = resp
            .headers()
            .get(HDR_STATUS)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u16>().ok());

        let body = resp.text().await.map_err(ClientError::from)?;
        let response_type = response_type_of(&body);

        Ok(Outcome {
            status: rsc.unwrap_or(http_status),
            response_type,
            body,
        })
    }
}

/// Tag the response body by its `m2m:*` envelope key, if it has one.
fn response_type_of(body: &str) -> Option<ResourceKind> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    object
        .keys()
        .find_map(|key| ResourceKind::from_envelope_key(key))
}

impl ResourceClient for HttpResourceClient {
    async fn create_resource(
        &self,
        parent: &ResourceAddress,
        ticket: &str,
        resource: &Resource,
    ) -> Result<Outcome, ClientError> {
        let url = self.url(parent)?;
        let content_type = format!("application/json;ty={}", resource.kind().type_code());

        debug!("POST {} ({})", url, resource.kind());

        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .header(HDR_REQUEST_ID, ticket)
            .body(resource.to_body().to_string())
            .send()
            .await?;

        Self::outcome(resp).await
    }

    async fn retrieve_resource(
        &self,
        target: &ResourceAddress,
        ticket: &str,
    ) -> Result<Outcome, ClientError> {
        let url = self.url(target)?;

        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(HDR_REQUEST_ID, ticket)
            .send()
            .await?;

        Self::outcome(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_type_of() {
        assert_eq!(
            response_type_of(r#"{"m2m:ae": {"rn": "MY_METER"}}"#),
            Some(ResourceKind::ApplicationEntity)
        );
        assert_eq!(
            response_type_of(r#"{"m2m:cin": {"con": "{\"kWH\": 3}"}}"#),
            Some(ResourceKind::ContentInstance)
        );
        assert_eq!(response_type_of(r#"{"m2m:dbg": "error"}"#), None);
        assert_eq!(response_type_of("not json"), None);
        assert_eq!(response_type_of(""), None);
    }

    #[test]
    fn test_base_url_from_endpoint() {
        let endpoint: ServerEndpoint = "10.0.0.5:8282".parse().unwrap();
        let client =
            HttpResourceClient::new(&endpoint, &Credentials::default(), Duration::from_secs(5))
                .unwrap();

        let url = client
            .url(&ResourceAddress::new("/in-cse/in-name/MY_METER"))
            .unwrap();
        assert_eq!(url.as_str(), "http://10.0.0.5:8282/in-cse/in-name/MY_METER");
    }
}
