use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, header::CONTENT_TYPE};
use tracing::{debug, warn};

use crate::GraphQLRequest;
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Sends a request and hands back the raw response body.
///
/// Implementations own retries, authentication and TLS; an error returned
/// here ends the operation.
#[async_trait]
pub trait Transport {
    async fn execute(&self, request: &GraphQLRequest) -> Result<Bytes>;
}

/// Posts requests as JSON to a single GraphQL endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    headers: HeaderMap,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        HttpTransport::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        HttpTransport {
            client,
            url: url.into(),
            headers: HeaderMap::new(),
        }
    }

    /// Headers sent with every request.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Config(format!("Invalid header name {}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| Error::Config(format!("Invalid value for header {}: {}", name, e)))?;
            headers.insert(header_name, header_value);
        }
        Ok(HttpTransport::new(config.endpoint.clone()).with_headers(headers))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &GraphQLRequest) -> Result<Bytes> {
        debug!(url = %self.url, operation = ?request.operation_name, "sending GraphQL request");

        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            warn!(url = %self.url, %status, "GraphQL endpoint returned non-success status");
            return Err(Error::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }
}
