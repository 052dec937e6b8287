use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use super::{ForecastTransport, TransportResponse};
use crate::error::FetchError;

/// [`ForecastTransport`] backed by a `reqwest` client with a fixed base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    http: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid forecast API base URL: {base_url}"))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { base_url, http })
    }

    pub fn with_client(base_url: Url, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[async_trait]
impl ForecastTransport for HttpTransport {
    fn base_address(&self) -> String {
        self.base_url.to_string()
    }

    async fn get(&self, endpoint: &str) -> Result<TransportResponse, FetchError> {
        let url = self.base_url.join(endpoint).map_err(|source| FetchError::Endpoint {
            base: self.base_url.to_string(),
            endpoint: endpoint.to_string(),
            source,
        })?;

        let res = self.http.get(url).send().await?;
        let status = res.status().as_u16();
        let body = res.text().await?;

        Ok(TransportResponse { status, body })
    }
}
