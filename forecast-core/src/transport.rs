use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::FetchError;

pub mod http;

pub use http::HttpTransport;

/// Raw result of a GET: the status code and the body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP collaborator the provider talks to. It owns the base address.
#[async_trait]
pub trait ForecastTransport: Send + Sync + Debug {
    fn base_address(&self) -> String;

    /// Issue a GET for `endpoint`, relative to the base address.
    async fn get(&self, endpoint: &str) -> Result<TransportResponse, FetchError>;
}
