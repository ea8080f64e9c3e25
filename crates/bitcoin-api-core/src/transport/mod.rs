//! HTTP transport abstraction.
//!
//! The dispatcher never talks to `reqwest` directly: it builds a
//! [`TransportRequest`] per call and hands it to an [`HttpTransport`].
//! [`ReqwestTransport`] is the production implementation; tests use the
//! recording spy in `mock`.

#[cfg(test)]
pub mod mock;
mod reqwest_adapter;

pub use reqwest_adapter::ReqwestTransport;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::error::ApiError;
use crate::types::HttpMethod;

/// Everything one outbound call needs. Constructed fresh for each dispatch,
/// so headers set for one call are never visible to another.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

/// What the transport hands back: the HTTP status and the decoded JSON body
/// (`None` when the response carried no JSON at all).
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub data: Option<serde_json::Value>,
}

/// Minimal HTTP capability the dispatcher relies on.
///
/// Implementations own TLS, pooling, and timeouts. They must not retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ApiError>;
}
