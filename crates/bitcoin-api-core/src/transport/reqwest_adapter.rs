use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::ApiError;
use crate::types::HttpMethod;

use super::{HttpTransport, TransportRequest, TransportResponse};

/// [`HttpTransport`] over a shared `reqwest::Client`.
///
/// Non-2xx statuses are reported as [`ApiError::HttpStatus`]. A 2xx response
/// whose body is empty or not JSON yields `data: None` and is left for the
/// dispatcher to reject.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::InvalidConfig(format!("build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Use a caller-configured client (custom TLS roots, proxies, timeouts).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ApiError> {
        let TransportRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => match &body {
                Some(body) => self.client.post(&url).json(body),
                None => self.client.post(&url),
            },
        };

        let response = builder
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("HTTP error: {e}")))?;
        let status = response.status();

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("read response body: {e}")))?;
        debug!(%method, %url, %status, body_len = text.len(), "http response");
        trace!(%method, %url, body = %text, "http response body");

        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let data = if text.trim().is_empty() {
            None
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!(%method, %url, error = %e, "response body is not JSON");
                    None
                }
            }
        };

        Ok(TransportResponse {
            status: status.as_u16(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::body::Bytes;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use reqwest::header::{HeaderMap, HeaderValue};

    use super::*;

    async fn spawn_server() -> SocketAddr {
        async fn echo_token(headers: AxumHeaders) -> Json<serde_json::Value> {
            let token = headers
                .get("token")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            Json(serde_json::json!({
                "statusCode": 200,
                "body": { "token": token }
            }))
        }

        async fn echo_body(body: Bytes) -> Json<serde_json::Value> {
            let received: serde_json::Value = if body.is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::from_slice(&body).expect("posted body must be JSON")
            };
            Json(serde_json::json!({
                "statusCode": 200,
                "body": { "received": received }
            }))
        }

        let app = Router::new()
            .route("/tokens", get(echo_token))
            .route("/withdraws", post(echo_body))
            .route(
                "/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
            )
            .route("/plain", get(|| async { "not json" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("test listener must bind");
        let addr = listener.local_addr().expect("listener must have an address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server must run");
        });
        addr
    }

    fn request(method: HttpMethod, url: String) -> TransportRequest {
        TransportRequest {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn get_sends_request_headers() {
        let addr = spawn_server().await;
        let transport = ReqwestTransport::new().expect("client must build");

        let mut req = request(HttpMethod::Get, format!("http://{addr}/tokens"));
        req.headers
            .insert("Token", HeaderValue::from_static("secret-token"));

        let response = transport.send(req).await.expect("request must succeed");
        assert_eq!(response.status, 200);
        let data = response.data.expect("json body must decode");
        assert_eq!(data["body"]["token"], serde_json::json!("secret-token"));
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let addr = spawn_server().await;
        let transport = ReqwestTransport::new().expect("client must build");

        let mut req = request(HttpMethod::Post, format!("http://{addr}/withdraws"));
        req.body = Some(serde_json::json!({ "amount": 0.001 }));

        let response = transport.send(req).await.expect("request must succeed");
        let data = response.data.expect("json body must decode");
        assert_eq!(
            data["body"]["received"],
            serde_json::json!({ "amount": 0.001 })
        );
    }

    #[tokio::test]
    async fn post_without_body_sends_nothing() {
        let addr = spawn_server().await;
        let transport = ReqwestTransport::new().expect("client must build");

        let req = request(HttpMethod::Post, format!("http://{addr}/withdraws"));

        let response = transport.send(req).await.expect("request must succeed");
        let data = response.data.expect("json body must decode");
        assert_eq!(data["body"]["received"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn non_success_status_is_transport_failure() {
        let addr = spawn_server().await;
        let transport = ReqwestTransport::new().expect("client must build");

        let err = transport
            .send(request(HttpMethod::Get, format!("http://{addr}/broken")))
            .await
            .expect_err("500 must fail");
        assert!(matches!(
            err,
            ApiError::HttpStatus { status: 500, ref body } if body == "upstream exploded"
        ));
    }

    #[tokio::test]
    async fn non_json_body_yields_no_data() {
        let addr = spawn_server().await;
        let transport = ReqwestTransport::new().expect("client must build");

        let response = transport
            .send(request(HttpMethod::Get, format!("http://{addr}/plain")))
            .await
            .expect("request must succeed");
        assert_eq!(response.status, 200);
        assert_eq!(response.data, None);
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("probe listener must bind");
        let addr = listener.local_addr().expect("listener must have an address");
        drop(listener);

        let transport = ReqwestTransport::new().expect("client must build");
        let err = transport
            .send(request(HttpMethod::Get, format!("http://{addr}/tokens")))
            .await
            .expect_err("closed port must fail");
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
