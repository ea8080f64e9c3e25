use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ApiError;

use super::{HttpTransport, TransportRequest, TransportResponse};

type Handler = Box<dyn Fn(&TransportRequest) -> Result<TransportResponse, ApiError> + Send + Sync>;

/// A recording transport for tests. Every call is captured before the
/// configured handler produces the response.
pub struct MockTransport {
    handler: Handler,
    calls: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            handler: Box::new(|_| {
                Ok(TransportResponse {
                    status: 200,
                    data: Some(serde_json::json!({ "statusCode": 200, "body": {} })),
                })
            }),
        }
    }

    pub fn calls(&self) -> Vec<TransportRequest> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call log poisoned").len()
    }
}

pub struct MockTransportBuilder {
    handler: Handler,
}

impl MockTransportBuilder {
    /// Always answer with `data` under a 200 transport status.
    pub fn with_data(self, data: Option<serde_json::Value>) -> Self {
        self.with_handler(move |_| {
            Ok(TransportResponse {
                status: 200,
                data: data.clone(),
            })
        })
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&TransportRequest) -> Result<TransportResponse, ApiError> + Send + Sync + 'static,
    {
        self.handler = Box::new(handler);
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            handler: self.handler,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ApiError> {
        let response = (self.handler)(&request);
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(request);
        response
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderMap;

    use super::*;
    use crate::types::HttpMethod;

    #[tokio::test]
    async fn records_every_call() {
        let transport = MockTransport::builder()
            .with_data(Some(serde_json::json!({ "statusCode": 201, "body": [] })))
            .build();

        for resource in ["a", "b"] {
            let response = transport
                .send(TransportRequest {
                    method: HttpMethod::Get,
                    url: format!("http://localhost/{resource}"),
                    headers: HeaderMap::new(),
                    body: None,
                })
                .await
                .expect("mock must answer");
            assert_eq!(response.data.expect("data must be set")["statusCode"], 201);
        }

        let urls: Vec<_> = transport.calls().into_iter().map(|c| c.url).collect();
        assert_eq!(urls, vec!["http://localhost/a", "http://localhost/b"]);
    }
}
