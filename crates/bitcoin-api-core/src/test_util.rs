//! Shared helpers for `bitcoin-api-core` unit tests.

use std::sync::Once;

use crate::constants::EndpointType;
use crate::types::{HttpMethod, RequestDescriptor};

static TRACING_INIT: Once = Once::new();

pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bitcoin_api_core=debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A service envelope as the remote API would send it.
pub fn envelope(status_code: u16, body: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "statusCode": status_code, "body": body })
}

pub fn general_token_get(resource: &str, token: Option<&str>) -> RequestDescriptor {
    RequestDescriptor::new(EndpointType::GeneralToken, HttpMethod::Get, resource)
        .with_token(token.map(str::to_owned))
}

pub fn public_get(resource: &str) -> RequestDescriptor {
    RequestDescriptor::new(EndpointType::Public, HttpMethod::Get, resource)
}
