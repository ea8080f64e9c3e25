//! Request dispatch and envelope validation.
//!
//! [`dispatch`] is the single path every endpoint call goes through: resolve
//! the base URL for the network, enforce the token requirement, send one
//! request through the transport, and accept the reply only if it is a
//! well-formed success envelope.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::constants::TOKEN_HEADER;
use crate::error::ApiError;
use crate::transport::{HttpTransport, TransportRequest};
use crate::types::{HttpMethod, Network, RequestDescriptor, ResponseEnvelope};

/// Placeholder used in error snapshots when the response carried no data.
const NO_DATA_SENTINEL: &str = "N/A";

/// Join the network's base URL and `resource` with exactly one `/`.
pub fn compose_url(network: Network, resource: &str) -> String {
    join_url(network.base_url(), resource)
}

fn join_url(base: &str, resource: &str) -> String {
    let base = base.trim_end_matches('/');
    let resource = resource.trim_start_matches('/');
    format!("{base}/{resource}")
}

/// Send `descriptor` through `transport` and return the validated envelope.
///
/// Fails with [`ApiError::MissingToken`] before any I/O when a token is
/// required but absent or empty. Transport failures are returned unchanged.
/// A reply that is not `{ statusCode: 2xx, body: <object|array> }` fails with
/// [`ApiError::InvalidResponse`].
pub async fn dispatch(
    transport: &dyn HttpTransport,
    descriptor: &RequestDescriptor,
) -> Result<ResponseEnvelope, ApiError> {
    let RequestDescriptor {
        endpoint_type,
        network,
        resource,
        method,
        ..
    } = descriptor;

    let url = compose_url(*network, resource);

    let mut headers = HeaderMap::new();
    if endpoint_type.requires_token() {
        let token = descriptor
            .usable_token()
            .ok_or_else(|| ApiError::MissingToken {
                endpoint_type: *endpoint_type,
                resource: resource.clone(),
                method: *method,
            })?;
        let (name, value) = token_header(token)?;
        headers.insert(name, value);
    }

    let body = match method {
        HttpMethod::Get => None,
        HttpMethod::Post => descriptor.body.clone().filter(|body| !is_blank(body)),
    };

    debug!(
        api.method = %method,
        api.url = %url,
        api.endpoint_type = %endpoint_type,
        api.has_body = body.is_some(),
        "api request"
    );

    let response = transport
        .send(TransportRequest {
            method: *method,
            url,
            headers,
            body,
        })
        .await?;

    debug!(
        api.method = %method,
        api.resource = %resource,
        http.status = response.status,
        "api response"
    );

    let data = response.data;
    validate_envelope(data.as_ref()).ok_or_else(|| ApiError::InvalidResponse {
        method: *method,
        resource: resource.clone(),
        snapshot: snapshot(data.as_ref()),
    })
}

fn token_header(token: &str) -> Result<(HeaderName, HeaderValue), ApiError> {
    let name = HeaderName::from_bytes(TOKEN_HEADER.as_bytes())
        .map_err(|e| ApiError::InvalidConfig(format!("invalid token header name: {e}")))?;
    let mut value = HeaderValue::from_str(token)
        .map_err(|e| ApiError::InvalidConfig(format!("token is not a valid header value: {e}")))?;
    value.set_sensitive(true);
    Ok((name, value))
}

// ==============================================================================
// Envelope Validation
// ==============================================================================

/// Accept `data` only if it is an object with an integral `statusCode` in
/// `[200, 300)` and a `body` that is a JSON object or array. `200.0` counts
/// as integral.
fn validate_envelope(data: Option<&serde_json::Value>) -> Option<ResponseEnvelope> {
    let data = data?;

    let status_code = data
        .get("statusCode")
        .and_then(serde_json::Value::as_f64)
        .filter(|code| code.fract() == 0.0 && (200.0..300.0).contains(code))?;

    let body = data
        .get("body")
        .filter(|body| body.is_object() || body.is_array())?;

    Some(ResponseEnvelope {
        // Range-checked above.
        status_code: status_code as u16,
        body: body.clone(),
    })
}

/// JSON rendering of whatever came back, or the quoted sentinel when the
/// response carried nothing usable.
fn snapshot(data: Option<&serde_json::Value>) -> String {
    match data {
        Some(value) if !is_blank(value) => value.to_string(),
        _ => serde_json::Value::from(NO_DATA_SENTINEL).to_string(),
    }
}

fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => false,
    }
}
