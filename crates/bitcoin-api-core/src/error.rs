use crate::constants::EndpointType;
use crate::types::HttpMethod;

/// Every failure surfaced by the client. Callers branch on the variant;
/// the message is for humans.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(
        "request to {endpoint_type} {resource} - {method} endpoint requires token \
         (see {}) for more info",
        .endpoint_type.docs_url()
    )]
    MissingToken {
        endpoint_type: EndpointType,
        resource: String,
        method: HttpMethod,
    },

    #[error("{method} request to {resource} failed - invalid API response: {snapshot}")]
    InvalidResponse {
        method: HttpMethod,
        resource: String,
        snapshot: String,
    },

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("could not decode response body: {0}")]
    Decode(String),
}
