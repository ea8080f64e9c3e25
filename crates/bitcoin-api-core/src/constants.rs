//! Fixed service coordinates: base URLs, documentation pointer, the token
//! header name, and the endpoint classification that decides whether a
//! token must be sent.

use serde::{Deserialize, Serialize};

/// Base URL for production (livenet) requests.
pub const LIVENET_BASE_URL: &str = "https://bitcoin-api.io/v3";

/// Base URL for testnet requests. Used whenever livenet mode is off.
pub const TESTNET_BASE_URL: &str = "https://api-bitcoin.io/v3";

/// Public documentation, referenced from missing-token errors.
pub const DOCS_URL: &str = "https://github.com/bitcoin-api/bitcoin-api";

/// Request header carrying the API token.
pub const TOKEN_HEADER: &str = "Token";

// ==============================================================================
// Endpoint Type
// ==============================================================================

/// Classifies a remote resource by the credential it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointType {
    /// No token needed.
    Public,
    /// Any issued token.
    GeneralToken,
    /// A token that has been activated.
    ActivatedToken,
}

impl EndpointType {
    pub fn requires_token(self) -> bool {
        match self {
            Self::Public => false,
            Self::GeneralToken | Self::ActivatedToken => true,
        }
    }

    /// Documentation anchor for this endpoint class, e.g.
    /// `<DOCS_URL>#general-token-endpoints`.
    pub fn docs_url(self) -> String {
        format!("{DOCS_URL}#{self}-endpoints")
    }
}

impl std::fmt::Display for EndpointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::GeneralToken => write!(f, "general-token"),
            Self::ActivatedToken => write!(f, "activated-token"),
        }
    }
}
