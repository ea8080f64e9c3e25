//! Request and response model shared by the dispatcher, the transport
//! layer, and the endpoint wrappers.

use bitcoin::Amount;
use serde::{Deserialize, Serialize};

use crate::constants::{EndpointType, LIVENET_BASE_URL, TESTNET_BASE_URL};

// ==============================================================================
// Network
// ==============================================================================

/// Which deployment of the service a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    Livenet,
    #[default]
    Testnet,
}

impl Network {
    pub fn from_livenet(livenet_mode: bool) -> Self {
        if livenet_mode {
            Self::Livenet
        } else {
            Self::Testnet
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Self::Livenet => LIVENET_BASE_URL,
            Self::Testnet => TESTNET_BASE_URL,
        }
    }

    /// The `bitcoin` network whose addresses this deployment accepts.
    pub fn bitcoin_network(self) -> bitcoin::Network {
        match self {
            Self::Livenet => bitcoin::Network::Bitcoin,
            Self::Testnet => bitcoin::Network::Testnet,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Livenet => write!(f, "livenet"),
            Self::Testnet => write!(f, "testnet"),
        }
    }
}

// ==============================================================================
// HTTP Method
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

// ==============================================================================
// Request Descriptor
// ==============================================================================

/// One logical endpoint call. Built once, handed to
/// [`dispatch`](crate::dispatch::dispatch) by reference, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub endpoint_type: EndpointType,
    pub token: Option<String>,
    pub network: Network,
    pub resource: String,
    pub body: Option<serde_json::Value>,
    pub method: HttpMethod,
}

impl RequestDescriptor {
    /// A testnet request with no token and no body.
    pub fn new(endpoint_type: EndpointType, method: HttpMethod, resource: impl Into<String>) -> Self {
        Self {
            endpoint_type,
            token: None,
            network: Network::Testnet,
            resource: resource.into(),
            body: None,
            method,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    pub fn with_body(mut self, body: Option<serde_json::Value>) -> Self {
        self.body = body;
        self
    }

    /// The token to send, if this endpoint class needs one. Empty strings
    /// count as absent.
    pub(crate) fn usable_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }
}

// ==============================================================================
// Response Envelope
// ==============================================================================

/// The service's own `{ statusCode, body }` wrapper, as returned on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: serde_json::Value,
}

// ==============================================================================
// Endpoint Payloads
// ==============================================================================

/// Body of `GET tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub is_activated: bool,
    pub balance_data: BalanceData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceData {
    pub amount: f64,
    pub status: String,
}

/// Body sent to `POST withdraws`. The amount goes over the wire in BTC.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    #[serde(with = "bitcoin::amount::serde::as_btc")]
    pub amount: Amount,
    pub address: String,
    pub include_fee_in_amount: bool,
}
