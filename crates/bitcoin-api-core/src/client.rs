//! High-level client for the Bitcoin-Api service.
//!
//! [`BitcoinApi`] holds the network mode and one token per network, fills in
//! the right token for each call, and wraps the individual endpoints. Every
//! call goes through [`dispatch`].

use std::sync::Arc;

use bitcoin::{Address, Amount};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::constants::EndpointType;
use crate::dispatch::dispatch;
use crate::error::ApiError;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{
    HttpMethod, Network, RequestDescriptor, ResponseEnvelope, TokenInfo, WithdrawRequest,
};

const RESOURCE_FEE_DATA: &str = "fee-data";
const RESOURCE_TOKENS: &str = "tokens";
const RESOURCE_ADDRESSES: &str = "addresses";
const RESOURCE_WITHDRAWS: &str = "withdraws";

#[derive(Clone)]
pub struct BitcoinApi {
    transport: Arc<dyn HttpTransport>,
    network: Network,
    testnet_token: Option<String>,
    livenet_token: Option<String>,
}

impl BitcoinApi {
    pub fn builder() -> BitcoinApiBuilder {
        BitcoinApiBuilder::default()
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Token configured for the active network, if any.
    pub fn token(&self) -> Option<&str> {
        match self.network {
            Network::Livenet => self.livenet_token.as_deref(),
            Network::Testnet => self.testnet_token.as_deref(),
        }
    }

    /// Issue an arbitrary endpoint call and return the validated envelope.
    pub async fn request(
        &self,
        endpoint_type: EndpointType,
        method: HttpMethod,
        resource: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ResponseEnvelope, ApiError> {
        let token = if endpoint_type.requires_token() {
            self.token().map(str::to_owned)
        } else {
            None
        };
        let descriptor = RequestDescriptor::new(endpoint_type, method, resource)
            .with_network(self.network)
            .with_token(token)
            .with_body(body);
        dispatch(self.transport.as_ref(), &descriptor).await
    }

    /// Current network fee information.
    pub async fn get_fee_data(&self) -> Result<serde_json::Value, ApiError> {
        let envelope = self
            .request(EndpointType::Public, HttpMethod::Get, RESOURCE_FEE_DATA, None)
            .await?;
        Ok(envelope.body)
    }

    /// Activation status and balance of the configured token.
    pub async fn get_token_info(&self) -> Result<TokenInfo, ApiError> {
        let envelope = self
            .request(
                EndpointType::GeneralToken,
                HttpMethod::Get,
                RESOURCE_TOKENS,
                None,
            )
            .await?;
        decode_body(RESOURCE_TOKENS, envelope)
    }

    /// The deposit address bound to the configured token, creating one on
    /// first use.
    pub async fn create_or_get_address(&self) -> Result<serde_json::Value, ApiError> {
        let envelope = self
            .request(
                EndpointType::ActivatedToken,
                HttpMethod::Post,
                RESOURCE_ADDRESSES,
                None,
            )
            .await?;
        Ok(envelope.body)
    }

    /// Withdraw `amount` to `address`.
    pub async fn withdraw(
        &self,
        address: &Address,
        amount: Amount,
        include_fee_in_amount: bool,
    ) -> Result<serde_json::Value, ApiError> {
        let request = WithdrawRequest {
            amount,
            address: address.to_string(),
            include_fee_in_amount,
        };
        debug!(
            network = %self.network,
            amount_sat = amount.to_sat(),
            include_fee_in_amount,
            "withdraw"
        );
        let body = serde_json::to_value(&request)
            .map_err(|e| ApiError::InvalidConfig(format!("encode withdraw request: {e}")))?;
        let envelope = self
            .request(
                EndpointType::ActivatedToken,
                HttpMethod::Post,
                RESOURCE_WITHDRAWS,
                Some(body),
            )
            .await?;
        Ok(envelope.body)
    }
}

impl std::fmt::Debug for BitcoinApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitcoinApi")
            .field("network", &self.network)
            .field("testnet_token", &self.testnet_token.as_ref().map(|_| "<redacted>"))
            .field("livenet_token", &self.livenet_token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

fn decode_body<T: DeserializeOwned>(
    resource: &str,
    envelope: ResponseEnvelope,
) -> Result<T, ApiError> {
    serde_json::from_value(envelope.body)
        .map_err(|e| ApiError::Decode(format!("{resource}: {e}")))
}

// ==============================================================================
// Builder
// ==============================================================================

#[derive(Default)]
pub struct BitcoinApiBuilder {
    transport: Option<Arc<dyn HttpTransport>>,
    livenet: bool,
    testnet_token: Option<String>,
    livenet_token: Option<String>,
}

impl BitcoinApiBuilder {
    pub fn livenet(mut self, livenet: bool) -> Self {
        self.livenet = livenet;
        self
    }

    pub fn testnet_token(mut self, token: impl Into<String>) -> Self {
        self.testnet_token = Some(token.into());
        self
    }

    pub fn livenet_token(mut self, token: impl Into<String>) -> Self {
        self.livenet_token = Some(token.into());
        self
    }

    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Falls back to a default [`ReqwestTransport`] when no transport was set.
    pub fn build(self) -> Result<BitcoinApi, ApiError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        Ok(BitcoinApi {
            transport,
            network: Network::from_livenet(self.livenet),
            testnet_token: self.testnet_token,
            livenet_token: self.livenet_token,
        })
    }
}
