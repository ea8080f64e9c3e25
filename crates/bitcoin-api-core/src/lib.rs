pub mod client;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_util;

pub use client::BitcoinApi;
pub use constants::EndpointType;
pub use dispatch::dispatch;
pub use error::ApiError;
pub use types::{HttpMethod, Network, RequestDescriptor, ResponseEnvelope};
