use clap::{Parser, Subcommand};

/// Command-line client for the Bitcoin-Api service.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Talk to the livenet deployment instead of testnet.
    #[arg(long, env = "BITCOIN_API_LIVENET")]
    pub livenet: bool,

    /// Token used for testnet requests.
    #[arg(long, env = "BITCOIN_API_TESTNET_TOKEN", hide_env_values = true)]
    pub testnet_token: Option<String>,

    /// Token used for livenet requests.
    #[arg(long, env = "BITCOIN_API_LIVENET_TOKEN", hide_env_values = true)]
    pub livenet_token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show current fee data (no token needed).
    FeeData,

    /// Show activation status and balance of the configured token.
    TokenInfo,

    /// Create or fetch the deposit address for the configured token.
    Address,

    /// Withdraw funds to a Bitcoin address.
    Withdraw {
        /// Destination address; must belong to the selected network.
        #[arg(long)]
        address: String,

        /// Amount in BTC.
        #[arg(long)]
        amount: String,

        /// Deduct the network fee from the amount instead of adding it.
        #[arg(long)]
        include_fee_in_amount: bool,
    },
}
