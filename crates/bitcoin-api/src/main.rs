mod cli;

use bitcoin::{Address, Amount, Denomination};
use clap::Parser;
use eyre::{eyre, WrapErr};

use bitcoin_api_core::{BitcoinApi, Network};

use cli::Command;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // A missing .env file is fine; flags and the real environment still apply.
    let _ = dotenvy::dotenv();

    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let mut builder = BitcoinApi::builder().livenet(args.livenet);
    if let Some(token) = args.testnet_token {
        builder = builder.testnet_token(token);
    }
    if let Some(token) = args.livenet_token {
        builder = builder.livenet_token(token);
    }
    let api = builder.build().context("build API client")?;

    tracing::info!(network = %api.network(), "using Bitcoin-Api");

    let output = match args.command {
        Command::FeeData => api.get_fee_data().await.context("fetch fee data")?,
        Command::TokenInfo => {
            let info = api.get_token_info().await.context("fetch token info")?;
            serde_json::to_value(info).context("encode token info")?
        }
        Command::Address => api
            .create_or_get_address()
            .await
            .context("create or get address")?,
        Command::Withdraw {
            address,
            amount,
            include_fee_in_amount,
        } => {
            let address = parse_address(&address, api.network())?;
            let amount = Amount::from_str_in(&amount, Denomination::Bitcoin)
                .wrap_err_with(|| format!("invalid BTC amount `{amount}`"))?;
            api.withdraw(&address, amount, include_fee_in_amount)
                .await
                .context("withdraw")?
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("render response")?
    );
    Ok(())
}

/// Parse `raw` and require it to belong to the deployment's network.
fn parse_address(raw: &str, network: Network) -> eyre::Result<Address> {
    let unchecked: Address<bitcoin::address::NetworkUnchecked> = raw
        .parse()
        .wrap_err_with(|| format!("invalid address `{raw}`"))?;
    let expected = network.bitcoin_network();
    unchecked
        .require_network(expected)
        .map_err(|_| eyre!("address `{raw}` is not valid on {network} ({expected})"))
}
