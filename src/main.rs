use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config_manager::SystemConfig;
use dex_client::{BirdEyeClient, DexScreenerClient, PriceClient};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Token prices from BirdEye and DexScreener", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price and liquidity for one or more tokens
    Prices {
        #[arg(short, long, value_enum, default_value_t = Source::Dexscreener)]
        source: Source,
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Market overview of a single token
    Overview {
        #[arg(short, long, value_enum, default_value_t = Source::Dexscreener)]
        source: Source,
        address: String,
    },
    /// Deepest DexScreener pool against the reference mint
    BestPool { address: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Source {
    Birdeye,
    Dexscreener,
}

fn price_client(config: &SystemConfig, source: Source) -> Result<Box<dyn PriceClient>> {
    let client: Box<dyn PriceClient> = match source {
        Source::Birdeye => Box::new(BirdEyeClient::new(config.birdeye.clone())?),
        Source::Dexscreener => Box::new(DexScreenerClient::new(config.dexscreener.clone())?),
    };
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let config = SystemConfig::load_from_path(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    debug!("Configuration: {}", config.to_redacted_json());

    match cli.command {
        Command::Prices { source, addresses } => {
            let client = price_client(&config, source)?;
            info!("Fetching {} prices from {}", addresses.len(), client.source_name());

            let prices = client.fetch_prices(&addresses).await?;
            for address in &addresses {
                if let Some(info) = prices.get(address) {
                    println!("{}  price={}  liquidity={}", address, info.price, info.liquidity);
                }
            }
        }
        Command::Overview { source, address } => {
            let client = price_client(&config, source)?;
            let overview = client.fetch_token_overview(&address).await?;

            println!("{} ({})", overview.symbol, address);
            println!("  price:      {}", overview.price);
            println!("  liquidity:  {}", overview.liquidity);
            println!("  supply:     {}", overview.supply);
            println!("  decimals:   {}", overview.decimals);
            match overview.last_trade_time() {
                Some(time) => println!("  last trade: {}", time.to_rfc3339()),
                None => println!("  last trade: {}", overview.last_trade_unix_time),
            }
        }
        Command::BestPool { address } => {
            let client = DexScreenerClient::new(config.dexscreener.clone())?;
            let Some(pool) = client.fetch_best_pool(&address).await? else {
                bail!(
                    "no pool found for {} against {}",
                    address,
                    config.dexscreener.reference_mint
                );
            };

            println!(
                "{}  dex={}  liquidity_usd={}",
                pool.pair_address.as_deref().unwrap_or("?"),
                pool.dex_id.as_deref().unwrap_or("?"),
                pool.liquidity_usd().unwrap_or_default()
            );
        }
    }

    Ok(())
}
