use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use env_logger::Env;

use etherfun_launcher::commands::{estimate::estimate_launch, links::show_links, validate::validate_params};

#[derive(Parser, Debug)]
#[command(
    name = "etherfun-cli",
    version,
    about = "Preview and estimate Etherfun token launches on Ethervista",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate the total gas cost of a token launch at current prices
    Estimate {
        /// Creator address to check the balance of against the estimate
        #[arg(long)]
        creator: Option<String>,
    },
    /// Validate launch parameters without contacting the chain
    Validate {
        /// Token name
        #[arg(short, long)]
        name: String,
        /// Token symbol
        #[arg(short, long)]
        symbol: String,
        /// Total token supply (whole tokens)
        #[arg(long)]
        supply: u64,
        /// Initial ETH liquidity
        #[arg(long)]
        eth: f64,
        /// Percentage of supply reserved for the liquidity pool
        #[arg(long)]
        lp_percentage: Option<u8>,
    },
    /// Show explorer and DEX links for a launched token
    Links {
        /// Token contract address
        #[arg(short, long)]
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate { creator } => {
            estimate_launch(creator.as_deref()).await?;
        }
        Commands::Validate {
            name,
            symbol,
            supply,
            eth,
            lp_percentage,
        } => {
            validate_params(&name, &symbol, supply, eth, lp_percentage)?;
        }
        Commands::Links { token } => {
            show_links(&token).await?;
        }
    }

    Ok(())
}
