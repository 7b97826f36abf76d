use console::Style;
use ethers::types::Address;
use std::str::FromStr;

use crate::api::VistaClient;
use crate::config::CONFIG;
use crate::errors::{EtherfunError, Result};

/// Show the current gas cost estimate for a full token launch, and
/// optionally the ETH balance of a creator address for comparison.
pub async fn estimate_launch(creator: Option<&str>) -> Result<()> {
    let info_style = Style::new().cyan();
    let warn_style = Style::new().yellow();

    println!(
        "\n{}",
        info_style.apply_to("Estimating token launch cost...").bold()
    );

    let client = VistaClient::new(&CONFIG.eth_rpc_url, CONFIG.chain_id)?;
    if !client.is_connected().await {
        println!(
            "{}",
            warn_style.apply_to(format!("Cannot reach RPC endpoint {}", CONFIG.eth_rpc_url))
        );
        return Err(EtherfunError::Provider(
            ethers::providers::ProviderError::CustomError("RPC endpoint unreachable".to_string()),
        ));
    }

    let estimate = client.estimate_launch_cost().await?;
    println!("Gas price:      {:.1} gwei", estimate.gas_price_gwei());
    println!("Create token:   {} gas", estimate.create_token_gas);
    println!("Approve router: {} gas", estimate.approve_gas);
    println!("Launch:         {} gas", estimate.launch_gas);
    println!("Total:          {} gas", estimate.total_gas);
    println!(
        "{}",
        info_style.apply_to(format!("Estimated cost: {:.6} ETH", estimate.total_cost_eth))
    );

    if let Some(creator) = creator {
        let address = Address::from_str(creator)
            .map_err(|_| EtherfunError::InvalidAddress(creator.to_string()))?;
        let balance = client.get_balance(address).await?;
        println!("Creator balance: {:.6} ETH", balance);
        if balance < estimate.total_cost_eth {
            println!(
                "{}",
                warn_style.apply_to("Balance does not cover the estimated gas cost.")
            );
        }
    }

    Ok(())
}
