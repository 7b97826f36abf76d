use console::Style;
use ethers::types::Address;
use std::str::FromStr;

use crate::api::VistaClient;
use crate::config::CONFIG;
use crate::errors::{EtherfunError, Result};

/// Print explorer/DEX links for a token, looking up its liquidity pair
/// on-chain. Also reports whether the token came from the SafeTokenFactory.
pub async fn show_links(token: &str) -> Result<()> {
    let info_style = Style::new().cyan();
    let warn_style = Style::new().yellow();

    let token_address =
        Address::from_str(token).map_err(|_| EtherfunError::InvalidAddress(token.to_string()))?;

    let client = VistaClient::new(&CONFIG.eth_rpc_url, CONFIG.chain_id)?;

    println!(
        "\n{}",
        info_style.apply_to(format!("Links for token {:?}", token_address)).bold()
    );

    if client.is_token_whitelisted(token_address).await {
        println!("Token was created via the SafeTokenFactory.");
    } else {
        println!(
            "{}",
            warn_style.apply_to("Token is not whitelisted by the SafeTokenFactory.")
        );
    }

    let links = client.get_links(token_address).await;
    let mut names: Vec<&String> = links.keys().collect();
    names.sort();
    for name in names {
        println!("  {:16} {}", name, links[name]);
    }
    if !links.contains_key("dexscreener") {
        println!(
            "{}",
            warn_style.apply_to("No liquidity pair found; DEX links unavailable.")
        );
    }

    Ok(())
}
