use std::collections::HashMap;

use ethers::types::Address;

/// Generate explorer/DEX links for a launched token. Pair-scoped links are
/// only present when the liquidity pool address is known.
pub fn launch_links(token_address: Address, pair_address: Option<Address>) -> HashMap<String, String> {
    let token = format!("{:?}", token_address);

    let mut links = HashMap::new();
    links.insert(
        "etherscan_token".to_string(),
        format!("https://etherscan.io/token/{}", token),
    );
    links.insert(
        "etherfun".to_string(),
        format!("https://etherfun.app/token/{}", token),
    );

    if let Some(pair_address) = pair_address {
        let pair = format!("{:?}", pair_address);
        links.insert(
            "etherscan_pair".to_string(),
            format!("https://etherscan.io/address/{}", pair),
        );
        links.insert(
            "dexscreener".to_string(),
            format!("https://dexscreener.com/ethereum/{}", pair),
        );
        links.insert(
            "dextools".to_string(),
            format!(
                "https://www.dextools.io/app/en/ether/pair-explorer/{}",
                pair
            ),
        );
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_links_without_pair() {
        let links = launch_links(Address::from([0x11; 20]), None);
        assert!(links.contains_key("etherscan_token"));
        assert!(links.contains_key("etherfun"));
        assert!(!links.contains_key("etherscan_pair"));
        assert!(!links.contains_key("dexscreener"));
        assert!(!links.contains_key("dextools"));
    }

    #[test]
    fn test_pair_links_when_pair_known() {
        let links = launch_links(Address::from([0x11; 20]), Some(Address::from([0x22; 20])));
        assert_eq!(links.len(), 5);
        assert!(links["dexscreener"].contains("0x2222222222222222222222222222222222222222"));
        assert!(links["etherscan_token"].contains("0x1111111111111111111111111111111111111111"));
    }
}
