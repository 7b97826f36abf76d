use std::collections::HashMap;

use ethers::providers::{Http, JsonRpcClient, Middleware, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, TransactionRequest, U256};
use ethers::utils::parse_ether;
use log::{debug, error};

use crate::errors::{EtherfunError, Result};
use crate::links::launch_links;
use crate::models::transaction::{FeeParams, GasEstimate, TransactionDescriptor};
use crate::vista_tx_builders::{
    self, APPROVE_GAS, CREATE_TOKEN_GAS, FACTORY, LAUNCH_GAS, ROUTER, SAFE_TOKEN_FACTORY, WETH,
};

/// Interface to the Ethervista/Etherfun contracts.
///
/// Generates unsigned transaction descriptors for the signing widget and
/// performs the read-only RPC calls the launch flow needs. Never holds or
/// touches key material.
pub struct VistaClient<P = Http> {
    provider: Provider<P>,
    chain_id: u64,
}

impl VistaClient<Http> {
    pub fn new(rpc_url: &str, chain_id: u64) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| EtherfunError::Config(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;
        Ok(VistaClient { provider, chain_id })
    }
}

impl<P: JsonRpcClient> VistaClient<P> {
    pub fn from_provider(provider: Provider<P>, chain_id: u64) -> Self {
        VistaClient { provider, chain_id }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Check if the RPC endpoint is reachable.
    pub async fn is_connected(&self) -> bool {
        self.provider.get_block_number().await.is_ok()
    }

    /// Current gas price in wei.
    pub async fn get_gas_price(&self) -> Result<U256> {
        Ok(self.provider.get_gas_price().await?)
    }

    /// ETH balance for an address, in ether.
    pub async fn get_balance(&self, address: Address) -> Result<f64> {
        let wei = self.provider.get_balance(address, None).await?;
        Ok(wei.as_u128() as f64 / 1e18)
    }

    async fn get_nonce(&self, address: Address) -> Result<U256> {
        let nonce = self.provider.get_transaction_count(address, None).await?;
        debug!("Current transaction count for {:?}: {}", address, nonce);
        Ok(nonce)
    }

    /// Estimate total gas cost for a token launch at the current gas price.
    pub async fn estimate_launch_cost(&self) -> Result<GasEstimate> {
        let gas_price = self.get_gas_price().await?;
        Ok(GasEstimate::at_gas_price(gas_price))
    }

    /// Build the unsigned token creation transaction. This step must be
    /// submitted first: it uses the account's current transaction count as
    /// its nonce.
    pub async fn build_create_token_tx(
        &self,
        name: &str,
        symbol: &str,
        supply: u64,
        creator_address: Address,
        vista_only: bool,
    ) -> Result<TransactionDescriptor> {
        let nonce = self.get_nonce(creator_address).await?;

        Ok(TransactionDescriptor {
            to: *SAFE_TOKEN_FACTORY,
            data: vista_tx_builders::encode_create_call(name, symbol, supply, vista_only),
            value: U256::zero(),
            gas: CREATE_TOKEN_GAS,
            nonce,
            chain_id: self.chain_id,
        })
    }

    /// Build the unsigned router approval transaction. Nonce is offset +1:
    /// the create transaction is assumed to occupy the current count. The
    /// caller is responsible for sequencing submissions accordingly.
    pub async fn build_approve_tx(
        &self,
        token_address: Address,
        owner_address: Address,
        amount: Option<U256>,
    ) -> Result<TransactionDescriptor> {
        let nonce = self.get_nonce(owner_address).await? + 1;
        let amount = amount.unwrap_or(U256::MAX);

        Ok(TransactionDescriptor {
            to: token_address,
            data: vista_tx_builders::encode_approve_call(*ROUTER, amount),
            value: U256::zero(),
            gas: APPROVE_GAS,
            nonce,
            chain_id: self.chain_id,
        })
    }

    /// Build the unsigned liquidity launch transaction. Nonce is offset +2
    /// behind create and approve. `token_amount` is a whole-token count;
    /// `eth_amount` is in ether.
    pub async fn build_launch_tx(
        &self,
        token_address: Address,
        token_amount: u64,
        eth_amount: f64,
        creator_address: Address,
        fees: FeeParams,
    ) -> Result<TransactionDescriptor> {
        let nonce = self.get_nonce(creator_address).await? + 2;
        let eth_amount_wei = parse_ether(eth_amount)?;

        Ok(TransactionDescriptor {
            to: *ROUTER,
            data: vista_tx_builders::encode_launch_call(
                token_address,
                vista_tx_builders::to_token_wei(token_amount),
                fees.buy_lp_fee,
                fees.sell_lp_fee,
                fees.buy_protocol_fee,
                fees.sell_protocol_fee,
                creator_address,
            ),
            value: eth_amount_wei,
            gas: LAUNCH_GAS,
            nonce,
            chain_id: self.chain_id,
        })
    }

    async fn eth_call(&self, to: Address, data: ethers::types::Bytes) -> Result<Vec<u8>> {
        let tx: TypedTransaction = TransactionRequest::new().to(to).data(data).into();
        let out = self.provider.call(&tx, None).await?;
        Ok(out.to_vec())
    }

    /// Look up the LP pair address for a token against WETH. This is
    /// advisory link material, so RPC failures degrade to `None` instead of
    /// propagating.
    pub async fn get_pair_address(&self, token_address: Address) -> Option<Address> {
        let result = async {
            let out = self
                .eth_call(
                    *FACTORY,
                    vista_tx_builders::encode_get_pair_call(token_address, *WETH),
                )
                .await?;
            vista_tx_builders::decode_pair_address(&out)
        }
        .await;

        match result {
            Ok(pair) => pair,
            Err(e) => {
                error!("Error getting pair address for {:?}: {}", token_address, e);
                None
            }
        }
    }

    /// Check if a token was created via the SafeTokenFactory. Errors degrade
    /// to `false`.
    pub async fn is_token_whitelisted(&self, token_address: Address) -> bool {
        let result = async {
            let out = self
                .eth_call(
                    *SAFE_TOKEN_FACTORY,
                    vista_tx_builders::encode_whitelisted_call(token_address),
                )
                .await?;
            vista_tx_builders::decode_bool(&out)
        }
        .await;

        result.unwrap_or(false)
    }

    /// Generate explorer/DEX links for a launched token. Pair-dependent
    /// links appear only when the pool already exists.
    pub async fn get_links(&self, token_address: Address) -> HashMap<String, String> {
        let pair_address = self.get_pair_address(token_address).await;
        launch_links(token_address, pair_address)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use ethers::providers::MockProvider;

    /// Client wired to a mock transport; tests queue responses on the
    /// returned handle (LIFO, one per RPC call).
    pub fn mocked_client(chain_id: u64) -> (VistaClient<MockProvider>, MockProvider) {
        let (provider, mock) = Provider::mocked();
        (VistaClient::from_provider(provider, chain_id), mock)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::mocked_client;
    use super::*;
    use ethers::abi::{self, Token};
    use ethers::types::Bytes;

    fn addr(byte: u8) -> Address {
        Address::from([byte; 20])
    }

    #[tokio::test]
    async fn test_build_create_token_tx_uses_current_nonce() {
        let (client, mock) = mocked_client(1);
        mock.push(U256::from(5u64)).unwrap();

        let tx = client
            .build_create_token_tx("Pepe Coin", "PEPE", 1_000_000_000, addr(0xaa), true)
            .await
            .unwrap();

        assert_eq!(tx.to, *SAFE_TOKEN_FACTORY);
        assert_eq!(tx.nonce, U256::from(5u64));
        assert_eq!(tx.gas, CREATE_TOKEN_GAS);
        assert_eq!(tx.value, U256::zero());
        assert_eq!(tx.chain_id, 1);
    }

    #[tokio::test]
    async fn test_build_approve_tx_offsets_nonce_by_one() {
        let (client, mock) = mocked_client(1);
        mock.push(U256::from(5u64)).unwrap();

        let tx = client
            .build_approve_tx(addr(0x11), addr(0xaa), None)
            .await
            .unwrap();

        assert_eq!(tx.to, addr(0x11));
        assert_eq!(tx.nonce, U256::from(6u64));
        assert_eq!(tx.gas, APPROVE_GAS);
    }

    #[tokio::test]
    async fn test_build_launch_tx_offsets_nonce_by_two() {
        let (client, mock) = mocked_client(1);
        mock.push(U256::from(5u64)).unwrap();

        let tx = client
            .build_launch_tx(addr(0x11), 800_000_000, 0.5, addr(0xaa), FeeParams::default())
            .await
            .unwrap();

        assert_eq!(tx.to, *ROUTER);
        assert_eq!(tx.nonce, U256::from(7u64));
        assert_eq!(tx.gas, LAUNCH_GAS);
        assert_eq!(tx.value, parse_ether(0.5).unwrap());
    }

    #[tokio::test]
    async fn test_estimate_launch_cost() {
        let (client, mock) = mocked_client(1);
        mock.push(U256::from(30_000_000_000u64)).unwrap();

        let est = client.estimate_launch_cost().await.unwrap();
        assert_eq!(est.gas_price_wei, U256::from(30_000_000_000u64));
        assert_eq!(est.total_gas, CREATE_TOKEN_GAS + APPROVE_GAS + LAUNCH_GAS);
    }

    #[tokio::test]
    async fn test_get_pair_address_zero_means_no_pool() {
        let (client, mock) = mocked_client(1);
        let encoded = Bytes::from(abi::encode(&[Token::Address(Address::zero())]));
        mock.push::<Bytes, _>(encoded).unwrap();

        assert_eq!(client.get_pair_address(addr(0x11)).await, None);
    }

    #[tokio::test]
    async fn test_get_pair_address_found() {
        let (client, mock) = mocked_client(1);
        let encoded = Bytes::from(abi::encode(&[Token::Address(addr(0x22))]));
        mock.push::<Bytes, _>(encoded).unwrap();

        assert_eq!(client.get_pair_address(addr(0x11)).await, Some(addr(0x22)));
    }

    #[tokio::test]
    async fn test_get_pair_address_swallows_rpc_errors() {
        // Empty mock queue makes the call fail; lookup must degrade to None.
        let (client, _mock) = mocked_client(1);
        assert_eq!(client.get_pair_address(addr(0x11)).await, None);
    }

    #[tokio::test]
    async fn test_is_token_whitelisted() {
        let (client, mock) = mocked_client(1);
        mock.push::<Bytes, _>(Bytes::from(abi::encode(&[Token::Bool(true)])))
            .unwrap();
        assert!(client.is_token_whitelisted(addr(0x11)).await);

        // Errors degrade to false.
        assert!(!client.is_token_whitelisted(addr(0x11)).await);
    }

    #[tokio::test]
    async fn test_get_links_without_pool() {
        let (client, mock) = mocked_client(1);
        let encoded = Bytes::from(abi::encode(&[Token::Address(Address::zero())]));
        mock.push::<Bytes, _>(encoded).unwrap();

        let links = client.get_links(addr(0x11)).await;
        assert!(links.contains_key("etherscan_token"));
        assert!(!links.contains_key("dexscreener"));
    }
}
