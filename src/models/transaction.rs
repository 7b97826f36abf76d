use ethers::types::{Address, Bytes, U256};
use serde_json::{json, Value};

use crate::vista_tx_builders::{APPROVE_GAS, CREATE_TOKEN_GAS, LAUNCH_GAS};

/// Unsigned transaction descriptor handed to the external signing widget.
/// Immutable once constructed; built fresh on every call.
#[derive(Debug, Clone)]
pub struct TransactionDescriptor {
    pub to: Address,
    pub data: Bytes,
    /// ETH to send with the call, in wei.
    pub value: U256,
    pub gas: u64,
    /// Expected account nonce under the create/approve/launch submission
    /// order (current count + 0/1/2).
    pub nonce: U256,
    pub chain_id: u64,
}

impl TransactionDescriptor {
    /// The JSON shape the signing widget expects. The nonce is left out on
    /// purpose; the widget re-derives it at signing time.
    pub fn to_signing_request(&self) -> Value {
        json!({
            "to": format!("{:?}", self.to),
            "data": format!("{}", self.data),
            "value": format!("0x{:x}", self.value),
            "gas": format!("0x{:x}", self.gas),
            "chainId": format!("0x{:x}", self.chain_id),
        })
    }
}

/// Router fee legs in basis points. The deployed router ABI types these as
/// uint8, so 255 is the hard ceiling.
#[derive(Debug, Clone, Copy)]
pub struct FeeParams {
    pub buy_lp_fee: u8,
    pub sell_lp_fee: u8,
    pub buy_protocol_fee: u8,
    pub sell_protocol_fee: u8,
}

impl Default for FeeParams {
    fn default() -> Self {
        FeeParams {
            buy_lp_fee: 5,         // 0.05% to LPs on buys
            sell_lp_fee: 5,        // 0.05% to LPs on sells
            buy_protocol_fee: 0,   // 0% to creator on buys
            sell_protocol_fee: 0,  // 0% to creator on sells
        }
    }
}

/// Gas cost breakdown for a full token launch. Recomputed on every call,
/// never cached.
#[derive(Debug, Clone)]
pub struct GasEstimate {
    pub create_token_gas: u64,
    pub approve_gas: u64,
    pub launch_gas: u64,
    pub total_gas: u64,
    pub gas_price_wei: U256,
    pub total_cost_wei: U256,
    pub total_cost_eth: f64,
}

impl GasEstimate {
    /// Combine the fixed per-step gas limits with a current gas price.
    pub fn at_gas_price(gas_price_wei: U256) -> Self {
        let total_gas = CREATE_TOKEN_GAS + APPROVE_GAS + LAUNCH_GAS;
        let total_cost_wei = gas_price_wei * U256::from(total_gas);
        let total_cost_eth = total_cost_wei.as_u128() as f64 / 1e18;

        GasEstimate {
            create_token_gas: CREATE_TOKEN_GAS,
            approve_gas: APPROVE_GAS,
            launch_gas: LAUNCH_GAS,
            total_gas,
            gas_price_wei,
            total_cost_wei,
            total_cost_eth,
        }
    }

    pub fn gas_price_gwei(&self) -> f64 {
        self.gas_price_wei.as_u128() as f64 / 1e9
    }

    pub fn to_json(&self) -> Value {
        json!({
            "create_token_gas": self.create_token_gas,
            "approve_gas": self.approve_gas,
            "launch_gas": self.launch_gas,
            "total_gas": self.total_gas,
            "gas_price_gwei": self.gas_price_gwei(),
            "total_cost_eth": self.total_cost_eth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_gas_is_sum_of_step_constants() {
        for price in [0u64, 1, 30_000_000_000] {
            let est = GasEstimate::at_gas_price(U256::from(price));
            assert_eq!(
                est.total_gas,
                CREATE_TOKEN_GAS + APPROVE_GAS + LAUNCH_GAS
            );
        }
    }

    #[test]
    fn test_cost_scales_linearly_with_gas_price() {
        let at_10 = GasEstimate::at_gas_price(U256::from(10_000_000_000u64));
        let at_20 = GasEstimate::at_gas_price(U256::from(20_000_000_000u64));
        assert_eq!(at_20.total_cost_wei, at_10.total_cost_wei * 2);
        assert!((at_20.total_cost_eth - 2.0 * at_10.total_cost_eth).abs() < 1e-12);
    }

    #[test]
    fn test_signing_request_shape() {
        let desc = TransactionDescriptor {
            to: Address::from([0x11; 20]),
            data: Bytes::from(vec![0xde, 0xad]),
            value: U256::from(1_000_000_000_000_000_000u64),
            gas: 400_000,
            nonce: U256::from(7),
            chain_id: 1,
        };
        let req = desc.to_signing_request();
        assert_eq!(req["data"], "0xdead");
        assert_eq!(req["value"], "0xde0b6b3a7640000");
        assert_eq!(req["gas"], "0x61a80");
        assert_eq!(req["chainId"], "0x1");
        // Widget re-derives the nonce; it must not appear in the payload.
        assert!(req.get("nonce").is_none());
        assert!(req["to"].as_str().unwrap().starts_with("0x"));
        assert_eq!(req["to"].as_str().unwrap().len(), 42);
    }
}
