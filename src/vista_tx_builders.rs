use ethers::abi::{self, ParamType, Token};
use ethers::types::{Address, Bytes, U256};
use ethers::utils::id;
use lazy_static::lazy_static;

use crate::errors::{EtherfunError, Result};

// --- Protocol constants (Ethereum mainnet) ---
// Source: https://github.com/Ethervista/Deployed-Contracts

lazy_static! {
    pub static ref SAFE_TOKEN_FACTORY: Address =
        "0x1a97A037A120Db530dDCe8370e24EaD0FE9cf5d0"
            .parse()
            .expect("Failed to parse SAFE_TOKEN_FACTORY address");
    pub static ref ROUTER: Address = "0xCEDd366065A146a039B92Db35756ecD7688FCC77"
        .parse()
        .expect("Failed to parse ROUTER address");
    pub static ref FACTORY: Address = "0x9a27cb5ae0B2cEe0bb71f9A85C0D60f3920757B4"
        .parse()
        .expect("Failed to parse FACTORY address");
    pub static ref WETH: Address = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
        .parse()
        .expect("Failed to parse WETH address");
    pub static ref VISTA_TOKEN: Address = "0xC9bCa88B04581699fAb5aa276CCafF7Df957cbbf"
        .parse()
        .expect("Failed to parse VISTA_TOKEN address");
}

// Conservative per-step gas limits. The widget signs with these directly,
// so they are deliberately above typical usage.
pub const CREATE_TOKEN_GAS: u64 = 900_000;
pub const APPROVE_GAS: u64 = 60_000;
pub const LAUNCH_GAS: u64 = 400_000;

pub const TOKEN_DECIMALS: u32 = 18;

// Function signatures of the three fixed contract interfaces. Selectors are
// derived at call time via keccak; the router's fee legs really are uint8
// on-chain, not full basis-point words.
const CREATE_SIG: &str = "create(string,string,uint256,bool)";
const APPROVE_SIG: &str = "approve(address,uint256)";
const LAUNCH_SIG: &str = "launch(address,uint256,uint8,uint8,uint8,uint8,address)";
const GET_PAIR_SIG: &str = "getPair(address,address)";
const WHITELISTED_SIG: &str = "whitelistedTokens(address)";

/// Scale a whole-token amount to its 18-decimal representation.
pub fn to_token_wei(amount: u64) -> U256 {
    U256::from(amount) * U256::exp10(TOKEN_DECIMALS as usize)
}

fn encode_call(signature: &str, args: &[Token]) -> Bytes {
    let mut data = id(signature).to_vec();
    data.extend(abi::encode(args));
    Bytes::from(data)
}

/// Call data for `SafeTokenFactory.create(name, symbol, supply, vistaOnly)`.
/// Supply is a whole-token count and is scaled by 10^18 before encoding.
pub fn encode_create_call(name: &str, symbol: &str, supply: u64, vista_only: bool) -> Bytes {
    encode_call(
        CREATE_SIG,
        &[
            Token::String(name.to_string()),
            Token::String(symbol.to_string()),
            Token::Uint(to_token_wei(supply)),
            Token::Bool(vista_only),
        ],
    )
}

/// Call data for `ERC20.approve(spender, amount)`.
pub fn encode_approve_call(spender: Address, amount: U256) -> Bytes {
    encode_call(
        APPROVE_SIG,
        &[Token::Address(spender), Token::Uint(amount)],
    )
}

/// Call data for `EtherVistaRouter.launch(...)`. Token amount must already be
/// in wei; fee legs are basis points capped at u8 by the router ABI.
pub fn encode_launch_call(
    token: Address,
    token_amount_wei: U256,
    buy_lp_fee: u8,
    sell_lp_fee: u8,
    buy_protocol_fee: u8,
    sell_protocol_fee: u8,
    protocol_address: Address,
) -> Bytes {
    encode_call(
        LAUNCH_SIG,
        &[
            Token::Address(token),
            Token::Uint(token_amount_wei),
            Token::Uint(U256::from(buy_lp_fee)),
            Token::Uint(U256::from(sell_lp_fee)),
            Token::Uint(U256::from(buy_protocol_fee)),
            Token::Uint(U256::from(sell_protocol_fee)),
            Token::Address(protocol_address),
        ],
    )
}

/// Call data for `Factory.getPair(tokenA, tokenB)`.
pub fn encode_get_pair_call(token_a: Address, token_b: Address) -> Bytes {
    encode_call(
        GET_PAIR_SIG,
        &[Token::Address(token_a), Token::Address(token_b)],
    )
}

/// Call data for `SafeTokenFactory.whitelistedTokens(token)`.
pub fn encode_whitelisted_call(token: Address) -> Bytes {
    encode_call(WHITELISTED_SIG, &[Token::Address(token)])
}

/// Decode a `getPair` return value. The factory returns the zero address when
/// no pool exists yet; that maps to `None`.
pub fn decode_pair_address(data: &[u8]) -> Result<Option<Address>> {
    let tokens = abi::decode(&[ParamType::Address], data)?;
    match tokens.into_iter().next() {
        Some(Token::Address(addr)) if addr != Address::zero() => Ok(Some(addr)),
        Some(Token::Address(_)) => Ok(None),
        _ => Err(EtherfunError::Abi(ethers::abi::Error::InvalidData)),
    }
}

/// Decode a single-bool return value (e.g. `whitelistedTokens`).
pub fn decode_bool(data: &[u8]) -> Result<bool> {
    let tokens = abi::decode(&[ParamType::Bool], data)?;
    match tokens.into_iter().next() {
        Some(Token::Bool(b)) => Ok(b),
        _ => Err(EtherfunError::Abi(ethers::abi::Error::InvalidData)),
    }
}
