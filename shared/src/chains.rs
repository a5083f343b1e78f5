//! # Chain Registry
//!
//! Static configuration for every network the front end can operate on:
//! chain id, explorer, the Uniswap-V3 style quoter and router, the optional
//! limit-order contract, and the two default tokens (wrapped native and USD
//! stablecoin) each chain starts with.
//!
//! The registry is compiled in and immutable. [`ChainKey`] is the stable
//! identifier persisted in browser storage.
//!
//! ```rust
//! use shared::chains::{Chain, ChainKey};
//!
//! let base = Chain::by_id(8453).unwrap();
//! assert_eq!(base.key, ChainKey::Base);
//! assert_eq!(base.hex_chain_id(), "0x2105");
//! assert!(Chain::by_id(1).is_none());
//! ```

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dto::Token;

/// Stable identifier of a supported chain.
///
/// The string form is what gets written to local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainKey {
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "baseSepolia")]
    BaseSepolia,
    #[serde(rename = "arbitrum")]
    Arbitrum,
    #[serde(rename = "bnb")]
    Bnb,
}

impl ChainKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainKey::Base => "base",
            ChainKey::BaseSepolia => "baseSepolia",
            ChainKey::Arbitrum => "arbitrum",
            ChainKey::Bnb => "bnb",
        }
    }
}

impl fmt::Display for ChainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(ChainKey::Base),
            "baseSepolia" => Ok(ChainKey::BaseSepolia),
            "arbitrum" => Ok(ChainKey::Arbitrum),
            "bnb" => Ok(ChainKey::Bnb),
            other => Err(format!("unknown chain key '{}'", other)),
        }
    }
}

/// Compile-time token descriptor. Converted into a [`Token`] when a chain
/// becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpec {
    pub address: Address,
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
}

impl From<&TokenSpec> for Token {
    fn from(spec: &TokenSpec) -> Self {
        Token::new(spec.address, spec.symbol, spec.name, spec.decimals)
    }
}

/// Network configuration record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub key: ChainKey,
    pub chain_id: u64,
    pub name: &'static str,
    /// Native currency symbol (ETH, BNB)
    pub symbol: &'static str,
    pub rpc_url: &'static str,
    pub block_explorer: &'static str,
    pub factory_address: Option<Address>,
    /// Limit-order contract; `None` where limit orders are not deployed yet
    pub limiter_address: Option<Address>,
    pub quoter_address: Address,
    pub swap_router_address: Address,
    /// Wrapped native token. Balances for it are read as the native balance.
    pub native_token: TokenSpec,
    pub usdc_token: TokenSpec,
}

static CHAINS: [Chain; 4] = [
    Chain {
        key: ChainKey::Base,
        chain_id: 8453,
        name: "Base",
        symbol: "ETH",
        rpc_url: "https://base.llamarpc.com",
        block_explorer: "https://basescan.org",
        factory_address: Some(address!("0x33128a8fC17869897dcE68Ed026d694621f6FDfD")),
        limiter_address: Some(address!("0xA2b0956C54842CB418e77b3C0E0740adDAaaa85C")),
        quoter_address: address!("0x3d4e44Eb1374240CE5F1B871ab261CD16335B76a"),
        swap_router_address: address!("0x2626664c2603336E57B271c5C0b26F421741e481"),
        native_token: TokenSpec {
            address: address!("0x4200000000000000000000000000000000000006"),
            symbol: "ETH",
            name: "Ethereum",
            decimals: 18,
        },
        usdc_token: TokenSpec {
            address: address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
            symbol: "USDC",
            name: "USD Coin",
            decimals: 6,
        },
    },
    Chain {
        key: ChainKey::BaseSepolia,
        chain_id: 84532,
        name: "Base Sepolia",
        symbol: "ETH",
        rpc_url: "https://sepolia.base.org",
        block_explorer: "https://sepolia.basescan.org",
        factory_address: Some(address!("0x4752ba5DBc23f44D87826276BF6Fd6b1C372aD24")),
        limiter_address: None,
        quoter_address: address!("0xC5290058841028F1614F3A6F0F5816cAd0df5E27"),
        swap_router_address: address!("0x94cC0AaC535CCDB3C01d6787D6413C739ae12bc4"),
        native_token: TokenSpec {
            address: address!("0x7Dfd533f6935bb228A809F8438537c4c88B76992"),
            symbol: "ETH",
            name: "Ethereum",
            decimals: 18,
        },
        usdc_token: TokenSpec {
            address: address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
            symbol: "USDC",
            name: "USD Coin",
            decimals: 6,
        },
    },
    Chain {
        key: ChainKey::Arbitrum,
        chain_id: 42161,
        name: "Arbitrum",
        symbol: "ETH",
        rpc_url: "https://arb1.arbitrum.io/rpc",
        block_explorer: "https://arbiscan.io",
        factory_address: Some(address!("0x1F98431c8aD98523631AE4a59f267346ea31F984")),
        limiter_address: None,
        quoter_address: address!("0x61fFE014bA17989E743c5F6cB21bF9697530B21e"),
        swap_router_address: address!("0x68b3465833fb72A70ecDF485E0e4C7bD8665Fc45"),
        native_token: TokenSpec {
            address: address!("0x82aF49447D8a07e3bd95BD0d56f35241523fBab1"),
            symbol: "ETH",
            name: "Ethereum",
            decimals: 18,
        },
        usdc_token: TokenSpec {
            address: address!("0xaf88d065e77c8cC2239327C5EDb3A432268e5831"),
            symbol: "USDC",
            name: "USD Coin",
            decimals: 6,
        },
    },
    Chain {
        key: ChainKey::Bnb,
        chain_id: 56,
        name: "BNB Chain",
        symbol: "BNB",
        rpc_url: "https://bsc-dataseed.bnbchain.org",
        block_explorer: "https://bscscan.com",
        factory_address: Some(address!("0xdB1d10011AD0Ff90774D0C6Bb92e5C5c8b4461F7")),
        limiter_address: None,
        quoter_address: address!("0x78D78E420Da98ad378D7799bE8f4AF69033EB077"),
        swap_router_address: address!("0xB971eF87ede563556b2ED4b1C0b0019111Dd85d2"),
        native_token: TokenSpec {
            address: address!("0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c"),
            symbol: "BNB",
            name: "BNB",
            decimals: 18,
        },
        // BSC-pegged stablecoin carries 18 decimals
        usdc_token: TokenSpec {
            address: address!("0x55d398326f99059fF775485246999027B3197955"),
            symbol: "USDC",
            name: "USD Coin",
            decimals: 18,
        },
    },
];

/// Chains offered on the unsupported-network screen.
pub const SWITCH_TARGETS: [ChainKey; 3] = [ChainKey::Base, ChainKey::Bnb, ChainKey::Arbitrum];

impl Chain {
    /// All registered chains in display order.
    pub fn all() -> &'static [Chain] {
        &CHAINS
    }

    pub fn by_key(key: ChainKey) -> &'static Chain {
        CHAINS
            .iter()
            .find(|chain| chain.key == key)
            .unwrap_or(&CHAINS[0])
    }

    pub fn by_id(chain_id: u64) -> Option<&'static Chain> {
        CHAINS.iter().find(|chain| chain.chain_id == chain_id)
    }

    /// Chain id as the `0x`-prefixed quantity used by `wallet_switchEthereumChain`.
    pub fn hex_chain_id(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }

    /// Default token list: wrapped native first, then the stablecoin.
    pub fn default_tokens(&self) -> Vec<Token> {
        vec![Token::from(&self.native_token), Token::from(&self.usdc_token)]
    }

    /// Whether `address` is this chain's wrapped-native token.
    pub fn is_native(&self, address: &Address) -> bool {
        self.native_token.address == *address
    }

    pub fn supports_limit_orders(&self) -> bool {
        self.limiter_address.is_some()
    }

    pub fn explorer_tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.block_explorer, tx_hash)
    }

    pub fn explorer_address_url(&self, address: &Address) -> String {
        format!("{}/address/{}", self.block_explorer, address)
    }
}
