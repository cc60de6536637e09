//! Configuration - network selection, mint constants, poll policy, indexer endpoints

use crate::error::{MintError, Result};
use bitcoin::address::NetworkUnchecked;
use bitcoin::Address;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Dust threshold; the inscription lands on an output of exactly this value.
pub const POSTAGE_SATS: u64 = 546;
/// Flat fee assumed for the reveal transaction.
pub const DEFAULT_FEE_SATS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network { #[default] Mainnet, Testnet }

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self { Network::Mainnet => "mainnet", Network::Testnet => "testnet" }
    }

    /// Map the wallet's network name. Unknown names are a configuration
    /// error, never a silent mainnet.
    pub fn from_wallet_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "testnet" => Ok(Network::Testnet),
            "livenet" | "mainnet" | "bitcoin" => Ok(Network::Mainnet),
            other => Err(MintError::Config(format!("unrecognized network '{}'", other))),
        }
    }

    pub fn to_bitcoin(&self) -> bitcoin::Network {
        match self { Network::Mainnet => bitcoin::Network::Bitcoin, Network::Testnet => bitcoin::Network::Testnet }
    }

    /// Parse an address and require it to belong to this network.
    pub fn parse_address(&self, address: &str) -> Result<Address> {
        let unchecked: Address<NetworkUnchecked> = address
            .trim()
            .parse()
            .map_err(|e| MintError::Validation(format!("address '{}': {}", address, e)))?;
        unchecked
            .require_network(self.to_bitcoin())
            .map_err(|e| MintError::Validation(format!("address '{}': {}", address, e)))
    }
}

/// What the inscription says. Rendered as `{protocol}:mint:{ticker}={amount}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InscriptionPayload {
    pub protocol: String,
    pub ticker: String,
    pub amount: u64,
    pub body: Vec<u8>,
}

impl Default for InscriptionPayload {
    fn default() -> Self {
        Self { protocol: "cbrc-20".into(), ticker: "PLAY".into(), amount: 1000, body: b"test".to_vec() }
    }
}

impl InscriptionPayload {
    pub fn new(ticker: impl Into<String>, amount: u64) -> Self {
        Self { ticker: ticker.into(), amount, ..Default::default() }
    }
    pub fn with_protocol(mut self, p: impl Into<String>) -> Self { self.protocol = p.into(); self }
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self { self.body = body.into(); self }

    pub fn content(&self) -> String {
        format!("{}:mint:{}={}", self.protocol, self.ticker, self.amount)
    }
}

/// Funding-wait policy. The first query happens one interval after start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self { Self { interval: Duration::from_secs(3), max_attempts: 200 } }
}

impl PollPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self { Self { interval, max_attempts } }
}

/// Mint configuration. The network is chosen here, not taken from the session.
#[derive(Debug, Clone)]
pub struct MintConfig {
    pub network: Network,
    pub postage: u64,
    pub fee: u64,
    /// Sent on top of fee + postage so the reveal has a non-zero change output
    pub funding_margin: u64,
    pub payload: InscriptionPayload,
    pub poll: PollPolicy,
    /// Bound on plain wallet/indexer round trips
    pub call_timeout: Duration,
    /// Bound on calls that wait for the user to approve in the wallet
    pub approval_timeout: Duration,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            network: Network::Testnet,
            postage: POSTAGE_SATS,
            fee: DEFAULT_FEE_SATS,
            funding_margin: POSTAGE_SATS,
            payload: InscriptionPayload::default(),
            poll: PollPolicy::default(),
            call_timeout: Duration::from_secs(30),
            approval_timeout: Duration::from_secs(300),
        }
    }
}

impl MintConfig {
    pub fn new(network: Network) -> Self { Self { network, ..Default::default() } }
    pub fn with_fee(mut self, fee: u64) -> Self { self.fee = fee; self }
    pub fn with_postage(mut self, postage: u64) -> Self { self.postage = postage; self }
    pub fn with_funding_margin(mut self, sats: u64) -> Self { self.funding_margin = sats; self }
    pub fn with_payload(mut self, payload: InscriptionPayload) -> Self { self.payload = payload; self }
    pub fn with_poll(mut self, poll: PollPolicy) -> Self { self.poll = poll; self }
    pub fn with_call_timeout(mut self, t: Duration) -> Self { self.call_timeout = t; self }
    pub fn with_approval_timeout(mut self, t: Duration) -> Self { self.approval_timeout = t; self }

    /// Amount the wallet is asked to send to the funding address.
    pub fn funding_amount(&self) -> u64 { self.fee + self.postage + self.funding_margin }
}

#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub mainnet_url: String,
    pub testnet_url: String,
    pub timeout: Duration,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            mainnet_url: "https://blockstream.info/api".into(),
            testnet_url: "https://blockstream.info/testnet/api".into(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl IndexerConfig {
    /// Same base URL for both networks (local esplora, tests).
    pub fn single(url: impl Into<String>) -> Self {
        let url = url.into();
        Self { mainnet_url: url.clone(), testnet_url: url, ..Default::default() }
    }
    pub fn with_mainnet(mut self, url: impl Into<String>) -> Self { self.mainnet_url = url.into(); self }
    pub fn with_testnet(mut self, url: impl Into<String>) -> Self { self.testnet_url = url.into(); self }
    pub fn with_timeout(mut self, t: Duration) -> Self { self.timeout = t; self }

    pub fn base_url(&self, network: Network) -> &str {
        match network { Network::Mainnet => &self.mainnet_url, Network::Testnet => &self.testnet_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_mapping_is_strict() {
        assert_eq!(Network::from_wallet_name("testnet").unwrap(), Network::Testnet);
        assert_eq!(Network::from_wallet_name("livenet").unwrap(), Network::Mainnet);
        assert_eq!(Network::from_wallet_name("bitcoin").unwrap(), Network::Mainnet);
        assert!(matches!(Network::from_wallet_name("signet"), Err(MintError::Config(_))));
        assert!(matches!(Network::from_wallet_name(""), Err(MintError::Config(_))));
    }

    #[test]
    fn test_parse_address_checks_network() {
        let tb = "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx";
        assert!(Network::Testnet.parse_address(tb).is_ok());
        assert!(matches!(Network::Mainnet.parse_address(tb), Err(MintError::Validation(_))));
        assert!(matches!(Network::Testnet.parse_address("addr1"), Err(MintError::Validation(_))));
    }

    #[test]
    fn test_default_payload_content() {
        assert_eq!(InscriptionPayload::default().content(), "cbrc-20:mint:PLAY=1000");
        assert_eq!(InscriptionPayload::new("ABCD", 5).content(), "cbrc-20:mint:ABCD=5");
    }

    #[test]
    fn test_mint_defaults() {
        let c = MintConfig::default();
        assert_eq!(c.network, Network::Testnet);
        assert_eq!(c.funding_amount(), 5000 + 546 + 546);
        assert_eq!(c.poll.interval, Duration::from_secs(3));
        assert_eq!(c.clone().with_funding_margin(0).funding_amount(), 5546);
    }

    #[test]
    fn test_indexer_urls() {
        let c = IndexerConfig::default();
        assert!(c.base_url(Network::Testnet).ends_with("/testnet/api"));
        let c = IndexerConfig::single("http://127.0.0.1:3002");
        assert_eq!(c.base_url(Network::Mainnet), c.base_url(Network::Testnet));
    }
}
