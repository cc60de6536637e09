//! Test doubles for the wallet extension and the indexer
#![allow(dead_code)]

use async_trait::async_trait;
use bitcoin::Txid;
use once_cell::sync::Lazy;
use ordmint::error::{IndexerError, MintError, Result};
use ordmint::wallet::{Balance, Inscription, InscriptionPage, SignPsbtOptions, WalletProvider};
use ordmint::{Indexer, MintConfig, Network, PollPolicy, Utxo};
use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// secp256k1 generator, compressed
pub const PUBKEY: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
/// BIP173 testnet P2WPKH vector
pub const RECEIVER: &str = "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx";

pub static FUNDING_TXID: Lazy<Txid> = Lazy::new(|| {
    Txid::from_str("0e3e2357e806b6cdb1f70b54c3a3a17b6714ee1f0e68bebb44a74b1efd512098").expect("txid")
});

pub fn utxo(value: u64) -> Utxo {
    Utxo { txid: *FUNDING_TXID, vout: 0, value, status: None, script: None }
}

pub fn fast_config() -> MintConfig {
    MintConfig::new(Network::Testnet)
        .with_poll(PollPolicy::new(Duration::from_millis(5), 10))
        .with_call_timeout(Duration::from_secs(2))
        .with_approval_timeout(Duration::from_secs(2))
}

pub struct MockWallet {
    pub available: bool,
    pub accounts: Vec<String>,
    pub public_key: String,
    pub network: String,
    pub balance: Balance,
    /// Method name that answers with a user rejection
    pub reject: Option<&'static str>,
    /// Method name that never answers
    pub stall: Option<&'static str>,
    pub calls: Mutex<Vec<&'static str>>,
    pub sent: Mutex<Vec<(String, u64)>>,
    pub signed: Mutex<Vec<(String, SignPsbtOptions)>>,
    pub pushed: Mutex<Vec<String>>,
}

impl Default for MockWallet {
    fn default() -> Self {
        Self {
            available: true,
            accounts: vec!["addr1".into()],
            public_key: PUBKEY.into(),
            network: "testnet".into(),
            balance: Balance { confirmed: 10_000, unconfirmed: 500, total: 10_500 },
            reject: None,
            stall: None,
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            signed: Mutex::new(Vec::new()),
            pushed: Mutex::new(Vec::new()),
        }
    }
}

impl MockWallet {
    pub fn rejecting(method: &'static str) -> Self { Self { reject: Some(method), ..Default::default() } }

    pub fn stalling(method: &'static str) -> Self { Self { stall: Some(method), ..Default::default() } }

    pub fn count(&self, method: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|m| **m == method).count()
    }

    async fn enter(&self, method: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(method);
        if self.reject == Some(method) {
            return Err(MintError::Wallet("User rejected the request.".into()));
        }
        if self.stall == Some(method) {
            futures::future::pending::<()>().await;
        }
        Ok(())
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    fn is_available(&self) -> bool { self.available }

    async fn request_accounts(&self) -> Result<Vec<String>> {
        self.enter("request_accounts").await?;
        Ok(self.accounts.clone())
    }

    async fn get_public_key(&self) -> Result<String> {
        self.enter("get_public_key").await?;
        Ok(self.public_key.clone())
    }

    async fn get_balance(&self) -> Result<Balance> {
        self.enter("get_balance").await?;
        Ok(self.balance)
    }

    async fn get_network(&self) -> Result<String> {
        self.enter("get_network").await?;
        Ok(self.network.clone())
    }

    async fn get_inscriptions(&self, cursor: u32, size: u32) -> Result<InscriptionPage> {
        self.enter("get_inscriptions").await?;
        let list = (cursor..cursor + size.min(2))
            .map(|n| Inscription { inscription_id: format!("{}i{}", FUNDING_TXID.to_string(), n), inscription_number: n as i64, ..Default::default() })
            .collect();
        Ok(InscriptionPage { total: 2, list })
    }

    async fn send_bitcoin(&self, address: &str, sats: u64) -> Result<String> {
        self.enter("send_bitcoin").await?;
        self.sent.lock().unwrap().push((address.to_string(), sats));
        Ok(FUNDING_TXID.to_string())
    }

    async fn sign_psbt(&self, psbt_hex: &str, options: &SignPsbtOptions) -> Result<String> {
        self.enter("sign_psbt").await?;
        self.signed.lock().unwrap().push((psbt_hex.to_string(), options.clone()));
        Ok(format!("signed:{}", psbt_hex))
    }

    async fn push_psbt(&self, psbt_hex: &str) -> Result<String> {
        self.enter("push_psbt").await?;
        self.pushed.lock().unwrap().push(psbt_hex.to_string());
        Ok("reveal-txid".into())
    }
}

/// Answers `utxos` from a script, then with empty lists.
#[derive(Default)]
pub struct ScriptedIndexer {
    pub replies: Mutex<VecDeque<std::result::Result<Vec<Utxo>, IndexerError>>>,
    pub queries: AtomicU32,
    pub last_address: Mutex<Option<(Network, String)>>,
}

impl ScriptedIndexer {
    pub fn new(replies: Vec<std::result::Result<Vec<Utxo>, IndexerError>>) -> Self {
        Self { replies: Mutex::new(replies.into()), ..Default::default() }
    }

    pub fn queries(&self) -> u32 { self.queries.load(Ordering::SeqCst) }
}

#[async_trait]
impl Indexer for ScriptedIndexer {
    async fn utxos(&self, network: Network, address: &str) -> std::result::Result<Vec<Utxo>, IndexerError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        *self.last_address.lock().unwrap() = Some((network, address.to_string()));
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn tx_hex(&self, _: Network, _: &Txid) -> std::result::Result<String, IndexerError> {
        Err(IndexerError::Status { status: 404, body: "not scripted".into() })
    }

    async fn broadcast(&self, _: Network, _: &str) -> std::result::Result<String, IndexerError> {
        Err(IndexerError::Status { status: 400, body: "not scripted".into() })
    }
}
