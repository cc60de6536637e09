//! SessionManager - connection state over a WalletProvider

use crate::config::{MintConfig, Network};
use crate::error::{MintError, Result};
use crate::indexer::{Indexer, Utxo};
use crate::mint::{MintAssembler, MintReceipt};
use crate::time;
use crate::wallet::provider::{Balance, InscriptionPage, WalletProvider};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Page session state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalletSession {
    pub connected: bool,
    pub accounts: Vec<String>,
    pub address: Option<String>,
    pub public_key: Option<String>,
    pub balance: Balance,
    pub network: Network,
}

pub struct SessionManager {
    wallet: Arc<dyn WalletProvider>,
    indexer: Arc<dyn Indexer>,
    session: RwLock<WalletSession>,
    call_timeout: Duration,
    approval_timeout: Duration,
    page_size: u32,
}

impl SessionManager {
    pub fn new(wallet: Arc<dyn WalletProvider>, indexer: Arc<dyn Indexer>) -> Self {
        let defaults = MintConfig::default();
        Self {
            wallet,
            indexer,
            session: RwLock::new(WalletSession::default()),
            call_timeout: defaults.call_timeout,
            approval_timeout: defaults.approval_timeout,
            page_size: 20,
        }
    }

    /// Bound session calls the same way the assembler bounds its own.
    pub fn with_timeouts(mut self, config: &MintConfig) -> Self {
        self.call_timeout = config.call_timeout;
        self.approval_timeout = config.approval_timeout;
        self
    }

    pub fn with_page_size(mut self, size: u32) -> Self { self.page_size = size; self }

    pub fn wallet_available(&self) -> bool { self.wallet.is_available() }

    pub async fn session(&self) -> WalletSession { self.session.read().await.clone() }

    /// Request accounts; the first becomes active. Any failure leaves the
    /// session as it was.
    pub async fn connect(&self) -> Result<WalletSession> {
        if !self.wallet.is_available() {
            warn!("connect attempted without a wallet extension");
            return Err(MintError::WalletUnavailable);
        }
        let accounts = time::timeout("wallet request_accounts", self.approval_timeout, self.wallet.request_accounts())
            .await?
            .inspect_err(|e| warn!(error = %e, "connecting to wallet failed"))?;
        let Some(first) = accounts.first().cloned() else {
            self.session.write().await.connected = false;
            return Err(MintError::NoAccounts);
        };

        info!(address = %first, "wallet accounts granted");
        let details = self.load_details().await?;

        let mut s = self.session.write().await;
        s.connected = true;
        s.accounts = accounts;
        details.apply(&mut s, &first);
        info!(address = %first, network = s.network.as_str(), "wallet connected");
        Ok(s.clone())
    }

    /// Reload public key, balance and network for `address`.
    pub async fn refresh_details(&self, address: &str) -> Result<()> {
        let details = self.load_details().await?;
        let mut s = self.session.write().await;
        details.apply(&mut s, address);
        debug!(%address, network = s.network.as_str(), total = s.balance.total, "session refreshed");
        Ok(())
    }

    async fn load_details(&self) -> Result<Details> {
        let public_key = self.call("wallet get_public_key", self.wallet.get_public_key()).await?;
        let balance = self.call("wallet get_balance", self.wallet.get_balance()).await?;
        let network_name = self.call("wallet get_network", self.wallet.get_network()).await?;
        let network = Network::from_wallet_name(&network_name)
            .inspect_err(|e| warn!(error = %e, "wallet reported an unknown network"))?;
        Ok(Details { public_key, balance, network })
    }

    pub async fn disconnect(&self) {
        *self.session.write().await = WalletSession::default();
    }

    /// First page of inscriptions held by `address`. The wallet only lists
    /// its active account, so any other address is refused.
    pub async fn fetch_inscriptions(&self, address: &str, network: Network) -> Result<InscriptionPage> {
        require_address(address, network)?;
        let active = self.session.read().await.address.clone();
        if active.as_deref() != Some(address.trim()) {
            warn!(%address, active = active.as_deref().unwrap_or("none"), "inscriptions requested for an inactive account");
            return Err(MintError::Validation(format!("{} is not the active wallet account", address)));
        }
        let page = self
            .call("wallet get_inscriptions", self.wallet.get_inscriptions(0, self.page_size))
            .await
            .inspect_err(|e| warn!(error = %e, "fetching inscriptions failed"))?;
        debug!(%address, total = page.total, "inscriptions");
        Ok(page)
    }

    pub async fn fetch_utxos(&self, address: &str, network: Network) -> Result<Vec<Utxo>> {
        require_address(address, network)?;
        let utxos = time::timeout("indexer utxos", self.call_timeout, self.indexer.utxos(network, address))
            .await?
            .inspect_err(|e| warn!(error = %e, "fetching utxos failed"))?;
        debug!(%address, count = utxos.len(), "utxos");
        Ok(utxos)
    }

    /// Mint with the session's key and address. The assembler keeps its own
    /// network; a mismatch is reported, not corrected.
    pub async fn mint(&self, assembler: &MintAssembler) -> Result<MintReceipt> {
        let s = self.session().await;
        let address = s.address.filter(|a| !a.is_empty()).ok_or(MintError::MissingAddress)?;
        let public_key = s.public_key.filter(|k| !k.is_empty()).ok_or(MintError::MissingPublicKey)?;
        if assembler.config().network != s.network {
            warn!(
                session = s.network.as_str(),
                mint = assembler.config().network.as_str(),
                "mint network differs from wallet network"
            );
        }
        assembler.mint(&public_key, &address).await
    }

    async fn call<T>(&self, operation: &'static str, fut: impl std::future::Future<Output = Result<T>>) -> Result<T> {
        time::timeout(operation, self.call_timeout, fut).await?
    }
}

struct Details {
    public_key: String,
    balance: Balance,
    network: Network,
}

impl Details {
    fn apply(self, s: &mut WalletSession, address: &str) {
        s.address = Some(address.to_string());
        s.public_key = Some(self.public_key);
        s.balance = self.balance;
        s.network = self.network;
    }
}

fn require_address(address: &str, network: Network) -> Result<()> {
    if address.trim().is_empty() {
        warn!("wallet address is not available");
        return Err(MintError::MissingAddress);
    }
    network.parse_address(address).map(|_| ())
}
