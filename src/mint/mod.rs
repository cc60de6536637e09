//! Mint - assemble, fund, and reveal a single-leaf inscription
//!
//! # Flow
//!
//! ```text
//! prepare(pubkey)        x-only key → envelope script → taproot → funding address
//!    │
//! fund(plan)             wallet.send_bitcoin(address, fee + postage + margin)
//!    │
//! wait_for_funding      poll indexer every interval, bounded attempts
//!    │
//! finish(plan, utxo)     reveal PSBT → wallet.sign_psbt → wallet.push_psbt
//! ```
//!
//! `mint` runs the whole chain. Nothing is retained between calls, so a
//! failure at any step leaves no partial state behind.

mod poller;
mod psbt;

pub use poller::wait_for_utxos;
pub use psbt::{build_reveal_psbt, change_value};

use crate::config::MintConfig;
use crate::error::{MintError, Result};
use crate::indexer::{Indexer, Utxo};
use crate::inscription::{build_inscription_script, x_only_from_compressed, InscriptionTaproot};
use crate::runtime::Shutdown;
use crate::time;
use crate::wallet::{SignPsbtOptions, WalletProvider};
use bitcoin::psbt::Psbt;
use bitcoin::Address;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything derived from the public key before any money moves.
#[derive(Debug, Clone)]
pub struct MintPlan {
    pub public_key: String,
    pub taproot: InscriptionTaproot,
    pub funding_address: Address,
    pub funding_amount: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MintReceipt {
    pub funding_address: String,
    pub funding_txid: String,
    pub funding_utxo: Utxo,
    pub change: u64,
    pub psbt_hex: String,
    pub signed_psbt_hex: String,
    pub txid: String,
}

/// Result of the reveal half of a mint
#[derive(Debug, Clone, Serialize)]
pub struct Reveal {
    pub change: u64,
    pub psbt_hex: String,
    pub signed_psbt_hex: String,
    pub txid: String,
}

pub struct MintAssembler {
    wallet: Arc<dyn WalletProvider>,
    indexer: Arc<dyn Indexer>,
    config: MintConfig,
    shutdown: Shutdown,
}

impl MintAssembler {
    pub fn new(wallet: Arc<dyn WalletProvider>, indexer: Arc<dyn Indexer>, config: MintConfig) -> Self {
        Self { wallet, indexer, config, shutdown: Shutdown::new() }
    }

    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self { self.shutdown = shutdown; self }

    pub fn config(&self) -> &MintConfig { &self.config }

    /// Handle that cancels an in-flight funding wait
    pub fn shutdown(&self) -> &Shutdown { &self.shutdown }

    pub fn prepare(&self, public_key_hex: &str) -> Result<MintPlan> {
        let internal_key = x_only_from_compressed(public_key_hex)?;
        let script = build_inscription_script(&internal_key, &self.config.payload)?;
        let taproot = InscriptionTaproot::new(internal_key, script)?;
        let funding_address = taproot.address(self.config.network);
        Ok(MintPlan {
            public_key: public_key_hex.trim().to_string(),
            taproot,
            funding_address,
            funding_amount: self.config.funding_amount(),
        })
    }

    /// Ask the wallet to pay the funding amount. Waits on user approval.
    pub async fn fund(&self, plan: &MintPlan) -> Result<String> {
        let address = plan.funding_address.to_string();
        info!(%address, sats = plan.funding_amount, "requesting funding");
        let txid = time::timeout(
            "wallet send_bitcoin",
            self.config.approval_timeout,
            self.wallet.send_bitcoin(&address, plan.funding_amount),
        )
        .await??;
        info!(%txid, "funding sent");
        Ok(txid)
    }

    /// Poll until the funding address holds a UTXO. When `funding_txid` is
    /// known the output it created wins over leftovers from earlier funding.
    pub async fn wait_for_funding(&self, plan: &MintPlan, funding_txid: Option<&str>) -> Result<Utxo> {
        let address = plan.funding_address.to_string();
        let utxos = wait_for_utxos(
            self.indexer.as_ref(),
            self.config.network,
            &address,
            &self.config.poll,
            self.config.call_timeout,
            &self.shutdown,
        )
        .await?;
        let utxo = select_funding(utxos, funding_txid).ok_or(MintError::FundingTimedOut { address, attempts: 0 })?;
        info!(txid = %utxo.txid, vout = utxo.vout, value = utxo.value, "using utxo");
        Ok(utxo)
    }

    pub fn build_psbt(&self, plan: &MintPlan, utxo: &Utxo, receiver: &Address) -> Result<Psbt> {
        build_reveal_psbt(&plan.taproot, utxo, receiver, self.config.postage, self.config.fee)
    }

    /// Build, sign, and broadcast the reveal for a known funding UTXO.
    pub async fn finish(&self, plan: &MintPlan, utxo: &Utxo, receive_address: &str) -> Result<Reveal> {
        let receiver = self.config.network.parse_address(receive_address)?;
        let psbt = self.build_psbt(plan, utxo, &receiver)?;
        let change = psbt.unsigned_tx.output[1].value.to_sat();
        let psbt_hex = psbt.serialize_hex();

        let options = SignPsbtOptions::script_path(0, plan.public_key.clone());
        let signed_psbt_hex = time::timeout(
            "wallet sign_psbt",
            self.config.approval_timeout,
            self.wallet.sign_psbt(&psbt_hex, &options),
        )
        .await?
        .inspect_err(|e| warn!(error = %e, "sign_psbt failed"))?;

        let txid = time::timeout("wallet push_psbt", self.config.call_timeout, self.wallet.push_psbt(&signed_psbt_hex))
            .await?
            .inspect_err(|e| warn!(error = %e, "push_psbt failed"))?;
        info!(%txid, change, "reveal broadcast");
        Ok(Reveal { change, psbt_hex, signed_psbt_hex, txid })
    }

    pub async fn mint(&self, public_key_hex: &str, receive_address: &str) -> Result<MintReceipt> {
        let plan = self.prepare(public_key_hex)?;
        // fail before any payment if the reveal could never be built
        self.config.network.parse_address(receive_address)?;
        change_value(plan.funding_amount, self.config.postage, self.config.fee)?;

        let funding_txid = self.fund(&plan).await?;
        let utxo = self.wait_for_funding(&plan, Some(&funding_txid)).await?;
        let reveal = self.finish(&plan, &utxo, receive_address).await?;

        Ok(MintReceipt {
            funding_address: plan.funding_address.to_string(),
            funding_txid,
            funding_utxo: utxo,
            change: reveal.change,
            psbt_hex: reveal.psbt_hex,
            signed_psbt_hex: reveal.signed_psbt_hex,
            txid: reveal.txid,
        })
    }
}

fn select_funding(utxos: Vec<Utxo>, funding_txid: Option<&str>) -> Option<Utxo> {
    let position = funding_txid
        .and_then(|id| utxos.iter().position(|u| u.txid.to_string().eq_ignore_ascii_case(id.trim())))
        .unwrap_or(0);
    utxos.into_iter().nth(position)
}
