//! Indexer - block explorer queries (UTXOs, raw transactions, broadcast)
//!
//! | Call | Esplora route |
//! |------|---------------|
//! | `utxos` | `GET /address/{address}/utxo` |
//! | `tx_hex` | `GET /tx/{txid}/hex` |
//! | `broadcast` | `POST /tx` (raw hex body) |

mod esplora;

pub use esplora::EsploraClient;

use crate::config::Network;
use crate::error::IndexerError;
use async_trait::async_trait;
use bitcoin::{OutPoint, ScriptBuf, Txid};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoStatus {
    pub confirmed: bool,
    #[serde(default)]
    pub block_height: Option<u32>,
    #[serde(default)]
    pub block_hash: Option<String>,
}

/// Unspent output as reported by the indexer. Identity is `(txid, vout)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub txid: Txid,
    pub vout: u32,
    pub value: u64,
    #[serde(default)]
    pub status: Option<UtxoStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptBuf>,
}

impl Utxo {
    pub fn outpoint(&self) -> OutPoint { OutPoint::new(self.txid, self.vout) }
    pub fn is_confirmed(&self) -> bool { self.status.as_ref().map(|s| s.confirmed).unwrap_or(false) }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Indexer: Send + Sync {
    async fn utxos(&self, network: Network, address: &str) -> Result<Vec<Utxo>, IndexerError>;
    async fn tx_hex(&self, network: Network, txid: &Txid) -> Result<String, IndexerError>;
    /// Returns the txid the indexer accepted
    async fn broadcast(&self, network: Network, raw_tx_hex: &str) -> Result<String, IndexerError>;
}
