//! Funding wait: poll the indexer until the funding address has a UTXO

use crate::config::{Network, PollPolicy};
use crate::error::{MintError, Result};
use crate::indexer::{Indexer, Utxo};
use crate::runtime::Shutdown;
use crate::time;
use futures::future::{self, Either};
use std::time::Duration;
use tracing::{debug, info};

/// Wait one interval, query, repeat.
///
/// Resolves with the first non-empty result. The first indexer error ends
/// the wait. After `policy.max_attempts` empty answers the wait ends with
/// `FundingTimedOut`; a triggered `cancel` ends it with `Cancelled`.
pub async fn wait_for_utxos<I: Indexer + ?Sized>(
    indexer: &I,
    network: Network,
    address: &str,
    policy: &PollPolicy,
    call_timeout: Duration,
    cancel: &Shutdown,
) -> Result<Vec<Utxo>> {
    for attempt in 1..=policy.max_attempts {
        let tick = std::pin::pin!(time::sleep(policy.interval));
        let stop = std::pin::pin!(cancel.cancelled());
        if let Either::Right(_) = future::select(tick, stop).await {
            info!(%address, attempt, "funding wait cancelled");
            return Err(MintError::Cancelled);
        }

        let utxos = time::timeout("indexer utxos", call_timeout, indexer.utxos(network, address)).await??;
        debug!(%address, attempt, found = utxos.len(), "funding poll");
        if !utxos.is_empty() {
            return Ok(utxos);
        }
    }
    Err(MintError::FundingTimedOut { address: address.to_string(), attempts: policy.max_attempts })
}
