//! EsploraClient - reqwest over the Blockstream/mempool REST API

use super::{Indexer, Utxo};
use crate::config::{IndexerConfig, Network};
use crate::error::IndexerError;
use async_trait::async_trait;
use bitcoin::Txid;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Clone)]
pub struct EsploraClient {
    http: Client,
    config: IndexerConfig,
}

impl EsploraClient {
    pub fn new(config: IndexerConfig) -> Result<Self, IndexerError> {
        #[cfg(not(target_arch = "wasm32"))]
        let http = Client::builder().timeout(config.timeout).build()?;
        #[cfg(target_arch = "wasm32")]
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &IndexerConfig { &self.config }

    fn url(&self, network: Network, path: &str) -> String {
        format!("{}{}", self.config.base_url(network).trim_end_matches('/'), path)
    }

    async fn get_text(&self, url: &str) -> Result<String, IndexerError> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        read_body(response).await
    }

    /// Body first, parse second, so a bad payload is never reported as a network failure.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, IndexerError> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| IndexerError::MalformedResponse(format!("{}: {}", url, e)))
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, IndexerError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(IndexerError::Status { status: status.as_u16(), body });
    }
    Ok(body)
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Indexer for EsploraClient {
    async fn utxos(&self, network: Network, address: &str) -> Result<Vec<Utxo>, IndexerError> {
        self.get_json(&self.url(network, &format!("/address/{}/utxo", address))).await
    }

    async fn tx_hex(&self, network: Network, txid: &Txid) -> Result<String, IndexerError> {
        let hex = self.get_text(&self.url(network, &format!("/tx/{}/hex", txid))).await?;
        Ok(hex.trim().to_string())
    }

    async fn broadcast(&self, network: Network, raw_tx_hex: &str) -> Result<String, IndexerError> {
        let url = self.url(network, "/tx");
        debug!(%url, bytes = raw_tx_hex.len() / 2, "POST");
        let response = self.http.post(&url).body(raw_tx_hex.to_string()).send().await?;
        Ok(read_body(response).await?.trim().to_string())
    }
}
