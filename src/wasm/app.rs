//! MintApp - the session manager and assembler exposed to JavaScript

use super::log;
use super::unisat::UnisatWallet;
use crate::config::{IndexerConfig, MintConfig, Network};
use crate::error::MintError;
use crate::indexer::EsploraClient;
use crate::mint::MintAssembler;
use crate::wallet::SessionManager;
use serde::Serialize;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_err(e: MintError) -> JsValue { JsValue::from_str(&e.to_string()) }

fn parse_network(name: &str) -> Result<Network, JsValue> {
    Network::from_wallet_name(name).map_err(js_err)
}

#[wasm_bindgen]
pub struct MintApp {
    session: Rc<SessionManager>,
    assembler: Rc<MintAssembler>,
}

#[wasm_bindgen]
impl MintApp {
    /// `mint_network` picks where mints happen ("testnet" or "livenet");
    /// it is deliberately independent of the wallet's own network.
    #[wasm_bindgen(constructor)]
    pub fn new(mint_network: &str) -> Result<MintApp, JsValue> {
        let network = parse_network(mint_network)?;
        let indexer = Arc::new(EsploraClient::new(IndexerConfig::default()).map_err(|e| js_err(e.into()))?);
        let wallet = Arc::new(UnisatWallet);
        let config = MintConfig::new(network);
        log!("[MintApp] mint network {}", network.as_str());
        Ok(Self {
            session: Rc::new(SessionManager::new(wallet.clone(), indexer.clone()).with_timeouts(&config)),
            assembler: Rc::new(MintAssembler::new(wallet, indexer, config)),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn installed(&self) -> bool { self.session.wallet_available() }

    pub async fn connect(&self) -> Result<JsValue, JsValue> {
        let session = self.session.connect().await.map_err(|e| {
            log!("[MintApp] connect failed: {}", e);
            js_err(e)
        })?;
        to_js(&session)
    }

    pub async fn refresh(&self) -> Result<JsValue, JsValue> {
        let address = self.session.session().await.address.ok_or_else(|| js_err(MintError::MissingAddress))?;
        self.session.refresh_details(&address).await.map_err(js_err)?;
        to_js(&self.session.session().await)
    }

    pub async fn session(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.session().await)
    }

    #[wasm_bindgen(js_name = "fetchUtxos")]
    pub async fn fetch_utxos(&self) -> Result<JsValue, JsValue> {
        let s = self.session.session().await;
        let utxos = self.session
            .fetch_utxos(s.address.as_deref().unwrap_or_default(), s.network)
            .await
            .map_err(js_err)?;
        to_js(&utxos)
    }

    #[wasm_bindgen(js_name = "fetchInscriptions")]
    pub async fn fetch_inscriptions(&self) -> Result<JsValue, JsValue> {
        let s = self.session.session().await;
        let page = self.session
            .fetch_inscriptions(s.address.as_deref().unwrap_or_default(), s.network)
            .await
            .map_err(js_err)?;
        to_js(&page)
    }

    pub async fn mint(&self) -> Result<JsValue, JsValue> {
        self.assembler.shutdown().reset().await;
        let receipt = self.session.mint(&self.assembler).await.map_err(|e| {
            log!("[MintApp] mint failed: {}", e);
            js_err(e)
        })?;
        log!("[MintApp] minted {}", receipt.txid);
        to_js(&receipt)
    }

    /// Stop a mint that is waiting for its funding UTXO.
    #[wasm_bindgen(js_name = "cancelMint")]
    pub async fn cancel_mint(&self) {
        self.assembler.shutdown().trigger().await;
    }
}
