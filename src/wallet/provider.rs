//! WalletProvider - the wallet extension's RPC surface as a trait

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Balance in sats as the extension reports it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub confirmed: u64,
    pub unconfirmed: u64,
    pub total: u64,
}

/// One input the wallet is asked to sign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToSignInput {
    pub index: u32,
    pub public_key: String,
    /// Script-path spends sign with the untweaked key
    pub disable_tweak_signer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignPsbtOptions {
    pub auto_finalized: bool,
    pub to_sign_inputs: Vec<ToSignInput>,
}

impl SignPsbtOptions {
    /// Sign a single script-path input and let the wallet finalize it.
    pub fn script_path(index: u32, public_key: impl Into<String>) -> Self {
        Self {
            auto_finalized: true,
            to_sign_inputs: vec![ToSignInput { index, public_key: public_key.into(), disable_tweak_signer: true }],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Inscription {
    pub inscription_id: String,
    pub inscription_number: i64,
    pub address: String,
    pub output_value: u64,
    pub content_type: String,
    pub output: String,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InscriptionPage {
    pub total: u64,
    pub list: Vec<Inscription>,
}

/// Wallet capability passed explicitly to the session and the assembler.
///
/// Every method maps one-to-one onto an extension RPC. Rejections by the
/// user come back as `MintError::Wallet`.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait WalletProvider: Send + Sync {
    /// Whether the extension is present at all
    fn is_available(&self) -> bool;
    async fn request_accounts(&self) -> Result<Vec<String>>;
    /// Compressed secp256k1 key, hex
    async fn get_public_key(&self) -> Result<String>;
    async fn get_balance(&self) -> Result<Balance>;
    /// Raw network name, e.g. `livenet` / `testnet`
    async fn get_network(&self) -> Result<String>;
    async fn get_inscriptions(&self, cursor: u32, size: u32) -> Result<InscriptionPage>;
    /// Pay `sats` to `address`; returns the funding txid
    async fn send_bitcoin(&self, address: &str, sats: u64) -> Result<String>;
    async fn sign_psbt(&self, psbt_hex: &str, options: &SignPsbtOptions) -> Result<String>;
    /// Broadcast a signed PSBT; returns the txid
    async fn push_psbt(&self, psbt_hex: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sign_options_wire_shape() {
        let opts = SignPsbtOptions::script_path(0, "02ab");
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({"autoFinalized": true, "toSignInputs": [{"index": 0, "publicKey": "02ab", "disableTweakSigner": true}]})
        );
    }

    #[test]
    fn test_inscription_page_tolerates_extra_fields() {
        let page: InscriptionPage = serde_json::from_value(json!({
            "total": 1,
            "list": [{"inscriptionId": "abci0", "inscriptionNumber": 7, "outputValue": 546, "preview": "x"}]
        })).unwrap();
        assert_eq!(page.list[0].inscription_id, "abci0");
        assert_eq!(page.list[0].output_value, 546);
        assert!(page.list[0].content_type.is_empty());
    }
}
