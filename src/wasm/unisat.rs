//! UnisatWallet - WalletProvider over `window.unisat`

use crate::error::{MintError, Result};
use crate::wallet::{Balance, InscriptionPage, SignPsbtOptions, WalletProvider};
use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

const GLOBAL: &str = "unisat";

/// Looks the extension up on every call; it may be injected after load.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnisatWallet;

fn extension() -> Option<JsValue> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() { None } else { Some(value) }
}

fn js_error(value: JsValue) -> MintError {
    let message = value
        .as_string()
        .or_else(|| Reflect::get(&value, &JsValue::from_str("message")).ok().and_then(|m| m.as_string()))
        .unwrap_or_else(|| format!("{:?}", value));
    MintError::Wallet(message)
}

async fn call(method: &str, args: &[JsValue]) -> Result<JsValue> {
    let target = extension().ok_or(MintError::WalletUnavailable)?;
    let func: Function = Reflect::get(&target, &JsValue::from_str(method))
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| MintError::Wallet(format!("{}.{} is not a function", GLOBAL, method)))?;
    let argv = args.iter().collect::<Array>();
    let returned = func.apply(&target, &argv).map_err(js_error)?;
    let promise: Promise = returned
        .dyn_into()
        .map_err(|_| MintError::Wallet(format!("{}.{} did not return a promise", GLOBAL, method)))?;
    JsFuture::from(promise).await.map_err(js_error)
}

fn decode<T: DeserializeOwned>(method: &str, value: JsValue) -> Result<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| MintError::Wallet(format!("{}: unexpected reply: {}", method, e)))
}

fn string_reply(method: &str, value: JsValue) -> Result<String> {
    value.as_string().ok_or_else(|| MintError::Wallet(format!("{}: expected a string", method)))
}

#[async_trait(?Send)]
impl WalletProvider for UnisatWallet {
    fn is_available(&self) -> bool { extension().is_some() }

    async fn request_accounts(&self) -> Result<Vec<String>> {
        decode("requestAccounts", call("requestAccounts", &[]).await?)
    }

    async fn get_public_key(&self) -> Result<String> {
        string_reply("getPublicKey", call("getPublicKey", &[]).await?)
    }

    async fn get_balance(&self) -> Result<Balance> {
        decode("getBalance", call("getBalance", &[]).await?)
    }

    async fn get_network(&self) -> Result<String> {
        string_reply("getNetwork", call("getNetwork", &[]).await?)
    }

    async fn get_inscriptions(&self, cursor: u32, size: u32) -> Result<InscriptionPage> {
        let args = [JsValue::from(cursor), JsValue::from(size)];
        decode("getInscriptions", call("getInscriptions", &args).await?)
    }

    async fn send_bitcoin(&self, address: &str, sats: u64) -> Result<String> {
        let args = [JsValue::from_str(address), JsValue::from_f64(sats as f64)];
        string_reply("sendBitcoin", call("sendBitcoin", &args).await?)
    }

    async fn sign_psbt(&self, psbt_hex: &str, options: &SignPsbtOptions) -> Result<String> {
        let options = serde_wasm_bindgen::to_value(options).map_err(|e| MintError::Wallet(e.to_string()))?;
        string_reply("signPsbt", call("signPsbt", &[JsValue::from_str(psbt_hex), options]).await?)
    }

    async fn push_psbt(&self, psbt_hex: &str) -> Result<String> {
        string_reply("pushPsbt", call("pushPsbt", &[JsValue::from_str(psbt_hex)]).await?)
    }
}
