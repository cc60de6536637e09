//! ordmint: connect a Bitcoin wallet, mint a Taproot inscription.
//!
//! # Architecture
//!
//! ```text
//! SessionManager (wallet state)
//!   │   connect → refresh_details → fetch_inscriptions / fetch_utxos
//!   │
//!   └── mint ──▶ MintAssembler
//!                  │
//!                  ├── inscription: x-only key, envelope script, single-leaf taproot
//!                  ├── WalletProvider.send_bitcoin (fund the commit address)
//!                  ├── wait_for_utxos (bounded indexer poll, cancellable)
//!                  ├── build_reveal_psbt (script-path input, postage + change)
//!                  └── WalletProvider.sign_psbt → push_psbt
//! ```
//!
//! The wallet and the indexer are traits passed in explicitly, so the same
//! code drives the browser extension (`wasm` feature) and test doubles.
//!
//! # Features
//!
//! - `native` - tokio runtime, tracing subscriber (default)
//! - `wasm` - `window.unisat` bridge and `MintApp` JS bindings
//!
//! # Usage
//!
//! ```ignore
//! use ordmint::{EsploraClient, IndexerConfig, MintAssembler, MintConfig, Network, SessionManager};
//!
//! let indexer = Arc::new(EsploraClient::new(IndexerConfig::default())?);
//! let session = SessionManager::new(wallet.clone(), indexer.clone());
//! session.connect().await?;
//!
//! let assembler = MintAssembler::new(wallet, indexer, MintConfig::new(Network::Testnet));
//! let receipt = session.mint(&assembler).await?;
//! println!("revealed in {}", receipt.txid);
//! ```

pub mod config;
pub mod error;
pub mod indexer;
pub mod inscription;
pub mod mint;
pub mod runtime;
pub mod time;
pub mod wallet;

#[cfg(feature = "native")]
pub mod logging;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm;

pub use config::{IndexerConfig, InscriptionPayload, MintConfig, Network, PollPolicy};
pub use error::{IndexerError, MintError, Result};
pub use indexer::{EsploraClient, Indexer, Utxo, UtxoStatus};
pub use inscription::{build_inscription_script, x_only_from_compressed, InscriptionTaproot};
pub use mint::{MintAssembler, MintPlan, MintReceipt, Reveal};
pub use runtime::Shutdown;
pub use wallet::{Balance, SessionManager, SignPsbtOptions, WalletProvider, WalletSession};

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use wasm::{MintApp, UnisatWallet};
