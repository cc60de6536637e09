//! Wallet module - session state over an injected wallet extension
//!
//! # Architecture
//!
//! ```text
//! SessionManager
//!     │
//!     ├── connect / refresh_details ──▶ WalletProvider (accounts, key, balance, network)
//!     ├── fetch_inscriptions ─────────▶ WalletProvider (paged listing)
//!     ├── fetch_utxos ────────────────▶ Indexer
//!     └── mint ───────────────────────▶ MintAssembler
//! ```
//!
//! # Session fields
//!
//! | Field | Source |
//! |-------|--------|
//! | `connected`, `accounts`, `address` | `request_accounts` |
//! | `public_key` | `get_public_key` (compressed, hex) |
//! | `balance` | `get_balance` `{confirmed, unconfirmed, total}` sats |
//! | `network` | `get_network`, strictly mapped |

mod provider;
mod session;

pub use provider::{Balance, Inscription, InscriptionPage, SignPsbtOptions, ToSignInput, WalletProvider};
pub use session::{SessionManager, WalletSession};
