//! Inscription - the Taproot commitment a mint spends through
//!
//! ```text
//! compressed pubkey ──x_only──▶ internal key ─┐
//!                                              ├─▶ TaprootBuilder (one leaf) ─▶ address + control block
//! InscriptionPayload ──envelope──▶ leaf script ┘
//! ```

mod envelope;
mod keys;
mod taproot;

pub use envelope::{build_inscription_script, MAX_PUSH_SIZE};
pub use keys::x_only_from_compressed;
pub use taproot::InscriptionTaproot;
