//! Reveal PSBT: spend the funding UTXO through the inscription leaf

use crate::error::{MintError, Result};
use crate::indexer::Utxo;
use crate::inscription::InscriptionTaproot;
use bitcoin::absolute::LockTime;
use bitcoin::psbt::Psbt;
use bitcoin::transaction::Version;
use bitcoin::{Address, Amount, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness};

/// `value - postage - fee`, or `InsufficientFunds` when that is not positive.
pub fn change_value(value: u64, postage: u64, fee: u64) -> Result<u64> {
    let required = postage
        .checked_add(fee)
        .ok_or_else(|| MintError::Validation("postage + fee overflows".into()))?;
    match value.checked_sub(required) {
        Some(change) if change > 0 => Ok(change),
        _ => Err(MintError::InsufficientFunds { value, required }),
    }
}

/// One input (script path), two outputs to `receiver`: postage, then change.
pub fn build_reveal_psbt(
    taproot: &InscriptionTaproot,
    utxo: &Utxo,
    receiver: &Address,
    postage: u64,
    fee: u64,
) -> Result<Psbt> {
    let change = change_value(utxo.value, postage, fee)?;

    let tx = Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: utxo.outpoint(),
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness: Witness::default(),
        }],
        output: vec![
            TxOut { value: Amount::from_sat(postage), script_pubkey: receiver.script_pubkey() },
            TxOut { value: Amount::from_sat(change), script_pubkey: receiver.script_pubkey() },
        ],
    };

    let mut psbt = Psbt::from_unsigned_tx(tx)?;
    let input = &mut psbt.inputs[0];
    input.witness_utxo = Some(TxOut {
        value: Amount::from_sat(utxo.value),
        script_pubkey: taproot.script_pubkey(),
    });
    input.tap_internal_key = Some(taproot.internal_key);
    input.tap_merkle_root = taproot.merkle_root();
    input
        .tap_scripts
        .insert(taproot.control_block.clone(), (taproot.script.clone(), taproot.leaf_version()));
    Ok(psbt)
}
