use crate::config::Network;
use crate::error::{MintError, Result};
use bitcoin::secp256k1::Secp256k1;
use bitcoin::taproot::{ControlBlock, LeafVersion, TapNodeHash, TaprootBuilder, TaprootSpendInfo};
use bitcoin::{Address, ScriptBuf, XOnlyPublicKey};

/// Single-leaf Taproot output committing to an inscription script.
///
/// The funding address and the control block both come from the same
/// `TaprootSpendInfo`, so the reveal input always matches what was funded.
#[derive(Debug, Clone)]
pub struct InscriptionTaproot {
    pub internal_key: XOnlyPublicKey,
    pub script: ScriptBuf,
    pub spend_info: TaprootSpendInfo,
    pub control_block: ControlBlock,
}

impl InscriptionTaproot {
    pub fn new(internal_key: XOnlyPublicKey, script: ScriptBuf) -> Result<Self> {
        let secp = Secp256k1::verification_only();
        let spend_info = TaprootBuilder::new()
            .add_leaf(0, script.clone())
            .map_err(|e| MintError::Validation(format!("taproot leaf: {}", e)))?
            .finalize(&secp, internal_key)
            .map_err(|_| MintError::Validation("taproot tree not finalizable".into()))?;
        let control_block = spend_info
            .control_block(&(script.clone(), LeafVersion::TapScript))
            .ok_or_else(|| MintError::Validation("leaf missing from taproot tree".into()))?;
        Ok(Self { internal_key, script, spend_info, control_block })
    }

    pub fn leaf_version(&self) -> LeafVersion { LeafVersion::TapScript }

    pub fn merkle_root(&self) -> Option<TapNodeHash> { self.spend_info.merkle_root() }

    pub fn address(&self, network: Network) -> Address {
        Address::p2tr_tweaked(self.spend_info.output_key(), network.to_bitcoin())
    }

    pub fn script_pubkey(&self) -> ScriptBuf {
        ScriptBuf::new_p2tr_tweaked(self.spend_info.output_key())
    }

    /// Check the control block proves `script` under the output key.
    pub fn verify(&self) -> bool {
        let secp = Secp256k1::verification_only();
        self.control_block.verify_taproot_commitment(&secp, self.spend_info.output_key().to_x_only_public_key(), &self.script)
    }
}
