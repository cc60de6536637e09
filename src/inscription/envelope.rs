//! Envelope script
//!
//! ```text
//! <xonly> OP_CHECKSIG OP_FALSE OP_IF
//!   "ord" OP_1 <"{protocol}:mint:{ticker}={amount}">
//!   OP_0 <body chunks...>
//! OP_ENDIF
//! ```

use crate::config::InscriptionPayload;
use crate::error::{MintError, Result};
use bitcoin::opcodes::all::{OP_CHECKSIG, OP_ENDIF, OP_IF, OP_PUSHBYTES_0, OP_PUSHNUM_1};
use bitcoin::opcodes::OP_FALSE;
use bitcoin::script::{Builder, PushBytesBuf};
use bitcoin::{ScriptBuf, XOnlyPublicKey};

/// Tapscript element size limit
pub const MAX_PUSH_SIZE: usize = 520;

const PROTOCOL_MARKER: &[u8] = b"ord";

fn push_bytes(data: &[u8]) -> Result<PushBytesBuf> {
    if data.len() > MAX_PUSH_SIZE {
        return Err(MintError::Validation(format!("push of {} bytes exceeds {}", data.len(), MAX_PUSH_SIZE)));
    }
    PushBytesBuf::try_from(data.to_vec()).map_err(|e| MintError::Validation(e.to_string()))
}

/// Same key and payload always give the same bytes.
pub fn build_inscription_script(key: &XOnlyPublicKey, payload: &InscriptionPayload) -> Result<ScriptBuf> {
    let content = payload.content();
    let mut builder = Builder::new()
        .push_x_only_key(key)
        .push_opcode(OP_CHECKSIG)
        .push_opcode(OP_FALSE)
        .push_opcode(OP_IF)
        .push_slice(push_bytes(PROTOCOL_MARKER)?)
        .push_opcode(OP_PUSHNUM_1)
        .push_slice(push_bytes(content.as_bytes())?)
        .push_opcode(OP_PUSHBYTES_0);
    for chunk in payload.body.chunks(MAX_PUSH_SIZE) {
        builder = builder.push_slice(push_bytes(chunk)?);
    }
    Ok(builder.push_opcode(OP_ENDIF).into_script())
}
