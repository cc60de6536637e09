use crate::error::{MintError, Result};
use bitcoin::secp256k1::PublicKey;
use bitcoin::XOnlyPublicKey;

/// Drop the parity byte of a 33-byte compressed key.
///
/// Rejects anything that is not a valid compressed secp256k1 point; a bad
/// key here would only surface later as an unspendable output.
pub fn x_only_from_compressed(public_key_hex: &str) -> Result<XOnlyPublicKey> {
    let bytes = hex::decode(public_key_hex.trim())
        .map_err(|e| MintError::InvalidPublicKey(format!("hex: {}", e)))?;
    if bytes.len() != 33 {
        return Err(MintError::InvalidPublicKey(format!("expected 33 bytes, got {}", bytes.len())));
    }
    if bytes[0] != 0x02 && bytes[0] != 0x03 {
        return Err(MintError::InvalidPublicKey(format!("bad prefix 0x{:02x}", bytes[0])));
    }
    PublicKey::from_slice(&bytes).map_err(|e| MintError::InvalidPublicKey(e.to_string()))?;
    XOnlyPublicKey::from_slice(&bytes[1..33]).map_err(|e| MintError::InvalidPublicKey(e.to_string()))
}
