use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::Result;

/// Standard alphabet, padded.
pub fn encode_base64(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_base64(input: impl AsRef<[u8]>) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(input)?)
}
