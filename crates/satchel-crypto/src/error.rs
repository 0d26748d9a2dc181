#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("bad key: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("random source failed: {0}")]
    Random(#[from] rand::Error),

    #[error("{0} bytes is not an AES key length (16, 24 or 32)")]
    InvalidKeyLength(usize),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
