//! Key material and text encoding for secrets.
//!
//! Keys come from the operating system's random source, never from the
//! process-wide generator used for random names.
//!
//! # Example
//!
//! ```
//! use satchel_crypto::{decode_base64, encode_base64, random_aes_key};
//!
//! let key = random_aes_key(32).unwrap();
//! let text = encode_base64(&key);
//! assert_eq!(decode_base64(&text).unwrap(), key);
//! ```

pub use self::encoding::{decode_base64, encode_base64};
pub use self::error::{CryptoError, Result};
pub use self::key::{AES_KEY_LENGTHS, is_valid_aes_key_len, random_aes_key, random_key};

mod encoding;
mod error;
mod key;
