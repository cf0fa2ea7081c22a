//! Copy-pasteable text form for binary values.
//!
//! Everything the user or the server sees (share secrets, tokens, nonces,
//! ciphertext) goes through URL-safe base64 without padding, so it can be
//! pasted into a shell or a URL without escaping.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encode raw bytes as URL-safe, unpadded base64.
pub fn encode<B: AsRef<[u8]>>(bytes: B) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// The inverse of [`encode()`].
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    URL_SAFE_NO_PAD.decode(text).map_err(DecodeError::from)
}

/// Decode into a buffer of exactly `N` bytes.
pub(crate) fn decode_array<const N: usize>(
    text: &str,
) -> Result<[u8; N], DecodeError> {
    let bytes = decode(text)?;

    if bytes.len() != N {
        return Err(DecodeError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }

    let mut buffer = [0; N];
    buffer.copy_from_slice(&bytes);
    Ok(buffer)
}

/// The text wasn't produced by [`encode()`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("The value isn't valid URL-safe base64")]
    Malformed(#[from] base64::DecodeError),
    #[error("Expected {} bytes but the value decoded to {}", expected, actual)]
    InvalidLength { expected: usize, actual: usize },
}
