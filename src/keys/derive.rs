use crate::keys::SHA512_LEN;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::fmt::{self, Display, Formatter};

type HmacSha512 = Hmac<Sha512>;

/// HKDF can't produce more than 255 blocks of output.
const MAX_OUTPUT_LEN: usize = 255 * SHA512_LEN;

/// Expand `master_key` into `length` bytes which are bound to `label`.
///
/// This is the HKDF-Expand step from RFC 5869 using HMAC-SHA512, with the
/// master key used directly as the pseudorandom key. The master key is
/// already uniformly random (either fresh from the OS or the output of
/// PBKDF2) so there's no extract step and no salt.
///
/// The same `(master_key, label, length)` always gives the same bytes, and
/// different labels give unrelated bytes.
pub fn derive_subkey(
    master_key: &[u8],
    label: &str,
    length: usize,
) -> Result<Vec<u8>, DerivationError> {
    if length > MAX_OUTPUT_LEN {
        return Err(DerivationError::OutputTooLong {
            label: label.to_string(),
            requested: length,
            max: MAX_OUTPUT_LEN,
        });
    }

    let mut output = Vec::with_capacity(length);
    let mut block: Vec<u8> = Vec::new();
    let mut counter: u8 = 1;

    while output.len() < length {
        let mut mac = HmacSha512::new_from_slice(master_key).map_err(|_| {
            DerivationError::InvalidKey {
                label: label.to_string(),
            }
        })?;
        mac.update(&block);
        mac.update(label.as_bytes());
        mac.update(&[counter]);
        block = mac.finalize().into_bytes().to_vec();

        let remaining = length - output.len();
        output.extend_from_slice(&block[..remaining.min(block.len())]);
        counter = counter.wrapping_add(1);
    }

    Ok(output)
}

/// [`derive_subkey()`] for fixed-size keys.
pub(crate) fn derive_array<const N: usize>(
    master_key: &[u8],
    label: &str,
) -> Result<[u8; N], DerivationError> {
    let bytes = derive_subkey(master_key, label, N)?;

    let mut buffer = [0; N];
    buffer.copy_from_slice(&bytes);
    Ok(buffer)
}

/// Expanding a master key failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DerivationError {
    #[error(
        "Unable to derive {} bytes for \"{}\", at most {} are supported",
        requested,
        label,
        max
    )]
    OutputTooLong {
        label: String,
        requested: usize,
        max: usize,
    },
    #[error("The master key was rejected while deriving \"{}\"", label)]
    InvalidKey { label: String },
}

impl DerivationError {
    /// The label of the subkey that couldn't be derived.
    pub fn label(&self) -> &str {
        match self {
            DerivationError::OutputTooLong { label, .. }
            | DerivationError::InvalidKey { label } => label,
        }
    }
}

/// Every derivation that failed while building a key set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct DerivationFailures(pub Vec<DerivationError>);

impl DerivationFailures {
    pub fn iter(&self) -> impl Iterator<Item = &'_ DerivationError> + '_ {
        self.0.iter()
    }
}

impl Display for DerivationFailures {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} key derivation(s) failed", self.0.len())?;

        for (i, err) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, err)?;
        }

        Ok(())
    }
}
