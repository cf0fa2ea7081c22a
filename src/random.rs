use rand::{rngs::OsRng, RngCore};

/// Fill an `N`-byte buffer from the operating system's CSPRNG.
pub(crate) fn random_bytes<const N: usize>() -> Result<[u8; N], RandomnessError> {
    let mut buffer = [0; N];
    OsRng.try_fill_bytes(&mut buffer)?;
    Ok(buffer)
}

/// The operating system couldn't give us any random bytes.
#[derive(Debug, thiserror::Error)]
#[error("The system random number generator is unavailable")]
pub struct RandomnessError(#[from] rand::Error);
