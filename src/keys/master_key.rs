use crate::keys::ShareSecret;
use sha2::Sha512;
use std::{
    fmt::{self, Debug, Formatter},
    ops::Deref,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The key every other subkey is derived from.
///
/// Without a password this is just the share secret. With a password, the
/// password is stretched with PBKDF2 using the share secret as the salt, so
/// the same password gives a different master key for every secret.
#[derive(Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; MasterKey::LEN]);

impl MasterKey {
    pub const LEN: usize = 32;
    /// How many PBKDF2 rounds to use when strengthening a password.
    pub const ITERATIONS: u32 = 100_000;

    pub const fn from_raw(key: [u8; MasterKey::LEN]) -> Self { MasterKey(key) }

    /// Get the master key for a share secret, strengthening it with the
    /// password if there is one.
    pub fn calculate(
        share_secret: &ShareSecret,
        password: Option<&str>,
    ) -> Self {
        match password {
            Some(password) => MasterKey::strengthen(password, share_secret),
            None => {
                let mut key = [0; MasterKey::LEN];
                key.copy_from_slice(share_secret);
                MasterKey(key)
            },
        }
    }

    /// Turn a (low entropy) password into a master key using
    /// PBKDF2-HMAC-SHA512.
    pub fn strengthen(password: &str, salt: &[u8]) -> Self {
        let mut key = [0; MasterKey::LEN];
        pbkdf2::pbkdf2_hmac::<Sha512>(
            password.as_bytes(),
            salt,
            MasterKey::ITERATIONS,
            &mut key,
        );

        MasterKey(key)
    }
}

impl Deref for MasterKey {
    type Target = [u8];

    fn deref(&self) -> &[u8] { &self.0 }
}

impl AsRef<[u8]> for MasterKey {
    fn as_ref(&self) -> &[u8] { self.deref() }
}

impl Debug for MasterKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MasterKey").field(&"<redacted>").finish()
    }
}
