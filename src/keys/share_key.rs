use crate::keys::{derive_array, DerivationError, MasterKey, SHARE_KEY_LABEL};
use std::{
    fmt::{self, Debug, Formatter},
    ops::Deref,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The AES-256 key used to encrypt the shared item.
#[derive(Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct ShareKey([u8; ShareKey::LEN]);

impl ShareKey {
    pub const LEN: usize = 32;

    pub const fn from_raw(key: [u8; ShareKey::LEN]) -> Self { ShareKey(key) }

    pub fn derive(master_key: &MasterKey) -> Result<Self, DerivationError> {
        derive_array(master_key, SHARE_KEY_LABEL).map(ShareKey)
    }
}

impl Deref for ShareKey {
    type Target = [u8];

    fn deref(&self) -> &[u8] { &self.0 }
}

impl AsRef<[u8]> for ShareKey {
    fn as_ref(&self) -> &[u8] { self.deref() }
}

impl Debug for ShareKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShareKey").field(&"<redacted>").finish()
    }
}
