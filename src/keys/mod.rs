//! Key management.
//!
//! Everything starts from a single [`ShareSecret`]. It is (optionally)
//! strengthened with a password into a [`MasterKey`], which is then expanded
//! into one subkey per purpose. Each purpose has its own label so that
//! leaking one subkey tells you nothing about the others.

mod derive;
mod master_key;
mod share_key;
mod share_secret;
mod tokens;

pub use derive::{derive_subkey, DerivationError, DerivationFailures};
pub use master_key::MasterKey;
pub use share_key::ShareKey;
pub use share_secret::ShareSecret;
pub use tokens::{DeletionToken, PublicId, RetrievalToken};

pub(crate) use derive::derive_array;

const SHA512_LEN: usize =
    <<sha2::Sha512 as digest::OutputSizeUser>::OutputSize as typenum::Unsigned>::USIZE;

/// The label used when deriving the [`ShareKey`].
pub const SHARE_KEY_LABEL: &str = "share_item_encryption_key";
/// The label used when deriving the [`PublicId`].
pub const PUBLIC_ID_LABEL: &str = "share_item_uuid";
/// The label used when deriving the [`RetrievalToken`].
pub const RETRIEVAL_TOKEN_LABEL: &str = "share_item_token";
