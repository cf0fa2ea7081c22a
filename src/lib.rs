//! Share secrets with someone else without the server ever seeing them.
//!
//! A secret is encrypted locally with a key derived from a random
//! [`ShareSecret`]. Only derived, non-reversible identifiers and the
//! ciphertext are handed to the [`RemoteStore`]; the share secret itself is
//! passed to the recipient out-of-band.

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod actions;
mod cipher;
pub mod encoding;
pub mod endpoints;
mod key_set;
mod keys;
pub mod prompt;
mod random;

pub use cipher::{DecryptionError, EncryptedData, EncryptionError, ShareCipher};
pub use endpoints::{EndpointError, Expiration, RemoteStore};
pub use key_set::{KeySet, KeySetError};
pub use keys::{
    derive_subkey, DeletionToken, DerivationError, DerivationFailures,
    MasterKey, PublicId, RetrievalToken, ShareKey, ShareSecret,
};
pub use random::RandomnessError;

/// The default user agent to use when communicating with the remote store.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));

/// The server used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://patrickscheid.de/s/";
