//! The 16-byte values the server gets to see.

use crate::{
    encoding::{self, DecodeError},
    keys::{
        derive_array, DerivationError, MasterKey, PUBLIC_ID_LABEL,
        RETRIEVAL_TOKEN_LABEL,
    },
    random::{self, RandomnessError},
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    ops::Deref,
    str::FromStr,
};

const TOKEN_LEN: usize = 16;

macro_rules! token {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $name([u8; $name::LEN]);

        impl $name {
            pub const LEN: usize = TOKEN_LEN;

            pub const fn from_raw(raw: [u8; $name::LEN]) -> Self { $name(raw) }
        }

        impl Deref for $name {
            type Target = [u8];

            fn deref(&self) -> &[u8] { &self.0 }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] { self.deref() }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(&encoding::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = DecodeError;

            fn from_str(s: &str) -> Result<$name, Self::Err> {
                encoding::decode_array(s.trim()).map($name)
            }
        }
    };
}

token! {
    /// Names the stored record on the server.
    PublicId
}

token! {
    /// Proves to the server that the caller knows the share secret, without
    /// revealing it.
    RetrievalToken
}

token! {
    /// The capability needed to delete a stored secret.
    ///
    /// Unlike the other tokens this is *not* derived from the share secret,
    /// so knowing the share secret isn't enough to delete something.
    DeletionToken
}

impl PublicId {
    pub fn derive(master_key: &MasterKey) -> Result<Self, DerivationError> {
        derive_array(master_key, PUBLIC_ID_LABEL).map(PublicId)
    }
}

impl RetrievalToken {
    pub fn derive(master_key: &MasterKey) -> Result<Self, DerivationError> {
        derive_array(master_key, RETRIEVAL_TOKEN_LABEL).map(RetrievalToken)
    }
}

impl DeletionToken {
    pub fn generate() -> Result<Self, RandomnessError> {
        random::random_bytes().map(DeletionToken)
    }
}

// the public ID isn't a secret, so it's okay to print it
impl Debug for PublicId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicId").field(&self.to_string()).finish()
    }
}

impl Debug for RetrievalToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RetrievalToken").field(&"<redacted>").finish()
    }
}

impl Debug for DeletionToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DeletionToken").field(&"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens_for_an_all_zero_key() {
        let master_key = MasterKey::from_raw([0; 32]);

        let public_id = PublicId::derive(&master_key).unwrap();
        let retrieval_token = RetrievalToken::derive(&master_key).unwrap();

        assert_eq!(public_id.to_string(), "OFqOfRxtWxt4IdYLk_qxig");
        assert_eq!(retrieval_token.to_string(), "R0lZ4W_TNvF-oppmHcffyA");
    }

    #[test]
    fn deletion_tokens_are_random() {
        let first = DeletionToken::generate().unwrap();
        let second = DeletionToken::generate().unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn parse_a_deletion_token() {
        let token = DeletionToken::from_raw([0xAB; 16]);

        let got: DeletionToken = token.to_string().parse().unwrap();

        assert_eq!(got, token);
    }

    #[test]
    fn truncated_tokens_are_rejected() {
        let text = encoding::encode([1_u8; 15]);

        assert!(text.parse::<DeletionToken>().is_err());
        assert!("not a token!".parse::<DeletionToken>().is_err());
    }

    #[test]
    fn only_the_public_id_is_printed_in_debug_output() {
        let master_key = MasterKey::from_raw([0; 32]);
        let public_id = PublicId::derive(&master_key).unwrap();
        let retrieval_token = RetrievalToken::derive(&master_key).unwrap();

        assert_eq!(
            format!("{:?}", public_id),
            "PublicId(\"OFqOfRxtWxt4IdYLk_qxig\")"
        );
        assert!(!format!("{:?}", retrieval_token)
            .contains(&retrieval_token.to_string()));
    }
}
