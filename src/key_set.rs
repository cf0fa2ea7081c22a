use crate::{
    cipher::{DecryptionError, EncryptedData, EncryptionError, ShareCipher},
    encoding::DecodeError,
    keys::{
        DeletionToken, DerivationFailures, MasterKey, PublicId, RetrievalToken,
        ShareKey, ShareSecret,
    },
    random::RandomnessError,
};

/// Everything needed to store, retrieve, or delete a single shared secret.
///
/// A key set is either created fresh (when sharing) or reconstructed from a
/// share secret (when retrieving or deleting). The share key, public ID and
/// retrieval token are derived from the master key and come out identical
/// both times. The deletion token is random, so it only exists on the key
/// set that created it.
#[derive(Debug, Clone)]
pub struct KeySet {
    share_secret: ShareSecret,
    share_key: ShareKey,
    public_id: PublicId,
    retrieval_token: RetrievalToken,
    deletion_token: Option<DeletionToken>,
    cipher: ShareCipher,
}

impl KeySet {
    /// Generate a new key set with a random share secret, optionally
    /// protected by a password.
    pub fn create_new(password: Option<&str>) -> Result<Self, KeySetError> {
        let share_secret = ShareSecret::generate()?;
        let mut key_set = KeySet::from_share_secret(share_secret, password)?;
        key_set.deletion_token = Some(DeletionToken::generate()?);

        log::debug!("Created a new key set for {}", key_set.public_id);

        Ok(key_set)
    }

    /// Rebuild a key set from the share secret the user was given.
    ///
    /// The password must match the one used when the secret was shared. A
    /// reconstructed key set never has a deletion token.
    pub fn reconstruct(
        share_secret: &str,
        password: Option<&str>,
    ) -> Result<Self, KeySetError> {
        let share_secret: ShareSecret = share_secret.parse()?;
        KeySet::from_share_secret(share_secret, password)
    }

    pub fn from_share_secret(
        share_secret: ShareSecret,
        password: Option<&str>,
    ) -> Result<Self, KeySetError> {
        let master_key = MasterKey::calculate(&share_secret, password);
        let (share_key, public_id, retrieval_token) = derive_all(&master_key)?;

        Ok(KeySet {
            share_secret,
            cipher: ShareCipher::new(&share_key),
            share_key,
            public_id,
            retrieval_token,
            deletion_token: None,
        })
    }

    /// The text the user hands to the recipient.
    pub fn share_secret(&self) -> String { self.share_secret.to_string() }

    pub fn public_id(&self) -> String { self.public_id.to_string() }

    pub fn retrieval_token(&self) -> String { self.retrieval_token.to_string() }

    /// Only available on key sets made with [`KeySet::create_new()`].
    pub fn deletion_token(&self) -> Option<String> {
        self.deletion_token.as_ref().map(ToString::to_string)
    }

    pub fn encrypt(
        &self,
        plaintext: &str,
    ) -> Result<EncryptedData, EncryptionError> {
        self.cipher.encrypt(plaintext)
    }

    pub fn decrypt(&self, data: &EncryptedData) -> Result<String, DecryptionError> {
        self.cipher.decrypt(data)
    }
}

/// Derive every subkey, reporting all failures rather than just the first.
fn derive_all(
    master_key: &MasterKey,
) -> Result<(ShareKey, PublicId, RetrievalToken), DerivationFailures> {
    let share_key = ShareKey::derive(master_key);
    let public_id = PublicId::derive(master_key);
    let retrieval_token = RetrievalToken::derive(master_key);

    match (share_key, public_id, retrieval_token) {
        (Ok(share_key), Ok(public_id), Ok(retrieval_token)) => {
            Ok((share_key, public_id, retrieval_token))
        },
        (share_key, public_id, retrieval_token) => {
            let failures = vec![
                share_key.err(),
                public_id.err(),
                retrieval_token.err(),
            ];

            Err(DerivationFailures(failures.into_iter().flatten().collect()))
        },
    }
}

/// Errors that may occur while creating or reconstructing a [`KeySet`].
#[derive(Debug, thiserror::Error)]
pub enum KeySetError {
    #[error("The share secret is malformed")]
    Decode(#[from] DecodeError),
    #[error("Unable to generate random key material")]
    Randomness(#[from] RandomnessError),
    #[error("Unable to derive the share keys")]
    Derivation(#[from] DerivationFailures),
}
