//! The high-level operations: share, retrieve, and delete a secret.

use crate::{
    encoding::DecodeError,
    endpoints::{self, EndpointError, Expiration, RemoteStore},
    DecryptionError, DeletionToken, EncryptionError, KeySet, KeySetError,
};

/// Secrets longer than this (in bytes) are refused.
pub const MAX_SECRET_LEN: usize = 5000;

/// What the person sharing a secret needs to hold on to.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareReceipt {
    /// Give this to the recipient.
    pub share_secret: String,
    /// Keep this if you want to delete the secret early.
    pub deletion_token: String,
}

/// Encrypt `plaintext` and upload it to the store.
pub async fn share(
    store: &RemoteStore,
    plaintext: &str,
    password: Option<&str>,
    expiration: Expiration,
    burn_after_read: bool,
) -> Result<ShareReceipt, Error> {
    if plaintext.len() > MAX_SECRET_LEN {
        return Err(Error::SecretTooLarge {
            len: plaintext.len(),
        });
    }

    let key_set = KeySet::create_new(password)?;
    let encrypted = key_set.encrypt(plaintext)?;

    endpoints::store_secret(
        store,
        &key_set,
        &encrypted,
        expiration,
        burn_after_read,
    )
    .await?;

    log::info!("Stored secret {} (expires in {})", key_set.public_id(), expiration);

    Ok(ShareReceipt {
        share_secret: key_set.share_secret(),
        deletion_token: key_set
            .deletion_token()
            .ok_or(EndpointError::MissingDeletionToken)?,
    })
}

/// Download and decrypt the secret belonging to `share_secret`.
pub async fn retrieve(
    store: &RemoteStore,
    share_secret: &str,
    password: Option<&str>,
) -> Result<String, Error> {
    let key_set = KeySet::reconstruct(share_secret, password)?;
    let encrypted = endpoints::load_secret(store, &key_set).await?;

    key_set.decrypt(&encrypted).map_err(Error::from)
}

/// Delete a secret using the deletion token handed out when it was shared.
pub async fn delete(
    store: &RemoteStore,
    share_secret: &str,
    password: Option<&str>,
    deletion_token: &str,
) -> Result<(), Error> {
    let key_set = KeySet::reconstruct(share_secret, password)?;
    let deletion_token: DeletionToken = deletion_token
        .parse()
        .map_err(Error::InvalidDeletionToken)?;

    endpoints::delete_secret(store, &key_set, &deletion_token).await?;
    log::info!("Deleted secret {}", key_set.public_id());

    Ok(())
}

/// Everything that can go wrong while sharing, retrieving, or deleting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The secret is too large ({} > {} bytes)", len, MAX_SECRET_LEN)]
    SecretTooLarge { len: usize },
    #[error(transparent)]
    KeySet(#[from] KeySetError),
    #[error("The deletion token is malformed")]
    InvalidDeletionToken(#[source] DecodeError),
    #[error("Unable to encrypt the secret")]
    Encryption(#[from] EncryptionError),
    #[error(transparent)]
    Decryption(#[from] DecryptionError),
    #[error("Unable to talk to the server")]
    Endpoint(#[from] EndpointError),
}

#[cfg(test)]
mod tests {
    use super::*;

    // nothing listens on the discard port, so any request would fail
    fn offline_store() -> RemoteStore {
        RemoteStore::new("http://127.0.0.1:9/").unwrap()
    }

    #[tokio::test]
    async fn oversized_secrets_are_refused_before_any_request() {
        let plaintext = "x".repeat(MAX_SECRET_LEN + 1);

        let got = share(&offline_store(), &plaintext, None, Expiration::default(), false)
            .await
            .unwrap_err();

        assert!(matches!(got, Error::SecretTooLarge { len } if len == MAX_SECRET_LEN + 1));
    }

    #[tokio::test]
    async fn malformed_share_secrets_fail_before_any_request() {
        let got = retrieve(&offline_store(), "definitely not valid!", None)
            .await
            .unwrap_err();

        assert!(matches!(got, Error::KeySet(KeySetError::Decode(_))));
    }

    #[tokio::test]
    async fn malformed_deletion_tokens_fail_before_any_request() {
        let key_set = KeySet::create_new(None).unwrap();

        let got = delete(&offline_store(), &key_set.share_secret(), None, "nope!")
            .await
            .unwrap_err();

        assert!(matches!(got, Error::InvalidDeletionToken(_)));
    }

    #[tokio::test]
    async fn connection_failures_are_endpoint_errors() {
        let key_set = KeySet::create_new(None).unwrap();

        let got = retrieve(&offline_store(), &key_set.share_secret(), None)
            .await
            .unwrap_err();

        assert!(matches!(got, Error::Endpoint(EndpointError::HttpClient(_))));
    }
}
