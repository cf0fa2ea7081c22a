use super::{
    EndpointError, RemoteStore, DELETION_TOKEN_HEADER, RETRIEVAL_TOKEN_HEADER,
};
use crate::{DeletionToken, KeySet};

/// Ask the server to delete a secret before it expires.
pub async fn delete_secret(
    store: &RemoteStore,
    key_set: &KeySet,
    deletion_token: &DeletionToken,
) -> Result<(), EndpointError> {
    let url = store.secret_url(&key_set.public_id())?;
    log::debug!("Deleting secret {}", key_set.public_id());

    super::send(
        store
            .client
            .delete(url)
            .header(RETRIEVAL_TOKEN_HEADER, key_set.retrieval_token())
            .header(DELETION_TOKEN_HEADER, deletion_token.to_string()),
    )
    .await?;

    Ok(())
}
