use super::{EndpointError, Expiration, RemoteStore};
use crate::{encoding, EncryptedData, KeySet};
use serde_derive::Serialize;

/// Upload an encrypted secret.
///
/// The key set must be one returned by [`KeySet::create_new()`], because the
/// server needs to know the deletion token up front.
pub async fn store_secret(
    store: &RemoteStore,
    key_set: &KeySet,
    data: &EncryptedData,
    expiration: Expiration,
    burn_after_read: bool,
) -> Result<(), EndpointError> {
    let deletion_token = key_set
        .deletion_token()
        .ok_or(EndpointError::MissingDeletionToken)?;

    let request = StoreRequest {
        public_id: key_set.public_id(),
        retrieval_token: key_set.retrieval_token(),
        deletion_token,
        nonce: encoding::encode(&data.nonce),
        encrypted_data: encoding::encode(&data.ciphertext),
        expiration,
        burn_after_read,
    };

    let url = store.secrets_url()?;
    log::debug!("Storing secret {} at {}", request.public_id, url);

    super::send(store.client.post(url).json(&request)).await?;

    Ok(())
}

#[derive(Clone, PartialEq, Serialize)]
struct StoreRequest {
    public_id: String,
    retrieval_token: String,
    deletion_token: String,
    nonce: String,
    encrypted_data: String,
    expiration: Expiration,
    burn_after_read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_the_wire_field_names() {
        let request = StoreRequest {
            public_id: String::from("OFqOfRxtWxt4IdYLk_qxig"),
            retrieval_token: String::from("R0lZ4W_TNvF-oppmHcffyA"),
            deletion_token: String::from("q6urq6urq6urq6urq6urqw"),
            nonce: String::from("AAAAAAAAAAAAAAAA"),
            encrypted_data: String::from("c2VjcmV0"),
            expiration: Expiration::OneDay,
            burn_after_read: true,
        };
        let should_be = json!({
            "public_id": "OFqOfRxtWxt4IdYLk_qxig",
            "retrieval_token": "R0lZ4W_TNvF-oppmHcffyA",
            "deletion_token": "q6urq6urq6urq6urq6urqw",
            "nonce": "AAAAAAAAAAAAAAAA",
            "encrypted_data": "c2VjcmV0",
            "expiration": "1d",
            "burn_after_read": true,
        });

        let got = serde_json::to_value(&request).unwrap();

        assert_eq!(got, should_be);
    }
}
