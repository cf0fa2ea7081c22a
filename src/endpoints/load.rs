use super::{EndpointError, RemoteStore, RETRIEVAL_TOKEN_HEADER};
use crate::{encoding, EncryptedData, KeySet};
use serde_derive::Deserialize;

/// Fetch the encrypted secret belonging to a key set.
pub async fn load_secret(
    store: &RemoteStore,
    key_set: &KeySet,
) -> Result<EncryptedData, EndpointError> {
    let url = store.secret_url(&key_set.public_id())?;
    log::debug!("Loading secret {}", key_set.public_id());

    let response = super::send(
        store
            .client
            .post(url)
            .header(RETRIEVAL_TOKEN_HEADER, key_set.retrieval_token()),
    )
    .await?;

    let body: LoadResponse = response.json().await?;
    body.into_encrypted_data()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct LoadResponse {
    nonce: String,
    encrypted_data: String,
}

impl LoadResponse {
    fn into_encrypted_data(self) -> Result<EncryptedData, EndpointError> {
        let nonce = encoding::decode(&self.nonce).map_err(|inner| {
            EndpointError::BadResponse {
                field: "nonce",
                inner,
            }
        })?;
        let ciphertext =
            encoding::decode(&self.encrypted_data).map_err(|inner| {
                EndpointError::BadResponse {
                    field: "encrypted_data",
                    inner,
                }
            })?;

        Ok(EncryptedData { nonce, ciphertext })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_a_load_response() {
        let src = r#"{"nonce": "AAECAwQFBgcICQoL", "encrypted_data": "c2VjcmV0"}"#;
        let should_be = EncryptedData {
            nonce: (0..12).collect(),
            ciphertext: b"secret".to_vec(),
        };

        let response: LoadResponse = serde_json::from_str(src).unwrap();
        let got = response.into_encrypted_data().unwrap();

        assert_eq!(got, should_be);
    }

    #[test]
    fn responses_missing_fields_are_rejected() {
        let src = r#"{"nonce": "AAECAwQFBgcICQoL"}"#;

        assert!(serde_json::from_str::<LoadResponse>(src).is_err());
    }

    #[test]
    fn badly_encoded_fields_are_reported_by_name() {
        let response = LoadResponse {
            nonce: String::from("AAECAwQFBgcICQoL"),
            encrypted_data: String::from("not+base64/"),
        };

        let got = response.into_encrypted_data().unwrap_err();

        assert!(matches!(
            got,
            EndpointError::BadResponse {
                field: "encrypted_data",
                ..
            }
        ));
    }
}
