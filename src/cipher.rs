use crate::{
    keys::ShareKey,
    random::{self, RandomnessError},
};
use aes::Aes256;
use aes_gcm::{
    aead::{Aead, KeyInit},
    AesGcm, Key, Nonce,
};
use std::fmt::{self, Debug, Formatter};
use typenum::U12;

type Aes256Gcm = AesGcm<Aes256, U12>;

/// AES-256-GCM bound to a single [`ShareKey`].
#[derive(Clone)]
pub struct ShareCipher(Aes256Gcm);

impl ShareCipher {
    /// The size of a GCM nonce, in bytes.
    pub const NONCE_LEN: usize = 12;

    pub fn new(key: &ShareKey) -> Self {
        ShareCipher(Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)))
    }

    /// Encrypt some text using a freshly generated nonce.
    pub fn encrypt(
        &self,
        plaintext: &str,
    ) -> Result<EncryptedData, EncryptionError> {
        let nonce: [u8; ShareCipher::NONCE_LEN] = random::random_bytes()?;

        let ciphertext = self
            .0
            .encrypt(Nonce::<U12>::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| EncryptionError::Seal)?;

        Ok(EncryptedData {
            nonce: nonce.to_vec(),
            ciphertext,
        })
    }

    /// Decrypt something created by [`ShareCipher::encrypt()`].
    pub fn decrypt(&self, data: &EncryptedData) -> Result<String, DecryptionError> {
        if data.nonce.len() != ShareCipher::NONCE_LEN {
            return Err(DecryptionError::Authentication);
        }

        let plaintext = self
            .0
            .decrypt(Nonce::<U12>::from_slice(&data.nonce), data.ciphertext.as_slice())
            .map_err(|_| DecryptionError::Authentication)?;

        String::from_utf8(plaintext).map_err(|_| DecryptionError::NotUtf8)
    }
}

impl Debug for ShareCipher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShareCipher").field(&"<redacted>").finish()
    }
}

/// The output of a single encryption.
#[derive(Debug, Clone, PartialEq)]
pub struct EncryptedData {
    pub nonce: Vec<u8>,
    /// The ciphertext followed by the GCM authentication tag.
    pub ciphertext: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum EncryptionError {
    #[error("Unable to generate a nonce")]
    Randomness(#[from] RandomnessError),
    #[error("Unable to encrypt the secret")]
    Seal,
}

/// Possible errors when decrypting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecryptionError {
    /// Deliberately vague, so we don't tell an attacker which part was
    /// wrong.
    #[error(
        "Unable to decrypt the secret. Either the share secret or password \
         is wrong, or the data was tampered with"
    )]
    Authentication,
    #[error("The decrypted secret isn't valid UTF-8")]
    NotUtf8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cipher() -> ShareCipher { ShareCipher::new(&ShareKey::from_raw([7; 32])) }

    #[test]
    fn round_trip_an_empty_string() {
        let cipher = cipher();

        let encrypted = cipher.encrypt("").unwrap();

        assert_eq!(encrypted.nonce.len(), ShareCipher::NONCE_LEN);
        // just the tag
        assert_eq!(encrypted.ciphertext.len(), 16);
        assert_eq!(cipher.decrypt(&encrypted).unwrap(), "");
    }

    #[test]
    fn round_trip_a_large_secret() {
        let cipher = cipher();
        let plaintext = "x".repeat(5000);

        let encrypted = cipher.encrypt(&plaintext).unwrap();

        assert_eq!(cipher.decrypt(&encrypted).unwrap(), plaintext);
    }

    #[test]
    fn every_encryption_uses_a_new_nonce() {
        let cipher = cipher();

        let first = cipher.encrypt("same").unwrap();
        let second = cipher.encrypt("same").unwrap();

        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.ciphertext, second.ciphertext);
    }

    #[test]
    fn flipping_a_nonce_byte_is_detected() {
        let cipher = cipher();
        let encrypted = cipher.encrypt("top secret").unwrap();

        for i in 0..encrypted.nonce.len() {
            let mut tampered = encrypted.clone();
            tampered.nonce[i] ^= 0x01;

            assert_eq!(
                cipher.decrypt(&tampered).unwrap_err(),
                DecryptionError::Authentication
            );
        }
    }

    #[test]
    fn flipping_a_ciphertext_byte_is_detected() {
        let cipher = cipher();
        let encrypted = cipher.encrypt("top secret").unwrap();

        for i in 0..encrypted.ciphertext.len() {
            let mut tampered = encrypted.clone();
            tampered.ciphertext[i] ^= 0x80;

            assert_eq!(
                cipher.decrypt(&tampered).unwrap_err(),
                DecryptionError::Authentication
            );
        }
    }

    #[test]
    fn the_wrong_key_cant_decrypt() {
        let encrypted = cipher().encrypt("top secret").unwrap();
        let other = ShareCipher::new(&ShareKey::from_raw([8; 32]));

        assert_eq!(
            other.decrypt(&encrypted).unwrap_err(),
            DecryptionError::Authentication
        );
    }

    #[test]
    fn a_nonce_with_the_wrong_length_is_rejected() {
        let cipher = cipher();
        let mut encrypted = cipher.encrypt("top secret").unwrap();
        encrypted.nonce.pop();

        assert_eq!(
            cipher.decrypt(&encrypted).unwrap_err(),
            DecryptionError::Authentication
        );
    }

    #[test]
    fn authentic_but_binary_payloads_are_reported() {
        let cipher = cipher();
        let ciphertext = cipher
            .0
            .encrypt(Nonce::<U12>::from_slice(&[1; 12]), &[0xff, 0xfe][..])
            .unwrap();
        let encrypted = EncryptedData {
            nonce: vec![1; 12],
            ciphertext,
        };

        assert_eq!(
            cipher.decrypt(&encrypted).unwrap_err(),
            DecryptionError::NotUtf8
        );
    }

    proptest! {
        #[test]
        fn decrypt_undoes_encrypt(plaintext in ".{0,256}") {
            let cipher = cipher();

            let encrypted = cipher.encrypt(&plaintext).unwrap();

            prop_assert_eq!(cipher.decrypt(&encrypted).unwrap(), plaintext);
        }
    }
}
