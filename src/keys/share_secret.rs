use crate::{
    encoding::{self, DecodeError},
    random::{self, RandomnessError},
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    ops::Deref,
    str::FromStr,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The one value a user hands to the recipient (out-of-band) so they can
/// retrieve a secret.
///
/// This is never sent to the server. Its text form is the URL-safe base64
/// encoding of the raw bytes.
#[derive(Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct ShareSecret([u8; ShareSecret::LEN]);

impl ShareSecret {
    pub const LEN: usize = 32;

    pub const fn from_raw(raw: [u8; ShareSecret::LEN]) -> Self {
        ShareSecret(raw)
    }

    /// Create a brand new share secret using the OS's random number
    /// generator.
    pub fn generate() -> Result<Self, RandomnessError> {
        random::random_bytes().map(ShareSecret)
    }
}

impl FromStr for ShareSecret {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<ShareSecret, Self::Err> {
        encoding::decode_array(s.trim()).map(ShareSecret)
    }
}

impl Display for ShareSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&encoding::encode(self.0))
    }
}

impl Deref for ShareSecret {
    type Target = [u8];

    fn deref(&self) -> &[u8] { &self.0 }
}

impl AsRef<[u8]> for ShareSecret {
    fn as_ref(&self) -> &[u8] { self.deref() }
}

impl Debug for ShareSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShareSecret").field(&"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zeroes_has_a_known_text_form() {
        let secret = ShareSecret::from_raw([0; ShareSecret::LEN]);

        assert_eq!(
            secret.to_string(),
            "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"
        );
    }

    #[test]
    fn parse_what_we_print() {
        let secret = ShareSecret::generate().unwrap();

        let got: ShareSecret = secret.to_string().parse().unwrap();

        assert_eq!(got, secret);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let secret = ShareSecret::generate().unwrap();
        let text = format!("  {}\n", secret);

        let got: ShareSecret = text.parse().unwrap();

        assert_eq!(got, secret);
    }

    #[test]
    fn reject_the_wrong_number_of_bytes() {
        let text = encoding::encode([1_u8; 16]);

        let got = text.parse::<ShareSecret>().unwrap_err();

        assert_eq!(
            got,
            DecodeError::InvalidLength {
                expected: 32,
                actual: 16
            }
        );
    }

    #[test]
    fn debug_output_is_redacted() {
        let secret = ShareSecret::from_raw([0x42; ShareSecret::LEN]);

        let got = format!("{:?}", secret);

        assert_eq!(got, "ShareSecret(\"<redacted>\")");
    }
}
