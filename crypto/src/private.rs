use crate::{
    error::{Error, Result},
    pair::KeyPair,
    public::PublicKey,
};
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use std::fmt::{self, Debug, Display};
use zeroize::Zeroize;

pub const PRIVATE_KEY_LENGTH: usize = 32;

/// A secp256k1 private key.
///
/// The scalar is generated once per account and stays with the client that generated it; the core
/// only ever reads it to sign. Its interchange format is 64 hex characters. The wrapped
/// `SigningKey` wipes the scalar when dropped, which is why this type is `Clone` but not `Copy`.
#[derive(Clone, Eq, PartialEq)]
pub struct PrivateKey(SigningKey);

impl Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = self.to_bytes();
        let res = f.write_str(&hex::encode(bytes));
        bytes.zeroize();
        res
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "secret")
    }
}

impl std::str::FromStr for PrivateKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::MalformedKey("empty private key".to_owned()));
        }
        let mut bytes = hex::decode(s).map_err(|e| Error::MalformedKey(format!("private key is not hex: {}", e)))?;
        let res = Self::from_bytes(&bytes);
        bytes.zeroize();
        res
    }
}

impl From<&PrivateKey> for PublicKey {
    fn from(private: &PrivateKey) -> PublicKey {
        PublicKey::from_verifying_key(private.0.verifying_key())
    }
}

impl From<PrivateKey> for KeyPair {
    fn from(private: PrivateKey) -> KeyPair {
        let public = PublicKey::from(&private);
        KeyPair { public, private }
    }
}

impl PrivateKey {
    /// Accepts exactly 32 bytes forming a scalar in `1..n`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(Error::MalformedKey(format!(
                "expected {} private key bytes, received {}",
                PRIVATE_KEY_LENGTH,
                bytes.len()
            )));
        }
        let key = SigningKey::from_slice(bytes)
            .map_err(|_| Error::MalformedKey("private key is not a valid secp256k1 scalar".to_owned()))?;
        Ok(Self(key))
    }

    pub fn generate() -> Self {
        Self(SigningKey::random(&mut OsRng))
    }

    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        let mut res = [0u8; PRIVATE_KEY_LENGTH];
        res.copy_from_slice(&self.0.to_bytes());
        res
    }

    pub fn public_key(&self) -> PublicKey {
        self.into()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn str_roundtrip() {
        let p = PrivateKey::generate();
        let str = format!("{}", p);
        assert_eq!(str.len(), 64);
        let round_tripped = PrivateKey::from_str(&str).unwrap();
        assert_eq!(p, round_tripped);
    }

    #[test]
    fn debug_hides_the_scalar() {
        let p = PrivateKey::generate();
        assert_eq!(format!("{:?}", p), "secret");
    }

    #[test]
    fn reject_malformed() {
        let err = |s: &str| PrivateKey::from_str(s).unwrap_err().to_string();
        assert!(err("").starts_with("malformed key: empty"));
        assert!(err("xyz").starts_with("malformed key: private key is not hex"));
        assert!(err(&"01".repeat(31)).contains("expected 32 private key bytes, received 31"));
        // zero and the group order are not scalars
        assert!(err(&"00".repeat(32)).contains("not a valid secp256k1 scalar"));
        assert!(err("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
            .contains("not a valid secp256k1 scalar"));
    }

    #[test]
    fn public_key_is_derived_deterministically() {
        let p = PrivateKey::from_str(&format!("{:064x}", 1)).unwrap();
        // the generator point G
        assert_eq!(
            p.public_key().to_string(),
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        );
    }
}
