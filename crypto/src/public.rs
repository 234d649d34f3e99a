use crate::error::{Error, Result};
use k256::ecdsa::VerifyingKey;
use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug, Display};

pub const PUBLIC_KEY_LENGTH: usize = 65;

const UNCOMPRESSED_TAG: u8 = 0x04;

/// A public key, which also serves as identifier for the account holding the private key
///
/// It consists of the 65 octets of an uncompressed SEC1 secp256k1 point: `0x04` followed by the
/// big-endian `x` and `y` coordinates. This is what the server persists per account and what every
/// reader uses to check messages, interchanged as 130 hex characters.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct PublicKey(pub(crate) [u8; PUBLIC_KEY_LENGTH]);

impl Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(&self.0[..]))
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::str::FromStr for PublicKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::MalformedKey("empty public key".to_owned()));
        }
        let v = hex::decode(s).map_err(|e| Error::MalformedKey(format!("public key is not hex: {}", e)))?;
        Self::from_bytes(&v)
    }
}

impl PublicKey {
    /// Accepts exactly the 65 byte uncompressed encoding of a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(Error::MalformedKey(format!(
                "expected {} public key bytes, received {}",
                PUBLIC_KEY_LENGTH,
                bytes.len()
            )));
        }
        if bytes[0] != UNCOMPRESSED_TAG {
            return Err(Error::MalformedKey(format!(
                "expected uncompressed point prefix 0x04, found 0x{:02x}",
                bytes[0]
            )));
        }
        VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|_| Error::MalformedKey("public key is not a point on secp256k1".to_owned()))?;
        let mut res = [0u8; PUBLIC_KEY_LENGTH];
        res.copy_from_slice(bytes);
        Ok(Self(res))
    }

    pub fn to_bytes(self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0
    }

    pub(crate) fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let mut res = [0u8; PUBLIC_KEY_LENGTH];
        res.copy_from_slice(point.as_bytes());
        Self(res)
    }

    /// Gets the underlying k256 key for interop with rust crypto libs
    pub fn to_verifying_key(self) -> Result<VerifyingKey> {
        VerifyingKey::from_sec1_bytes(&self.0[..])
            .map_err(|_| Error::MalformedKey("public key is not a point on secp256k1".to_owned()))
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = PublicKey;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("PublicKey")
            }
            fn visit_str<E: serde::de::Error>(self, string: &str) -> std::result::Result<Self::Value, E> {
                use std::str::FromStr;
                PublicKey::from_str(string).map_err(serde::de::Error::custom)
            }
        }
        deserializer.deserialize_str(V)
    }
}
