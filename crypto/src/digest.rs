use crate::error::DecodeError;
use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug, Display};
use tiny_keccak::{Hasher, Keccak};

pub const DIGEST_LENGTH: usize = 32;

/// keccak-256 digest of a message body.
///
/// Rendered as 64 lower-case hex characters for transport. Note that this is the original Keccak
/// padding, not NIST SHA3-256: both sides of a conversation must use the same one.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Digest([u8; DIGEST_LENGTH]);

impl Digest {
    /// Hash the UTF-8 bytes of `plaintext`. Total, the empty string included.
    pub fn of(plaintext: &str) -> Self {
        Self::of_bytes(plaintext.as_bytes())
    }

    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut keccak = Keccak::v256();
        keccak.update(bytes);
        let mut out = [0u8; DIGEST_LENGTH];
        keccak.finalize(&mut out);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    /// Compare against the bytes of a transmitted digest; anything but exactly 32 equal bytes is a
    /// mismatch.
    pub fn matches(&self, other: &[u8]) -> bool {
        self.0[..] == *other
    }
}

/// Hex digest of `plaintext`, as carried in the `hash` field of the envelope.
pub fn hash_message(plaintext: &str) -> String {
    Digest::of(plaintext).to_string()
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LENGTH]> for Digest {
    fn from(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self)
    }
}

impl std::str::FromStr for Digest {
    type Err = DecodeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut res = [0u8; DIGEST_LENGTH];
        hex::decode_to_slice(s, &mut res).map_err(DecodeError::hex("hash"))?;
        Ok(Self(res))
    }
}

impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Digest;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a 64 character hex keccak-256 digest")
            }
            fn visit_str<E: serde::de::Error>(self, string: &str) -> Result<Self::Value, E> {
                string.parse().map_err(serde::de::Error::custom)
            }
        }
        deserializer.deserialize_str(V)
    }
}
