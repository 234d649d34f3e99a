use crate::{
    der,
    digest::Digest,
    error::{DecodeError, Error, Result},
    private::PrivateKey,
};
use k256::ecdsa::{signature::hazmat::RandomizedPrehashSigner, Signature};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

/// ECDSA signature as carried in the message envelope.
///
/// `r` and `s` are hex strings of the big-endian magnitudes, without fixed width. The DER form the
/// verification primitive needs is derived on demand with [`MessageSignature::to_der`] and never
/// stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSignature {
    pub r: String,
    pub s: String,
}

impl MessageSignature {
    /// Sign `digest` with `private`.
    ///
    /// The nonce mixes fresh OS randomness into RFC 6979, so signing the same digest twice yields two
    /// different, equally valid signatures.
    pub fn sign(private: &PrivateKey, digest: &Digest) -> Result<Self> {
        let signature: Signature = private
            .signing_key()
            .sign_prehash_with_rng(&mut OsRng, digest.as_bytes())
            .map_err(|e| Error::SigningFailure(e.to_string()))?;
        Self::from_der(signature.to_der().as_bytes())
            .map_err(|e| Error::SigningFailure(format!("unexpected signature encoding: {}", e)))
    }

    pub fn from_der(bytes: &[u8]) -> std::result::Result<Self, der::DerError> {
        let (r, s) = der::decode_signature(bytes)?;
        Ok(Self {
            r: hex::encode(r),
            s: hex::encode(s),
        })
    }

    pub fn to_der(&self) -> std::result::Result<Vec<u8>, DecodeError> {
        let r = hex::decode(&self.r).map_err(DecodeError::hex("signature.r"))?;
        let s = hex::decode(&self.s).map_err(DecodeError::hex("signature.s"))?;
        Ok(der::encode_signature(&r, &s)?)
    }

    pub(crate) fn to_k256(&self) -> std::result::Result<Signature, DecodeError> {
        let signature = Signature::from_der(&self.to_der()?).map_err(|e| DecodeError::Signature(e.to_string()))?;
        // `normalize_s` only yields a value when `s` lies in the upper half of the order
        if signature.normalize_s().is_some() {
            return Err(DecodeError::Signature("s is not in the lower half of the curve order".to_owned()));
        }
        Ok(signature)
    }
}

/// Sign a hex digest with a hex private key, both in their interchange formats.
pub fn sign_message(private_key_hex: &str, hash_hex: &str) -> Result<MessageSignature> {
    let private: PrivateKey = private_key_hex.parse()?;
    let digest: Digest = hash_hex.parse()?;
    MessageSignature::sign(&private, &digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der::DerError;
    use pretty_assertions::assert_eq;

    #[test]
    fn signatures_are_randomized() {
        let private = PrivateKey::generate();
        let digest = Digest::of("hello");
        let a = MessageSignature::sign(&private, &digest).unwrap();
        let b = MessageSignature::sign(&private, &digest).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wire_integers_are_minimal() {
        let private = PrivateKey::generate();
        for i in 0..32 {
            let sig = MessageSignature::sign(&private, &Digest::of(&i.to_string())).unwrap();
            for part in [&sig.r, &sig.s] {
                assert!(part.len() <= 64 && part.len() % 2 == 0);
                assert!(!part.starts_with("00"));
            }
        }
    }

    #[test]
    fn der_roundtrip() {
        let private = PrivateKey::generate();
        let sig = MessageSignature::sign(&private, &Digest::of("hello")).unwrap();
        let der = sig.to_der().unwrap();
        assert_eq!(der[0], 0x30);
        assert_eq!(MessageSignature::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn to_der_reports_the_broken_field() {
        let sig = MessageSignature {
            r: "0x12".to_owned(),
            s: "01".to_owned(),
        };
        assert!(matches!(sig.to_der(), Err(DecodeError::Hex { field: "signature.r", .. })));

        let sig = MessageSignature {
            r: "01".to_owned(),
            s: "".to_owned(),
        };
        assert_eq!(sig.to_der(), Err(DecodeError::Der(DerError::EmptyInteger)));
    }

    #[test]
    fn high_s_is_rejected() {
        let private = PrivateKey::generate();
        let sig = MessageSignature::sign(&private, &Digest::of("hello")).unwrap();
        let low = sig.to_k256().unwrap();
        let high = Signature::from_scalars(low.r(), -low.s()).unwrap();
        let flipped = MessageSignature::from_der(high.to_der().as_bytes()).unwrap();
        assert_eq!(flipped.r, sig.r);
        assert!(matches!(flipped.to_k256(), Err(DecodeError::Signature(_))));
    }

    #[test]
    fn sign_message_from_hex() {
        let private = PrivateKey::generate();
        let hash = crate::hash_message("hello");
        let sig = sign_message(&private.to_string(), &hash).unwrap();
        assert!(!sig.r.is_empty() && !sig.s.is_empty());

        assert!(matches!(sign_message("abcd", &hash), Err(Error::MalformedKey(_))));
        assert!(matches!(
            sign_message(&private.to_string(), "abcd"),
            Err(Error::Decode(DecodeError::Hex { field: "hash", .. }))
        ));
    }
}
