use crate::{
    digest::Digest,
    error::{DecodeError, Result},
    private::PrivateKey,
    public::PublicKey,
    signature::MessageSignature,
};
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The envelope exchanged between sender, storage and readers.
///
/// ```json
/// { "plaintext": "hello", "hash": "1c8a…eac8", "signature": { "r": "…", "s": "…" } }
/// ```
///
/// Storage treats `hash` and `signature` as opaque payload; every reader re-checks them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiableMessage {
    pub plaintext: String,
    pub hash: String,
    pub signature: MessageSignature,
}

/// Outcome of checking a [`VerifiableMessage`].
///
/// Neither `Invalid` nor `Malformed` is a reason to drop a message: it stays visible and is marked
/// as not verified, since a bad signature may just as well come from a key mismatch on the client.
#[derive(Clone, Debug, PartialEq)]
pub enum Verification {
    Valid,
    /// Digest mismatch or signature not valid for the key.
    Invalid,
    /// A wire field could not be decoded.
    Malformed(DecodeError),
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid)
    }
}

impl VerifiableMessage {
    /// Hash `plaintext`, sign the digest and assemble the envelope.
    pub fn create(plaintext: impl Into<String>, private: &PrivateKey) -> Result<Self> {
        let plaintext = plaintext.into();
        let digest = Digest::of(&plaintext);
        let signature = MessageSignature::sign(private, &digest)?;
        Ok(Self {
            plaintext,
            hash: digest.to_string(),
            signature,
        })
    }

    /// Check the envelope against the sender's public key.
    ///
    /// The digest is recomputed from the plaintext first, so an altered plaintext is rejected
    /// before the signature is even looked at.
    pub fn check(&self, sender: &PublicKey) -> Verification {
        let digest = Digest::of(&self.plaintext);
        let claimed = match hex::decode(&self.hash) {
            Ok(claimed) => claimed,
            Err(e) => return malformed(DecodeError::Hex { field: "hash", source: e }),
        };
        if !digest.matches(&claimed) {
            warn!("hash mismatch - message may have been tampered with");
            return Verification::Invalid;
        }

        let signature = match self.signature.to_k256() {
            Ok(signature) => signature,
            Err(e) => return malformed(e),
        };
        let key = match sender.to_verifying_key() {
            Ok(key) => key,
            Err(e) => {
                debug!("cannot use sender key: {}", e);
                return Verification::Invalid;
            }
        };
        match key.verify_prehash(digest.as_bytes(), &signature) {
            Ok(()) => Verification::Valid,
            Err(e) => {
                debug!("signature verification failed: {}", e);
                Verification::Invalid
            }
        }
    }
}

fn malformed(error: DecodeError) -> Verification {
    debug!("undecodable message: {}", error);
    Verification::Malformed(error)
}

/// Yes/no verdict for an envelope and the sender's hex public key.
///
/// Only a malformed public key is an error; every problem with the message itself yields `false`.
pub fn verify(message: &VerifiableMessage, public_key_hex: &str) -> Result<bool> {
    let public: PublicKey = public_key_hex.parse()?;
    Ok(message.check(&public).is_valid())
}
