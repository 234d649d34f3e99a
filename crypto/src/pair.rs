use crate::{
    digest::Digest, error::Result, message::VerifiableMessage, private::PrivateKey, public::PublicKey,
    signature::MessageSignature,
};
use std::fmt::{self, Debug};

/// A keypair.
///
/// Generated once per account at signup. Only the public half is ever handed to the server; the
/// private half stays with the client session that owns it.
#[derive(Clone)]
pub struct KeyPair {
    pub(crate) public: PublicKey,
    pub(crate) private: PrivateKey,
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}
impl Eq for KeyPair {}

impl Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair").field("public", &self.public).finish()
    }
}

impl KeyPair {
    pub fn generate() -> Self {
        PrivateKey::generate().into()
    }

    pub fn pub_key(&self) -> PublicKey {
        self.public
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    pub fn sign(&self, digest: &Digest) -> Result<MessageSignature> {
        MessageSignature::sign(&self.private, digest)
    }

    /// Hash, sign and bundle `plaintext` for transmission.
    pub fn sign_message(&self, plaintext: impl Into<String>) -> Result<VerifiableMessage> {
        VerifiableMessage::create(plaintext, &self.private)
    }
}
