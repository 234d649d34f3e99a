//! Message authenticity for chat messages
//!
//! Every chat message travels as a [`VerifiableMessage`]: the plaintext, its keccak-256 digest and
//! an ECDSA signature over that digest. The sender produces the bundle with its private key, and
//! every reader independently re-checks it against the sender's public key before trusting it.
//!
//! # Assumptions
//!
//! ## keccak-256, not SHA3-256
//!
//! The digest is the original Keccak submission with 256 bit output (as used by Ethereum), which
//! differs from the standardised NIST SHA3-256 in its padding. Stored messages were hashed this way,
//! so switching the function would turn every stored message into a hash mismatch.
//!
//! ## secp256k1
//!
//! Private keys are 32 byte scalars, public keys 65 byte uncompressed SEC1 points (leading `0x04`).
//! Both are exchanged as hex strings. Private keys never leave the client that generated them.
//!
//! ## Signature encoding
//!
//! On the wire a signature is `{ "r": <hex>, "s": <hex> }` holding the big-endian magnitudes of the
//! two integers without fixed width. The verification primitive wants DER, so [`der`] converts
//! between the two representations right before signing output is returned and right before a
//! signature is checked.
//!
//! # Verdicts
//!
//! Checking a message never fails for well-formed input: a tampered or mis-signed message yields
//! [`Verification::Invalid`], an undecodable one [`Verification::Malformed`]. Callers that only
//! want a yes/no answer use [`verify`], which collapses both to `false` and only errors on a
//! malformed public key.

pub mod conversation;
pub mod der;
mod digest;
mod error;
mod message;
mod pair;
mod private;
mod public;
mod signature;

pub use digest::{hash_message, Digest, DIGEST_LENGTH};
pub use error::{DecodeError, Error, Result};
pub use message::{verify, Verification, VerifiableMessage};
pub use pair::KeyPair;
pub use private::{PrivateKey, PRIVATE_KEY_LENGTH};
pub use public::{PublicKey, PUBLIC_KEY_LENGTH};
pub use signature::{sign_message, MessageSignature};
