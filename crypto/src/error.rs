use crate::der::DerError;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that must stop the caller: the message cannot be sent, or cannot be checked at all.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("malformed key: {0}")]
    MalformedKey(String),
    #[error("failed to sign message: {0}")]
    SigningFailure(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A wire field that could not be turned into the bytes the protocol expects.
///
/// Inside verification this is not an error but a verdict, see [`crate::Verification::Malformed`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("field `{field}` is not valid hex: {source}")]
    Hex {
        field: &'static str,
        source: hex::FromHexError,
    },
    #[error("invalid DER signature: {0}")]
    Der(#[from] DerError),
    #[error("signature rejected by the curve: {0}")]
    Signature(String),
}

impl DecodeError {
    pub(crate) fn hex(field: &'static str) -> impl FnOnce(hex::FromHexError) -> Self {
        move |source| DecodeError::Hex { field, source }
    }
}
