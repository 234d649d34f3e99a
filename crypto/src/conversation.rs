//! Marking a fetched conversation for display.
//!
//! Storage hands back message rows verbatim. Before rendering, the reader checks every message its
//! counterpart sent against the counterpart's stored public key. Nothing is filtered out: a message
//! that fails the check is shown with a "Not Verified" mark.

use crate::{message::VerifiableMessage, public::PublicKey};
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// A message row as persisted by storage; `data` is the untouched envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub data: VerifiableMessage,
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerificationStatus {
    #[display(fmt = "Verified")]
    Verified,
    #[display(fmt = "Not Verified")]
    NotVerified,
    /// Own messages are not checked.
    #[display(fmt = "")]
    Unchecked,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedMessage {
    #[serde(flatten)]
    pub message: StoredMessage,
    pub verification: VerificationStatus,
}

/// Check every message sent by `counterpart` against its key, oldest first.
pub fn annotate(
    messages: impl IntoIterator<Item = StoredMessage>,
    counterpart: UserId,
    counterpart_key: &PublicKey,
) -> Vec<AnnotatedMessage> {
    let mut annotated = messages
        .into_iter()
        .map(|message| {
            let verification = if message.sender_id != counterpart {
                VerificationStatus::Unchecked
            } else if message.data.check(counterpart_key).is_valid() {
                VerificationStatus::Verified
            } else {
                tracing::debug!(id = message.id, "message from {} not verified", counterpart);
                VerificationStatus::NotVerified
            };
            AnnotatedMessage { message, verification }
        })
        .collect::<Vec<_>>();
    annotated.sort_by_key(|m| m.message.created_at);
    annotated
}
