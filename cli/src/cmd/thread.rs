use crate::{cmd::ChatsigCommand, key_file::load_public_key};
use anyhow::{Context, Result};
use chatsig_crypto::conversation::{annotate, AnnotatedMessage, StoredMessage, UserId, VerificationStatus};
use std::path::PathBuf;
use structopt::StructOpt;

pub struct Thread;
impl ChatsigCommand for Thread {
    type Opt = ThreadOpts;
    type Output = Vec<AnnotatedMessage>;
    fn run(opts: Self::Opt) -> Result<Self::Output> {
        let public_key = load_public_key(&opts.public_key)?;
        let file = std::fs::read_to_string(&opts.file)
            .with_context(|| format!("cannot read conversation from {}", opts.file.display()))?;
        let rows: Vec<StoredMessage> = serde_json::from_str(&file).context("parsing stored messages")?;
        let between = |m: &StoredMessage| {
            (m.sender_id == opts.me && m.receiver_id == opts.peer)
                || (m.sender_id == opts.peer && m.receiver_id == opts.me)
        };
        Ok(annotate(rows.into_iter().filter(between), opts.peer, &public_key))
    }
    fn pretty(result: Self::Output) -> String {
        result
            .iter()
            .map(|m| {
                let line = format!(
                    "{} {} -> {}: {}",
                    m.message.created_at.to_rfc3339(),
                    m.message.sender_id,
                    m.message.receiver_id,
                    m.message.data.plaintext
                );
                match m.verification {
                    VerificationStatus::Unchecked => line,
                    status => format!("{}  [{}]", line, status),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(StructOpt, Debug)]
pub struct ThreadOpts {
    /// Id of the reading user
    #[structopt(long)]
    me: UserId,
    /// Id of the counterpart whose messages are checked
    #[structopt(long)]
    peer: UserId,
    /// Counterpart's public key as hex, or `@<file>` holding it
    #[structopt(short = "k", long, env = "CHATSIG_PUBLIC_KEY")]
    public_key: String,
    /// JSON array of stored message rows
    #[structopt(name = "FILE")]
    file: PathBuf,
}
