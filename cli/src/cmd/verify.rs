use crate::{
    cmd::{load_input, ChatsigCommand},
    key_file::load_public_key,
};
use anyhow::{Context, Result};
use chatsig_crypto::{conversation::VerificationStatus, VerifiableMessage, Verification};
use serde::Serialize;
use structopt::StructOpt;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

pub struct Verify;
impl ChatsigCommand for Verify {
    type Opt = VerifyOpts;
    type Output = Output;
    fn run(opts: Self::Opt) -> Result<Self::Output> {
        let public_key = load_public_key(&opts.public_key)?;
        let input = match opts.file.as_str() {
            "-" => load_input("-")?,
            file => std::fs::read_to_string(file).with_context(|| format!("cannot read envelope from {}", file))?,
        };
        let message: VerifiableMessage = serde_json::from_str(&input).context("parsing message envelope")?;
        let (status, reason) = match message.check(&public_key) {
            Verification::Valid => (VerificationStatus::Verified, None),
            Verification::Invalid => (
                VerificationStatus::NotVerified,
                Some("hash or signature does not match".to_owned()),
            ),
            Verification::Malformed(e) => (VerificationStatus::NotVerified, Some(e.to_string())),
        };
        Ok(Output { status, reason })
    }
    fn pretty(result: Self::Output) -> String {
        match result.reason {
            Some(reason) => format!("{} ({})", result.status, reason),
            None => result.status.to_string(),
        }
    }
    fn exit_code(result: &Self::Output) -> i32 {
        match result.status {
            VerificationStatus::Verified => 0,
            _ => 1,
        }
    }
}

#[derive(StructOpt, Debug)]
pub struct VerifyOpts {
    /// Sender's public key as hex, or `@<file>` holding it
    #[structopt(short = "k", long, env = "CHATSIG_PUBLIC_KEY")]
    public_key: String,
    /// File holding the JSON message envelope, `-` for stdin
    #[structopt(name = "FILE", default_value = "-")]
    file: String,
}
