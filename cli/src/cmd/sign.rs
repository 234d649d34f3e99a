use crate::{
    cmd::{load_input, ChatsigCommand},
    key_file::IdentityFile,
};
use anyhow::{Context, Result};
use chatsig_crypto::VerifiableMessage;
use std::path::PathBuf;
use structopt::StructOpt;

pub struct Sign;
impl ChatsigCommand for Sign {
    type Opt = SignOpts;
    type Output = VerifiableMessage;
    fn run(opts: Self::Opt) -> Result<Self::Output> {
        let identity = IdentityFile::load(opts.identity.as_deref())?;
        let plaintext = load_input(&opts.text)?;
        let message = VerifiableMessage::create(plaintext, identity.private_key()).context("signing message")?;
        tracing::debug!(hash = %message.hash, "signed message");
        Ok(message)
    }
    fn pretty(result: Self::Output) -> String {
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("cannot render envelope: {}", e))
    }
}

#[derive(StructOpt, Debug)]
pub struct SignOpts {
    /// File from which the private key is read; defaults to the key created by `keygen`.
    #[structopt(short, long, env = "CHATSIG_IDENTITY")]
    identity: Option<PathBuf>,
    /// Message text, `@<file>` to read it from a file or `-` for stdin
    #[structopt(name = "TEXT")]
    text: String,
}
