use crate::{cmd::ChatsigCommand, key_file::IdentityFile};
use anyhow::Result;
use std::path::PathBuf;
use structopt::StructOpt;

pub struct Pubkey;
impl ChatsigCommand for Pubkey {
    type Opt = PubkeyOpts;
    type Output = String;
    fn run(opts: Self::Opt) -> Result<Self::Output> {
        let identity = IdentityFile::load(opts.identity.as_deref())?;
        Ok(identity.to_public().to_string())
    }
    fn pretty(result: Self::Output) -> String {
        result
    }
}

#[derive(StructOpt, Debug)]
pub struct PubkeyOpts {
    /// File from which the private key is read; defaults to the key created by `keygen`.
    #[structopt(short, long, env = "CHATSIG_IDENTITY")]
    identity: Option<PathBuf>,
}
