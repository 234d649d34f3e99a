use crate::cmd::{load_input, ChatsigCommand};
use anyhow::Result;
use chatsig_crypto::hash_message;
use structopt::StructOpt;

pub struct Hash;
impl ChatsigCommand for Hash {
    type Opt = HashOpts;
    type Output = String;
    fn run(opts: Self::Opt) -> Result<Self::Output> {
        Ok(hash_message(&load_input(&opts.text)?))
    }
    fn pretty(result: Self::Output) -> String {
        result
    }
}

#[derive(StructOpt, Debug)]
pub struct HashOpts {
    /// Message text, `@<file>` to read it from a file or `-` for stdin
    #[structopt(name = "TEXT")]
    text: String,
}
