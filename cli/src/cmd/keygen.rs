use crate::{cmd::ChatsigCommand, key_file::IdentityFile};
use anyhow::{bail, Result};
use serde::Serialize;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    private_key_path: PathBuf,
    public_key_path: PathBuf,
    public_key: String,
}

pub struct Keygen;
impl ChatsigCommand for Keygen {
    type Opt = KeygenOpts;
    type Output = Output;
    fn run(opts: Self::Opt) -> Result<Self::Output> {
        let store_to = match opts.output {
            Some(p) => p,
            None => IdentityFile::get_and_create_default_identity_dir()?
                .join(crate::key_file::DEFAULT_PRIVATE_KEY_FILE_NAME),
        };
        if store_to.exists() {
            bail!(
                "File {} already exists. Specify a different file name or path.",
                store_to.display()
            );
        }
        let key = IdentityFile::generate();
        let (private_key_path, public_key_path) = key.to_file(&store_to)?;
        tracing::info!("generated key pair at {}", private_key_path.display());
        Ok(Output {
            private_key_path,
            public_key_path,
            public_key: key.to_public().to_string(),
        })
    }
    fn pretty(result: Self::Output) -> String {
        format!(
            "Your private key has been saved at {}\nYour public key has been saved at {}\nThe public key is: {}",
            result.private_key_path.display(),
            result.public_key_path.display(),
            result.public_key
        )
    }
}

#[derive(StructOpt, Debug)]
pub struct KeygenOpts {
    /// Where to store the private key; the public key goes next to it with a `.pub` extension.
    #[structopt(short, long)]
    output: Option<PathBuf>,
}
