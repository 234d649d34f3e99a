use anyhow::{bail, Context, Result};
use chatsig_crypto::{PrivateKey, PublicKey};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

const PUB_KEY_FILE_EXTENSION: &str = "pub";
pub const DEFAULT_PRIVATE_KEY_FILE_NAME: &str = "id";

/// A private key kept on disk next to its public key.
///
/// `<path>` holds the private key as hex with a trailing newline, `<path>.pub` the public key.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IdentityFile(PrivateKey);

impl IdentityFile {
    /// `<config dir>/chatsig/keys`, not created.
    fn default_identity_dir() -> Result<PathBuf> {
        let config = dirs::config_dir().context("can't get the user's config dir")?;
        Ok(config.join("chatsig").join("keys"))
    }

    pub fn default_identity_path() -> Result<PathBuf> {
        Ok(Self::default_identity_dir()?.join(DEFAULT_PRIVATE_KEY_FILE_NAME))
    }

    pub fn get_and_create_default_identity_dir() -> Result<PathBuf> {
        let p = Self::default_identity_dir()?;
        fs::create_dir_all(&p).with_context(|| format!("creating identity directory {}", p.display()))?;
        Ok(p)
    }

    pub fn generate() -> Self {
        Self(PrivateKey::generate())
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.0
    }

    pub fn to_public(&self) -> PublicKey {
        self.0.public_key()
    }

    /// Write both files, truncating existing ones. Returns the paths of the private and public key.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(PathBuf, PathBuf)> {
        let priv_path: PathBuf = path.as_ref().into();
        let pub_path = priv_path.with_extension(PUB_KEY_FILE_EXTENSION);
        fs::write(&priv_path, format!("{}\n", self.0))
            .with_context(|| format!("error writing to {}", priv_path.display()))?;
        fs::write(&pub_path, format!("{}\n", self.to_public()))
            .with_context(|| format!("error writing to {}", pub_path.display()))?;
        Ok((priv_path, pub_path))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => bail!(
                "no identity at \"{}\". To create one, run chatsig keygen.",
                path.display()
            ),
            Err(e) => return Err(e).with_context(|| format!("cannot read file at \"{}\"", path.display())),
        };
        s.trim_end()
            .parse::<PrivateKey>()
            .map(Self)
            .with_context(|| format!("error reading private key from {}", path.display()))
    }

    /// The given file, or the default identity.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_file(Self::default_identity_path()?),
        }
    }
}

/// Public key given inline as hex, or as `@<file>` holding the hex.
pub fn load_public_key(text: &str) -> Result<PublicKey> {
    let text = if let Some(filename) = text.strip_prefix('@') {
        fs::read_to_string(filename).with_context(|| format!("cannot read public key file {}", filename))?
    } else {
        text.to_owned()
    };
    Ok(text.trim().parse::<PublicKey>()?)
}
