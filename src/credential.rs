//! Passphrase acquisition.
//!
//! The Request Builder never reads the terminal itself; it asks a [`CredentialProvider`].
//! The binary uses [`CredentialSource`], tests substitute their own provider.

use crate::error::LifecycleResult;
use std::fmt;
use std::io::{self, Write};
use zeroize::Zeroizing;

/// Secret unlocking the operator's key. Zeroed on drop, redacted in `Debug`.
#[derive(Clone)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

pub trait CredentialProvider {
    /// Show `prompt` and return the operator's passphrase.
    fn acquire(&self, prompt: &str) -> LifecycleResult<Credential>;
}

#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Passphrase given with `--pwd`.
    Preset(Credential),
    /// Hidden terminal input; blocks until the operator answers.
    Interactive,
}

impl CredentialSource {
    /// A missing or empty `--pwd` means the operator is prompted.
    pub fn from_flag(pwd: Option<String>) -> Self {
        match pwd {
            Some(pwd) if !pwd.is_empty() => CredentialSource::Preset(Credential::new(pwd)),
            _ => CredentialSource::Interactive,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, CredentialSource::Interactive)
    }
}

impl CredentialProvider for CredentialSource {
    fn acquire(&self, prompt: &str) -> LifecycleResult<Credential> {
        // the prompt is printed even with --pwd set, as it always has been
        println!("{prompt}");
        match self {
            CredentialSource::Preset(credential) => Ok(credential.clone()),
            CredentialSource::Interactive => {
                io::stdout().flush()?;
                let secret = rpassword::read_password()?;
                Ok(Credential::new(secret))
            }
        }
    }
}
