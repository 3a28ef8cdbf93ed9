//! Error types for the configure workflow.

use crate::core::config::{ConfigError, ProfileValidationError};
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can abort a configuration pass.
///
/// None of these are retried; the caller decides whether to prompt again.
#[derive(Debug)]
pub enum ConfigureError {
    /// The requested mode is not one of the supported modes.
    InvalidMode(String),
    /// The RSA private key file could not be read.
    FileRead { path: PathBuf, source: io::Error },
    /// Reading an answer or writing a prompt failed, including closed input.
    Input(io::Error),
    /// The profile store could not be loaded.
    ConfigLoad(ConfigError),
    /// The profile store could not be saved.
    ConfigSave(ConfigError),
    /// No profile with the given name exists.
    ProfileNotFound(String),
    /// The profile is missing fields its mode requires.
    InvalidProfile(ProfileValidationError),
}

impl fmt::Display for ConfigureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigureError::InvalidMode(mode) => write!(
                f,
                "unexpected authenticate mode: {mode} (expected AK, StsToken, RamRoleArn, EcsRamRole or RsaKeyPair)"
            ),
            ConfigureError::FileRead { path, source } => {
                write!(f, "read key file {} failed: {}", path.display(), source)
            }
            ConfigureError::Input(source) => write!(f, "terminal I/O failed: {source}"),
            ConfigureError::ConfigLoad(source) => write!(f, "{source}"),
            ConfigureError::ConfigSave(source) => write!(f, "{source}"),
            ConfigureError::ProfileNotFound(name) => write!(f, "profile '{name}' not found"),
            ConfigureError::InvalidProfile(source) => {
                write!(f, "invalid configuration: {source}")
            }
        }
    }
}

impl StdError for ConfigureError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigureError::InvalidMode(_) | ConfigureError::ProfileNotFound(_) => None,
            ConfigureError::FileRead { source, .. } => Some(source),
            ConfigureError::Input(source) => Some(source),
            ConfigureError::ConfigLoad(source) | ConfigureError::ConfigSave(source) => {
                Some(source)
            }
            ConfigureError::InvalidProfile(source) => Some(source),
        }
    }
}

impl From<io::Error> for ConfigureError {
    fn from(err: io::Error) -> Self {
        ConfigureError::Input(err)
    }
}
