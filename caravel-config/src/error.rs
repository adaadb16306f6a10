//! Configuration errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Toml(#[from] toml::de::Error),

    #[error("syntax error in \"{}\": {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Error {
    /// Attach the file path to a TOML parse error. The TOML error
    /// already carries line/column info in its message.
    pub fn config(path: &Path, source: toml::de::Error) -> Self {
        Self::Config {
            path: path.to_owned(),
            source,
        }
    }
}
