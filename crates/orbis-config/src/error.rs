//! Errors raised while reading or writing `config.ron`.

use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but is not a valid Orbis config. Carries the line and
    /// column of the first RON error.
    #[error("{} is not a valid Orbis config: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("cannot encode Orbis config as RON: {0}")]
    Serialize(#[source] ron::Error),
}
