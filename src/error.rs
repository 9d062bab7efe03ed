use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Entropy of zero bytes would divide by zero.
    #[error("cannot compute entropy of an empty buffer (division by zero length)")]
    EmptyBuffer,

    #[error("invalid logarithm base {0}: must be finite, greater than 0 and not equal to 1")]
    InvalidBase(f64),

    #[error("invalid logarithm base '{0}': expected a number or one of e, bits, nats, digits")]
    InvalidBaseText(String),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
