use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can end a request early. The connection is already closed by the time one of
/// these reaches the caller.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: &'static str },

    #[error("could not connect to {address}: {source}")]
    Connection {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("transport error while {action}: {source}")]
    Transport {
        action: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("response is not valid utf-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("malformed response: {0}")]
    MalformedResponse(&'static str),
}

impl Error {
    pub(crate) fn invalid_url(url: &str, reason: &'static str) -> Self {
        Error::InvalidUrl { url: url.to_string(), reason }
    }

    pub(crate) fn transport(action: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Error::Transport { action, source }
    }
}
