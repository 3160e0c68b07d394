use std::{io, path::PathBuf};

/// result carrying a huffpack error
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// input or output path could not be opened
    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// reading failed after the source was opened
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    /// writing failed after the destination was opened
    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    /// header or payload does not describe a valid container
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// priority queue ran dry while building the tree, this would never happen
    #[error("priority queue exhausted while building the code tree")]
    EmptyQueue,

    /// asked for the code of a byte that is not in the table
    #[error("symbol {0:#04x} not found")]
    SymbolNotFound(u8),

    /// there is nothing to compress
    #[error("input is empty")]
    EmptyInput,

    /// a count does not fit its fixed-width field
    #[error("too large: {0}")]
    TooLarge(String),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedContainer(reason.into())
    }
}
