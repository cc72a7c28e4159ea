//! Digest engine error types

use thiserror::Error;

/// Errors surfaced by the digest engine
#[derive(Error, Debug)]
pub enum Error {
    /// `update` called on a finalized engine without an intervening `start`
    #[error("engine already finalized: call start() before feeding more data")]
    MisusedAfterFinalize,

    /// Input is not valid text in the declared encoding
    #[error("input is not valid {encoding} text: first {valid_up_to} code units are valid")]
    InvalidEncoding {
        /// Text encoding the input was checked against
        encoding: &'static str,
        /// Number of leading code units that decoded cleanly
        valid_up_to: usize,
    },

    /// Encoding name not recognised
    #[error("unknown encoding {0:?} (expected \"raw\" or \"utf8\")")]
    UnknownEncoding(String),

    /// After-finish policy name not recognised
    #[error("unknown after-finish policy {0:?} (expected \"reject\" or \"extend\")")]
    UnknownPolicy(String),

    /// Digest text could not be parsed
    #[error("invalid digest: {reason}")]
    InvalidDigest {
        /// What was wrong with the input
        reason: String,
    },

    /// IO error from a wrapped reader or writer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
