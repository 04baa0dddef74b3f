use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The length prefix or the serialized header is missing, truncated or malformed.
    #[error("corrupt header: {0}")]
    CorruptHeader(String),

    #[error("invalid padding: pad count {pad} with {available} payload bits available")]
    InvalidPadding { pad: usize, available: usize },

    /// The payload ran out (or overran the longest code) with bits left unmatched.
    #[error("unknown code: {pending_bits} trailing bits match no symbol")]
    UnknownCode { pending_bits: usize },

    #[error("decoded {actual} symbols but the header promises {expected}")]
    LengthMismatch { expected: u64, actual: u64 },

    /// No code was generated for a byte being packed.
    #[error("no code for symbol {symbol:#04x}")]
    MissingCode { symbol: u8 },

    /// The input's encoded size cannot be represented in the container.
    #[error("input too large to encode: {0}")]
    InputTooLarge(String),

    #[error("verification failed: decompressed output differs from the input")]
    VerificationFailed,

    #[error("failed to serialize container header: {0}")]
    HeaderEncoding(#[source] bincode::Error),

    #[error("failed to render report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn corrupt_header(message: impl Into<String>) -> Self {
        Error::CorruptHeader(message.into())
    }
}
