use thiserror::Error;

/// Errors surfaced by the fallible helpers of the crate.
///
/// Extraction itself never fails: unmatched or malformed input yields an
/// empty result list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid span {start}..{end} for text {text:?}")]
    InvalidSpan { start: usize, end: usize, text: String },

    #[error("number {0} cannot be spelled out, expected 0 <= n < 60")]
    NumberOutOfRange(i64),

    #[error("time precision must be 1, 2 or 3, got {0}")]
    InvalidPrecision(u8),

    #[error("invalid reference time {0:?}, expected %Y-%m-%dT%H:%M:%S")]
    InvalidReference(String),
}

pub type Result<T> = std::result::Result<T, Error>;
