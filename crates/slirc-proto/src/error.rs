//! Error types for the protocol vocabulary.

use thiserror::Error;

/// Errors raised while splitting a mode string into deltas.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModeParseError {
    /// The mode string did not start with `+` or `-`.
    #[error("mode string must start with '+' or '-': {0:?}")]
    MissingSign(String),
    /// A flag that requires an argument had none left.
    #[error("mode '{0}' requires an argument but none provided")]
    MissingArgument(char),
    /// More arguments were supplied than flags consumed.
    #[error("{0} unused mode argument(s)")]
    UnusedArguments(usize),
    /// Nothing to parse.
    #[error("empty mode string")]
    Empty,
}

/// Errors raised while parsing a `nick!user@host` string.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HostmaskParseError {
    /// The nickname part was empty.
    #[error("hostmask has no nickname: {0:?}")]
    EmptyNick(String),
    /// Whitespace or control characters are never valid in a hostmask.
    #[error("hostmask contains invalid characters: {0:?}")]
    InvalidCharacters(String),
}
