//! Error types for pattern compilation and bounded matching.

use thiserror::Error;

/// Why a pattern failed to compile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileErrorKind {
    #[error("unclosed character set, missing `]`")]
    UnclosedSet,

    #[error("empty character set")]
    EmptySet,

    #[error("invalid range `{0}-{1}` in character set")]
    InvalidRange(char, char),

    #[error("unclosed group, missing `)`")]
    UnclosedGroup,

    #[error("unmatched `)`")]
    UnmatchedCloseParen,

    #[error("trailing backslash")]
    TrailingBackslash,

    /// Holds the group number as written, so `\3` reports `3`.
    #[error("backreference \\{0} does not refer to a closed group")]
    InvalidBackreference(usize),

    #[error("quantifier `{0}` has nothing to repeat")]
    NothingToRepeat(char),

    #[error("unexpected `{0}`")]
    Unexpected(char),

    #[error("unexpected end of pattern")]
    UnexpectedEnd,
}

/// A pattern was rejected before any matching took place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at position {position}")]
pub struct CompileError {
    pub kind: CompileErrorKind,
    /// Offset into the pattern, counted in code points.
    pub position: usize,
}

impl CompileError {
    pub fn new(kind: CompileErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// A bounded match gave up before reaching a verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("match aborted after exploring {steps} states")]
    StepLimitExceeded { steps: u64 },
}
