//! The error taxonomy for every public kernel operation.
//!
//! Every operation reports failure through [`Error`] rather than by
//! panicking; panics and `assert!` are reserved for broken internal
//! invariants, never for caller-supplied data.
use std::fmt;

/// Why a regex string failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexErrorKind {
    /// A character outside the alphabet, operator set, or reserved tokens.
    UnrecognizedCharacter(char),

    /// A `(` with no matching `)`, or vice versa.
    UnbalancedParenthesis,

    /// An operator appeared where an operand was expected (e.g. a leading `*`).
    UnexpectedOperator,

    /// The input ended mid-expression.
    UnexpectedEnd,
}

/// The single error type returned by every kernel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A builder invariant was violated; the reason names which one.
    InvalidAutomaton(String),

    /// The operation requires a deterministic automaton (single start, no
    /// silent transitions, at most one target per `(state, symbol)`).
    NotDeterministic,

    /// The operation requires a complete deterministic automaton.
    NotComplete,

    /// Two automata were combined but their alphabets differ.
    AlphabetMismatch,

    /// A regex string failed to parse at the given byte position.
    InvalidRegex {
        position: usize,
        kind: RegexErrorKind,
    },

    /// A cooperative cancellation signal fired mid-computation.
    Cancelled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidAutomaton(reason) => write!(f, "invalid automaton: {reason}"),
            Error::NotDeterministic => write!(f, "operation requires a deterministic automaton"),
            Error::NotComplete => write!(f, "operation requires a complete automaton"),
            Error::AlphabetMismatch => write!(f, "automata do not share an alphabet"),
            Error::InvalidRegex { position, kind } => {
                write!(f, "invalid regex at position {position}: {kind:?}")
            }
            Error::Cancelled => write!(f, "operation was cancelled"),
        }
    }
}

impl std::error::Error for Error {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
