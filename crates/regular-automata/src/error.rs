//! Error types.

use crate::automaton::Symbol;
use thiserror::Error;

/// An automaton was built, or used, in violation of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("an automaton must have at least 1 initial state")]
    NoInitialState,

    #[error("'ε' is reserved and cannot be a letter of an alphabet")]
    EpsilonInAlphabet,

    #[error("initial state \"{0}\" is not a state of the automaton")]
    UnknownInitialState(String),

    #[error("accepting state \"{0}\" is not a state of the automaton")]
    UnknownAcceptingState(String),

    #[error("unknown state \"{0}\" in transitions")]
    UnknownSource(String),

    #[error("in transitions for state \"{state}\": unknown letter '{letter}'")]
    UnknownLetter { state: String, letter: Symbol },

    #[error("in transitions for state \"{state}\": unknown state \"{target}\"")]
    UnknownTarget { state: String, target: String },

    #[error("invalid word: letter '{0}' is not in the alphabet")]
    InvalidWord(Symbol),
}

/// The text of a regular expression does not match the grammar.
///
/// Positions are byte offsets into the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedCharacter { position: usize, found: char },

    #[error("unexpected '{found}' at position {position}")]
    UnexpectedToken { position: usize, found: char },

    #[error("parenthesis opened at position {position} is never closed")]
    UnclosedParenthesis { position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,
}

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConstructionError::UnknownLetter {
            state: "q0".to_string(),
            letter: 'x',
        };
        assert_eq!(
            err.to_string(),
            "in transitions for state \"q0\": unknown letter 'x'"
        );

        let err: Error = SyntaxError::UnexpectedToken {
            position: 3,
            found: ')',
        }
        .into();
        assert_eq!(err.to_string(), "syntax error: unexpected ')' at position 3");

        let err: Error = ConstructionError::NoInitialState.into();
        assert_eq!(
            err.to_string(),
            "an automaton must have at least 1 initial state"
        );
    }
}
