//! Regular expressions and finite automata.
//!
//! Expressions are parsed into a [`Regex`] tree and turned into automata
//! with [`thompson`], [`glushkov`] or [`residual_automaton`]. Automata can
//! be determinized, transposed, minimized, and turned back into an
//! expression with [`state_elimination`].
//!
//! ```
//! use regular_automata::{minimize, parse, state_elimination, thompson};
//!
//! let regex = parse("(a + b)* a b").unwrap();
//! let nfa = thompson(&regex, regex.alphabet(), 0).unwrap();
//! let dfa = minimize(&nfa).unwrap();
//! assert_eq!(dfa.num_states(), 3);
//! assert!(dfa.read("babab").unwrap());
//!
//! let back = state_elimination(&dfa).unwrap();
//! assert!(!back.accepts_epsilon());
//! ```

pub mod algorithms;
pub mod automaton;
mod error;
pub mod regex;

pub use algorithms::{
    determinize, glushkov, linearize, minimize, residual, residual_automaton, residual_of,
    state_elimination, thompson, transpose,
};
pub use automaton::{Automaton, AutomatonBuilder, EPSILON, StateId, StateSet, Symbol};
pub use error::{ConstructionError, Error, Result, SyntaxError};
pub use regex::{Regex, parse};
