//! Finite automata.
//!
//! This module provides the automaton representation shared by every
//! algorithm of the crate:
//! - Arena-indexed states with human-readable labels
//! - Epsilon closure computation
//! - Word acceptance, used as the correctness oracle of the algorithms
//! - Determinism check

mod finite_automaton;
mod state;
mod symbol;

pub use finite_automaton::{Automaton, AutomatonBuilder, Transition};
pub use state::{StateId, StateSet};
pub use symbol::{EPSILON, Symbol, is_epsilon, is_letter};
