//! Conversions between regular expressions and automata.
//!
//! This module provides:
//! - Thompson's and Glushkov's constructions (expression to automaton)
//! - Powerset construction (automaton to DFA)
//! - Transposition and Brzozowski's minimization
//! - State elimination (automaton to expression)
//! - Residuals and the residual automaton

mod glushkov;
mod minimize;
mod powerset;
mod residual;
mod state_elimination;
mod thompson;

pub use glushkov::{GLUSHKOV_INITIAL_LABEL, Linear, Position, PositionSets, glushkov, linearize};
pub use minimize::{minimize, transpose};
pub use powerset::determinize;
pub use residual::{residual, residual_automaton, residual_of};
pub use state_elimination::state_elimination;
pub use thompson::thompson;
