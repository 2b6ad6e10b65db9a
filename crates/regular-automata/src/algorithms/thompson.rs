//! Thompson's construction.
//!
//! Transforms a regular expression into an equivalent epsilon-NFA by
//! recursion on its syntax tree. Every sub-expression becomes a fragment
//! with one entry and one exit state, glued to its neighbours with
//! epsilon transitions.

use crate::automaton::{Automaton, AutomatonBuilder, EPSILON, StateId, Symbol};
use crate::error::ConstructionError;
use crate::regex::Regex;
use log::debug;

/// Builds the Thompson automaton of `regex` over `alphabet`.
///
/// `alphabet` must contain every letter of `regex`. States are labeled
/// `q{n}` with `n` counting up from `index`, children being numbered
/// before the two states their parent adds, so the next free index after
/// the call is `index + automaton.num_states()`.
///
/// The result has a single initial and a single accepting state.
pub fn thompson(
    regex: &Regex,
    alphabet: impl IntoIterator<Item = Symbol>,
    index: usize,
) -> Result<Automaton, ConstructionError> {
    let mut thompson = Thompson {
        builder: AutomatonBuilder::new(alphabet),
        index,
    };
    let fragment = thompson.fragment(regex);
    thompson.builder.add_initial_state(fragment.start);
    thompson.builder.add_accepting_state(fragment.end);

    let automaton = thompson.builder.build()?;
    debug!(
        "thompson: {} states for \"{}\"",
        automaton.num_states(),
        regex
    );
    Ok(automaton)
}

#[derive(Clone, Copy, Debug)]
struct Fragment {
    start: StateId,
    end: StateId,
}

struct Thompson {
    builder: AutomatonBuilder,
    /// Number of the next state label
    index: usize,
}

impl Thompson {
    fn fresh_state(&mut self) -> StateId {
        let state = self.builder.add_state(format!("q{}", self.index));
        self.index += 1;
        state
    }

    fn fragment(&mut self, regex: &Regex) -> Fragment {
        match regex {
            Regex::Epsilon => self.arrow(EPSILON),
            Regex::Letter(letter) => self.arrow(*letter),
            Regex::Concat(left, right) => {
                let left = self.fragment(left);
                let right = self.fragment(right);
                self.builder.add_epsilon_transition(left.end, right.start);
                Fragment {
                    start: left.start,
                    end: right.end,
                }
            }
            Regex::Sum(left, right) => {
                let left = self.fragment(left);
                let right = self.fragment(right);
                let start = self.fresh_state();
                let end = self.fresh_state();
                self.builder.add_epsilon_transition(start, left.start);
                self.builder.add_epsilon_transition(start, right.start);
                self.builder.add_epsilon_transition(left.end, end);
                self.builder.add_epsilon_transition(right.end, end);
                Fragment { start, end }
            }
            Regex::Star(inner) => {
                let inner = self.fragment(inner);
                let start = self.fresh_state();
                let end = self.fresh_state();
                self.builder.add_epsilon_transition(start, inner.start);
                self.builder.add_epsilon_transition(inner.end, end);
                self.builder.add_epsilon_transition(start, end);
                self.builder.add_epsilon_transition(inner.end, inner.start);
                Fragment { start, end }
            }
        }
    }

    fn arrow(&mut self, symbol: Symbol) -> Fragment {
        let start = self.fresh_state();
        let end = self.fresh_state();
        self.builder.add_transition(start, symbol, end);
        Fragment { start, end }
    }
}
