//! Transposition and Brzozowski minimization.

use crate::algorithms::powerset::determinize;
use crate::automaton::{Automaton, AutomatonBuilder};
use crate::error::ConstructionError;
use log::debug;

/// Label of the single state of a minimal automaton with an empty language.
const EMPTY_LANGUAGE_LABEL: &str = "∅";

/// Reverses every arrow and swaps the initial and accepting states.
///
/// The transposed automaton recognizes the mirror language. States keep
/// their labels and ids.
///
/// Fails with [`ConstructionError::NoInitialState`] when `automaton` has
/// no accepting state.
pub fn transpose(automaton: &Automaton) -> Result<Automaton, ConstructionError> {
    let mut builder = AutomatonBuilder::new(automaton.alphabet().iter().copied());
    for label in automaton.labels() {
        builder.add_state(label);
    }
    for state in automaton.accepting_states().iter() {
        builder.add_initial_state(state);
    }
    for state in automaton.initial_states().iter() {
        builder.add_accepting_state(state);
    }
    for (source, symbol, target) in automaton.transitions() {
        builder.add_transition(target, symbol, source);
    }
    builder.build()
}

/// Computes the minimal accessible DFA recognizing the language of
/// `automaton`, as `determinize(transpose(determinize(transpose(determinize(a)))))`.
///
/// The first determinization removes epsilon transitions and
/// inaccessible states. An automaton with an empty language minimizes to
/// a single non-accepting state without arrows.
///
/// ```
/// use regular_automata::{minimize, parse, thompson};
///
/// let regex = parse("(a + b)* a (a + b)*").unwrap();
/// let automaton = thompson(&regex, regex.alphabet(), 0).unwrap();
/// assert_eq!(minimize(&automaton).unwrap().num_states(), 2);
/// ```
pub fn minimize(automaton: &Automaton) -> Result<Automaton, ConstructionError> {
    let dfa = determinize(automaton);
    if dfa.is_empty() {
        debug!("minimize: empty language");
        return empty_language(&dfa);
    }

    let reversed = determinize(&transpose(&dfa)?);
    let minimal = determinize(&transpose(&reversed)?);
    debug!(
        "minimize: {} states -> {} states",
        automaton.num_states(),
        minimal.num_states()
    );
    Ok(minimal)
}

fn empty_language(dfa: &Automaton) -> Result<Automaton, ConstructionError> {
    let mut builder = AutomatonBuilder::new(dfa.alphabet().iter().copied());
    let state = builder.add_state(EMPTY_LANGUAGE_LABEL);
    builder.add_initial_state(state);
    builder.build()
}
