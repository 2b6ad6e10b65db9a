//! Powerset construction for converting an automaton into a DFA.

use crate::automaton::{Automaton, AutomatonBuilder, StateId, StateSet, Symbol};
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::VecDeque;

/// Separator between the member labels of a subset state label.
const SUBSET_SEPARATOR: &str = ",";

/// Convert an automaton to an equivalent deterministic one using the
/// powerset construction.
///
/// Only accessible subsets are built, in breadth-first order from the
/// epsilon closure of the initial states. A subset state is labeled with
/// the sorted labels of its members joined by `,`, e.g. `q1,q3`. It is
/// accepting iff one of its members is. Letters with no successor get no
/// arrow, so the result may be incomplete.
///
/// Subsets are epsilon-closed: the construction starts from the closure of
/// the initial states rather than from the initial-state set as given, and
/// closes every target subset. This is deliberate, so that the result is
/// deterministic even when `automaton` has epsilon transitions. On an
/// epsilon-free automaton both starting points coincide.
pub fn determinize(automaton: &Automaton) -> Automaton {
    // Each DFA state corresponds to a set of source states
    let mut state_mapping: IndexMap<StateSet, StateId> = IndexMap::new();
    let mut builder = AutomatonBuilder::new(automaton.alphabet().iter().copied());
    let mut worklist: VecDeque<StateSet> = VecDeque::new();

    let initial_set = automaton.epsilon_closure(automaton.initial_states());
    let initial_state = builder.add_state(subset_label(automaton, &initial_set, &builder));
    builder.add_initial_state(initial_state);
    state_mapping.insert(initial_set.clone(), initial_state);
    worklist.push_back(initial_set);

    while let Some(current_set) = worklist.pop_front() {
        let Some(&current_state) = state_mapping.get(&current_set) else {
            continue;
        };

        // Group the outgoing letters of the subset, in first-seen order
        let mut moves: IndexMap<Symbol, StateSet> = IndexMap::new();
        for state in current_set.iter() {
            for arrow in automaton.transitions_from(state) {
                if !arrow.is_epsilon() {
                    moves.entry(arrow.symbol).or_default().insert(arrow.target);
                }
            }
        }

        for (symbol, targets) in moves {
            let next_set = automaton.epsilon_closure(&targets);
            let next_state = match state_mapping.get(&next_set) {
                Some(&existing) => existing,
                None => {
                    let new_state =
                        builder.add_state(subset_label(automaton, &next_set, &builder));
                    trace!(
                        "determinize: new subset {:?} as state {}",
                        next_set, new_state
                    );
                    state_mapping.insert(next_set.clone(), new_state);
                    worklist.push_back(next_set);
                    new_state
                }
            };
            builder.add_transition(current_state, symbol, next_state);
        }
    }

    for (subset, &state) in &state_mapping {
        if subset.intersects(automaton.accepting_states()) {
            builder.add_accepting_state(state);
        }
    }

    let dfa = builder.finish();
    debug!(
        "determinize: {} states -> {} states",
        automaton.num_states(),
        dfa.num_states()
    );
    dfa
}

/// Label of a subset state. Member labels may themselves contain the
/// separator, so a label already taken by another subset is primed until
/// it is unique.
fn subset_label(automaton: &Automaton, subset: &StateSet, builder: &AutomatonBuilder) -> String {
    let mut members: Vec<&str> = subset
        .iter()
        .filter_map(|state| automaton.label(state))
        .collect();
    members.sort_unstable();

    let mut label = members.join(SUBSET_SEPARATOR);
    while builder.state_id(&label).is_some() {
        label.push('\'');
    }
    label
}
