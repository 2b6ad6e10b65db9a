//! Finite automata with epsilon transitions.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, Symbol, is_epsilon};
use crate::error::ConstructionError;
use indexmap::IndexSet;
use std::collections::{BTreeSet, VecDeque};

/// One outgoing arrow of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub symbol: Symbol,
    pub target: StateId,
}

impl Transition {
    /// Check if this is an epsilon transition.
    pub fn is_epsilon(&self) -> bool {
        is_epsilon(self.symbol)
    }
}

/// A finite automaton, possibly non-deterministic and possibly with
/// epsilon transitions.
///
/// States are numbered `0..num_states()`. Each state carries a unique
/// human-readable label, which is only used for lookups and debugging.
/// Outgoing transitions of a state are kept in insertion order, and the
/// same arrow may appear several times.
///
/// An `Automaton` can only be obtained through [`Automaton::new`] or an
/// [`AutomatonBuilder`], both of which enforce its invariants:
/// - the alphabet does not contain `ε`,
/// - there is at least one initial state,
/// - every transition symbol is in the alphabet or is `ε`.
#[derive(Debug, Clone)]
pub struct Automaton {
    /// Letters of the automaton (never contains epsilon)
    alphabet: BTreeSet<Symbol>,
    /// State labels, indexed by state id
    labels: IndexSet<String>,
    initial_states: StateSet,
    accepting_states: StateSet,
    /// Outgoing transitions, indexed by source state id
    transitions: Vec<Vec<Transition>>,
}

impl Automaton {
    /// Build an automaton from named states.
    ///
    /// Arguments are, in order: the alphabet, the states, the initial
    /// states, the accepting states and, for each state with outgoing
    /// arrows, its list of `(symbol, target)` pairs. States repeated in
    /// `states` are only created once.
    ///
    /// ```
    /// use regular_automata::Automaton;
    ///
    /// let automaton = Automaton::new(
    ///     ['a', 'b'],
    ///     ["q0", "q1"],
    ///     ["q0"],
    ///     ["q1"],
    ///     [("q0", vec![('a', "q1"), ('b', "q0")])],
    /// )
    /// .unwrap();
    /// assert!(automaton.read("bba").unwrap());
    /// assert!(!automaton.read("ab").unwrap());
    /// ```
    pub fn new<S: AsRef<str>>(
        alphabet: impl IntoIterator<Item = Symbol>,
        states: impl IntoIterator<Item = S>,
        initial_states: impl IntoIterator<Item = S>,
        accepting_states: impl IntoIterator<Item = S>,
        transitions: impl IntoIterator<Item = (S, Vec<(Symbol, S)>)>,
    ) -> Result<Self, ConstructionError> {
        let mut builder = AutomatonBuilder::new(alphabet);
        for state in states {
            builder.add_state(state.as_ref());
        }

        for state in initial_states {
            let state = state.as_ref();
            let id = builder
                .state_id(state)
                .ok_or_else(|| ConstructionError::UnknownInitialState(state.to_string()))?;
            builder.add_initial_state(id);
        }

        for state in accepting_states {
            let state = state.as_ref();
            let id = builder
                .state_id(state)
                .ok_or_else(|| ConstructionError::UnknownAcceptingState(state.to_string()))?;
            builder.add_accepting_state(id);
        }

        for (source, arrows) in transitions {
            let source = source.as_ref();
            let source_id = builder
                .state_id(source)
                .ok_or_else(|| ConstructionError::UnknownSource(source.to_string()))?;
            for (symbol, target) in arrows {
                let target = target.as_ref();
                let target_id =
                    builder
                        .state_id(target)
                        .ok_or_else(|| ConstructionError::UnknownTarget {
                            state: source.to_string(),
                            target: target.to_string(),
                        })?;
                builder.add_transition(source_id, symbol, target_id);
            }
        }

        builder.build()
    }

    /// Get the alphabet (all letters, never epsilon).
    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.labels.len()
    }

    /// Iterate over all state ids.
    pub fn states(&self) -> impl Iterator<Item = StateId> + use<> {
        0..self.labels.len() as StateId
    }

    /// Get the label of a state.
    pub fn label(&self, state: StateId) -> Option<&str> {
        self.labels.get_index(state as usize).map(String::as_str)
    }

    /// Iterate over the state labels, in state id order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    /// Look up a state by its label.
    pub fn state_id(&self, label: &str) -> Option<StateId> {
        self.labels.get_index_of(label).map(|idx| idx as StateId)
    }

    /// Get the initial states.
    pub fn initial_states(&self) -> &StateSet {
        &self.initial_states
    }

    /// Get the accepting states.
    pub fn accepting_states(&self) -> &StateSet {
        &self.accepting_states
    }

    /// Check if a state is accepting.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting_states.contains(state)
    }

    /// Get the outgoing transitions of a state, in insertion order.
    pub fn transitions_from(&self, state: StateId) -> &[Transition] {
        self.transitions
            .get(state as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Get all transitions as `(source, symbol, target)` triples.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.transitions
            .iter()
            .enumerate()
            .flat_map(|(src, arrows)| {
                arrows
                    .iter()
                    .map(move |arrow| (src as StateId, arrow.symbol, arrow.target))
            })
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states());
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }
            stack.extend(
                self.transitions_from(s)
                    .iter()
                    .filter(|arrow| arrow.is_epsilon() && !closure.contains(arrow.target))
                    .map(|arrow| arrow.target),
            );
        }

        closure
    }

    /// Get the states directly reachable from a set of states on a given
    /// letter. The result is not epsilon-closed.
    pub fn step(&self, states: &StateSet, letter: Symbol) -> StateSet {
        debug_assert!(!is_epsilon(letter), "use epsilon_closure for epsilon moves");

        let mut reached = StateSet::with_capacity(self.num_states());
        for state in states.iter() {
            reached.extend(
                self.transitions_from(state)
                    .iter()
                    .filter(|arrow| arrow.symbol == letter)
                    .map(|arrow| arrow.target),
            );
        }
        reached
    }

    /// Returns whether the automaton is deterministic: it has a unique
    /// initial state, no epsilon transition, and no state has two
    /// outgoing arrows with the same letter.
    pub fn is_deterministic(&self) -> bool {
        if self.initial_states.len() != 1 {
            return false;
        }
        self.transitions.iter().all(|arrows| {
            let mut letters = BTreeSet::new();
            arrows
                .iter()
                .all(|arrow| !arrow.is_epsilon() && letters.insert(arrow.symbol))
        })
    }

    /// Reads a word and returns whether the automaton accepts it.
    ///
    /// Every character of `word` is a letter. Epsilon transitions are
    /// followed before the first letter and after each letter.
    pub fn read(&self, word: &str) -> Result<bool, ConstructionError> {
        if let Some(letter) = word.chars().find(|letter| !self.alphabet.contains(letter)) {
            return Err(ConstructionError::InvalidWord(letter));
        }

        let mut current = self.epsilon_closure(&self.initial_states);
        for letter in word.chars() {
            if current.is_empty() {
                return Ok(false);
            }
            current = self.epsilon_closure(&self.step(&current, letter));
        }
        Ok(current.intersects(&self.accepting_states))
    }

    /// Check if the automaton accepts no word at all.
    pub fn is_empty(&self) -> bool {
        let mut visited = StateSet::with_capacity(self.num_states());
        let mut queue: VecDeque<StateId> = self.initial_states.iter().collect();

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }
            if self.accepting_states.contains(state) {
                return false;
            }
            queue.extend(
                self.transitions_from(state)
                    .iter()
                    .map(|arrow| arrow.target)
                    .filter(|target| !visited.contains(*target)),
            );
        }

        true
    }
}

/// Incremental construction of an [`Automaton`].
///
/// States are created with [`add_state`](Self::add_state), which returns
/// the existing state when a label is reused.
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    alphabet: BTreeSet<Symbol>,
    labels: IndexSet<String>,
    initial_states: StateSet,
    accepting_states: StateSet,
    transitions: Vec<Vec<Transition>>,
}

impl AutomatonBuilder {
    /// Create an empty builder over the given alphabet.
    pub fn new(alphabet: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            alphabet: alphabet.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Add a state with the given label and return its id.
    pub fn add_state(&mut self, label: impl Into<String>) -> StateId {
        let (idx, inserted) = self.labels.insert_full(label.into());
        if inserted {
            self.transitions.push(Vec::new());
        }
        idx as StateId
    }

    /// Look up a state by its label.
    pub fn state_id(&self, label: &str) -> Option<StateId> {
        self.labels.get_index_of(label).map(|idx| idx as StateId)
    }

    /// Get the number of states added so far.
    pub fn num_states(&self) -> usize {
        self.labels.len()
    }

    /// Append a transition from source to target on the given symbol.
    ///
    /// # Panics
    ///
    /// Panics if `source` was not created by this builder.
    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, target: StateId) {
        self.transitions[source as usize].push(Transition { symbol, target });
    }

    /// Append an epsilon transition from source to target.
    pub fn add_epsilon_transition(&mut self, source: StateId, target: StateId) {
        self.add_transition(source, EPSILON, target);
    }

    /// Mark a state as initial.
    pub fn add_initial_state(&mut self, state: StateId) {
        self.initial_states.insert(state);
    }

    /// Mark a state as accepting.
    pub fn add_accepting_state(&mut self, state: StateId) {
        self.accepting_states.insert(state);
    }

    /// Check the automaton invariants and build the automaton.
    pub fn build(self) -> Result<Automaton, ConstructionError> {
        self.validate()?;
        Ok(self.into_automaton())
    }

    /// Build an automaton whose invariants hold by construction.
    pub(crate) fn finish(self) -> Automaton {
        debug_assert_eq!(self.validate(), Ok(()));
        self.into_automaton()
    }

    fn validate(&self) -> Result<(), ConstructionError> {
        if self.alphabet.contains(&EPSILON) {
            return Err(ConstructionError::EpsilonInAlphabet);
        }
        if self.initial_states.is_empty() {
            return Err(ConstructionError::NoInitialState);
        }

        let num_states = self.labels.len();
        if let Some(state) = self
            .initial_states
            .iter()
            .find(|&state| state as usize >= num_states)
        {
            return Err(ConstructionError::UnknownInitialState(state.to_string()));
        }
        if let Some(state) = self
            .accepting_states
            .iter()
            .find(|&state| state as usize >= num_states)
        {
            return Err(ConstructionError::UnknownAcceptingState(state.to_string()));
        }

        for (label, arrows) in self.labels.iter().zip(&self.transitions) {
            for arrow in arrows {
                if !arrow.is_epsilon() && !self.alphabet.contains(&arrow.symbol) {
                    return Err(ConstructionError::UnknownLetter {
                        state: label.clone(),
                        letter: arrow.symbol,
                    });
                }
                if arrow.target as usize >= num_states {
                    return Err(ConstructionError::UnknownTarget {
                        state: label.clone(),
                        target: arrow.target.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    fn into_automaton(self) -> Automaton {
        Automaton {
            alphabet: self.alphabet,
            labels: self.labels,
            initial_states: self.initial_states,
            accepting_states: self.accepting_states,
            transitions: self.transitions,
        }
    }
}
