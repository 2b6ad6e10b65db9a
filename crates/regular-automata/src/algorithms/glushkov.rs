//! Glushkov's construction.
//!
//! The expression is first linearized: every letter occurrence gets its
//! own position, so `(a + b) a` becomes `(a0 + b1) a2`. The automaton has
//! one state per position plus an initial state, and it is epsilon-free
//! by construction.

use crate::automaton::{Automaton, AutomatonBuilder, StateId, Symbol};
use crate::error::ConstructionError;
use crate::regex::Regex;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Label of the initial state of a Glushkov automaton.
pub const GLUSHKOV_INITIAL_LABEL: &str = "0";

/// An indexed letter occurrence of a linearized expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub letter: Symbol,
    pub index: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.index)
    }
}

/// A regular expression whose letters are all distinct positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Linear {
    Epsilon,
    Position(Position),
    Concat(Box<Linear>, Box<Linear>),
    Sum(Box<Linear>, Box<Linear>),
    Star(Box<Linear>),
}

/// First, last and follow sets of a linear expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionSets {
    pub accepts_epsilon: bool,
    /// Positions that can start a word
    pub initial: BTreeSet<Position>,
    /// Positions that can end a word
    pub accepting: BTreeSet<Position>,
    /// Positions that can directly follow each position
    pub successors: BTreeMap<Position, BTreeSet<Position>>,
}

/// Replaces every letter occurrence of `regex` by a position, numbering
/// them left to right from `index`. Returns the linear expression and the
/// next unused index.
pub fn linearize(regex: &Regex, index: usize) -> (Linear, usize) {
    match regex {
        Regex::Epsilon => (Linear::Epsilon, index),
        Regex::Letter(letter) => (
            Linear::Position(Position {
                letter: *letter,
                index,
            }),
            index + 1,
        ),
        Regex::Concat(left, right) => {
            let (left, index) = linearize(left, index);
            let (right, index) = linearize(right, index);
            (Linear::Concat(Box::new(left), Box::new(right)), index)
        }
        Regex::Sum(left, right) => {
            let (left, index) = linearize(left, index);
            let (right, index) = linearize(right, index);
            (Linear::Sum(Box::new(left), Box::new(right)), index)
        }
        Regex::Star(inner) => {
            let (inner, index) = linearize(inner, index);
            (Linear::Star(Box::new(inner)), index)
        }
    }
}

impl Linear {
    pub fn accepts_epsilon(&self) -> bool {
        match self {
            Linear::Epsilon | Linear::Star(_) => true,
            Linear::Position(_) => false,
            Linear::Concat(left, right) => left.accepts_epsilon() && right.accepts_epsilon(),
            Linear::Sum(left, right) => left.accepts_epsilon() || right.accepts_epsilon(),
        }
    }

    /// Positions in left-to-right order.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        self.collect_positions(&mut positions);
        positions
    }

    fn collect_positions(&self, positions: &mut Vec<Position>) {
        match self {
            Linear::Epsilon => {}
            Linear::Position(position) => positions.push(*position),
            Linear::Concat(left, right) | Linear::Sum(left, right) => {
                left.collect_positions(positions);
                right.collect_positions(positions);
            }
            Linear::Star(inner) => inner.collect_positions(positions),
        }
    }

    /// Computes the first, last and follow sets in one bottom-up pass.
    pub fn position_sets(&self) -> PositionSets {
        match self {
            Linear::Epsilon => PositionSets {
                accepts_epsilon: true,
                ..PositionSets::default()
            },
            Linear::Position(position) => PositionSets {
                accepts_epsilon: false,
                initial: BTreeSet::from([*position]),
                accepting: BTreeSet::from([*position]),
                successors: BTreeMap::from([(*position, BTreeSet::new())]),
            },
            Linear::Concat(left, right) => {
                let left = left.position_sets();
                let right = right.position_sets();

                let mut successors = left.successors;
                successors.extend(right.successors);
                for position in &left.accepting {
                    successors
                        .entry(*position)
                        .or_default()
                        .extend(right.initial.iter().copied());
                }

                let mut initial = left.initial;
                if left.accepts_epsilon {
                    initial.extend(right.initial);
                }
                let mut accepting = right.accepting;
                if right.accepts_epsilon {
                    accepting.extend(left.accepting);
                }

                PositionSets {
                    accepts_epsilon: left.accepts_epsilon && right.accepts_epsilon,
                    initial,
                    accepting,
                    successors,
                }
            }
            Linear::Sum(left, right) => {
                let mut sets = left.position_sets();
                let right = right.position_sets();
                sets.accepts_epsilon |= right.accepts_epsilon;
                sets.initial.extend(right.initial);
                sets.accepting.extend(right.accepting);
                sets.successors.extend(right.successors);
                sets
            }
            Linear::Star(inner) => {
                let mut sets = inner.position_sets();
                for position in &sets.accepting {
                    sets.successors
                        .entry(*position)
                        .or_default()
                        .extend(sets.initial.iter().copied());
                }
                sets.accepts_epsilon = true;
                sets
            }
        }
    }
}

/// Tree rendering, e.g. `CONCAT(a0, STAR(b1))`.
impl fmt::Display for Linear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Linear::Epsilon => write!(f, "ε"),
            Linear::Position(position) => write!(f, "{position}"),
            Linear::Concat(left, right) => write!(f, "CONCAT({left}, {right})"),
            Linear::Sum(left, right) => write!(f, "PLUS({left}, {right})"),
            Linear::Star(inner) => write!(f, "STAR({inner})"),
        }
    }
}

/// Builds the Glushkov automaton of `regex`.
///
/// The initial state is labeled [`GLUSHKOV_INITIAL_LABEL`] and accepts iff
/// the expression matches the empty word. Each position `p` gets a state
/// labeled after it (`a0`, `b1`...), entered only by arrows labeled with
/// the letter of `p`. The alphabet is the set of letters of `regex`.
///
/// Fails with [`ConstructionError::EpsilonInAlphabet`] when `regex` was
/// assembled by hand with a `Letter(ε)` node.
pub fn glushkov(regex: &Regex) -> Result<Automaton, ConstructionError> {
    let (linear, _) = linearize(regex, 0);
    let sets = linear.position_sets();

    let mut builder = AutomatonBuilder::new(regex.alphabet());
    let initial = builder.add_state(GLUSHKOV_INITIAL_LABEL);
    builder.add_initial_state(initial);
    if sets.accepts_epsilon {
        builder.add_accepting_state(initial);
    }

    // Positions are numbered from 0 in order, right after the initial state.
    let state_of = |position: &Position| (position.index + 1) as StateId;
    for position in linear.positions() {
        builder.add_state(position.to_string());
    }

    for position in &sets.initial {
        builder.add_transition(initial, position.letter, state_of(position));
    }
    for (position, successors) in &sets.successors {
        for successor in successors {
            builder.add_transition(state_of(position), successor.letter, state_of(successor));
        }
    }
    for position in &sets.accepting {
        builder.add_accepting_state(state_of(position));
    }

    let automaton = builder.build()?;
    debug!(
        "glushkov: {} states for \"{}\"",
        automaton.num_states(),
        regex
    );
    Ok(automaton)
}
