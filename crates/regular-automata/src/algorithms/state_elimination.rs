//! Conversion from automaton to regular expression by state elimination.

use crate::automaton::Automaton;
use crate::regex::Regex;
use log::{debug, trace};

/// Computes a regular expression recognizing the language of `automaton`,
/// or `None` when that language is empty.
///
/// The automaton is first wrapped between a fresh initial node, with an
/// epsilon edge to each initial state, and a fresh accepting node, with
/// an epsilon edge from each accepting state. Edges between the same pair
/// of nodes are summed. States are then eliminated one at a time, from the
/// highest id to the lowest: for every pair of remaining nodes `k`, `l`
/// with edges `k -> q` and `q -> l`, the eliminated state `q` is bypassed
/// by `e(k,q) e(q,q)* e(q,l)`, summed into the existing `e(k,l)`.
///
/// ```
/// use regular_automata::{Automaton, state_elimination};
///
/// let automaton = Automaton::new(
///     ['a', 'b'],
///     ["q0", "q1", "q2"],
///     ["q0"],
///     ["q2"],
///     [("q0", vec![('a', "q1")]), ("q1", vec![('b', "q2")])],
/// )
/// .unwrap();
/// let regex = state_elimination(&automaton).unwrap();
/// assert_eq!(regex.to_tree_string(), "CONCAT(a, b)");
/// ```
pub fn state_elimination(automaton: &Automaton) -> Option<Regex> {
    let mut table = EdgeTable::new(automaton);
    let init = table.init();
    let accept = table.accept();

    for state in (0..automaton.num_states()).rev() {
        table.eliminate(state);
    }

    let regex = table.take(init, accept);
    match &regex {
        Some(regex) => debug!(
            "state elimination: {} states -> \"{}\"",
            automaton.num_states(),
            regex
        ),
        None => debug!("state elimination: empty language"),
    }
    regex
}

/// Dense matrix of the edge expressions between nodes. Nodes are the
/// states of the automaton followed by the added initial and accepting
/// nodes. An absent edge is `None`.
struct EdgeTable {
    size: usize,
    edges: Vec<Option<Regex>>,
    /// Nodes not eliminated yet
    remaining: Vec<usize>,
}

impl EdgeTable {
    fn new(automaton: &Automaton) -> Self {
        let num_states = automaton.num_states();
        let size = num_states + 2;
        let mut table = Self {
            size,
            edges: vec![None; size * size],
            remaining: (0..size).collect(),
        };

        let (init, accept) = (table.init(), table.accept());
        for state in automaton.initial_states().iter() {
            table.add(init, state as usize, Regex::epsilon());
        }
        for state in automaton.accepting_states().iter() {
            table.add(state as usize, accept, Regex::epsilon());
        }
        for (source, symbol, target) in automaton.transitions() {
            table.add(source as usize, target as usize, Regex::letter(symbol));
        }
        table
    }

    fn init(&self) -> usize {
        self.size - 2
    }

    fn accept(&self) -> usize {
        self.size - 1
    }

    fn get(&self, from: usize, to: usize) -> Option<&Regex> {
        self.edges[from * self.size + to].as_ref()
    }

    fn take(&mut self, from: usize, to: usize) -> Option<Regex> {
        self.edges[from * self.size + to].take()
    }

    /// Sums `regex` into the edge from `from` to `to`.
    fn add(&mut self, from: usize, to: usize, regex: Regex) {
        let edge = &mut self.edges[from * self.size + to];
        *edge = Some(match edge.take() {
            Some(existing) => Regex::sum(existing, regex),
            None => regex,
        });
    }

    fn eliminate(&mut self, state: usize) {
        self.remaining.retain(|&node| node != state);
        let self_loop = self.get(state, state).cloned().map(Regex::star);
        trace!("state elimination: removing state {state}");

        let mut bypasses = Vec::new();
        for &from in &self.remaining {
            let Some(incoming) = self.get(from, state) else {
                continue;
            };
            for &to in &self.remaining {
                let Some(outgoing) = self.get(state, to) else {
                    continue;
                };
                let through = match &self_loop {
                    Some(self_loop) => Regex::concat(incoming.clone(), self_loop.clone()),
                    None => incoming.clone(),
                };
                bypasses.push((from, to, Regex::concat(through, outgoing.clone())));
            }
        }

        for (from, to, regex) in bypasses {
            self.add(from, to, regex);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::thompson;
    use crate::regex::parse;

    /// Every word over `alphabet` of length at most `max_len`.
    fn words(alphabet: &[char], max_len: usize) -> Vec<String> {
        let mut words = vec![String::new()];
        let mut last = vec![String::new()];
        for _ in 0..max_len {
            last = last
                .iter()
                .flat_map(|word| {
                    alphabet.iter().map(move |letter| {
                        let mut word = word.clone();
                        word.push(*letter);
                        word
                    })
                })
                .collect();
            words.extend(last.iter().cloned());
        }
        words
    }

    fn assert_same_language(automaton: &Automaton, regex: &Regex, max_len: usize) {
        let alphabet: Vec<char> = automaton.alphabet().iter().copied().collect();
        let back = thompson(regex, alphabet.iter().copied(), 0).unwrap();
        for word in words(&alphabet, max_len) {
            assert_eq!(
                back.read(&word).unwrap(),
                automaton.read(&word).unwrap(),
                "{regex} on {word:?}"
            );
        }
    }

    #[test]
    fn test_single_letter() {
        let automaton = Automaton::new(
            ['a'],
            ["q0", "q1"],
            ["q0"],
            ["q1"],
            [("q0", vec![('a', "q1")])],
        )
        .unwrap();
        assert_eq!(
            state_elimination(&automaton).map(|regex| regex.to_tree_string()),
            Some("a".to_string())
        );
    }

    #[test]
    fn test_two_letters() {
        let automaton = Automaton::new(
            ['a', 'b'],
            ["q0", "q1", "q2"],
            ["q0"],
            ["q2"],
            [("q0", vec![('a', "q1")]), ("q1", vec![('b', "q2")])],
        )
        .unwrap();
        assert_eq!(
            state_elimination(&automaton).map(|regex| regex.to_tree_string()),
            Some("CONCAT(a, b)".to_string())
        );
    }

    #[test]
    fn test_parallel_arrows_are_summed() {
        let automaton = Automaton::new(
            ['a', 'b'],
            ["q0", "q1"],
            ["q0"],
            ["q1"],
            [("q0", vec![('a', "q1"), ('b', "q1")])],
        )
        .unwrap();
        assert_eq!(
            state_elimination(&automaton).map(|regex| regex.to_tree_string()),
            Some("PLUS(a, b)".to_string())
        );
    }

    #[test]
    fn test_self_loop() {
        let automaton = Automaton::new(
            ['a', 'b'],
            ["q0", "q1"],
            ["q0"],
            ["q1"],
            [("q0", vec![('a', "q0"), ('b', "q1")])],
        )
        .unwrap();
        let regex = state_elimination(&automaton).unwrap();
        assert_eq!(regex.to_tree_string(), "CONCAT(STAR(a), b)");
    }

    #[test]
    fn test_cycle_of_three() {
        // (a a a)* b
        let automaton = Automaton::new(
            ['a', 'b'],
            ["q0", "q1", "q2", "q3"],
            ["q0"],
            ["q3"],
            [
                ("q0", vec![('a', "q1"), ('b', "q3")]),
                ("q1", vec![('a', "q2")]),
                ("q2", vec![('a', "q0")]),
            ],
        )
        .unwrap();
        let regex = state_elimination(&automaton).unwrap();
        assert_same_language(&automaton, &regex, 8);
    }

    #[test]
    fn test_round_trip_through_thompson() {
        for text in [
            "(a + b)* a (a + b)*",
            "((a + b) b)*",
            "a (a + b + ε)* a",
            "(a b + c)* d",
            "ε",
        ] {
            let regex = parse(text).unwrap();
            let automaton = thompson(&regex, ['a', 'b', 'c', 'd'], 0).unwrap();
            let back = state_elimination(&automaton).unwrap();
            assert_same_language(&automaton, &back, 5);
        }
    }

    #[test]
    fn test_several_initial_and_accepting_states() {
        let automaton = Automaton::new(
            ['a', 'b'],
            ["p", "q", "r"],
            ["p", "q"],
            ["p", "r"],
            [("p", vec![('a', "r")]), ("q", vec![('b', "r")])],
        )
        .unwrap();
        let regex = state_elimination(&automaton).unwrap();
        assert!(regex.accepts_epsilon());
        assert_same_language(&automaton, &regex, 3);
    }

    #[test]
    fn test_empty_language() {
        let automaton = Automaton::new(
            ['a'],
            ["q0", "q1"],
            ["q0"],
            [],
            [("q0", vec![('a', "q1")])],
        )
        .unwrap();
        assert_eq!(state_elimination(&automaton), None);

        let unreachable = Automaton::new(['a'], ["q0", "q1"], ["q0"], ["q1"], [])
            .unwrap();
        assert_eq!(state_elimination(&unreachable), None);
    }
}
