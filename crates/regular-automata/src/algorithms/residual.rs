//! Residuals (Brzozowski derivatives) of regular expressions and the
//! residual automaton.
//!
//! The residual of a language `L` by a word `u` is `{ v | u v ∈ L }`. It
//! is computed symbolically, letter by letter, and is absent when it is
//! the empty language.

use crate::automaton::{Automaton, AutomatonBuilder, StateId, Symbol};
use crate::error::ConstructionError;
use crate::regex::Regex;
use log::{debug, trace};

/// Computes the residual of `regex` by `word`, or `None` when no word of
/// the language starts with `word`.
///
/// ```
/// use regular_automata::{parse, residual};
///
/// let regex = parse("(a + b)* a").unwrap();
/// let derived = residual(&regex, "a").unwrap();
/// assert_eq!(derived.to_string(), "(a + b)* a + ε");
/// assert!(residual(&parse("a b").unwrap(), "b").is_none());
/// ```
pub fn residual(regex: &Regex, word: &str) -> Option<Regex> {
    let mut current = regex.clone();
    for letter in word.chars() {
        current = residual_by_letter(&current, letter)?;
    }
    Some(current)
}

/// Residual of a possibly absent expression. The residual of the empty
/// language is empty.
pub fn residual_of(regex: Option<&Regex>, word: &str) -> Option<Regex> {
    regex.and_then(|regex| residual(regex, word))
}

fn residual_by_letter(regex: &Regex, letter: Symbol) -> Option<Regex> {
    match regex {
        Regex::Epsilon => None,
        Regex::Letter(own) => (*own == letter).then(Regex::epsilon),
        Regex::Sum(left, right) => union(
            residual_by_letter(left, letter),
            residual_by_letter(right, letter),
        ),
        Regex::Concat(left, right) => {
            let through_left = residual_by_letter(left, letter)
                .map(|derived| Regex::concat(derived, right.as_ref().clone()));
            if left.accepts_epsilon() {
                union(through_left, residual_by_letter(right, letter))
            } else {
                through_left
            }
        }
        Regex::Star(inner) => {
            residual_by_letter(inner, letter).map(|derived| Regex::concat(derived, regex.clone()))
        }
    }
}

/// Sum of two possibly absent residuals. Summands of `right` that already
/// occur in `left` are dropped, which keeps the set of iterated residuals
/// of an expression finite.
fn union(left: Option<Regex>, right: Option<Regex>) -> Option<Regex> {
    match (left, right) {
        (Some(left), Some(right)) => Some(absorb(left, right)),
        (left, right) => left.or(right),
    }
}

fn absorb(left: Regex, right: Regex) -> Regex {
    let mut known = Vec::new();
    summands(&left, &mut known);
    let mut added = Vec::new();
    summands(&right, &mut added);

    if added.iter().all(|term| !known.contains(term)) {
        return Regex::sum(left, right);
    }

    let mut fresh: Vec<Regex> = Vec::new();
    for term in added {
        if !known.contains(&term) && !fresh.iter().any(|seen| seen == term) {
            fresh.push(term.clone());
        }
    }
    fresh.into_iter().fold(left, Regex::sum)
}

/// Operands of nested sums, left to right.
fn summands<'a>(regex: &'a Regex, terms: &mut Vec<&'a Regex>) {
    match regex {
        Regex::Sum(left, right) => {
            summands(left, terms);
            summands(right, terms);
        }
        term => terms.push(term),
    }
}

/// Identifier of a residual state: its rendering without whitespace.
fn state_label(regex: &Regex) -> String {
    regex
        .to_string()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect()
}

/// Builds the automaton of the residuals of `regex`.
///
/// States are the distinct residuals reachable from `regex`, explored
/// breadth-first over its alphabet, each labeled with its rendering
/// without whitespace. The initial state is `regex` itself, a state is
/// accepting iff its residual matches the empty word, and an empty
/// residual gives no arrow. The result is deterministic. Residuals that
/// denote the same language but render differently stay distinct states.
///
/// Fails with [`ConstructionError::EpsilonInAlphabet`] when `regex` was
/// assembled by hand with a `Letter(ε)` node.
pub fn residual_automaton(regex: &Regex) -> Result<Automaton, ConstructionError> {
    let alphabet = regex.alphabet();
    let mut builder = AutomatonBuilder::new(alphabet.iter().copied());

    // Residuals indexed by state id; ids are handed out in BFS order, so
    // the vector doubles as the queue.
    let mut residuals = vec![regex.clone()];
    let initial = builder.add_state(state_label(regex));
    builder.add_initial_state(initial);

    let mut next = 0;
    while let Some(current) = residuals.get(next).cloned() {
        let state = next as StateId;
        next += 1;

        if current.accepts_epsilon() {
            builder.add_accepting_state(state);
        }
        for &letter in &alphabet {
            let Some(derived) = residual_by_letter(&current, letter) else {
                continue;
            };
            let label = state_label(&derived);
            let target = match builder.state_id(&label) {
                Some(existing) => existing,
                None => {
                    trace!("residual automaton: new residual {label}");
                    residuals.push(derived);
                    builder.add_state(label)
                }
            };
            builder.add_transition(state, letter, target);
        }
    }

    let automaton = builder.build()?;
    debug!(
        "residual automaton: {} states for \"{}\"",
        automaton.num_states(),
        regex
    );
    Ok(automaton)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::parse;

    fn compact(regex: Option<Regex>) -> Option<String> {
        regex.map(|regex| state_label(&regex))
    }

    #[test]
    fn test_residual() {
        let problems = [
            ("((aa) + (bb)) cc", "a", Some("acc")),
            ("((aa) + (ab)) cc", "a", Some("(a+b)cc")),
            ("(a + ε)(b + ε)(c + ε)(d + ε)", "a", Some("(b+ε)(c+ε)(d+ε)")),
            ("(a + ε)(b + ε)(c + ε)(d + ε)", "c", Some("d+ε")),
            ("(a + ε)(b + ε)(c + ε)(d + ε)", "ab", Some("(c+ε)(d+ε)")),
            ("(a + b)* a", "a", Some("(a+b)*a+ε")),
            ("(a + b)* a", "b", Some("(a+b)*a")),
            ("(a b c)* a", "a", Some("bc(abc)*a+ε")),
            ("(a b c)* a", "ab", Some("c(abc)*a")),
            ("a b", "b", None),
            ("ε", "a", None),
            ("a", "a", Some("ε")),
        ];
        for (text, word, expected) in problems {
            let regex = parse(text).unwrap();
            assert_eq!(
                compact(residual(&regex, word)),
                expected.map(str::to_string),
                "residual of {text:?} by {word:?}"
            );
        }
    }

    #[test]
    fn test_residual_by_empty_word() {
        let regex = parse("(a + b)* a").unwrap();
        assert_eq!(residual(&regex, ""), Some(regex.clone()));
    }

    #[test]
    fn test_residual_of_absent() {
        assert_eq!(residual_of(None, "a"), None);
        assert_eq!(residual_of(None, ""), None);
        let regex = parse("a b").unwrap();
        assert_eq!(
            compact(residual_of(Some(&regex), "a")),
            Some("b".to_string())
        );
    }

    #[test]
    fn test_residual_absorbs_repeated_summands() {
        let regex = parse("a* a*").unwrap();
        let once = residual(&regex, "a").unwrap();
        assert_eq!(state_label(&once), "(a)*(a)*+(a)*");
        assert_eq!(residual(&once, "a"), Some(once.clone()));
    }

    #[test]
    fn test_residual_automaton() {
        let automaton = residual_automaton(&parse("(a + b)* a").unwrap()).unwrap();
        let labels: Vec<&str> = automaton.labels().collect();
        assert_eq!(labels, ["(a+b)*a", "(a+b)*a+ε"]);
        assert!(automaton.is_deterministic());
        assert_eq!(automaton.accepting_states().to_vec(), vec![1]);
        for word in ["a", "ba", "abba"] {
            assert!(automaton.read(word).unwrap(), "rejected {word:?}");
        }
        for word in ["", "b", "ab"] {
            assert!(!automaton.read(word).unwrap(), "accepted {word:?}");
        }
    }

    #[test]
    fn test_residual_automaton_of_word() {
        let automaton = residual_automaton(&parse("a b c").unwrap()).unwrap();
        let labels: Vec<&str> = automaton.labels().collect();
        assert_eq!(labels, ["abc", "bc", "c", "ε"]);
        assert!(automaton.read("abc").unwrap());
        assert!(!automaton.read("ab").unwrap());
    }

    #[test]
    fn test_residual_automaton_terminates() {
        let automaton = residual_automaton(&parse("a* a*").unwrap()).unwrap();
        assert_eq!(automaton.num_states(), 2);
        assert!(automaton.read("").unwrap());
        assert!(automaton.read("aaa").unwrap());
    }

    #[test]
    fn test_residual_automaton_rejects_epsilon_letter() {
        let regex = Regex::Star(Box::new(Regex::Letter(crate::automaton::EPSILON)));
        assert_eq!(
            residual_automaton(&regex).unwrap_err(),
            ConstructionError::EpsilonInAlphabet
        );
        assert_eq!(residual(&regex.simplify(), ""), Some(Regex::epsilon()));
    }
}
