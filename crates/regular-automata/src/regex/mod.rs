//! Regular expressions.
//!
//! A [`Regex`] is an immutable tree over five node kinds. Trees built with
//! the smart constructors ([`Regex::concat`], [`Regex::star`]...) or by the
//! [parser](parse) are normalized: a concatenation never has an `Epsilon`
//! child and `Epsilon` is never starred. Trees assembled by hand from the
//! enum variants can be brought to that form with [`Regex::simplify`].

mod parser;

pub use parser::parse;

use crate::automaton::{Symbol, is_epsilon};
use crate::error::SyntaxError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Regular expression abstract syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Regex {
    /// Matches only the empty word.
    Epsilon,
    /// Matches exactly the one-letter word.
    Letter(Symbol),
    /// Matches a word of the left language followed by one of the right.
    Concat(Box<Regex>, Box<Regex>),
    /// Matches the union of both languages.
    Sum(Box<Regex>, Box<Regex>),
    /// Matches the Kleene closure of the inner language.
    Star(Box<Regex>),
}

impl Regex {
    /// The empty word.
    pub fn epsilon() -> Self {
        Regex::Epsilon
    }

    /// A single letter. `ε` denotes the empty word and gives `Epsilon`.
    pub fn letter(letter: Symbol) -> Self {
        if is_epsilon(letter) {
            Regex::Epsilon
        } else {
            Regex::Letter(letter)
        }
    }

    /// Concatenation, collapsing an `Epsilon` operand.
    pub fn concat(left: Regex, right: Regex) -> Self {
        match (left, right) {
            (Regex::Epsilon, other) | (other, Regex::Epsilon) => other,
            (left, right) => Regex::Concat(Box::new(left), Box::new(right)),
        }
    }

    /// Union of both languages. Sums are never simplified.
    pub fn sum(left: Regex, right: Regex) -> Self {
        Regex::Sum(Box::new(left), Box::new(right))
    }

    /// Kleene star; the star of `Epsilon` is `Epsilon`.
    pub fn star(inner: Regex) -> Self {
        match inner {
            Regex::Epsilon => Regex::Epsilon,
            inner => Regex::Star(Box::new(inner)),
        }
    }

    /// Returns the normalized form of this tree, rebuilt bottom-up with
    /// the smart constructors.
    pub fn simplify(&self) -> Regex {
        match self {
            Regex::Epsilon => Regex::Epsilon,
            Regex::Letter(letter) => Regex::letter(*letter),
            Regex::Concat(left, right) => Regex::concat(left.simplify(), right.simplify()),
            Regex::Sum(left, right) => Regex::sum(left.simplify(), right.simplify()),
            Regex::Star(inner) => Regex::star(inner.simplify()),
        }
    }

    /// Returns whether the expression matches the empty word.
    pub fn accepts_epsilon(&self) -> bool {
        match self {
            Regex::Epsilon | Regex::Star(_) => true,
            Regex::Letter(_) => false,
            Regex::Concat(left, right) => left.accepts_epsilon() && right.accepts_epsilon(),
            Regex::Sum(left, right) => left.accepts_epsilon() || right.accepts_epsilon(),
        }
    }

    /// Returns the set of letters occurring in the expression.
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        let mut alphabet = BTreeSet::new();
        self.collect_letters(&mut alphabet);
        alphabet
    }

    fn collect_letters(&self, alphabet: &mut BTreeSet<Symbol>) {
        match self {
            Regex::Epsilon => {}
            Regex::Letter(letter) => {
                alphabet.insert(*letter);
            }
            Regex::Concat(left, right) | Regex::Sum(left, right) => {
                left.collect_letters(alphabet);
                right.collect_letters(alphabet);
            }
            Regex::Star(inner) => inner.collect_letters(alphabet),
        }
    }

    /// Number of letter occurrences in the expression.
    pub fn letter_count(&self) -> usize {
        match self {
            Regex::Epsilon => 0,
            Regex::Letter(_) => 1,
            Regex::Concat(left, right) | Regex::Sum(left, right) => {
                left.letter_count() + right.letter_count()
            }
            Regex::Star(inner) => inner.letter_count(),
        }
    }

    /// Renders the tree structure, e.g. `CONCAT(a, STAR(PLUS(b, ε)))`.
    pub fn to_tree_string(&self) -> String {
        match self {
            Regex::Epsilon => "ε".to_string(),
            Regex::Letter(letter) => letter.to_string(),
            Regex::Concat(left, right) => format!(
                "CONCAT({}, {})",
                left.to_tree_string(),
                right.to_tree_string()
            ),
            Regex::Sum(left, right) => {
                format!("PLUS({}, {})", left.to_tree_string(), right.to_tree_string())
            }
            Regex::Star(inner) => format!("STAR({})", inner.to_tree_string()),
        }
    }
}

/// Canonical rendering: `a + b`, `a (b + c)`, `(a b)*`.
impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regex::Epsilon => write!(f, "ε"),
            Regex::Letter(letter) => write!(f, "{letter}"),
            Regex::Concat(left, right) => {
                write_concat_operand(f, left)?;
                write!(f, " ")?;
                write_concat_operand(f, right)
            }
            Regex::Sum(left, right) => write!(f, "{left} + {right}"),
            Regex::Star(inner) => write!(f, "({inner})*"),
        }
    }
}

fn write_concat_operand(f: &mut fmt::Formatter<'_>, operand: &Regex) -> fmt::Result {
    match operand {
        Regex::Sum(..) => write!(f, "({operand})"),
        _ => write!(f, "{operand}"),
    }
}

impl FromStr for Regex {
    type Err = SyntaxError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(text: &str) -> Regex {
        parse(text).unwrap()
    }

    #[test]
    fn test_smart_constructors_normalize() {
        let a = Regex::letter('a');
        assert_eq!(Regex::concat(Regex::Epsilon, a.clone()), a);
        assert_eq!(Regex::concat(a.clone(), Regex::Epsilon), a);
        assert_eq!(
            Regex::concat(Regex::Epsilon, Regex::Epsilon),
            Regex::Epsilon
        );
        assert_eq!(Regex::star(Regex::Epsilon), Regex::Epsilon);
        assert_eq!(Regex::letter('ε'), Regex::epsilon());
        assert_eq!(Regex::epsilon().to_string(), "ε");
        assert_eq!(
            Regex::sum(a.clone(), Regex::Epsilon).to_tree_string(),
            "PLUS(a, ε)"
        );
    }

    #[test]
    fn test_simplify() {
        let raw = Regex::Concat(
            Box::new(Regex::Star(Box::new(Regex::Epsilon))),
            Box::new(Regex::Concat(
                Box::new(Regex::Letter('a')),
                Box::new(Regex::Epsilon),
            )),
        );
        assert_eq!(raw.simplify(), Regex::Letter('a'));
        assert_eq!(re("(a + b)* c").simplify(), re("(a + b)* c"));
    }

    #[test]
    fn test_accepts_epsilon() {
        assert!(!re("a b*").accepts_epsilon());
        assert!(re("ε").accepts_epsilon());
        assert!(re("a*").accepts_epsilon());
        assert!(re("a + ε").accepts_epsilon());
        assert!(re("(a + ε)(b + ε)").accepts_epsilon());
        assert!(!re("a").accepts_epsilon());
        assert!(!re("(a + ε) b").accepts_epsilon());
    }

    #[test]
    fn test_alphabet() {
        assert_eq!(re("a b*").alphabet(), BTreeSet::from(['a', 'b']));
        assert_eq!(re("ε").alphabet(), BTreeSet::new());
        assert_eq!(re("(a + b)* a c").alphabet(), BTreeSet::from(['a', 'b', 'c']));
    }

    #[test]
    fn test_letter_count() {
        assert_eq!(re("ε").letter_count(), 0);
        assert_eq!(re("a (a + b + ε)* a").letter_count(), 4);
        assert_eq!(re("a a a a a a a").letter_count(), 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(re("a").to_string(), "a");
        assert_eq!(re("a + b").to_string(), "a + b");
        assert_eq!(re("(a + b) c").to_string(), "(a + b) c");
        assert_eq!(re("c (a + b)").to_string(), "c (a + b)");
        assert_eq!(re("(a b)*").to_string(), "(a b)*");
        assert_eq!(re("a*").to_string(), "(a)*");
        assert_eq!(re("(a + b)* a + ε").to_string(), "(a + b)* a + ε");
    }

    #[test]
    fn test_display_parses_back() {
        for text in ["a + b c", "(a + b)(c + ε)", "(a (b + c)*)* d", "a + (b + c)*"] {
            let regex = re(text);
            assert_eq!(re(&regex.to_string()).to_string(), regex.to_string());
        }
    }

    #[test]
    fn test_from_str() {
        let regex: Regex = "a b".parse().unwrap();
        assert_eq!(regex.to_tree_string(), "CONCAT(a, b)");
        assert!("a +".parse::<Regex>().is_err());
    }
}
