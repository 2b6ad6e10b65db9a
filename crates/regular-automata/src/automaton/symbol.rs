//! Symbol types for automata transitions.

/// A transition symbol. Letters of an alphabet are single characters.
/// The special value `EPSILON` labels an epsilon (empty) transition.
pub type Symbol = char;

/// Special symbol representing epsilon (empty) transitions and the empty
/// word. It is reserved and never part of an alphabet.
pub const EPSILON: Symbol = 'ε';

/// Check if a symbol is an epsilon transition.
#[inline]
pub fn is_epsilon(symbol: Symbol) -> bool {
    symbol == EPSILON
}

/// Check if a character may be used as a letter of an alphabet: a word
/// character (alphanumeric or `_`) other than `EPSILON`.
#[inline]
pub fn is_letter(symbol: Symbol) -> bool {
    !is_epsilon(symbol) && (symbol.is_alphanumeric() || symbol == '_')
}
