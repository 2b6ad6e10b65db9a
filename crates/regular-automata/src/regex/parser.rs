//! Regular expression parser.
//!
//! Grammar, from loosest to tightest binding:
//!
//! ```text
//! sum     := concat ('+' concat)*
//! concat  := postfix postfix*
//! postfix := atom '*'*
//! atom    := 'ε' | letter | '(' sum ')'
//! ```
//!
//! A letter is any word character (alphanumeric or `_`) other than `ε`.
//! Whitespace is ignored everywhere. Both binary operators associate to
//! the left, and stacked stars collapse: `a**` is `STAR(a)`.
//!
//! Concatenation binds tighter than `+`, so `a b + c` is
//! `PLUS(CONCAT(a, b), c)`, never `CONCAT(a, PLUS(b, c))` as a grammar
//! with weaker concatenation would read it. Expressions that parenthesize
//! their sums read the same either way.

use crate::automaton::{Symbol, is_epsilon, is_letter};
use crate::error::SyntaxError;
use crate::regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Epsilon,
    Letter(Symbol),
    LeftParen,
    RightParen,
    Plus,
    Star,
}

impl Token {
    fn as_char(self) -> char {
        match self {
            Token::Epsilon => 'ε',
            Token::Letter(letter) => letter,
            Token::LeftParen => '(',
            Token::RightParen => ')',
            Token::Plus => '+',
            Token::Star => '*',
        }
    }

    fn starts_atom(self) -> bool {
        matches!(self, Token::Epsilon | Token::Letter(_) | Token::LeftParen)
    }
}

/// Parses a regular expression, returning its abstract syntax tree.
///
/// ```
/// use regular_automata::regex::parse;
///
/// let regex = parse("(a + b)* c").unwrap();
/// assert_eq!(regex.to_tree_string(), "CONCAT(STAR(PLUS(a, b)), c)");
/// ```
pub fn parse(text: &str) -> Result<Regex, SyntaxError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser { tokens, next: 0 };
    let regex = parser.sum()?;
    match parser.peek() {
        None => Ok(regex),
        Some((position, token)) => Err(SyntaxError::UnexpectedToken {
            position,
            found: token.as_char(),
        }),
    }
}

fn tokenize(text: &str) -> Result<Vec<(usize, Token)>, SyntaxError> {
    text.char_indices()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(position, ch)| {
            let token = match ch {
                '(' => Token::LeftParen,
                ')' => Token::RightParen,
                '+' => Token::Plus,
                '*' => Token::Star,
                ch if is_epsilon(ch) => Token::Epsilon,
                ch if is_letter(ch) => Token::Letter(ch),
                found => return Err(SyntaxError::UnexpectedCharacter { position, found }),
            };
            Ok((position, token))
        })
        .collect()
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    next: usize,
}

impl Parser {
    fn peek(&self) -> Option<(usize, Token)> {
        self.tokens.get(self.next).copied()
    }

    fn bump(&mut self) -> Option<(usize, Token)> {
        let token = self.peek();
        if token.is_some() {
            self.next += 1;
        }
        token
    }

    fn sum(&mut self) -> Result<Regex, SyntaxError> {
        let mut regex = self.concat()?;
        while let Some((_, Token::Plus)) = self.peek() {
            self.bump();
            regex = Regex::sum(regex, self.concat()?);
        }
        Ok(regex)
    }

    fn concat(&mut self) -> Result<Regex, SyntaxError> {
        let mut regex = self.postfix()?;
        while self.peek().is_some_and(|(_, token)| token.starts_atom()) {
            regex = Regex::concat(regex, self.postfix()?);
        }
        Ok(regex)
    }

    fn postfix(&mut self) -> Result<Regex, SyntaxError> {
        let mut regex = self.atom()?;
        while let Some((_, Token::Star)) = self.peek() {
            self.bump();
            if !matches!(regex, Regex::Star(_)) {
                regex = Regex::star(regex);
            }
        }
        Ok(regex)
    }

    fn atom(&mut self) -> Result<Regex, SyntaxError> {
        match self.bump() {
            Some((_, Token::Epsilon)) => Ok(Regex::epsilon()),
            Some((_, Token::Letter(letter))) => Ok(Regex::Letter(letter)),
            Some((open, Token::LeftParen)) => {
                let inner = self.sum()?;
                match self.bump() {
                    Some((_, Token::RightParen)) => Ok(inner),
                    Some((position, token)) => Err(SyntaxError::UnexpectedToken {
                        position,
                        found: token.as_char(),
                    }),
                    None => Err(SyntaxError::UnclosedParenthesis { position: open }),
                }
            }
            Some((position, token)) => Err(SyntaxError::UnexpectedToken {
                position,
                found: token.as_char(),
            }),
            None => Err(SyntaxError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(text: &str) -> String {
        parse(text).unwrap().to_tree_string().replace(' ', "")
    }

    #[test]
    fn test_parse() {
        let problems = [
            ("ε", "ε"),
            ("a", "a"),
            ("a b", "CONCAT(a, b)"),
            ("ab", "CONCAT(a, b)"),
            ("ε b", "b"),
            ("b ε", "b"),
            ("ε b ε", "b"),
            ("ε ε ε", "ε"),
            ("a*", "STAR(a)"),
            ("a**", "STAR(a)"),
            ("(a*)*", "STAR(a)"),
            ("ε*", "ε"),
            ("a + b", "PLUS(a, b)"),
            ("(a + b)", "PLUS(a, b)"),
            ("a (a + ε) b", "CONCAT(CONCAT(a, PLUS(a, ε)), b)"),
            ("(a + b)*", "STAR(PLUS(a, b))"),
            (
                "(a + b*)aa b",
                "CONCAT(CONCAT(CONCAT(PLUS(a, STAR(b)), a), a), b)",
            ),
            ("a (a + b*)*", "CONCAT(a, STAR(PLUS(a, STAR(b))))"),
            ("((a))", "a"),
        ];
        for (text, expected) in problems {
            assert_eq!(tree(text), expected.replace(' ', ""), "parsing {text:?}");
        }
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(tree("a + ab"), "PLUS(a,CONCAT(a,b))");
        assert_eq!(tree("a b + c"), "PLUS(CONCAT(a,b),c)");
        assert_eq!(tree("a + b + c"), "PLUS(PLUS(a,b),c)");
        assert_eq!(tree("a b c"), "CONCAT(CONCAT(a,b),c)");
        assert_eq!(tree("a b*"), "CONCAT(a,STAR(b))");
    }

    #[test]
    fn test_concatenation_binds_tighter_than_sum() {
        assert_eq!(tree("a b + c"), "PLUS(CONCAT(a,b),c)");
        assert_ne!(tree("a b + c"), "CONCAT(a,PLUS(b,c))");
        assert_eq!(tree("a + a b"), "PLUS(a,CONCAT(a,b))");
        assert_eq!(tree("a (b + c)"), "CONCAT(a,PLUS(b,c))");
        assert_eq!(tree("((aa) + (bb)) cc"), "CONCAT(CONCAT(PLUS(CONCAT(a,a),CONCAT(b,b)),c),c)");
    }

    #[test]
    fn test_whitespace_and_letters() {
        assert_eq!(tree("  a\n\t b  "), "CONCAT(a,b)");
        assert_eq!(tree("x_1"), "CONCAT(CONCAT(x,_),1)");
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(parse(""), Err(SyntaxError::UnexpectedEnd));
        assert_eq!(parse("   "), Err(SyntaxError::UnexpectedEnd));
        assert_eq!(parse("a +"), Err(SyntaxError::UnexpectedEnd));
        assert_eq!(
            parse("a $"),
            Err(SyntaxError::UnexpectedCharacter {
                position: 2,
                found: '$'
            })
        );
        assert_eq!(
            parse("a)"),
            Err(SyntaxError::UnexpectedToken {
                position: 1,
                found: ')'
            })
        );
        assert_eq!(
            parse("()"),
            Err(SyntaxError::UnexpectedToken {
                position: 1,
                found: ')'
            })
        );
        assert_eq!(
            parse("*a"),
            Err(SyntaxError::UnexpectedToken {
                position: 0,
                found: '*'
            })
        );
        assert_eq!(
            parse("(a + b"),
            Err(SyntaxError::UnclosedParenthesis { position: 0 })
        );
    }
}
