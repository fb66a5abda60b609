//  PARSER.rs
//    by Lut99
//
//  Created:
//    04 Jun 2025, 14:40:08
//  Last edited:
//    17 Jun 2025, 15:20:51
//  Auto updated?
//    Yes
//
//  Description:
//!   Parses [`Pattern`]s from their textual notation.
//!
//!   The grammar, from weakest to tightest binding:
//!   ```plain
//!   choose      ::= concatenate ( '|' choose )?
//!   concatenate ::= repeat*
//!   repeat      ::= atom '*'*
//!   atom        ::= '(' choose ')' | '\' CHAR | CHAR
//!   ```
//!   An empty `concatenate` is the [empty pattern](Pattern::Empty).
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use super::Pattern;


/***** ERRORS *****/
/// Defines errors that occur when parsing [`Pattern`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// A backslash was the last character of the input.
    DanglingEscape { pos: usize },
    /// A parenthesis was opened but never closed.
    UnclosedParenthesis { pos: usize },
    /// Found a character that cannot appear where it did.
    UnexpectedCharacter { pos: usize, c: char },
}
impl Display for ParseError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        use ParseError::*;
        match self {
            DanglingEscape { pos } => write!(f, "Expected a character to escape after '\\' at position {pos}"),
            UnclosedParenthesis { pos } => write!(f, "Parenthesis opened at position {pos} is never closed"),
            UnexpectedCharacter { pos, c } => write!(f, "Unexpected character '{c}' at position {pos}"),
        }
    }
}
impl error::Error for ParseError {}





/***** HELPER FUNCTIONS *****/
/// Returns whether a character has a meaning in patterns, and must be escaped to use it as a
/// literal.
#[inline]
pub(super) const fn is_special(c: char) -> bool { matches!(c, '|' | '*' | '(' | ')' | '\\') }





/***** HELPERS *****/
/// Recursive descent over the characters of a pattern.
struct Parser<'s> {
    /// The characters still to parse, with their byte positions.
    chars: Peekable<CharIndices<'s>>,
}
impl<'s> Parser<'s> {
    /// Parses a `choose`.
    fn choose(&mut self) -> Result<Pattern, ParseError> {
        let first: Pattern = self.concatenate()?;
        if matches!(self.chars.peek(), Some((_, '|'))) {
            self.chars.next();
            let second: Pattern = self.choose()?;
            Ok(Pattern::choose(first, second))
        } else {
            Ok(first)
        }
    }

    /// Parses a `concatenate`.
    ///
    /// Concatenation nests to the right, i.e., `abc` becomes `a(bc)`.
    fn concatenate(&mut self) -> Result<Pattern, ParseError> {
        let mut parts: Vec<Pattern> = Vec::new();
        while let Some((_, c)) = self.chars.peek() {
            if *c == '|' || *c == ')' {
                break;
            }
            parts.push(self.repeat()?);
        }
        Ok(match parts.pop() {
            Some(last) => parts.into_iter().rev().fold(last, |rest, part| Pattern::concatenate(part, rest)),
            None => Pattern::Empty,
        })
    }

    /// Parses a `repeat`.
    fn repeat(&mut self) -> Result<Pattern, ParseError> {
        let mut pattern: Pattern = self.atom()?;
        while matches!(self.chars.peek(), Some((_, '*'))) {
            self.chars.next();
            pattern = Pattern::repeat(pattern);
        }
        Ok(pattern)
    }

    /// Parses an `atom`.
    ///
    /// Only called when there's a character left that isn't `|` or `)`.
    fn atom(&mut self) -> Result<Pattern, ParseError> {
        match self.chars.next() {
            Some((pos, '(')) => {
                let inner: Pattern = self.choose()?;
                match self.chars.next() {
                    Some((_, ')')) => Ok(inner),
                    Some((pos, c)) => Err(ParseError::UnexpectedCharacter { pos, c }),
                    None => Err(ParseError::UnclosedParenthesis { pos }),
                }
            },
            Some((pos, '\\')) => match self.chars.next() {
                Some((_, c)) => Ok(Pattern::Literal(c)),
                None => Err(ParseError::DanglingEscape { pos }),
            },
            // Nothing to repeat
            Some((pos, c)) if is_special(c) => Err(ParseError::UnexpectedCharacter { pos, c }),
            Some((_, c)) => Ok(Pattern::Literal(c)),
            None => Ok(Pattern::Empty),
        }
    }
}





/***** LIBRARY *****/
impl FromStr for Pattern {
    type Err = ParseError;

    /// Parses a pattern from its textual notation.
    ///
    /// Rendering a pattern and parsing it back gives a pattern that matches the same strings, as
    /// long as no [`Pattern::Empty`] is the direct child of a [`Pattern::Repeat`] or a
    /// [`Pattern::Concatenate`]. Those render to nothing at all (`*`, or `a*` for `a(ε)*`), so
    /// write them as `()` instead. Patterns whose concatenations and choices nest to the right
    /// come back exactly the same.
    ///
    /// # Errors
    /// This function errors if the input has unbalanced parenthesis, a dangling escape or a `*`
    /// with nothing to repeat.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { chars: s.char_indices().peekable() };
        let pattern: Pattern = parser.choose()?;
        match parser.chars.next() {
            // Only an unmatched `)` stops the top-level choose early
            Some((pos, c)) => Err(ParseError::UnexpectedCharacter { pos, c }),
            None => Ok(pattern),
        }
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_parse_pattern() {
        assert_eq!("".parse(), Ok(Pattern::empty()));
        assert_eq!("a".parse(), Ok(Pattern::literal('a')));
        assert_eq!("a*".parse(), Ok(Pattern::repeat(Pattern::literal('a'))));
        assert_eq!("ab*".parse(), Ok(Pattern::concatenate(Pattern::literal('a'), Pattern::repeat(Pattern::literal('b')))));
        assert_eq!(
            "a|b|c".parse(),
            Ok(Pattern::choose(Pattern::literal('a'), Pattern::choose(Pattern::literal('b'), Pattern::literal('c'))))
        );
        assert_eq!(
            "(a(|b))*".parse(),
            Ok(Pattern::repeat(Pattern::concatenate(Pattern::literal('a'), Pattern::choose(Pattern::empty(), Pattern::literal('b')))))
        );
        assert_eq!("\\**".parse(), Ok(Pattern::repeat(Pattern::literal('*'))));
    }

    #[test]
    fn test_parse_pattern_roundtrip() {
        for source in ["(a(|b))*", "(ab|a)*", "a*b", "abc|", "(a|b)(c|d)*", "\\(\\)", "a**"] {
            let pattern: Pattern = match source.parse() {
                Ok(pattern) => pattern,
                Err(err) => panic!("Failed to parse {source:?}: {err}"),
            };
            assert_eq!(pattern.to_string(), source);
        }
    }

    #[test]
    fn test_parse_pattern_errors() {
        assert_eq!("(ab".parse::<Pattern>(), Err(ParseError::UnclosedParenthesis { pos: 0 }));
        assert_eq!("ab)".parse::<Pattern>(), Err(ParseError::UnexpectedCharacter { pos: 2, c: ')' }));
        assert_eq!("*a".parse::<Pattern>(), Err(ParseError::UnexpectedCharacter { pos: 0, c: '*' }));
        assert_eq!("a|*".parse::<Pattern>(), Err(ParseError::UnexpectedCharacter { pos: 2, c: '*' }));
        assert_eq!("a\\".parse::<Pattern>(), Err(ParseError::DanglingEscape { pos: 1 }));
    }

    #[test]
    fn test_parse_pattern_empty_operands() {
        // An empty pattern renders to nothing, so there is nothing left to repeat
        let repeat_empty: Pattern = Pattern::repeat(Pattern::empty());
        assert_eq!(repeat_empty.to_string(), "*");
        assert_eq!("*".parse::<Pattern>(), Err(ParseError::UnexpectedCharacter { pos: 0, c: '*' }));
        assert_eq!("()*".parse(), Ok(repeat_empty));

        // ...and the star sticks to whatever comes before instead
        let a_repeat_empty: Pattern = Pattern::concatenate(Pattern::literal('a'), Pattern::repeat(Pattern::empty()));
        assert_eq!(a_repeat_empty.to_string(), "a*");
        assert_eq!("a*".parse(), Ok(Pattern::repeat(Pattern::literal('a'))));
        assert_eq!("a()*".parse(), Ok(a_repeat_empty.clone()));
        assert!(a_repeat_empty.matches("a"));
        assert!(!a_repeat_empty.matches("aa"));
    }

    #[test]
    fn test_parse_pattern_matches() {
        let pattern: Pattern = match "(a|b)*abb".parse() {
            Ok(pattern) => pattern,
            Err(err) => panic!("Failed to parse: {err}"),
        };
        assert!(pattern.matches("abb"));
        assert!(pattern.matches("babaabb"));
        assert!(!pattern.matches("abba"));
    }
}
