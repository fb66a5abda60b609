//  LEXER.rs
//    by Lut99
//
//  Created:
//    12 Jun 2025, 09:48:31
//  Last edited:
//    17 Jun 2025, 17:10:26
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements a [`LexicalAnalyzer`] that turns SIMPLE source text into
//!   a string of single-character token tags, like `v` for a variable or
//!   `w` for the `while`-keyword.
//!
//!   These tags are what the [pushdown parser](super::parser::Parser)
//!   reads.
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use regex::Regex;

use crate::log::trace;


/***** ERRORS *****/
/// Defines errors that occur when tokenizing.
#[derive(Debug)]
pub enum Error {
    /// A grammar rule's pattern is not a valid regular expression.
    IllegalPattern { token: char, pattern: String, err: regex::Error },
    /// None of the grammar's rules matched at some point in the input.
    TokenizeFailure { position: usize, found: char },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        use Error::*;
        match self {
            IllegalPattern { token, pattern, .. } => write!(f, "Pattern {pattern:?} for token '{token}' is not a valid regular expression"),
            TokenizeFailure { position, found } => write!(f, "No token matches input '{found}' at position {position}"),
        }
    }
}
impl error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::IllegalPattern { err, .. } => Some(err),
            Self::TokenizeFailure { .. } => None,
        }
    }
}





/***** LIBRARY FUNCTIONS *****/
/// Tokenizes SIMPLE source text.
///
/// Shorthand for [`LexicalAnalyzer::simple()`] followed by [`LexicalAnalyzer::analyze()`].
///
/// # Arguments
/// - `source`: The text to tokenize.
///
/// # Returns
/// The tags of the tokens found, in order.
///
/// # Errors
/// This function errors if some part of `source` is not a SIMPLE token.
#[inline]
pub fn tokenize(source: &str) -> Result<Vec<char>, Error> { LexicalAnalyzer::simple().analyze(source) }





/***** AUXILLARY *****/
/// Pairs a token tag with the pattern of text it stands for.
#[derive(Clone, Debug)]
pub struct GrammarRule {
    /// The tag emitted when this rule matches.
    token:   char,
    /// The pattern, anchored to the start of the input.
    pattern: Regex,
}
impl GrammarRule {
    /// Constructor for the GrammarRule.
    ///
    /// # Arguments
    /// - `token`: The tag to emit when this rule matches.
    /// - `pattern`: A regular expression (in [`regex`]-syntax) that matches the text of the
    ///   token. It is only ever matched at the start of the remaining input.
    ///
    /// # Returns
    /// A new GrammarRule.
    ///
    /// # Errors
    /// This function errors if `pattern` is not a valid regular expression.
    pub fn new(token: char, pattern: &str) -> Result<Self, Error> {
        match Regex::new(&format!(r"\A(?:{pattern})")) {
            Ok(pattern) => Ok(Self { token, pattern }),
            Err(err) => Err(Error::IllegalPattern { token, pattern: pattern.into(), err }),
        }
    }

    /// Returns the tag emitted by this rule.
    #[inline]
    pub const fn token(&self) -> char { self.token }

    /// Matches this rule at the start of the given text.
    ///
    /// # Returns
    /// The length (in bytes) of the match, or [`None`] if the rule doesn't match. Empty matches
    /// count as not matching, as they would make no progress.
    #[inline]
    pub fn match_start(&self, text: &str) -> Option<usize> { self.pattern.find(text).map(|m| m.end()).filter(|len| *len > 0) }
}



/// An ordered list of [`GrammarRule`]s.
///
/// Earlier rules win when two rules match equally long text.
#[derive(Clone, Debug)]
pub struct Grammar {
    /// The rules, in order of priority.
    rules: Vec<GrammarRule>,
}
impl Grammar {
    /// Constructor for the Grammar.
    ///
    /// # Arguments
    /// - `rules`: The [`GrammarRule`]s, in order of priority.
    ///
    /// # Returns
    /// A new Grammar.
    #[inline]
    pub fn new(rules: impl IntoIterator<Item = GrammarRule>) -> Self { Self { rules: rules.into_iter().collect() } }

    /// Constructor for the Grammar that compiles its rules from (token, pattern)-pairs.
    ///
    /// # Errors
    /// This function errors if any of the patterns is not a valid regular expression.
    pub fn from_patterns<'p>(patterns: impl IntoIterator<Item = (char, &'p str)>) -> Result<Self, Error> {
        patterns.into_iter().map(|(token, pattern)| GrammarRule::new(token, pattern)).collect::<Result<Vec<_>, _>>().map(|rules| Self { rules })
    }

    /// Constructor for the Grammar that tokenizes SIMPLE.
    ///
    /// Keywords and symbols get their own tag, and then:
    /// - `n` for numbers;
    /// - `b` for `true` and `false`; and
    /// - `v` for variable names.
    ///
    /// # Returns
    /// A new Grammar.
    ///
    /// # Panics
    /// This function panics if one of its built-in patterns fails to compile, which is a bug.
    pub fn simple() -> Self {
        match Self::from_patterns([
            ('i', "if"),
            ('e', "else"),
            ('w', "while"),
            ('d', "do-nothing"),
            ('(', r"\("),
            (')', r"\)"),
            ('{', r"\{"),
            ('}', r"\}"),
            (';', ";"),
            ('=', "="),
            ('+', r"\+"),
            ('*', r"\*"),
            ('<', "<"),
            ('n', "[0-9]+"),
            ('b', "true|false"),
            ('v', "[a-z]+"),
        ]) {
            Ok(grammar) => grammar,
            Err(err) => panic!("Built-in SIMPLE grammar is invalid: {err}"),
        }
    }

    /// Returns the rules in this grammar, in order of priority.
    #[inline]
    pub fn rules(&self) -> &[GrammarRule] { &self.rules }

    /// Finds the rule with the longest match at the start of the given text.
    ///
    /// # Returns
    /// The matching rule and the length of its match, or [`None`] if no rule matches.
    pub fn longest_match(&self, text: &str) -> Option<(&GrammarRule, usize)> {
        let mut best: Option<(&GrammarRule, usize)> = None;
        for rule in &self.rules {
            if let Some(len) = rule.match_start(text) {
                // Strictly longer, so ties go to the earliest rule
                if best.map(|(_, blen)| len > blen).unwrap_or(true) {
                    best = Some((rule, len));
                }
            }
        }
        best
    }
}





/***** LIBRARY *****/
/// Tokenizes text according to a [`Grammar`].
#[derive(Clone, Debug)]
pub struct LexicalAnalyzer {
    /// The grammar that decides what the tokens are.
    grammar: Grammar,
}
impl LexicalAnalyzer {
    /// Constructor for the LexicalAnalyzer.
    #[inline]
    pub const fn new(grammar: Grammar) -> Self { Self { grammar } }

    /// Constructor for a LexicalAnalyzer that tokenizes SIMPLE.
    ///
    /// See [`Grammar::simple()`].
    #[inline]
    pub fn simple() -> Self { Self::new(Grammar::simple()) }

    /// Returns the grammar this analyzer tokenizes with.
    #[inline]
    pub const fn grammar(&self) -> &Grammar { &self.grammar }

    /// Tokenizes the given text.
    ///
    /// At every point, the rule with the longest match decides the token. Whitespace in between
    /// tokens is skipped.
    ///
    /// # Arguments
    /// - `source`: The text to tokenize.
    ///
    /// # Returns
    /// The tags of the tokens found, in order.
    ///
    /// # Errors
    /// This function errors if, at some point, none of the grammar's rules match.
    pub fn analyze(&self, source: &str) -> Result<Vec<char>, Error> {
        let mut tokens: Vec<char> = Vec::new();
        let mut rest: &str = source.trim_start();
        while !rest.is_empty() {
            let position: usize = source.len() - rest.len();
            match self.grammar.longest_match(rest) {
                Some((rule, len)) => {
                    trace!("Token '{}' at {position}: {:?}", rule.token(), &rest[..len]);
                    tokens.push(rule.token());
                    rest = rest[len..].trim_start();
                },
                None => {
                    // `rest` is non-empty
                    let found: char = rest.chars().next().unwrap_or_default();
                    return Err(Error::TokenizeFailure { position, found });
                },
            }
        }
        Ok(tokens)
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    fn analyze(source: &str) -> String {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        match LexicalAnalyzer::simple().analyze(source) {
            Ok(tokens) => tokens.into_iter().collect(),
            Err(err) => panic!("Failed to tokenize {source:?}: {err}"),
        }
    }


    #[test]
    fn test_lexer_analyze() {
        assert_eq!(analyze("y = x * 7"), "v=v*n");
        assert_eq!(analyze("while (x < 5) { x = x * 3 }"), "w(v<n){v=v*n}");
        assert_eq!(analyze("if (x < 10) { y = true; x = 0 } else { do-nothing }"), "i(v<n){v=b;v=n}e{d}");
        assert_eq!(analyze("  \n"), "");
    }

    #[test]
    fn test_lexer_longest_match() {
        // Equally long, so the earlier rule wins
        assert_eq!(analyze("x = false"), "v=b");
        // `v` matches more than `b`
        assert_eq!(analyze("x = falsehood"), "v=v");
        assert_eq!(analyze("iffy"), "v");
    }

    #[test]
    fn test_lexer_errors() {
        assert!(matches!(LexicalAnalyzer::simple().analyze("x = 5 - 3"), Err(Error::TokenizeFailure { position: 6, found: '-' })));
        assert!(matches!(tokenize("X"), Err(Error::TokenizeFailure { position: 0, found: 'X' })));
        assert!(matches!(GrammarRule::new('x', "(unclosed"), Err(Error::IllegalPattern { token: 'x', .. })));
    }

    #[test]
    fn test_lexer_empty_matches() {
        let lexer = LexicalAnalyzer::new(Grammar::from_patterns([('a', "a*"), ('b', "b")]).unwrap());
        assert_eq!(lexer.analyze("aab b").unwrap(), vec!['a', 'b', 'b']);
        assert!(matches!(lexer.analyze("c"), Err(Error::TokenizeFailure { position: 0, found: 'c' })));
    }
}
