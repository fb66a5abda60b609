//  PARSER.rs
//    by Lut99
//
//  Created:
//    12 Jun 2025, 13:55:04
//  Last edited:
//    17 Jun 2025, 17:31:48
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements a [`Parser`] that checks whether a string of tokens is
//!   valid SIMPLE syntax by running it through a
//!   [nondeterministic pushdown automaton](NPDADesign).
//!
//!   The automaton is built from a context-free grammar:
//!   1. It starts by pushing the grammar's start symbol;
//!   2. It then freely replaces a nonterminal on top of its stack by the
//!      body of any of its productions, and pops a token from the stack
//!      whenever it reads that same token; until
//!   3. Only the bottom of the stack remains, at which point it accepts.
//!
//!   It only checks the syntax; it does not build a tree.
//

use super::lexer::{self, LexicalAnalyzer};
use crate::pda::{NPDADesign, NPDARulebook, PDARule};


/***** CONSTANTS *****/
/// The state in which the automaton hasn't done anything yet.
const START_STATE: u32 = 1;
/// The state in which the automaton expands and reads.
const PARSE_STATE: u32 = 2;
/// The state in which the automaton accepts.
const ACCEPT_STATE: u32 = 3;

/// The character at the bottom of the stack. Grammars cannot use it as a symbol.
pub const BOTTOM: char = '$';

/// The productions of SIMPLE's grammar.
///
/// Nonterminals are uppercase, tokens are the tags emitted by [`Grammar::simple()`](lexer::Grammar::simple()):
/// ```plain
/// S ::= P ';' S | P                                    (statements)
/// P ::= W | I | A | D                                  (a single statement)
/// W ::= 'w' '(' E ')' '{' S '}'                         (while)
/// I ::= 'i' '(' E ')' '{' S '}' 'e' '{' S '}'           (if-else)
/// A ::= 'v' '=' E                                      (assignment)
/// D ::= 'd'                                            (do-nothing)
/// E ::= L                                              (expression)
/// L ::= Q '<' L | Q                                    (less-than)
/// Q ::= M '+' Q | M                                    (add)
/// M ::= T '*' M | T                                    (multiply)
/// T ::= 'n' | 'v' | 'b' | '(' E ')'                    (term)
/// ```
pub const SIMPLE_PRODUCTIONS: [(char, &str); 21] = [
    ('S', "P;S"),
    ('S', "P"),
    ('P', "W"),
    ('P', "I"),
    ('P', "A"),
    ('P', "D"),
    ('W', "w(E){S}"),
    ('I', "i(E){S}e{S}"),
    ('A', "v=E"),
    ('D', "d"),
    ('E', "L"),
    ('L', "Q<L"),
    ('L', "Q"),
    ('Q', "M+Q"),
    ('Q', "M"),
    ('M', "T*M"),
    ('M', "T"),
    ('T', "n"),
    ('T', "v"),
    ('T', "b"),
    ('T', "(E)"),
];





/***** LIBRARY *****/
/// Checks token strings against a context-free grammar.
#[derive(Clone, Debug)]
pub struct Parser {
    /// The automaton that recognizes the grammar.
    design: NPDADesign<u32, char>,
}
impl Parser {
    /// Constructor for the Parser.
    ///
    /// # Arguments
    /// - `start`: The nonterminal that every valid token string derives from.
    /// - `productions`: Pairs of a nonterminal and a string of symbols that it may be replaced
    ///   with. Any symbol that has no productions is a token.
    /// - `tokens`: The tokens that the parser may read.
    ///
    /// # Returns
    /// A new Parser.
    ///
    /// Note that grammars with left recursion (e.g., `L ::= L '<' Q`) make the parser loop
    /// forever.
    pub fn new<'p>(start: char, productions: impl IntoIterator<Item = (char, &'p str)>, tokens: impl IntoIterator<Item = char>) -> Self {
        let start_rule = PDARule::free(START_STATE, PARSE_STATE, BOTTOM, [start, BOTTOM]);
        let symbol_rules =
            productions.into_iter().map(|(head, body)| PDARule::free(PARSE_STATE, PARSE_STATE, head, body.chars()));
        let token_rules = tokens.into_iter().map(|token: char| PDARule::new(PARSE_STATE, token, PARSE_STATE, token, []));
        let stop_rule = PDARule::free(PARSE_STATE, ACCEPT_STATE, BOTTOM, [BOTTOM]);

        let rulebook: NPDARulebook<u32, char> =
            NPDARulebook::new(std::iter::once(start_rule).chain(symbol_rules).chain(token_rules).chain(std::iter::once(stop_rule)));
        Self { design: NPDADesign::new(START_STATE, BOTTOM, [ACCEPT_STATE], rulebook) }
    }

    /// Constructor for a Parser that checks SIMPLE programs.
    ///
    /// See [`SIMPLE_PRODUCTIONS`] for the grammar, and [`Grammar::simple()`](lexer::Grammar::simple())
    /// for the tokens.
    #[inline]
    pub fn simple() -> Self {
        let tokens: Vec<char> = lexer::Grammar::simple().rules().iter().map(lexer::GrammarRule::token).collect();
        Self::new('S', SIMPLE_PRODUCTIONS, tokens)
    }

    /// Returns the automaton that does the parsing.
    #[inline]
    pub const fn design(&self) -> &NPDADesign<u32, char> { &self.design }



    /// Checks whether the given tokens form a valid program.
    ///
    /// # Arguments
    /// - `tokens`: The tags of the tokens to check, as given by a [`LexicalAnalyzer`].
    ///
    /// # Returns
    /// True if the tokens can be derived from the grammar's start symbol, or false otherwise.
    #[inline]
    pub fn accepts(&self, tokens: impl IntoIterator<Item = char>) -> bool { self.design.accepts(tokens) }

    /// Tokenizes source text and checks whether the result forms a valid program.
    ///
    /// # Arguments
    /// - `lexer`: The [`LexicalAnalyzer`] that tokenizes the `source`.
    /// - `source`: The text to check.
    ///
    /// # Returns
    /// True if the `source` is valid, or false otherwise.
    ///
    /// # Errors
    /// This function errors if the `source` could not be tokenized.
    #[inline]
    pub fn accepts_source(&self, lexer: &LexicalAnalyzer, source: &str) -> Result<bool, lexer::Error> {
        let tokens: Vec<char> = lexer.analyze(source)?;
        Ok(self.accepts(tokens))
    }
}





/***** TESTS *****/
