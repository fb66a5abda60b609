//  MOD.rs
//    by Lut99
//
//  Created:
//    04 Jun 2025, 10:02:57
//  Last edited:
//    17 Jun 2025, 15:12:20
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements (a very small) regular expression language that compiles
//!   to [NFA](crate::fa::NFADesign)s.
//!
//!   A [`Pattern`] is built from five operators: the empty pattern,
//!   single-character literals, concatenation, choice and repetition
//!   (Kleene star). Compilation follows the classic Thompson
//!   construction, where every operator glues the NFAs of its
//!   sub-patterns together with free moves.
//!
//!   # Syntax
//!   Patterns render as (and [parse](std::str::FromStr) from) the usual textual notation:
//!   ```plain
//!   (a(|b))*
//!   ```
//!   where `|` binds weakest, then juxtaposition, then `*`. Any of `|*()\` can be used as a
//!   literal by prefixing it with a backslash.
//

// Nested modules
mod parser;

// Imports
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FResult};

use enum_debug::EnumDebug;
pub use parser::ParseError;

use crate::fa::{DFADesign, FARule, NFADesign, NFARulebook, NFASimulation};
use crate::log::debug;


/***** AUXILLARY *****/
/// Identifies a state generated while compiling a [`Pattern`].
///
/// IDs are handed out by a [`StateAllocator`], which guarantees every ID is new.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StateId(usize);
impl StateId {
    /// Returns the numeric ID of this state.
    #[inline]
    pub fn id(&self) -> usize { self.0 }
}
impl Display for StateId {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "q{}", self.0) }
}

/// Hands out fresh [`StateId`]s.
///
/// Scoped to a single compilation; two allocators will happily produce the same IDs.
#[derive(Clone, Debug, Default)]
pub struct StateAllocator {
    /// The next ID to hand out.
    next: usize,
}
impl StateAllocator {
    /// Creates a new allocator that starts counting at zero.
    #[inline]
    pub const fn new() -> Self { Self { next: 0 } }

    /// Returns a [`StateId`] that this allocator never returned before.
    #[inline]
    pub fn allocate(&mut self) -> StateId {
        let id = StateId(self.next);
        self.next += 1;
        id
    }

    /// Returns the number of states allocated so far.
    #[inline]
    pub fn len(&self) -> usize { self.next }

    /// Returns whether nothing was allocated yet.
    #[inline]
    pub fn is_empty(&self) -> bool { self.next == 0 }
}





/***** LIBRARY *****/
/// A regular expression.
#[derive(Clone, Debug, EnumDebug, Eq, Hash, PartialEq)]
pub enum Pattern {
    /// Matches only the empty string.
    Empty,
    /// Matches exactly one character.
    Literal(char),
    /// Matches the first pattern followed by the second.
    Concatenate(Box<Pattern>, Box<Pattern>),
    /// Matches either of the patterns.
    Choose(Box<Pattern>, Box<Pattern>),
    /// Matches the pattern zero or more times.
    Repeat(Box<Pattern>),
}

// Constructors
impl Pattern {
    /// Creates a [`Pattern::Empty`].
    #[inline]
    pub const fn empty() -> Self { Self::Empty }

    /// Creates a [`Pattern::Literal`].
    #[inline]
    pub const fn literal(character: char) -> Self { Self::Literal(character) }

    /// Creates a [`Pattern::Concatenate`].
    #[inline]
    pub fn concatenate(first: Self, second: Self) -> Self { Self::Concatenate(Box::new(first), Box::new(second)) }

    /// Creates a [`Pattern::Choose`].
    #[inline]
    pub fn choose(first: Self, second: Self) -> Self { Self::Choose(Box::new(first), Box::new(second)) }

    /// Creates a [`Pattern::Repeat`].
    #[inline]
    pub fn repeat(pattern: Self) -> Self { Self::Repeat(Box::new(pattern)) }
}

// Compilation
impl Pattern {
    /// Compiles this pattern to an [`NFADesign`] with its own fresh states.
    ///
    /// # Returns
    /// An NFADesign that accepts exactly the strings this pattern matches.
    pub fn to_nfa_design(&self) -> NFADesign<StateId, char> {
        let mut alloc = StateAllocator::new();
        let design = self.compile(&mut alloc);
        debug!("Compiled pattern '{self}' to NFA with {} states", alloc.len());
        design
    }

    /// Compiles this pattern to an [`NFADesign`], taking states from the given allocator.
    ///
    /// Every call allocates new states, so designs compiled with the same allocator never share
    /// any.
    ///
    /// # Arguments
    /// - `alloc`: The [`StateAllocator`] to get states from.
    ///
    /// # Returns
    /// An NFADesign that accepts exactly the strings this pattern matches.
    pub fn compile(&self, alloc: &mut StateAllocator) -> NFADesign<StateId, char> {
        match self {
            Self::Empty => {
                let start = alloc.allocate();
                NFADesign::new(start, [start], NFARulebook::new([]))
            },

            Self::Literal(c) => {
                let start = alloc.allocate();
                let accept = alloc.allocate();
                NFADesign::new(start, [accept], NFARulebook::new([FARule::new(start, *c, accept)]))
            },

            Self::Concatenate(first, second) => {
                let (fstart, faccept, frules) = first.compile(alloc).into_parts();
                let (sstart, saccept, srules) = second.compile(alloc).into_parts();

                // Accepting the first means we may start on the second
                let mut rules: Vec<FARule<StateId, char>> = frules.into_rules();
                rules.extend(srules.into_rules());
                rules.extend(faccept.into_iter().map(|state| FARule::free(state, sstart)));
                NFADesign::new(fstart, saccept, NFARulebook::new(rules))
            },

            Self::Choose(first, second) => {
                let start = alloc.allocate();
                let (fstart, faccept, frules) = first.compile(alloc).into_parts();
                let (sstart, saccept, srules) = second.compile(alloc).into_parts();

                let mut rules: Vec<FARule<StateId, char>> = frules.into_rules();
                rules.extend(srules.into_rules());
                rules.push(FARule::free(start, fstart));
                rules.push(FARule::free(start, sstart));
                NFADesign::new(start, faccept.into_iter().chain(saccept), NFARulebook::new(rules))
            },

            Self::Repeat(pattern) => {
                let start = alloc.allocate();
                let (pstart, paccept, prules) = pattern.compile(alloc).into_parts();

                // The new start accepts the empty string; every accept state may go around again
                let mut rules: Vec<FARule<StateId, char>> = prules.into_rules();
                rules.extend(paccept.iter().map(|state| FARule::free(*state, pstart)));
                rules.push(FARule::free(start, pstart));
                NFADesign::new(start, paccept.into_iter().chain([start]), NFARulebook::new(rules))
            },
        }
    }

    /// Compiles this pattern to a [`DFADesign`].
    ///
    /// This first compiles it to an NFA, and then runs the [subset construction](NFASimulation)
    /// on that.
    ///
    /// # Returns
    /// A DFADesign that accepts exactly the strings this pattern matches. Its rulebook is total
    /// over the characters used in the pattern.
    pub fn to_dfa_design(&self) -> DFADesign<BTreeSet<StateId>, char> {
        let nfa_design = self.to_nfa_design();
        NFASimulation::new(&nfa_design).to_dfa_design()
    }

    /// Checks whether this pattern matches the given string as a whole.
    ///
    /// # Arguments
    /// - `input`: The string to match.
    ///
    /// # Returns
    /// True if it matches, false otherwise.
    #[inline]
    pub fn matches(&self, input: &str) -> bool { self.to_nfa_design().accepts(input.chars()) }
}

// Rendering
impl Pattern {
    /// Returns how tightly this pattern binds when rendered.
    ///
    /// Higher binds tighter.
    #[inline]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Empty | Self::Literal(_) => 3,
            Self::Repeat(_) => 2,
            Self::Concatenate(_, _) => 1,
            Self::Choose(_, _) => 0,
        }
    }

    /// Renders this pattern, with parenthesis if it binds less tightly than its parent.
    ///
    /// # Arguments
    /// - `f`: The [`Formatter`] to write to.
    /// - `outer`: The [precedence](Pattern::precedence()) of the parent pattern.
    fn fmt_bracketed(&self, f: &mut Formatter<'_>, outer: u8) -> FResult {
        if self.precedence() < outer { write!(f, "({self})") } else { write!(f, "{self}") }
    }
}
impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Empty => Ok(()),
            Self::Literal(c) => {
                if parser::is_special(*c) {
                    write!(f, "\\")?;
                }
                write!(f, "{c}")
            },
            Self::Concatenate(first, second) => {
                first.fmt_bracketed(f, self.precedence())?;
                second.fmt_bracketed(f, self.precedence())
            },
            Self::Choose(first, second) => {
                first.fmt_bracketed(f, self.precedence())?;
                write!(f, "|")?;
                second.fmt_bracketed(f, self.precedence())
            },
            Self::Repeat(pattern) => {
                pattern.fmt_bracketed(f, self.precedence())?;
                write!(f, "*")
            },
        }
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    /// `(a(|b))*`
    fn pattern() -> Pattern {
        Pattern::repeat(Pattern::concatenate(Pattern::literal('a'), Pattern::choose(Pattern::empty(), Pattern::literal('b'))))
    }


    #[test]
    fn test_pattern_render() {
        assert_eq!(pattern().to_string(), "(a(|b))*");
        assert_eq!(Pattern::repeat(Pattern::choose(Pattern::concatenate(Pattern::literal('a'), Pattern::literal('b')), Pattern::literal('a'))).to_string(), "(ab|a)*");
        assert_eq!(Pattern::concatenate(Pattern::repeat(Pattern::literal('a')), Pattern::literal('b')).to_string(), "a*b");
        assert_eq!(Pattern::concatenate(Pattern::literal('a'), Pattern::concatenate(Pattern::literal('b'), Pattern::literal('c'))).to_string(), "abc");
        assert_eq!(Pattern::repeat(Pattern::repeat(Pattern::literal('a'))).to_string(), "a**");
        assert_eq!(Pattern::concatenate(Pattern::literal('*'), Pattern::literal('(')).to_string(), "\\*\\(");
        assert_eq!(Pattern::empty().to_string(), "");
    }

    #[test]
    fn test_pattern_precedence() {
        assert_eq!(Pattern::empty().precedence(), 3);
        assert_eq!(Pattern::literal('a').precedence(), 3);
        assert_eq!(pattern().precedence(), 2);
        assert_eq!(Pattern::concatenate(Pattern::empty(), Pattern::empty()).precedence(), 1);
        assert_eq!(Pattern::choose(Pattern::empty(), Pattern::empty()).precedence(), 0);
    }

    #[test]
    fn test_pattern_compile_basics() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let empty = Pattern::empty();
        assert!(empty.matches(""));
        assert!(!empty.matches("a"));

        let literal = Pattern::literal('a');
        assert!(!literal.matches(""));
        assert!(literal.matches("a"));
        assert!(!literal.matches("b"));
        assert!(!literal.matches("aa"));

        let concatenate = Pattern::concatenate(Pattern::literal('a'), Pattern::concatenate(Pattern::literal('b'), Pattern::literal('c')));
        assert!(!concatenate.matches("a"));
        assert!(!concatenate.matches("ab"));
        assert!(concatenate.matches("abc"));

        let choose = Pattern::choose(Pattern::literal('a'), Pattern::literal('b'));
        assert!(choose.matches("a"));
        assert!(choose.matches("b"));
        assert!(!choose.matches("c"));

        let repeat = Pattern::repeat(Pattern::literal('a'));
        assert!(repeat.matches(""));
        assert!(repeat.matches("a"));
        assert!(repeat.matches("aaaa"));
        assert!(!repeat.matches("b"));
    }

    #[test]
    fn test_pattern_matches() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let pattern = pattern();
        // The repeat's own start state accepts, so the empty string matches
        assert!(pattern.matches(""));
        for input in ["a", "aa", "ab", "aba", "abab", "abaab"] {
            assert!(pattern.matches(input), "Expected '{pattern}' to match {input:?}");
        }
        for input in ["abba", "b", "ba", "abb"] {
            assert!(!pattern.matches(input), "Expected '{pattern}' to not match {input:?}");
        }
    }

    #[test]
    fn test_pattern_fresh_states() {
        // The same literal twice must not share states
        let pattern = Pattern::concatenate(Pattern::literal('a'), Pattern::literal('a'));
        let design = pattern.to_nfa_design();
        let states: BTreeSet<StateId> = design.rulebook().rules().iter().flat_map(|rule| [rule.state, rule.next_state]).collect();
        assert_eq!(states.len(), 4);
        assert!(!pattern.matches("a"));
        assert!(pattern.matches("aa"));

        let mut alloc = StateAllocator::new();
        let lhs = Pattern::literal('a').compile(&mut alloc);
        let rhs = Pattern::literal('a').compile(&mut alloc);
        assert_ne!(lhs.start_state(), rhs.start_state());
        assert!(lhs.accept_states().is_disjoint(rhs.accept_states()));
        assert_eq!(alloc.len(), 4);
    }

    #[test]
    fn test_pattern_to_dfa_design() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let pattern = pattern();
        let design = pattern.to_dfa_design();
        assert_eq!(design.rulebook().check_deterministic(), Ok(()));
        for input in ["", "a", "aa", "ab", "aba", "abab", "abaab", "abba", "b", "bbbb", "abbb"] {
            assert_eq!(design.accepts(input.chars()), Ok(pattern.matches(input)), "Disagreement on {input:?}");
        }
    }
}
