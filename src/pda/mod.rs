//  MOD.rs
//    by Lut99
//
//  Created:
//    05 Jun 2025, 10:20:44
//  Last edited:
//    17 Jun 2025, 13:58:10
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements pushdown automata, i.e., finite automata with a stack.
//!
//!   Rules only fire if the character they expect to pop is on top of
//!   the stack. They then replace it with zero or more new characters.
//!
//!   Two flavours exist. The [`DPDA`] follows at most one rule and gets
//!   [stuck](PDAConfiguration::is_stuck()) if there is none, while the
//!   [`NPDA`] explores all rules at once.
//

// Nested modules
pub mod dpda;
pub mod npda;

// Imports
use std::fmt::{Debug, Display, Formatter, Result as FResult};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub use dpda::{DPDADesign, DPDARulebook, DPDA};
pub use npda::{NPDADesign, NPDARulebook, NPDA};

use crate::rules::Rule;


/***** HELPERS *****/
/// A single cell of a [`Stack`].
#[derive(Debug)]
struct Cell<C> {
    /// The character in this cell.
    value: C,
    /// The cell below this one, if any.
    below: Option<Arc<Cell<C>>>,
}





/***** LIBRARY *****/
/// A persistent stack of characters.
///
/// Pushing or popping never changes the stack itself, but returns a new one instead. The new
/// stack shares all cells below the top with the old one, so this is cheap even for NPDAs that
/// keep many configurations around.
pub struct Stack<C> {
    /// The top cell.
    top: Option<Arc<Cell<C>>>,
    /// The number of cells.
    len: usize,
}
impl<C> Stack<C> {
    /// Creates a new, empty stack.
    #[inline]
    pub const fn new() -> Self { Self { top: None, len: 0 } }

    /// Returns a new stack with the given character on top.
    ///
    /// # Arguments
    /// - `character`: The character to push.
    ///
    /// # Returns
    /// A new Stack that is one character longer.
    #[inline]
    pub fn push(&self, character: C) -> Self { Self { top: Some(Arc::new(Cell { value: character, below: self.top.clone() })), len: self.len + 1 } }

    /// Returns a new stack without the top character.
    ///
    /// # Returns
    /// A new Stack that is one character shorter, or an empty one if this stack was empty already.
    #[inline]
    pub fn pop(&self) -> Self {
        match &self.top {
            Some(cell) => Self { top: cell.below.clone(), len: self.len - 1 },
            None => Self::new(),
        }
    }

    /// Returns the character on top of the stack, if any.
    #[inline]
    pub fn top(&self) -> Option<&C> { self.top.as_ref().map(|cell| &cell.value) }

    /// Iterates over the characters in this stack, top-first.
    #[inline]
    pub fn iter(&self) -> Iter<'_, C> { Iter { cell: self.top.as_deref() } }

    /// Returns the number of characters on the stack.
    #[inline]
    pub fn len(&self) -> usize { self.len }

    /// Returns whether there are no characters on the stack.
    #[inline]
    pub fn is_empty(&self) -> bool { self.len == 0 }
}
impl<C> Clone for Stack<C> {
    #[inline]
    fn clone(&self) -> Self { Self { top: self.top.clone(), len: self.len } }
}
impl<C> Default for Stack<C> {
    #[inline]
    fn default() -> Self { Self::new() }
}
impl<C: Debug> Debug for Stack<C> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { f.debug_list().entries(self.iter()).finish() }
}
impl<C: Display> Display for Stack<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        let mut iter = self.iter();
        if let Some(top) = iter.next() {
            write!(f, "({top})")?;
        }
        for c in iter {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
impl<C: Eq> Eq for Stack<C> {}
impl<C: Hash> Hash for Stack<C> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for c in self.iter() {
            c.hash(state);
        }
    }
}
impl<C: Ord> Ord for Stack<C> {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering { self.iter().cmp(other.iter()) }
}
impl<C: PartialEq> PartialEq for Stack<C> {
    #[inline]
    fn eq(&self, other: &Self) -> bool { self.len == other.len && self.iter().eq(other.iter()) }
}
impl<C: PartialOrd> PartialOrd for Stack<C> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> { self.iter().partial_cmp(other.iter()) }
}
impl<C> FromIterator<C> for Stack<C> {
    /// Builds a stack from characters given top-first.
    #[inline]
    fn from_iter<T: IntoIterator<Item = C>>(iter: T) -> Self {
        let chars: Vec<C> = iter.into_iter().collect();
        let mut stack = Self::new();
        for c in chars.into_iter().rev() {
            stack = stack.push(c);
        }
        stack
    }
}
impl<'s, C> IntoIterator for &'s Stack<C> {
    type Item = &'s C;
    type IntoIter = Iter<'s, C>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Iterates over the characters of a [`Stack`], top-first.
#[derive(Debug)]
pub struct Iter<'s, C> {
    /// The next cell to yield.
    cell: Option<&'s Cell<C>>,
}
impl<'s, C> Iterator for Iter<'s, C> {
    type Item = &'s C;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let cell: &'s Cell<C> = self.cell?;
        self.cell = cell.below.as_deref();
        Some(&cell.value)
    }
}



/// The configuration of a pushdown automaton: the state it's in and its stack.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PDAConfiguration<S, C> {
    /// The state we're in.
    pub state: S,
    /// The stack.
    pub stack: Stack<C>,
    /// Whether this configuration is stuck.
    stuck: bool,
}
impl<S, C> PDAConfiguration<S, C> {
    /// Constructor for the PDAConfiguration.
    ///
    /// # Arguments
    /// - `state`: The state we're in.
    /// - `stack`: The stack.
    ///
    /// # Returns
    /// A new PDAConfiguration that is not stuck.
    #[inline]
    pub fn new(state: S, stack: Stack<C>) -> Self { Self { state, stack, stuck: false } }

    /// Returns the stuck counterpart of this configuration.
    ///
    /// A stuck configuration remembers where it got stuck, but no rule applies to it ever again.
    #[inline]
    pub fn stuck(self) -> Self { Self { stuck: true, ..self } }

    /// Returns whether this configuration is stuck.
    #[inline]
    pub fn is_stuck(&self) -> bool { self.stuck }
}
impl<S: Display, C: Display> Display for PDAConfiguration<S, C> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        write!(f, "{} {}", self.state, self.stack)?;
        if self.stuck {
            write!(f, " (stuck)")?;
        }
        Ok(())
    }
}



/// A single transition of a pushdown automaton.
///
/// # Syntax
/// ```plain
/// 1 --(;$/b$--> 2
/// 2 --ε;$/$--> 1
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PDARule<S, C> {
    /// The state in which this rule applies.
    pub state: S,
    /// The character consumed, or [`None`] for a free move.
    pub character: Option<C>,
    /// The state after following this rule.
    pub next_state: S,
    /// The character that must be on top of the stack, and which gets popped.
    pub pop_character: C,
    /// The characters pushed instead, with the first ending up on top.
    pub push_characters: Vec<C>,
}
impl<S, C> PDARule<S, C> {
    /// Constructor for the PDARule.
    ///
    /// # Arguments
    /// - `state`: The state in which this rule applies.
    /// - `character`: The character consumed. Give [`None`] to get a free move.
    /// - `next_state`: The state after following this rule.
    /// - `pop_character`: The character that must be on top of the stack.
    /// - `push_characters`: The characters that replace it, top-first.
    ///
    /// # Returns
    /// A new PDARule.
    #[inline]
    pub fn new(state: S, character: impl Into<Option<C>>, next_state: S, pop_character: C, push_characters: impl IntoIterator<Item = C>) -> Self {
        Self { state, character: character.into(), next_state, pop_character, push_characters: push_characters.into_iter().collect() }
    }

    /// Constructor for a PDARule that represents a free move.
    #[inline]
    pub fn free(state: S, next_state: S, pop_character: C, push_characters: impl IntoIterator<Item = C>) -> Self {
        Self { state, character: None, next_state, pop_character, push_characters: push_characters.into_iter().collect() }
    }
}
impl<S, C: Clone> PDARule<S, C> {
    /// Computes the stack after following this rule.
    ///
    /// # Arguments
    /// - `stack`: The stack before following this rule. Its top is assumed to be the
    ///   `pop_character`.
    ///
    /// # Returns
    /// A new stack with the top replaced by the `push_characters`.
    pub fn next_stack(&self, stack: &Stack<C>) -> Stack<C> {
        let mut stack: Stack<C> = stack.pop();
        for c in self.push_characters.iter().rev() {
            stack = stack.push(c.clone());
        }
        stack
    }
}
impl<S, C> Rule for PDARule<S, C>
where
    S: Clone + Debug + Eq,
    C: Clone + Debug + Eq,
{
    type Configuration = PDAConfiguration<S, C>;
    type Symbol = C;

    #[inline]
    fn symbol(&self) -> Option<&Self::Symbol> { self.character.as_ref() }

    #[inline]
    fn applies_to(&self, configuration: &Self::Configuration, symbol: Option<&Self::Symbol>) -> bool {
        !configuration.stuck
            && self.state == configuration.state
            && configuration.stack.top() == Some(&self.pop_character)
            && self.character.as_ref() == symbol
    }

    #[inline]
    fn follow(&self, configuration: &Self::Configuration) -> Self::Configuration {
        PDAConfiguration::new(self.next_state.clone(), self.next_stack(&configuration.stack))
    }

    #[inline]
    fn overlaps(&self, other: &Self) -> bool {
        self.state == other.state && self.character == other.character && self.pop_character == other.pop_character
    }
}
impl<S: Display, C: Display> Display for PDARule<S, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        write!(f, "{} --", self.state)?;
        match &self.character {
            Some(c) => write!(f, "{c}")?,
            None => write!(f, "ε")?,
        }
        write!(f, ";{}/", self.pop_character)?;
        for c in &self.push_characters {
            write!(f, "{c}")?;
        }
        write!(f, "--> {}", self.next_state)
    }
}





/***** TESTS *****/
