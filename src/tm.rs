//  TM.rs
//    by Lut99
//
//  Created:
//    06 Jun 2025, 09:48:12
//  Last edited:
//    17 Jun 2025, 14:31:40
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the deterministic Turing machine.
//!
//!   Instead of reading its input one character at a time, a Turing
//!   machine finds it written on an infinite [`Tape`]. Every step it may
//!   overwrite the cell under its head and move one cell left or right.
//

use std::collections::BTreeSet;
use std::fmt::{Debug, Display, Formatter, Result as FResult};
use std::hash::Hash;

use enum_debug::EnumDebug;

use crate::log::{debug, trace};
use crate::pda::Stack;
use crate::rules::{DeterministicRulebook, NoApplicableRule, Rule};


/***** AUXILLARY *****/
/// A [`DeterministicRulebook`] for Turing machines.
pub type DTMRulebook<S, C> = DeterministicRulebook<TMRule<S, C>>;

/// The way a [`Tape`]'s head can move.
#[derive(Clone, Copy, Debug, EnumDebug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Direction {
    /// One cell to the left.
    Left,
    /// One cell to the right.
    Right,
}





/***** LIBRARY *****/
/// An infinite tape of characters with a head on it.
///
/// Every cell that was never written contains the `blank` character. All operations return a
/// new tape instead of changing this one.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tape<C> {
    /// The cells left of the head, nearest one on top.
    left:   Stack<C>,
    /// The cell under the head.
    middle: C,
    /// The cells right of the head, nearest one on top.
    right:  Stack<C>,
    /// The character in every unvisited cell.
    blank:  C,
}
impl<C> Tape<C> {
    /// Constructor for the Tape.
    ///
    /// # Arguments
    /// - `left`: The cells left of the head, in reading order.
    /// - `middle`: The cell under the head.
    /// - `right`: The cells right of the head, in reading order.
    /// - `blank`: The character in every other cell.
    ///
    /// # Returns
    /// A new Tape.
    pub fn new(left: impl IntoIterator<Item = C>, middle: C, right: impl IntoIterator<Item = C>, blank: C) -> Self {
        let mut lstack: Stack<C> = Stack::new();
        for c in left {
            lstack = lstack.push(c);
        }
        Self { left: lstack, middle, right: right.into_iter().collect(), blank }
    }

    /// Returns the character under the head.
    #[inline]
    pub fn middle(&self) -> &C { &self.middle }

    /// Returns the character in every unvisited cell.
    #[inline]
    pub fn blank(&self) -> &C { &self.blank }
}
impl<C: Clone> Tape<C> {
    /// Creates a tape with the given input on it and the head on its first character.
    ///
    /// # Arguments
    /// - `input`: The characters to write.
    /// - `blank`: The character in every other cell.
    ///
    /// # Returns
    /// A new Tape, which is entirely blank if `input` is empty.
    pub fn with_input(input: impl IntoIterator<Item = C>, blank: C) -> Self {
        let mut input = input.into_iter();
        match input.next() {
            Some(middle) => Self::new([], middle, input, blank),
            None => Self::new([], blank.clone(), [], blank),
        }
    }

    /// Returns a tape with the cell under the head overwritten.
    #[inline]
    pub fn write(&self, character: C) -> Self {
        Self { left: self.left.clone(), middle: character, right: self.right.clone(), blank: self.blank.clone() }
    }

    /// Returns a tape with the head one cell further to the left.
    pub fn move_head_left(&self) -> Self {
        Self {
            left:   self.left.pop(),
            middle: self.left.top().cloned().unwrap_or_else(|| self.blank.clone()),
            right:  self.right.push(self.middle.clone()),
            blank:  self.blank.clone(),
        }
    }

    /// Returns a tape with the head one cell further to the right.
    pub fn move_head_right(&self) -> Self {
        Self {
            left:   self.left.push(self.middle.clone()),
            middle: self.right.top().cloned().unwrap_or_else(|| self.blank.clone()),
            right:  self.right.pop(),
            blank:  self.blank.clone(),
        }
    }

    /// Returns a tape with the head moved in the given [`Direction`].
    #[inline]
    pub fn move_head(&self, direction: Direction) -> Self {
        match direction {
            Direction::Left => self.move_head_left(),
            Direction::Right => self.move_head_right(),
        }
    }
}
impl<C: Display> Display for Tape<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        let left: Vec<&C> = self.left.iter().collect();
        for c in left.into_iter().rev() {
            write!(f, "{c}")?;
        }
        write!(f, "({})", self.middle)?;
        for c in self.right.iter() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}



/// The configuration of a Turing machine: the state it's in and its tape.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TMConfiguration<S, C> {
    /// The state we're in.
    pub state: S,
    /// The tape.
    pub tape:  Tape<C>,
}
impl<S, C> TMConfiguration<S, C> {
    /// Constructor for the TMConfiguration.
    #[inline]
    pub fn new(state: S, tape: Tape<C>) -> Self { Self { state, tape } }
}
impl<S: Display, C: Display> Display for TMConfiguration<S, C> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "{} {}", self.state, self.tape) }
}



/// A single transition of a Turing machine.
///
/// Turing machine rules never consume input, so [`Rule::symbol()`] is always [`None`]. Instead,
/// they look at the character under the head.
///
/// # Syntax
/// ```plain
/// 1 --0/1;R--> 2
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TMRule<S, C> {
    /// The state in which this rule applies.
    pub state: S,
    /// The character that must be under the head.
    pub character: C,
    /// The state after following this rule.
    pub next_state: S,
    /// The character written under the head.
    pub write_character: C,
    /// Where the head moves after writing.
    pub direction: Direction,
}
impl<S, C> TMRule<S, C> {
    /// Constructor for the TMRule.
    ///
    /// # Arguments
    /// - `state`: The state in which this rule applies.
    /// - `character`: The character that must be under the head.
    /// - `next_state`: The state after following this rule.
    /// - `write_character`: The character written under the head.
    /// - `direction`: Where the head moves after writing.
    ///
    /// # Returns
    /// A new TMRule.
    #[inline]
    pub fn new(state: S, character: C, next_state: S, write_character: C, direction: Direction) -> Self {
        Self { state, character, next_state, write_character, direction }
    }
}
impl<S, C> Rule for TMRule<S, C>
where
    S: Clone + Debug + Eq,
    C: Clone + Debug + Eq,
{
    type Configuration = TMConfiguration<S, C>;
    type Symbol = C;

    #[inline]
    fn symbol(&self) -> Option<&Self::Symbol> { None }

    #[inline]
    fn applies_to(&self, configuration: &Self::Configuration, symbol: Option<&Self::Symbol>) -> bool {
        symbol.is_none() && self.state == configuration.state && self.character == configuration.tape.middle
    }

    #[inline]
    fn follow(&self, configuration: &Self::Configuration) -> Self::Configuration {
        TMConfiguration::new(self.next_state.clone(), configuration.tape.write(self.write_character.clone()).move_head(self.direction))
    }

    #[inline]
    fn overlaps(&self, other: &Self) -> bool { self.state == other.state && self.character == other.character }
}
impl<S: Display, C: Display> Display for TMRule<S, C> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        let dir: &str = match self.direction {
            Direction::Left => "L",
            Direction::Right => "R",
        };
        write!(f, "{} --{}/{};{}--> {}", self.state, self.character, self.write_character, dir, self.next_state)
    }
}



/// A deterministic Turing machine.
#[derive(Clone, Debug)]
pub struct DTM<'r, S, C> {
    /// The configuration we're in.
    current_configuration: TMConfiguration<S, C>,
    /// The states in which we accept.
    accept_states: &'r BTreeSet<S>,
    /// The rules that drive us.
    rulebook: &'r DTMRulebook<S, C>,
}
impl<'r, S, C> DTM<'r, S, C> {
    /// Constructor for the DTM.
    ///
    /// # Arguments
    /// - `current_configuration`: The configuration to start in.
    /// - `accept_states`: The states in which the DTM accepts.
    /// - `rulebook`: The [`DTMRulebook`] that tells us how to move.
    ///
    /// # Returns
    /// A new DTM.
    #[inline]
    pub fn new(current_configuration: TMConfiguration<S, C>, accept_states: &'r BTreeSet<S>, rulebook: &'r DTMRulebook<S, C>) -> Self {
        Self { current_configuration, accept_states, rulebook }
    }

    /// Returns the configuration we're in.
    #[inline]
    pub fn current_configuration(&self) -> &TMConfiguration<S, C> { &self.current_configuration }
}
impl<'r, S, C> DTM<'r, S, C>
where
    S: Clone + Debug + Eq + Ord,
    C: Clone + Debug + Eq,
{
    /// Returns whether we're in an accept state.
    #[inline]
    pub fn is_accepting(&self) -> bool { self.accept_states.contains(&self.current_configuration.state) }

    /// Returns whether we're stuck, i.e., not accepting and without any rule to follow.
    #[inline]
    pub fn is_stuck(&self) -> bool { !self.is_accepting() && !self.rulebook.applies_to(&self.current_configuration, None) }

    /// Takes a single step.
    ///
    /// # Errors
    /// This function errors if no rule applies to the current configuration.
    pub fn step(&mut self) -> Result<(), NoApplicableRule<TMConfiguration<S, C>, C>> {
        self.current_configuration = self.rulebook.next_configuration(&self.current_configuration, None)?;
        trace!("DTM stepped to {:?}", self.current_configuration);
        Ok(())
    }

    /// Keeps stepping until we accept or get stuck.
    ///
    /// Note that this never returns for machines that do neither.
    pub fn run(&mut self) {
        while !self.is_accepting() {
            match self.rulebook.rule_for(&self.current_configuration, None) {
                Some(rule) => {
                    self.current_configuration = rule.follow(&self.current_configuration);
                    trace!("DTM stepped to {:?}", self.current_configuration);
                },
                None => {
                    debug!("DTM got stuck in {:?}", self.current_configuration);
                    return;
                },
            }
        }
    }
}



/// A blueprint for [`DTM`]s.
#[derive(Clone, Debug)]
pub struct DTMDesign<S, C> {
    /// The state to start in.
    start_state: S,
    /// The character in every unvisited cell.
    blank_character: C,
    /// The states in which we accept.
    accept_states: BTreeSet<S>,
    /// The rules that drive the DTMs.
    rulebook: DTMRulebook<S, C>,
}
impl<S: Ord, C> DTMDesign<S, C> {
    /// Constructor for the DTMDesign.
    ///
    /// # Arguments
    /// - `start_state`: The state every DTM starts in.
    /// - `blank_character`: The character in every unvisited cell.
    /// - `accept_states`: The states in which the DTMs accept.
    /// - `rulebook`: The [`DTMRulebook`] that tells the DTMs how to move.
    ///
    /// # Returns
    /// A new DTMDesign.
    #[inline]
    pub fn new(start_state: S, blank_character: C, accept_states: impl IntoIterator<Item = S>, rulebook: DTMRulebook<S, C>) -> Self {
        Self { start_state, blank_character, accept_states: accept_states.into_iter().collect(), rulebook }
    }
}
impl<S: Clone, C: Clone> DTMDesign<S, C> {
    /// Builds a fresh [`DTM`] with the given input written on its tape.
    ///
    /// # Arguments
    /// - `input`: The characters to write, with the head on the first one.
    #[inline]
    pub fn to_dtm(&self, input: impl IntoIterator<Item = C>) -> DTM<'_, S, C> {
        let tape: Tape<C> = Tape::with_input(input, self.blank_character.clone());
        DTM::new(TMConfiguration::new(self.start_state.clone(), tape), &self.accept_states, &self.rulebook)
    }
}
impl<S, C> DTMDesign<S, C>
where
    S: Clone + Debug + Eq + Ord,
    C: Clone + Debug + Eq,
{
    /// Checks whether a fresh DTM accepts the given input.
    ///
    /// Note that this never returns for inputs on which the DTM neither accepts nor gets stuck.
    ///
    /// # Arguments
    /// - `input`: The characters to write on the tape.
    ///
    /// # Returns
    /// True if the DTM reaches an accept state, false if it gets stuck first.
    pub fn accepts(&self, input: impl IntoIterator<Item = C>) -> bool {
        let mut dtm = self.to_dtm(input);
        dtm.run();
        dtm.is_accepting()
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    fn increment() -> DTMRulebook<u32, char> {
        DTMRulebook::new([
            TMRule::new(1, '0', 2, '1', Direction::Right),
            TMRule::new(1, '1', 1, '0', Direction::Left),
            TMRule::new(1, '_', 2, '1', Direction::Right),
            TMRule::new(2, '0', 2, '0', Direction::Right),
            TMRule::new(2, '1', 2, '1', Direction::Right),
            TMRule::new(2, '_', 3, '_', Direction::Left),
        ])
    }

    fn abc() -> DTMRulebook<u32, char> {
        DTMRulebook::new([
            // Find an `a` and cross it out
            TMRule::new(1, 'X', 1, 'X', Direction::Right),
            TMRule::new(1, 'a', 2, 'X', Direction::Right),
            TMRule::new(1, '_', 6, '_', Direction::Left),
            // Find a `b` and cross it out
            TMRule::new(2, 'a', 2, 'a', Direction::Right),
            TMRule::new(2, 'X', 2, 'X', Direction::Right),
            TMRule::new(2, 'b', 3, 'X', Direction::Right),
            // Find a `c` and cross it out
            TMRule::new(3, 'b', 3, 'b', Direction::Right),
            TMRule::new(3, 'X', 3, 'X', Direction::Right),
            TMRule::new(3, 'c', 4, 'X', Direction::Right),
            // Go to the end
            TMRule::new(4, 'c', 4, 'c', Direction::Right),
            TMRule::new(4, '_', 5, '_', Direction::Left),
            // Rewind
            TMRule::new(5, 'a', 5, 'a', Direction::Left),
            TMRule::new(5, 'b', 5, 'b', Direction::Left),
            TMRule::new(5, 'c', 5, 'c', Direction::Left),
            TMRule::new(5, 'X', 5, 'X', Direction::Left),
            TMRule::new(5, '_', 1, '_', Direction::Right),
        ])
    }


    #[test]
    fn test_tape() {
        let tape: Tape<char> = Tape::new(['1', '0', '1'], '1', [], '_');
        assert_eq!(tape.middle(), &'1');
        assert_eq!(tape.to_string(), "101(1)");
        assert_eq!(tape.move_head_left().to_string(), "10(1)1");
        assert_eq!(tape.write('0').to_string(), "101(0)");
        assert_eq!(tape.move_head_right().to_string(), "1011(_)");
        assert_eq!(tape.move_head_right().write('0').to_string(), "1011(0)");
        assert_eq!(tape.move_head(Direction::Left).move_head(Direction::Right), tape);

        // Running off the left edge finds blanks too
        let tape: Tape<char> = Tape::with_input("ab".chars(), '_');
        assert_eq!(tape.move_head_left().to_string(), "(_)ab");
        assert_eq!(Tape::with_input("".chars(), '_').to_string(), "(_)");
    }

    #[test]
    fn test_tm_rule() {
        let rule: TMRule<u32, char> = TMRule::new(1, '0', 2, '1', Direction::Right);
        assert!(rule.applies_to(&TMConfiguration::new(1, Tape::new([], '0', [], '_')), None));
        assert!(!rule.applies_to(&TMConfiguration::new(1, Tape::new([], '1', [], '_')), None));
        assert!(!rule.applies_to(&TMConfiguration::new(2, Tape::new([], '0', [], '_')), None));
        assert!(!rule.applies_to(&TMConfiguration::new(1, Tape::new([], '0', [], '_')), Some(&'0')));

        let next = rule.follow(&TMConfiguration::new(1, Tape::new([], '0', [], '_')));
        assert_eq!(next.state, 2);
        assert_eq!(next.tape.to_string(), "1(_)");
        assert_eq!(rule.to_string(), "1 --0/1;R--> 2");
    }

    #[test]
    fn test_dtm_rulebook() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = increment();
        let mut configuration = TMConfiguration::new(1, Tape::new(['1', '0', '1'], '1', [], '_'));
        configuration = rulebook.next_configuration(&configuration, None).unwrap();
        assert_eq!(configuration.to_string(), "1 10(1)0");
        configuration = rulebook.next_configuration(&configuration, None).unwrap();
        assert_eq!(configuration.to_string(), "1 1(0)00");
        configuration = rulebook.next_configuration(&configuration, None).unwrap();
        assert_eq!(configuration.to_string(), "2 11(0)0");
    }

    #[test]
    fn test_dtm_run() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = increment();
        let accept = BTreeSet::from([3]);
        let mut dtm = DTM::new(TMConfiguration::new(1, Tape::new(['1', '0', '1'], '1', [], '_')), &accept, &rulebook);
        assert!(!dtm.is_accepting());
        dtm.step().unwrap();
        assert_eq!(dtm.current_configuration().to_string(), "1 10(1)0");
        assert!(!dtm.is_accepting());
        dtm.run();
        assert_eq!(dtm.current_configuration().to_string(), "3 110(0)_");
        assert!(dtm.is_accepting());
    }

    #[test]
    fn test_dtm_stuck() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = increment();
        let accept = BTreeSet::from([3]);
        let mut dtm = DTM::new(TMConfiguration::new(1, Tape::new(['1', '2', '1'], '1', [], '_')), &accept, &rulebook);
        dtm.run();
        assert_eq!(dtm.current_configuration().to_string(), "1 1(2)00");
        assert!(!dtm.is_accepting());
        assert!(dtm.is_stuck());
        assert!(dtm.step().is_err());
    }

    #[test]
    fn test_dtm_design() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let design = DTMDesign::new(1, '_', [6], abc());
        assert!(design.accepts("aaabbbccc".chars()));
        assert!(design.accepts("abc".chars()));
        assert!(design.accepts("".chars()));
        assert!(!design.accepts("aabbc".chars()));
        assert!(!design.accepts("abcc".chars()));
        assert!(!design.accepts("cba".chars()));
    }
}
