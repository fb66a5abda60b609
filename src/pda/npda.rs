//  NPDA.rs
//    by Lut99
//
//  Created:
//    05 Jun 2025, 15:17:30
//  Last edited:
//    17 Jun 2025, 14:09:12
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the nondeterministic pushdown automaton.
//!
//!   Like the [NFA](crate::fa::NFA), it is in many configurations at once.
//!   Because every configuration carries its own stack, two of them are
//!   only the same if both their state and their entire stack agree.
//

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt::Debug;

use super::{PDAConfiguration, PDARule, Stack};
use crate::rules::{infallible, Design, Machine, NondeterministicRulebook};


/***** AUXILLARY *****/
/// A [`NondeterministicRulebook`] for pushdown automata.
pub type NPDARulebook<S, C> = NondeterministicRulebook<PDARule<S, C>>;





/***** LIBRARY *****/
/// A nondeterministic pushdown automaton.
#[derive(Clone, Debug)]
pub struct NPDA<'r, S, C> {
    /// The configurations we're in, before following free moves.
    current_configurations: BTreeSet<PDAConfiguration<S, C>>,
    /// The states in which we accept.
    accept_states: &'r BTreeSet<S>,
    /// The rules that drive us.
    rulebook: &'r NPDARulebook<S, C>,
}
impl<'r, S, C> NPDA<'r, S, C> {
    /// Constructor for the NPDA.
    ///
    /// # Arguments
    /// - `current_configurations`: The configurations to start in.
    /// - `accept_states`: The states in which the NPDA accepts.
    /// - `rulebook`: The [`NPDARulebook`] that tells us how to move.
    ///
    /// # Returns
    /// A new NPDA.
    #[inline]
    pub fn new(current_configurations: BTreeSet<PDAConfiguration<S, C>>, accept_states: &'r BTreeSet<S>, rulebook: &'r NPDARulebook<S, C>) -> Self {
        Self { current_configurations, accept_states, rulebook }
    }
}
impl<'r, S, C> NPDA<'r, S, C>
where
    S: Clone + Debug + Ord,
    C: Clone + Debug + Ord,
{
    /// Returns the configurations we're in, including everything reachable through free moves.
    #[inline]
    pub fn current_configurations(&self) -> BTreeSet<PDAConfiguration<S, C>> { self.rulebook.follow_free_moves(self.current_configurations.clone()) }

    /// Reads a single character.
    ///
    /// # Arguments
    /// - `character`: The character to read.
    #[inline]
    pub fn read_character(&mut self, character: &C) {
        self.current_configurations = self.rulebook.next_configurations(&self.current_configurations(), Some(character));
    }

    /// Checks whether any of the configurations we're in has an accept state.
    #[inline]
    pub fn is_accepting(&self) -> bool { self.current_configurations().iter().any(|configuration| self.accept_states.contains(&configuration.state)) }
}
impl<'r, S, C> Machine for NPDA<'r, S, C>
where
    S: Clone + Debug + Ord,
    C: Clone + Debug + Ord,
{
    type Symbol = C;
    type Configuration = BTreeSet<PDAConfiguration<S, C>>;
    type Error = Infallible;

    #[inline]
    fn current_configuration(&self) -> Self::Configuration { self.current_configurations() }

    #[inline]
    fn read_symbol(&mut self, symbol: &Self::Symbol) -> Result<(), Self::Error> {
        self.read_character(symbol);
        Ok(())
    }

    #[inline]
    fn is_accepting(&self) -> bool { NPDA::is_accepting(self) }
}



/// A blueprint for [`NPDA`]s.
#[derive(Clone, Debug)]
pub struct NPDADesign<S, C> {
    /// The state to start in.
    start_state: S,
    /// The character that starts on the stack.
    bottom_character: C,
    /// The states in which we accept.
    accept_states: BTreeSet<S>,
    /// The rules that drive the NPDAs.
    rulebook: NPDARulebook<S, C>,
}
impl<S: Ord, C> NPDADesign<S, C> {
    /// Constructor for the NPDADesign.
    ///
    /// # Arguments
    /// - `start_state`: The state every NPDA starts in.
    /// - `bottom_character`: The character that every NPDA starts with on its stack.
    /// - `accept_states`: The states in which the NPDAs accept.
    /// - `rulebook`: The [`NPDARulebook`] that tells the NPDAs how to move.
    ///
    /// # Returns
    /// A new NPDADesign.
    #[inline]
    pub fn new(start_state: S, bottom_character: C, accept_states: impl IntoIterator<Item = S>, rulebook: NPDARulebook<S, C>) -> Self {
        Self { start_state, bottom_character, accept_states: accept_states.into_iter().collect(), rulebook }
    }
}
impl<S, C> NPDADesign<S, C> {
    /// Returns the rules that drive the NPDAs.
    #[inline]
    pub fn rulebook(&self) -> &NPDARulebook<S, C> { &self.rulebook }
}
impl<S: Clone + Ord, C: Clone + Ord> NPDADesign<S, C> {
    /// Builds a fresh [`NPDA`] in the start configuration.
    #[inline]
    pub fn to_npda(&self) -> NPDA<'_, S, C> {
        let configuration = PDAConfiguration::new(self.start_state.clone(), Stack::new().push(self.bottom_character.clone()));
        NPDA::new(BTreeSet::from([configuration]), &self.accept_states, &self.rulebook)
    }
}
impl<S, C> NPDADesign<S, C>
where
    S: Clone + Debug + Ord,
    C: Clone + Debug + Ord,
{
    /// Checks whether a fresh NPDA accepts the given input.
    ///
    /// # Arguments
    /// - `input`: The characters to read.
    ///
    /// # Returns
    /// True if any of the configurations the NPDA ends up in has an accept state, false
    /// otherwise.
    #[inline]
    pub fn accepts(&self, input: impl IntoIterator<Item = C>) -> bool { infallible(self.try_accepts(input)) }
}
impl<S, C> Design for NPDADesign<S, C>
where
    S: Clone + Debug + Ord,
    C: Clone + Debug + Ord,
{
    type Machine<'d>
        = NPDA<'d, S, C>
    where
        Self: 'd;

    #[inline]
    fn to_machine(&self) -> Self::Machine<'_> { self.to_npda() }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    fn start() -> BTreeSet<PDAConfiguration<u32, char>> { BTreeSet::from([PDAConfiguration::new(1, Stack::new().push('$'))]) }


    #[test]
    fn test_npda_free_moves() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = crate::tests::palindromes();
        let accept = BTreeSet::from([3]);
        let npda = NPDA::new(start(), &accept, &rulebook);
        assert!(npda.is_accepting());
        assert_eq!(
            npda.current_configurations(),
            BTreeSet::from([
                PDAConfiguration::new(1, Stack::new().push('$')),
                PDAConfiguration::new(2, Stack::new().push('$')),
                PDAConfiguration::new(3, Stack::new().push('$')),
            ])
        );
    }

    #[test]
    fn test_npda_read() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = crate::tests::palindromes();
        let accept = BTreeSet::from([3]);
        let mut npda = NPDA::new(start(), &accept, &rulebook);
        npda.read_sequence("abb".chars()).unwrap();
        assert!(!npda.is_accepting());
        assert_eq!(
            npda.current_configurations(),
            BTreeSet::from([
                PDAConfiguration::new(1, "bba$".chars().collect()),
                PDAConfiguration::new(2, "a$".chars().collect()),
                PDAConfiguration::new(2, "bba$".chars().collect()),
            ])
        );

        npda.read_character(&'a');
        assert!(npda.is_accepting());
    }

    #[test]
    fn test_npda_design() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let design = NPDADesign::new(1, '$', [3], crate::tests::palindromes());
        assert!(design.accepts("abba".chars()));
        assert!(design.accepts("babbaabbab".chars()));
        assert!(!design.accepts("abb".chars()));
        assert!(!design.accepts("baabaa".chars()));
    }

    #[test]
    fn test_npda_alphabet() {
        assert_eq!(crate::tests::palindromes().alphabet(), vec!['a', 'b']);
    }
}
