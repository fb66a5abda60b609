//  DPDA.rs
//    by Lut99
//
//  Created:
//    05 Jun 2025, 13:41:02
//  Last edited:
//    17 Jun 2025, 14:06:55
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the deterministic pushdown automaton.
//!
//!   Unlike the [DFA](crate::fa::DFA), a DPDA does not require its
//!   rulebook to cover every situation. If no rule applies, it ends up
//!   in a stuck configuration that it never leaves again.
//

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt::Debug;
use std::hash::Hash;

use super::{PDAConfiguration, PDARule, Stack};
use crate::log::debug;
use crate::rules::{infallible, DeterministicRulebook, Design, Machine, Rule as _};


/***** AUXILLARY *****/
/// A [`DeterministicRulebook`] for pushdown automata.
pub type DPDARulebook<S, C> = DeterministicRulebook<PDARule<S, C>>;





/***** LIBRARY *****/
/// A deterministic pushdown automaton.
#[derive(Clone, Debug)]
pub struct DPDA<'r, S, C> {
    /// The configuration we're in, before following free moves.
    current_configuration: PDAConfiguration<S, C>,
    /// The states in which we accept.
    accept_states: &'r BTreeSet<S>,
    /// The rules that drive us.
    rulebook: &'r DPDARulebook<S, C>,
}
impl<'r, S, C> DPDA<'r, S, C> {
    /// Constructor for the DPDA.
    ///
    /// # Arguments
    /// - `current_configuration`: The configuration to start in.
    /// - `accept_states`: The states in which the DPDA accepts.
    /// - `rulebook`: The [`DPDARulebook`] that tells us how to move.
    ///
    /// # Returns
    /// A new DPDA.
    #[inline]
    pub fn new(current_configuration: PDAConfiguration<S, C>, accept_states: &'r BTreeSet<S>, rulebook: &'r DPDARulebook<S, C>) -> Self {
        Self { current_configuration, accept_states, rulebook }
    }
}
impl<'r, S, C> DPDA<'r, S, C>
where
    S: Clone + Debug + Eq + Hash + Ord,
    C: Clone + Debug + Eq + Hash,
{
    /// Returns the configuration we're in after following all free moves.
    ///
    /// If the free moves never stop, the machine can't ever read anything anymore, and the
    /// configuration is reported as stuck.
    pub fn current_configuration(&self) -> PDAConfiguration<S, C> {
        match self.rulebook.follow_free_moves(self.current_configuration.clone()) {
            Some(configuration) => configuration,
            None => {
                debug!("DPDA free moves loop forever from {:?}; considering it stuck", self.current_configuration);
                self.current_configuration.clone().stuck()
            },
        }
    }

    /// Computes the configuration after reading a character.
    ///
    /// # Arguments
    /// - `character`: The character to read.
    ///
    /// # Returns
    /// The next configuration, which is stuck if no rule applies.
    pub fn next_configuration(&self, character: &C) -> PDAConfiguration<S, C> {
        let configuration: PDAConfiguration<S, C> = self.current_configuration();
        match self.rulebook.rule_for(&configuration, Some(character)) {
            Some(rule) => rule.follow(&configuration),
            None => {
                if !configuration.is_stuck() {
                    debug!("DPDA got stuck in {configuration:?} on {character:?}");
                }
                configuration.stuck()
            },
        }
    }

    /// Reads a single character.
    ///
    /// Reading anything while stuck leaves the configuration as-is.
    ///
    /// # Arguments
    /// - `character`: The character to read.
    #[inline]
    pub fn read_character(&mut self, character: &C) { self.current_configuration = self.next_configuration(character); }

    /// Returns whether no rule will ever apply to us again.
    #[inline]
    pub fn is_stuck(&self) -> bool { self.current_configuration().is_stuck() }

    /// Returns whether we're in an accept state (and not stuck).
    #[inline]
    pub fn is_accepting(&self) -> bool {
        let configuration: PDAConfiguration<S, C> = self.current_configuration();
        !configuration.is_stuck() && self.accept_states.contains(&configuration.state)
    }
}
impl<'r, S, C> Machine for DPDA<'r, S, C>
where
    S: Clone + Debug + Eq + Hash + Ord,
    C: Clone + Debug + Eq + Hash,
{
    type Symbol = C;
    type Configuration = PDAConfiguration<S, C>;
    type Error = Infallible;

    #[inline]
    fn current_configuration(&self) -> Self::Configuration { DPDA::current_configuration(self) }

    #[inline]
    fn read_symbol(&mut self, symbol: &Self::Symbol) -> Result<(), Self::Error> {
        self.read_character(symbol);
        Ok(())
    }

    fn read_sequence<I>(&mut self, sequence: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Symbol>,
    {
        for symbol in sequence {
            // Nothing can un-stuck us, so don't bother with the rest
            if self.is_stuck() {
                break;
            }
            self.read_character(&symbol);
        }
        Ok(())
    }

    #[inline]
    fn is_accepting(&self) -> bool { DPDA::is_accepting(self) }
}



/// A blueprint for [`DPDA`]s.
#[derive(Clone, Debug)]
pub struct DPDADesign<S, C> {
    /// The state to start in.
    start_state: S,
    /// The character that starts on the stack.
    bottom_character: C,
    /// The states in which we accept.
    accept_states: BTreeSet<S>,
    /// The rules that drive the DPDAs.
    rulebook: DPDARulebook<S, C>,
}
impl<S: Ord, C> DPDADesign<S, C> {
    /// Constructor for the DPDADesign.
    ///
    /// # Arguments
    /// - `start_state`: The state every DPDA starts in.
    /// - `bottom_character`: The character that every DPDA starts with on its stack.
    /// - `accept_states`: The states in which the DPDAs accept.
    /// - `rulebook`: The [`DPDARulebook`] that tells the DPDAs how to move.
    ///
    /// # Returns
    /// A new DPDADesign.
    #[inline]
    pub fn new(start_state: S, bottom_character: C, accept_states: impl IntoIterator<Item = S>, rulebook: DPDARulebook<S, C>) -> Self {
        Self { start_state, bottom_character, accept_states: accept_states.into_iter().collect(), rulebook }
    }
}
impl<S, C> DPDADesign<S, C> {
    /// Returns the rules that drive the DPDAs.
    #[inline]
    pub fn rulebook(&self) -> &DPDARulebook<S, C> { &self.rulebook }
}
impl<S: Clone, C: Clone> DPDADesign<S, C> {
    /// Builds a fresh [`DPDA`] in the start configuration.
    #[inline]
    pub fn to_dpda(&self) -> DPDA<'_, S, C> {
        let configuration = PDAConfiguration::new(self.start_state.clone(), Stack::new().push(self.bottom_character.clone()));
        DPDA::new(configuration, &self.accept_states, &self.rulebook)
    }
}
impl<S, C> DPDADesign<S, C>
where
    S: Clone + Debug + Eq + Hash + Ord,
    C: Clone + Debug + Eq + Hash,
{
    /// Checks whether a fresh DPDA accepts the given input.
    ///
    /// # Arguments
    /// - `input`: The characters to read.
    ///
    /// # Returns
    /// True if the DPDA ends up in an accept state without getting stuck, false otherwise.
    #[inline]
    pub fn accepts(&self, input: impl IntoIterator<Item = C>) -> bool { infallible(self.try_accepts(input)) }
}
impl<S, C> Design for DPDADesign<S, C>
where
    S: Clone + Debug + Eq + Hash + Ord,
    C: Clone + Debug + Eq + Hash,
{
    type Machine<'d>
        = DPDA<'d, S, C>
    where
        Self: 'd;

    #[inline]
    fn to_machine(&self) -> Self::Machine<'_> { self.to_dpda() }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_dpda_rulebook() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = crate::tests::balanced_parens();
        assert_eq!(rulebook.check_deterministic(), Ok(()));

        let configuration = PDAConfiguration::new(1, Stack::new().push('$'));
        let configuration = rulebook.next_configuration(&configuration, Some(&'(')).unwrap();
        assert_eq!(configuration, PDAConfiguration::new(2, "b$".chars().collect()));
        let configuration = rulebook.next_configuration(&configuration, Some(&'(')).unwrap();
        assert_eq!(configuration, PDAConfiguration::new(2, "bb$".chars().collect()));
        let configuration = rulebook.next_configuration(&configuration, Some(&')')).unwrap();
        assert_eq!(configuration, PDAConfiguration::new(2, "b$".chars().collect()));
    }

    #[test]
    fn test_dpda_read() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = crate::tests::balanced_parens();
        let accept = BTreeSet::from([1]);
        let mut dpda = DPDA::new(PDAConfiguration::new(1, Stack::new().push('$')), &accept, &rulebook);
        assert!(dpda.is_accepting());
        dpda.read_sequence("(()".chars()).unwrap();
        assert!(!dpda.is_accepting());
        assert_eq!(dpda.current_configuration(), PDAConfiguration::new(2, "b$".chars().collect()));
        dpda.read_character(&')');
        // The free move back to 1 is followed when we look
        assert_eq!(dpda.current_configuration(), PDAConfiguration::new(1, Stack::new().push('$')));
        assert!(dpda.is_accepting());
    }

    #[test]
    fn test_dpda_stuck_absorbs() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = crate::tests::balanced_parens();
        let accept = BTreeSet::from([1]);
        let mut dpda = DPDA::new(PDAConfiguration::new(1, Stack::new().push('$')), &accept, &rulebook);
        dpda.read_sequence("())".chars()).unwrap();
        assert!(dpda.is_stuck());
        assert!(!dpda.is_accepting());

        let stuck = dpda.current_configuration();
        for c in "(()".chars() {
            dpda.read_character(&c);
            assert_eq!(dpda.current_configuration(), stuck);
        }
    }

    #[test]
    fn test_dpda_free_move_loop_is_stuck() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = DPDARulebook::new([PDARule::free(1, 2, '$', ['$']), PDARule::free(2, 1, '$', ['$'])]);
        let accept = BTreeSet::from([1, 2]);
        let dpda = DPDA::new(PDAConfiguration::new(1, Stack::new().push('$')), &accept, &rulebook);
        assert!(dpda.is_stuck());
        assert!(!dpda.is_accepting());
    }

    #[test]
    fn test_dpda_design() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let design = DPDADesign::new(1, '$', [1], crate::tests::balanced_parens());
        assert!(design.accepts("(((((((((())))))))))".chars()));
        assert!(design.accepts("()(())((()))(()(()))".chars()));
        assert!(design.accepts("".chars()));
        assert!(!design.accepts("())".chars()));
        assert!(!design.accepts("(()".chars()));
        assert!(!design.accepts("())(".chars()));
    }

    #[test]
    fn test_dpda_design_equal_as() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        // Strings with as many a's as b's
        let rulebook = DPDARulebook::new([
            PDARule::new(1, 'a', 2, '$', ['a', '$']),
            PDARule::new(1, 'b', 2, '$', ['b', '$']),
            PDARule::new(2, 'a', 2, 'a', ['a', 'a']),
            PDARule::new(2, 'b', 2, 'b', ['b', 'b']),
            PDARule::new(2, 'a', 2, 'b', []),
            PDARule::new(2, 'b', 2, 'a', []),
            PDARule::free(2, 1, '$', ['$']),
        ]);
        let design = DPDADesign::new(1, '$', [1], rulebook);
        assert!(design.accepts("ababab".chars()));
        assert!(design.accepts("bbbaaaab".chars()));
        assert!(!design.accepts("baa".chars()));
    }
}
