//  MOD.rs
//    by Lut99
//
//  Created:
//    02 Jun 2025, 13:48:10
//  Last edited:
//    17 Jun 2025, 11:24:51
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements deterministic and nondeterministic finite automata.
//!
//!   A finite automaton only remembers a state. The [`DFA`] is always in
//!   exactly one of them, while the [`NFA`] is in a set of them at the same
//!   time (and can move between them without reading anything).
//

// Nested modules
pub mod simulation;

// Imports
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt::{Debug, Display, Formatter, Result as FResult};

use itertools::Itertools as _;
pub use simulation::NFASimulation;

use crate::rules::{infallible, DeterministicRulebook, Design, Machine, NoApplicableRule, NondeterministicRulebook, Rule};


/***** AUXILLARY *****/
/// A [`DeterministicRulebook`] for finite automata.
pub type DFARulebook<S, C> = DeterministicRulebook<FARule<S, C>>;

/// A [`NondeterministicRulebook`] for finite automata.
pub type NFARulebook<S, C> = NondeterministicRulebook<FARule<S, C>>;





/***** LIBRARY *****/
/// A single transition of a finite automaton.
///
/// # Syntax
/// ```plain
/// 1 --a--> 2
/// 1 --ε--> 2
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FARule<S, C> {
    /// The state in which this rule applies.
    pub state:      S,
    /// The character consumed, or [`None`] for a free move.
    pub character:  Option<C>,
    /// The state after following this rule.
    pub next_state: S,
}
impl<S, C> FARule<S, C> {
    /// Constructor for the FARule.
    ///
    /// # Arguments
    /// - `state`: The state in which this rule applies.
    /// - `character`: The character consumed. Give [`None`] to get a free move.
    /// - `next_state`: The state after following this rule.
    ///
    /// # Returns
    /// A new FARule.
    #[inline]
    pub fn new(state: S, character: impl Into<Option<C>>, next_state: S) -> Self { Self { state, character: character.into(), next_state } }

    /// Constructor for an FARule that represents a free move.
    #[inline]
    pub fn free(state: S, next_state: S) -> Self { Self { state, character: None, next_state } }
}
impl<S, C> Rule for FARule<S, C>
where
    S: Clone + Debug + Eq,
    C: Debug + Eq,
{
    type Configuration = S;
    type Symbol = C;

    #[inline]
    fn symbol(&self) -> Option<&Self::Symbol> { self.character.as_ref() }

    #[inline]
    fn applies_to(&self, configuration: &Self::Configuration, symbol: Option<&Self::Symbol>) -> bool {
        self.state == *configuration && self.character.as_ref() == symbol
    }

    #[inline]
    fn follow(&self, _configuration: &Self::Configuration) -> Self::Configuration { self.next_state.clone() }

    #[inline]
    fn overlaps(&self, other: &Self) -> bool { self.state == other.state && self.character == other.character }
}
impl<S: Display, C: Display> Display for FARule<S, C> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match &self.character {
            Some(c) => write!(f, "{} --{}--> {}", self.state, c, self.next_state),
            None => write!(f, "{} --ε--> {}", self.state, self.next_state),
        }
    }
}



impl<S, C> DFARulebook<S, C>
where
    S: Clone + Debug + Eq,
    C: Clone + Debug + Eq,
{
    /// Computes the state a DFA moves to when reading a character.
    ///
    /// If more than one rule applies, the one declared first is used.
    ///
    /// # Arguments
    /// - `state`: The current state.
    /// - `character`: The character to read.
    ///
    /// # Returns
    /// The next state.
    ///
    /// # Errors
    /// This function errors if no rule applies to `state` and `character`.
    #[inline]
    pub fn next_state(&self, state: &S, character: &C) -> Result<S, NoApplicableRule<S, C>> { self.next_configuration(state, Some(character)) }
}

impl<S, C> NFARulebook<S, C>
where
    S: Clone + Debug + Ord,
    C: Debug + Eq,
{
    /// Computes all states reachable from a set of states by reading a character.
    ///
    /// # Arguments
    /// - `states`: The current set of states.
    /// - `character`: The character to read, or [`None`] to take a single free move.
    ///
    /// # Returns
    /// The union of the next states of all rules that apply.
    #[inline]
    pub fn next_states(&self, states: &BTreeSet<S>, character: Option<&C>) -> BTreeSet<S> { self.next_configurations(states, character) }
}



/// A deterministic finite automaton.
#[derive(Clone, Debug)]
pub struct DFA<'r, S, C> {
    /// The state we're in.
    current_state: S,
    /// The states in which we accept.
    accept_states: &'r BTreeSet<S>,
    /// The rules that drive us.
    rulebook:      &'r DFARulebook<S, C>,
}
impl<'r, S, C> DFA<'r, S, C> {
    /// Constructor for the DFA.
    ///
    /// # Arguments
    /// - `current_state`: The state to start in.
    /// - `accept_states`: The states in which the DFA accepts.
    /// - `rulebook`: The [`DFARulebook`] that tells us how to move.
    ///
    /// # Returns
    /// A new DFA.
    #[inline]
    pub fn new(current_state: S, accept_states: &'r BTreeSet<S>, rulebook: &'r DFARulebook<S, C>) -> Self {
        Self { current_state, accept_states, rulebook }
    }

    /// Returns the state we're in.
    #[inline]
    pub fn current_state(&self) -> &S { &self.current_state }
}
impl<'r, S, C> Machine for DFA<'r, S, C>
where
    S: Clone + Debug + Ord,
    C: Clone + Debug + Eq,
{
    type Symbol = C;
    type Configuration = S;
    type Error = NoApplicableRule<S, C>;

    #[inline]
    fn current_configuration(&self) -> Self::Configuration { self.current_state.clone() }

    #[inline]
    fn read_symbol(&mut self, symbol: &Self::Symbol) -> Result<(), Self::Error> {
        self.current_state = self.rulebook.next_state(&self.current_state, symbol)?;
        Ok(())
    }

    #[inline]
    fn is_accepting(&self) -> bool { self.accept_states.contains(&self.current_state) }
}

/// A blueprint for [`DFA`]s.
#[derive(Clone, Debug)]
pub struct DFADesign<S, C> {
    /// The state to start in.
    start_state:   S,
    /// The states in which we accept.
    accept_states: BTreeSet<S>,
    /// The rules that drive the DFAs.
    rulebook:      DFARulebook<S, C>,
}
impl<S: Ord, C> DFADesign<S, C> {
    /// Constructor for the DFADesign.
    ///
    /// # Arguments
    /// - `start_state`: The state every DFA starts in.
    /// - `accept_states`: The states in which the DFAs accept.
    /// - `rulebook`: The [`DFARulebook`] that tells the DFAs how to move.
    ///
    /// # Returns
    /// A new DFADesign.
    #[inline]
    pub fn new(start_state: S, accept_states: impl IntoIterator<Item = S>, rulebook: DFARulebook<S, C>) -> Self {
        Self { start_state, accept_states: accept_states.into_iter().collect(), rulebook }
    }
}
impl<S, C> DFADesign<S, C> {
    /// Returns the state every DFA starts in.
    #[inline]
    pub fn start_state(&self) -> &S { &self.start_state }

    /// Returns the states in which the DFAs accept.
    #[inline]
    pub fn accept_states(&self) -> &BTreeSet<S> { &self.accept_states }

    /// Returns the rules that drive the DFAs.
    #[inline]
    pub fn rulebook(&self) -> &DFARulebook<S, C> { &self.rulebook }
}
impl<S: Clone, C> DFADesign<S, C> {
    /// Builds a fresh [`DFA`] in the start state.
    #[inline]
    pub fn to_dfa(&self) -> DFA<'_, S, C> { DFA::new(self.start_state.clone(), &self.accept_states, &self.rulebook) }
}
impl<S, C> DFADesign<S, C>
where
    S: Clone + Debug + Ord,
    C: Clone + Debug + Eq,
{
    /// Checks whether a fresh DFA accepts the given input.
    ///
    /// # Arguments
    /// - `input`: The characters to read.
    ///
    /// # Returns
    /// True if the DFA ends up in an accept state, false otherwise.
    ///
    /// # Errors
    /// This function errors if the rulebook has no rule for some character.
    #[inline]
    pub fn accepts(&self, input: impl IntoIterator<Item = C>) -> Result<bool, NoApplicableRule<S, C>> { self.try_accepts(input) }
}
impl<S, C> Design for DFADesign<S, C>
where
    S: Clone + Debug + Ord,
    C: Clone + Debug + Eq,
{
    type Machine<'d>
        = DFA<'d, S, C>
    where
        Self: 'd;

    #[inline]
    fn to_machine(&self) -> Self::Machine<'_> { self.to_dfa() }
}



/// A nondeterministic finite automaton.
///
/// The set of states we're in is always reported _after_ following all free moves.
#[derive(Clone, Debug)]
pub struct NFA<'r, S, C> {
    /// The states we're in, before following free moves.
    current_states: BTreeSet<S>,
    /// The states in which we accept.
    accept_states:  &'r BTreeSet<S>,
    /// The rules that drive us.
    rulebook:       &'r NFARulebook<S, C>,
}
impl<'r, S, C> NFA<'r, S, C> {
    /// Constructor for the NFA.
    ///
    /// # Arguments
    /// - `current_states`: The set of states to start in.
    /// - `accept_states`: The states in which the NFA accepts.
    /// - `rulebook`: The [`NFARulebook`] that tells us how to move.
    ///
    /// # Returns
    /// A new NFA.
    #[inline]
    pub fn new(current_states: BTreeSet<S>, accept_states: &'r BTreeSet<S>, rulebook: &'r NFARulebook<S, C>) -> Self {
        Self { current_states, accept_states, rulebook }
    }
}
impl<'r, S, C> NFA<'r, S, C>
where
    S: Clone + Debug + Ord,
    C: Debug + Eq,
{
    /// Returns the states we're in, including everything reachable through free moves.
    #[inline]
    pub fn current_states(&self) -> BTreeSet<S> { self.rulebook.follow_free_moves(self.current_states.clone()) }

    /// Reads a single character.
    ///
    /// # Arguments
    /// - `character`: The character to read.
    #[inline]
    pub fn read_character(&mut self, character: &C) { self.current_states = self.rulebook.next_states(&self.current_states(), Some(character)); }

    /// Checks whether any of the states we're in is an accept state.
    #[inline]
    pub fn is_accepting(&self) -> bool { !self.current_states().is_disjoint(self.accept_states) }
}
impl<'r, S, C> Machine for NFA<'r, S, C>
where
    S: Clone + Debug + Ord,
    C: Debug + Eq,
{
    type Symbol = C;
    type Configuration = BTreeSet<S>;
    type Error = Infallible;

    #[inline]
    fn current_configuration(&self) -> Self::Configuration { self.current_states() }

    #[inline]
    fn read_symbol(&mut self, symbol: &Self::Symbol) -> Result<(), Self::Error> {
        self.read_character(symbol);
        Ok(())
    }

    #[inline]
    fn is_accepting(&self) -> bool { NFA::is_accepting(self) }
}

/// A blueprint for [`NFA`]s.
#[derive(Clone, Debug)]
pub struct NFADesign<S, C> {
    /// The state to start in.
    start_state:   S,
    /// The states in which we accept.
    accept_states: BTreeSet<S>,
    /// The rules that drive the NFAs.
    rulebook:      NFARulebook<S, C>,
}
impl<S: Ord, C> NFADesign<S, C> {
    /// Constructor for the NFADesign.
    ///
    /// # Arguments
    /// - `start_state`: The state every NFA starts in.
    /// - `accept_states`: The states in which the NFAs accept.
    /// - `rulebook`: The [`NFARulebook`] that tells the NFAs how to move.
    ///
    /// # Returns
    /// A new NFADesign.
    #[inline]
    pub fn new(start_state: S, accept_states: impl IntoIterator<Item = S>, rulebook: NFARulebook<S, C>) -> Self {
        Self { start_state, accept_states: accept_states.into_iter().collect(), rulebook }
    }
}
impl<S, C> NFADesign<S, C> {
    /// Returns the state every NFA starts in.
    #[inline]
    pub fn start_state(&self) -> &S { &self.start_state }

    /// Returns the states in which the NFAs accept.
    #[inline]
    pub fn accept_states(&self) -> &BTreeSet<S> { &self.accept_states }

    /// Returns the rules that drive the NFAs.
    #[inline]
    pub fn rulebook(&self) -> &NFARulebook<S, C> { &self.rulebook }

    /// Takes the design apart.
    ///
    /// # Returns
    /// A tuple of the start state, the accept states and the rulebook.
    #[inline]
    pub fn into_parts(self) -> (S, BTreeSet<S>, NFARulebook<S, C>) { (self.start_state, self.accept_states, self.rulebook) }

    /// Builds an [`NFA`] that starts in an arbitrary set of states.
    ///
    /// # Arguments
    /// - `current_states`: The states the new NFA is in.
    #[inline]
    pub fn to_nfa_with(&self, current_states: BTreeSet<S>) -> NFA<'_, S, C> { NFA::new(current_states, &self.accept_states, &self.rulebook) }
}
impl<S: Clone + Ord, C> NFADesign<S, C> {
    /// Builds a fresh [`NFA`] in the start state.
    #[inline]
    pub fn to_nfa(&self) -> NFA<'_, S, C> { self.to_nfa_with(BTreeSet::from([self.start_state.clone()])) }
}
impl<S, C> NFADesign<S, C>
where
    S: Clone + Debug + Ord,
    C: Debug + Eq,
{
    /// Checks whether a fresh NFA accepts the given input.
    ///
    /// # Arguments
    /// - `input`: The characters to read.
    ///
    /// # Returns
    /// True if any of the states the NFA ends up in is an accept state, false otherwise.
    #[inline]
    pub fn accepts(&self, input: impl IntoIterator<Item = C>) -> bool { infallible(self.try_accepts(input)) }
}
impl<S, C> Design for NFADesign<S, C>
where
    S: Clone + Debug + Ord,
    C: Debug + Eq,
{
    type Machine<'d>
        = NFA<'d, S, C>
    where
        Self: 'd;

    #[inline]
    fn to_machine(&self) -> Self::Machine<'_> { self.to_nfa() }
}
impl<S: Display, C: Display> Display for NFADesign<S, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        writeln!(f, "start:  {}", self.start_state)?;
        writeln!(f, "accept: {{{}}}", self.accept_states.iter().join(", "))?;
        for rule in self.rulebook.rules() {
            writeln!(f, "  {rule}")?;
        }
        Ok(())
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    fn dfa_rulebook() -> DFARulebook<u32, char> {
        DFARulebook::new([
            FARule::new(1, 'a', 2),
            FARule::new(1, 'b', 1),
            FARule::new(2, 'a', 2),
            FARule::new(2, 'b', 3),
            FARule::new(3, 'a', 3),
            FARule::new(3, 'b', 3),
        ])
    }


    #[test]
    fn test_dfa_rulebook_next_state() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = dfa_rulebook();
        assert_eq!(rulebook.next_state(&1, &'a'), Ok(2));
        assert_eq!(rulebook.next_state(&1, &'b'), Ok(1));
        assert_eq!(rulebook.next_state(&2, &'b'), Ok(3));
        assert_eq!(rulebook.next_state(&4, &'a'), Err(NoApplicableRule { configuration: 4, symbol: Some('a') }));
    }

    #[test]
    fn test_dfa_rulebook_first_match_wins() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = DFARulebook::new([FARule::new(1, 'a', 2), FARule::new(1, 'b', 1), FARule::new(1, 'a', 3)]);
        assert_eq!(rulebook.next_state(&1, &'a'), Ok(2));
        assert_eq!(rulebook.check_deterministic(), Err(crate::rules::AmbiguousRuleSet { first: 0, second: 2 }));
        assert_eq!(dfa_rulebook().check_deterministic(), Ok(()));
    }

    #[test]
    fn test_dfa_read() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = dfa_rulebook();
        let accept = BTreeSet::from([3]);
        let mut dfa = DFA::new(1, &accept, &rulebook);
        assert!(!dfa.is_accepting());
        dfa.read_symbol(&'b').unwrap();
        assert!(!dfa.is_accepting());
        for _ in 0..3 {
            dfa.read_symbol(&'a').unwrap();
        }
        assert!(!dfa.is_accepting());
        dfa.read_symbol(&'b').unwrap();
        assert!(dfa.is_accepting());

        // Sequences are read left-to-right, so order matters
        let mut dfa = DFA::new(1, &accept, &rulebook);
        dfa.read_sequence("baaab".chars()).unwrap();
        assert!(dfa.is_accepting());
        let mut dfa = DFA::new(1, &accept, &rulebook);
        dfa.read_sequence("baaba".chars()).unwrap();
        assert!(dfa.is_accepting());
        let mut dfa = DFA::new(1, &accept, &rulebook);
        dfa.read_sequence("bbbaa".chars()).unwrap();
        assert_eq!(dfa.current_state(), &2);
    }

    #[test]
    fn test_dfa_design() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let design = DFADesign::new(1, [3], dfa_rulebook());
        assert_eq!(design.accepts("a".chars()), Ok(false));
        assert_eq!(design.accepts("baa".chars()), Ok(false));
        assert_eq!(design.accepts("baba".chars()), Ok(true));
        // Earlier calls don't leak into later ones
        assert_eq!(design.accepts("".chars()), Ok(false));

        // Partial rulebooks fail loudly
        let partial = DFADesign::new(1, [2], DFARulebook::new([FARule::new(1, 'a', 2)]));
        assert_eq!(partial.accepts("a".chars()), Ok(true));
        assert_eq!(partial.accepts("ab".chars()), Err(NoApplicableRule { configuration: 2, symbol: Some('b') }));
    }

    #[test]
    fn test_nfa_rulebook() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = crate::tests::third_from_last_b();
        assert_eq!(rulebook.next_states(&BTreeSet::from([1]), Some(&'b')), BTreeSet::from([1, 2]));
        assert_eq!(rulebook.next_states(&BTreeSet::from([1, 2]), Some(&'a')), BTreeSet::from([1, 3]));
        assert_eq!(rulebook.next_states(&BTreeSet::from([1, 3]), Some(&'b')), BTreeSet::from([1, 2, 4]));
    }

    #[test]
    fn test_nfa_read() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook = crate::tests::third_from_last_b();
        let accept = BTreeSet::from([4]);
        assert!(!NFA::new(BTreeSet::from([1]), &accept, &rulebook).is_accepting());
        assert!(NFA::new(BTreeSet::from([1, 2, 4]), &accept, &rulebook).is_accepting());

        let mut nfa = NFA::new(BTreeSet::from([1]), &accept, &rulebook);
        nfa.read_character(&'b');
        assert!(!nfa.is_accepting());
        nfa.read_character(&'a');
        assert!(!nfa.is_accepting());
        nfa.read_character(&'b');
        assert!(nfa.is_accepting());
    }

    #[test]
    fn test_nfa_design() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let design = NFADesign::new(1, [4], crate::tests::third_from_last_b());
        assert!(design.accepts("bab".chars()));
        assert!(design.accepts("bbbbb".chars()));
        assert!(!design.accepts("bbabb".chars()));
    }

    #[test]
    fn test_nfa_free_moves() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        // Accepts multiples of two or three
        let rulebook = NFARulebook::new([
            FARule::free(1, 2),
            FARule::free(1, 4),
            FARule::new(2, 'a', 3),
            FARule::new(3, 'a', 2),
            FARule::new(4, 'a', 5),
            FARule::new(5, 'a', 6),
            FARule::new(6, 'a', 4),
        ]);
        assert_eq!(rulebook.next_states(&BTreeSet::from([1]), None), BTreeSet::from([2, 4]));
        assert_eq!(rulebook.follow_free_moves(BTreeSet::from([1])), BTreeSet::from([1, 2, 4]));

        let design = NFADesign::new(1, [2, 4], rulebook);
        assert!(design.accepts("aa".chars()));
        assert!(design.accepts("aaa".chars()));
        assert!(!design.accepts("aaaaa".chars()));
        assert!(design.accepts("aaaaaa".chars()));
    }

    #[test]
    fn test_nfa_free_moves_idempotent_on_cycles() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rulebook: NFARulebook<u32, char> = NFARulebook::new([FARule::free(1, 2), FARule::free(2, 3), FARule::free(3, 1), FARule::new(3, 'a', 4)]);
        let once = rulebook.follow_free_moves(BTreeSet::from([1]));
        assert_eq!(once, BTreeSet::from([1, 2, 3]));
        assert_eq!(rulebook.follow_free_moves(once.clone()), once);
    }

    #[test]
    fn test_nfa_design_render() {
        let design: NFADesign<u32, char> = NFADesign::new(1, [3, 2], NFARulebook::new([FARule::new(1, 'a', 2), FARule::free(2, 3), FARule::new(3, 'b', 1)]));
        assert_eq!(design.to_string(), "start:  1\naccept: {2, 3}\n  1 --a--> 2\n  2 --ε--> 3\n  3 --b--> 1\n");
    }

    #[test]
    fn test_nfa_alphabet() {
        let rulebook = crate::tests::simulation_rulebook();
        assert_eq!(rulebook.alphabet(), vec!['a', 'b']);
    }
}
