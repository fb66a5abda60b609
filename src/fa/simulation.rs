//  SIMULATION.rs
//    by Lut99
//
//  Created:
//    03 Jun 2025, 09:12:33
//  Last edited:
//    17 Jun 2025, 11:29:02
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the subset construction, which turns an [`NFADesign`] into
//!   an equivalent [`DFADesign`].
//!
//!   The trick is that an NFA is always in some _set_ of states. If we treat every set that can
//!   possibly occur as a single state of a DFA, we get a DFA that does exactly the same thing.
//

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexSet;

use super::{DFADesign, DFARulebook, FARule, NFADesign};
use crate::log::{debug, trace};


/***** LIBRARY *****/
/// Simulates an [`NFADesign`] with a DFA whose states are sets of NFA states.
#[derive(Clone, Debug)]
pub struct NFASimulation<'d, S, C> {
    /// The design we're simulating.
    design:   &'d NFADesign<S, C>,
    /// The characters that any of its rules consume.
    alphabet: Vec<C>,
}
impl<'d, S, C> NFASimulation<'d, S, C>
where
    S: Clone + Debug + Hash + Ord,
    C: Clone + Debug + Eq + Hash,
{
    /// Constructor for the NFASimulation.
    ///
    /// # Arguments
    /// - `design`: The [`NFADesign`] to simulate.
    ///
    /// # Returns
    /// A new NFASimulation.
    #[inline]
    pub fn new(design: &'d NFADesign<S, C>) -> Self { Self { design, alphabet: design.rulebook().alphabet() } }

    /// Returns the characters that the simulated NFA can read.
    #[inline]
    pub fn alphabet(&self) -> &[C] { &self.alphabet }

    /// Computes the set of states an NFA ends up in after reading one character.
    ///
    /// # Arguments
    /// - `state`: The set of NFA states to start in.
    /// - `character`: The character to read.
    ///
    /// # Returns
    /// The resulting set of states, with all free moves followed.
    pub fn next_state(&self, state: &BTreeSet<S>, character: &C) -> BTreeSet<S> {
        let mut nfa = self.design.to_nfa_with(state.clone());
        nfa.read_character(character);
        nfa.current_states()
    }

    /// Computes the outgoing rules of a set of states, one for every character in the alphabet.
    ///
    /// # Arguments
    /// - `state`: The set of NFA states to compute the rules for.
    ///
    /// # Returns
    /// A list of [`FARule`]s between sets of states.
    pub fn rules_for(&self, state: &BTreeSet<S>) -> Vec<FARule<BTreeSet<S>, C>> {
        self.alphabet.iter().map(|character| FARule::new(state.clone(), character.clone(), self.next_state(state, character))).collect()
    }

    /// Discovers all sets of states reachable from the given ones, together with the rules
    /// between them.
    ///
    /// States are explored breadth-first. Every set is expanded exactly once, so this terminates
    /// even if the NFA has cycles. Note that the empty set is a state like any other, which makes
    /// sure that the resulting rules cover every state and character.
    ///
    /// # Arguments
    /// - `states`: The sets of states to start exploring from.
    ///
    /// # Returns
    /// A tuple of all discovered sets (in order of discovery) and the rules between them.
    pub fn discover_states_and_rules(&self, states: impl IntoIterator<Item = BTreeSet<S>>) -> (IndexSet<BTreeSet<S>>, Vec<FARule<BTreeSet<S>, C>>) {
        let mut states: IndexSet<BTreeSet<S>> = states.into_iter().collect();
        let mut rules: Vec<FARule<BTreeSet<S>, C>> = Vec::with_capacity(states.len() * self.alphabet.len());

        // The set doubles as the queue: everything after `i` has yet to be expanded
        let mut i: usize = 0;
        while let Some(state) = states.get_index(i).cloned() {
            for rule in self.rules_for(&state) {
                if states.insert(rule.next_state.clone()) {
                    trace!("Discovered state {:?}", rule.next_state);
                }
                rules.push(rule);
            }
            i += 1;
        }

        debug!("Discovered {} states and {} rules", states.len(), rules.len());
        (states, rules)
    }

    /// Builds a [`DFADesign`] that accepts the same language as the simulated NFA.
    ///
    /// # Returns
    /// A new DFADesign whose states are sets of NFA states.
    pub fn to_dfa_design(&self) -> DFADesign<BTreeSet<S>, C> {
        let start_state: BTreeSet<S> = self.design.to_nfa().current_states();
        let (states, rules) = self.discover_states_and_rules([start_state.clone()]);
        let accept_states = states.into_iter().filter(|state| self.design.to_nfa_with(state.clone()).is_accepting());
        DFADesign::new(start_state, accept_states, DFARulebook::new(rules))
    }
}





/***** TESTS *****/
