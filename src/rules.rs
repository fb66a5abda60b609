//  RULES.rs
//    by Lut99
//
//  Created:
//    02 Jun 2025, 10:31:54
//  Last edited:
//    17 Jun 2025, 11:20:38
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the shape shared by all machines in this crate: a [`Rule`]
//!   that maps one configuration to the next, rulebooks that collect
//!   them, and the [`Machine`]- and [`Design`]-traits that drive them.
//!
//!   Two kinds of rulebooks exist:
//!   - A [`DeterministicRulebook`], which assumes at most one rule applies to any configuration
//!     and always uses the _first_ one (in declaration order) that does; and
//!   - A [`NondeterministicRulebook`], which follows _all_ rules that apply and therefore
//!     operates on sets of configurations.
//

use std::collections::{BTreeSet, HashSet};
use std::convert::Infallible;
use std::error;
use std::fmt::{Debug, Display, Formatter, Result as FResult};
use std::hash::Hash;

use itertools::Itertools as _;

use crate::log::{trace, warn};


/***** ERRORS *****/
/// Returned by a [`DeterministicRulebook`] when no rule applies to a configuration.
///
/// This is fatal for machines that assume their rulebook is total (e.g., the
/// [DFA](crate::fa::DFA)). Machines that model getting stuck (e.g., the
/// [DPDA](crate::pda::DPDA)) never return it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NoApplicableRule<C, A> {
    /// The configuration for which no rule was found.
    pub configuration: C,
    /// The symbol that was read, or [`None`] if we looked for a free move.
    pub symbol: Option<A>,
}
impl<C: Debug, A: Debug> Display for NoApplicableRule<C, A> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match &self.symbol {
            Some(symbol) => write!(f, "No rule applies to configuration {:?} when reading {:?}", self.configuration, symbol),
            None => write!(f, "No free move applies to configuration {:?}", self.configuration),
        }
    }
}
impl<C: Debug, A: Debug> error::Error for NoApplicableRule<C, A> {}

/// Returned by [`DeterministicRulebook::check_deterministic()`] if two rules compete for the same
/// configuration and symbol.
///
/// Such a rulebook still works: the rule declared first always wins. This error just makes that
/// policy observable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AmbiguousRuleSet {
    /// The index of the rule that will be used.
    pub first:  usize,
    /// The index of the rule that is shadowed by `first`.
    pub second: usize,
}
impl Display for AmbiguousRuleSet {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        write!(
            f,
            "Rules {} and {} apply to the same configuration and symbol (only rule {} will ever be used)",
            self.first, self.second, self.first
        )
    }
}
impl error::Error for AmbiguousRuleSet {}





/***** HELPER FUNCTIONS *****/
/// Unwraps a result that can never be an error.
#[inline]
pub(crate) fn infallible<T>(res: Result<T, Infallible>) -> T {
    match res {
        Ok(value) => value,
        Err(err) => match err {},
    }
}





/***** INTERFACES *****/
/// A single declarative transition of some machine.
///
/// A rule knows when it [applies](Rule::applies_to()) and what configuration it produces when it
/// is [followed](Rule::follow()). It never mutates the configuration it is given.
pub trait Rule {
    /// The configuration this rule transforms.
    type Configuration: Debug;
    /// The input symbols that this rule may consume.
    type Symbol: Debug;


    /// Returns the input symbol this rule consumes.
    ///
    /// # Returns
    /// The symbol, or [`None`] if this is a free move.
    fn symbol(&self) -> Option<&Self::Symbol>;

    /// Checks whether this rule may fire in the given situation.
    ///
    /// # Arguments
    /// - `configuration`: The current configuration of the machine.
    /// - `symbol`: The symbol being read, or [`None`] if we are looking for free moves.
    ///
    /// # Returns
    /// True if this rule applies, false otherwise.
    fn applies_to(&self, configuration: &Self::Configuration, symbol: Option<&Self::Symbol>) -> bool;

    /// Computes the configuration after this rule fired.
    ///
    /// Only call this if [`Rule::applies_to()`] returned true for the same configuration.
    ///
    /// # Arguments
    /// - `configuration`: The configuration to start from.
    ///
    /// # Returns
    /// A new configuration.
    fn follow(&self, configuration: &Self::Configuration) -> Self::Configuration;

    /// Checks whether this rule and another one could ever apply to the same configuration and
    /// symbol.
    ///
    /// # Arguments
    /// - `other`: The other rule to compare with.
    ///
    /// # Returns
    /// True if they overlap, false if they are mutually exclusive.
    fn overlaps(&self, other: &Self) -> bool;
}



/// A machine that is driven by feeding it input symbols one at a time.
///
/// Machines are mutated in-place. Use a [`Design`] to get a fresh one for every input.
pub trait Machine {
    /// The type of input symbols.
    type Symbol;
    /// The configuration type the machine reports.
    type Configuration;
    /// Any error that may occur when reading a symbol.
    type Error;


    /// Returns the current configuration, after following any free moves.
    fn current_configuration(&self) -> Self::Configuration;

    /// Reads a single symbol from the input.
    ///
    /// # Arguments
    /// - `symbol`: The symbol to read.
    ///
    /// # Errors
    /// This function errors if the machine cannot process this symbol at all, which only happens
    /// for machines that don't model getting stuck.
    fn read_symbol(&mut self, symbol: &Self::Symbol) -> Result<(), Self::Error>;

    /// Reads a sequence of symbols, one by one and in order.
    ///
    /// # Arguments
    /// - `sequence`: Something yielding the symbols to read.
    ///
    /// # Errors
    /// This function errors if [`Machine::read_symbol()`] errors for any of the symbols.
    fn read_sequence<I>(&mut self, sequence: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Symbol>,
    {
        for symbol in sequence {
            self.read_symbol(&symbol)?;
        }
        Ok(())
    }

    /// Checks whether the machine is currently in an accepting configuration.
    fn is_accepting(&self) -> bool;
}

/// An immutable blueprint that manufactures a fresh [`Machine`] for every input it checks.
pub trait Design {
    /// The machine built by this design.
    type Machine<'d>: Machine
    where
        Self: 'd;


    /// Builds a new machine in its start configuration.
    fn to_machine(&self) -> Self::Machine<'_>;

    /// Checks whether the given input is accepted by a fresh machine.
    ///
    /// # Arguments
    /// - `input`: The sequence of symbols to feed the machine.
    ///
    /// # Returns
    /// True if the machine ends up in an accepting configuration, false otherwise.
    ///
    /// # Errors
    /// This function errors if the machine failed to read some symbol.
    fn try_accepts<'d, I>(&'d self, input: I) -> Result<bool, <Self::Machine<'d> as Machine>::Error>
    where
        I: IntoIterator<Item = <Self::Machine<'d> as Machine>::Symbol>,
    {
        let mut machine = self.to_machine();
        machine.read_sequence(input)?;
        Ok(machine.is_accepting())
    }
}





/***** LIBRARY *****/
/// A rulebook that assumes at most one rule applies to any configuration.
///
/// If that assumption is violated, the rule declared first wins. Use
/// [`DeterministicRulebook::check_deterministic()`] to find out if this happens.
#[derive(Clone, Debug)]
pub struct DeterministicRulebook<R> {
    /// The rules, in declaration order.
    rules: Vec<R>,
}
impl<R> DeterministicRulebook<R> {
    /// Returns the rules in this book, in declaration order.
    #[inline]
    pub fn rules(&self) -> &[R] { &self.rules }
}
impl<R: Rule> DeterministicRulebook<R> {
    /// Constructor for the DeterministicRulebook.
    ///
    /// Logs a warning if the rules are ambiguous.
    ///
    /// # Arguments
    /// - `rules`: The rules to put in the book, in order of preference.
    ///
    /// # Returns
    /// A new DeterministicRulebook.
    pub fn new(rules: impl IntoIterator<Item = R>) -> Self {
        let this = Self { rules: rules.into_iter().collect() };
        if let Err(_err) = this.check_deterministic() {
            warn!("{_err}");
        }
        this
    }

    /// Checks that no two rules compete for the same configuration and symbol.
    ///
    /// # Errors
    /// This function errors with the first pair of competing rules, if any.
    pub fn check_deterministic(&self) -> Result<(), AmbiguousRuleSet> {
        for (i, lhs) in self.rules.iter().enumerate() {
            for (j, rhs) in self.rules.iter().enumerate().skip(i + 1) {
                if lhs.overlaps(rhs) {
                    return Err(AmbiguousRuleSet { first: i, second: j });
                }
            }
        }
        Ok(())
    }

    /// Finds the rule to use for the given configuration and symbol.
    ///
    /// # Arguments
    /// - `configuration`: The configuration to find a rule for.
    /// - `symbol`: The symbol being read, or [`None`] for free moves.
    ///
    /// # Returns
    /// The first rule that applies, or [`None`] if there is none.
    #[inline]
    pub fn rule_for(&self, configuration: &R::Configuration, symbol: Option<&R::Symbol>) -> Option<&R> {
        self.rules.iter().find(|rule| rule.applies_to(configuration, symbol))
    }

    /// Checks whether any rule applies to the given configuration and symbol.
    #[inline]
    pub fn applies_to(&self, configuration: &R::Configuration, symbol: Option<&R::Symbol>) -> bool {
        self.rule_for(configuration, symbol).is_some()
    }
}
impl<R> DeterministicRulebook<R>
where
    R: Rule,
    R::Configuration: Clone,
    R::Symbol: Clone,
{
    /// Computes the next configuration by following the rule that applies.
    ///
    /// # Arguments
    /// - `configuration`: The configuration to start from.
    /// - `symbol`: The symbol being read, or [`None`] for free moves.
    ///
    /// # Returns
    /// The configuration after following the [rule for](DeterministicRulebook::rule_for()) it.
    ///
    /// # Errors
    /// This function errors if no rule applies.
    pub fn next_configuration(
        &self,
        configuration: &R::Configuration,
        symbol: Option<&R::Symbol>,
    ) -> Result<R::Configuration, NoApplicableRule<R::Configuration, R::Symbol>> {
        match self.rule_for(configuration, symbol) {
            Some(rule) => Ok(rule.follow(configuration)),
            None => Err(NoApplicableRule { configuration: configuration.clone(), symbol: symbol.cloned() }),
        }
    }
}
impl<R> DeterministicRulebook<R>
where
    R: Rule,
    R::Configuration: Clone + Eq + Hash,
{
    /// Keeps following free moves until none apply anymore.
    ///
    /// # Arguments
    /// - `configuration`: The configuration to start from.
    ///
    /// # Returns
    /// The configuration in which no free move applies, or [`None`] if the free moves loop back
    /// to a configuration that was already visited (i.e., they would go on forever).
    pub fn follow_free_moves(&self, configuration: R::Configuration) -> Option<R::Configuration> {
        let mut seen: HashSet<R::Configuration> = HashSet::new();
        let mut configuration: R::Configuration = configuration;
        while let Some(rule) = self.rule_for(&configuration, None) {
            if !seen.insert(configuration.clone()) {
                trace!("Free moves loop back to {configuration:?}");
                return None;
            }
            configuration = rule.follow(&configuration);
        }
        Some(configuration)
    }
}



/// A rulebook that follows all rules that apply, and therefore operates on sets of
/// configurations.
#[derive(Clone, Debug)]
pub struct NondeterministicRulebook<R> {
    /// The rules, in declaration order.
    rules: Vec<R>,
}
impl<R> NondeterministicRulebook<R> {
    /// Returns the rules in this book, in declaration order.
    #[inline]
    pub fn rules(&self) -> &[R] { &self.rules }

    /// Consumes the rulebook to get the rules back.
    #[inline]
    pub fn into_rules(self) -> Vec<R> { self.rules }
}
impl<R: Rule> NondeterministicRulebook<R> {
    /// Constructor for the NondeterministicRulebook.
    ///
    /// # Arguments
    /// - `rules`: The rules to put in the book.
    ///
    /// # Returns
    /// A new NondeterministicRulebook.
    #[inline]
    pub fn new(rules: impl IntoIterator<Item = R>) -> Self { Self { rules: rules.into_iter().collect() } }

    /// Finds all rules that apply to the given configuration and symbol.
    #[inline]
    pub fn rules_for<'s>(&'s self, configuration: &'s R::Configuration, symbol: Option<&'s R::Symbol>) -> impl 's + Iterator<Item = &'s R> {
        self.rules.iter().filter(move |rule| rule.applies_to(configuration, symbol))
    }

    /// Follows all rules that apply to the given configuration and symbol.
    ///
    /// # Returns
    /// An iterator over the resulting configurations. May contain duplicates.
    #[inline]
    pub fn follow_rules_for<'s>(
        &'s self,
        configuration: &'s R::Configuration,
        symbol: Option<&'s R::Symbol>,
    ) -> impl 's + Iterator<Item = R::Configuration> {
        self.rules_for(configuration, symbol).map(move |rule| rule.follow(configuration))
    }
}
impl<R> NondeterministicRulebook<R>
where
    R: Rule,
    R::Configuration: Clone + Ord,
{
    /// Computes all configurations reachable by reading one symbol from any of the given ones.
    ///
    /// # Arguments
    /// - `configurations`: The set of configurations to start from.
    /// - `symbol`: The symbol to read, or [`None`] to take a single free move.
    ///
    /// # Returns
    /// The union of the results of all applicable rules.
    pub fn next_configurations(&self, configurations: &BTreeSet<R::Configuration>, symbol: Option<&R::Symbol>) -> BTreeSet<R::Configuration> {
        configurations.iter().flat_map(|configuration| self.follow_rules_for(configuration, symbol)).collect()
    }

    /// Computes the closure of a set of configurations under free moves.
    ///
    /// The set only ever grows and every configuration is expanded once, so this terminates as
    /// long as finitely many configurations are reachable.
    ///
    /// # Arguments
    /// - `configurations`: The set of configurations to start from.
    ///
    /// # Returns
    /// The smallest superset of `configurations` that is closed under free moves.
    pub fn follow_free_moves(&self, configurations: BTreeSet<R::Configuration>) -> BTreeSet<R::Configuration> {
        let mut closure: BTreeSet<R::Configuration> = configurations;
        let mut todo: Vec<R::Configuration> = closure.iter().cloned().collect();
        while let Some(configuration) = todo.pop() {
            for next in self.follow_rules_for(&configuration, None) {
                if closure.insert(next.clone()) {
                    trace!("Free move {configuration:?} --> {next:?}");
                    todo.push(next);
                }
            }
        }
        closure
    }
}
impl<R> NondeterministicRulebook<R>
where
    R: Rule,
    R::Symbol: Clone + Eq + Hash,
{
    /// Returns all symbols consumed by any rule in this book.
    ///
    /// # Returns
    /// The symbols, deduplicated and in order of first occurrence. Free moves are not included.
    pub fn alphabet(&self) -> Vec<R::Symbol> { self.rules.iter().filter_map(|rule| rule.symbol()).unique().cloned().collect() }
}
