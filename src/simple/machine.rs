//  MACHINE.rs
//    by Lut99
//
//  Created:
//    09 Jun 2025, 15:30:02
//  Last edited:
//    17 Jun 2025, 16:44:18
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements a [`Machine`] that runs SIMPLE programs by reducing them
//!   one step at a time until there's nothing left to reduce.
//

use super::{Environment, Error, Node};
use crate::log::debug;


/***** LIBRARY FUNCTIONS *****/
/// Runs a statement to completion.
///
/// Shorthand for building a [`Machine`] and calling [`Machine::run()`] on it.
///
/// # Arguments
/// - `statement`: The [`Node`] to run.
/// - `env`: The [`Environment`] to start in.
///
/// # Returns
/// The environment after the statement has finished.
///
/// # Errors
/// This function errors if any of the reduction steps fails.
#[inline]
pub fn run(statement: Node, env: Environment) -> Result<Environment, Error> {
    let mut machine = Machine::new(statement, env);
    machine.run()?;
    Ok(machine.into_environment())
}





/***** LIBRARY *****/
/// Runs SIMPLE programs using their small-step semantics.
#[derive(Clone, Debug)]
pub struct Machine {
    /// What's left of the program.
    statement:   Node,
    /// The variables as they are right now.
    environment: Environment,
}
impl Machine {
    /// Constructor for the Machine.
    ///
    /// # Arguments
    /// - `statement`: The [`Node`] to run. May be an expression too, in which case running it
    ///   leaves a value.
    /// - `environment`: The [`Environment`] to start in.
    ///
    /// # Returns
    /// A new Machine.
    #[inline]
    pub fn new(statement: Node, environment: Environment) -> Self { Self { statement, environment } }

    /// Returns what's left of the program.
    #[inline]
    pub fn statement(&self) -> &Node { &self.statement }

    /// Returns the variables as they are right now.
    #[inline]
    pub fn environment(&self) -> &Environment { &self.environment }

    /// Consumes the machine to get the environment back.
    #[inline]
    pub fn into_environment(self) -> Environment { self.environment }

    /// Returns whether there is nothing left to reduce.
    #[inline]
    pub fn is_done(&self) -> bool { !self.statement.is_reducible() }



    /// Reduces the program by one step.
    ///
    /// # Errors
    /// This function errors if the program is [done](Machine::is_done()) already, or if reducing
    /// it fails. In that case, the machine is left as it was.
    pub fn step(&mut self) -> Result<(), Error> {
        let (statement, environment): (Node, Environment) = self.statement.reduce(self.environment.clone())?;
        self.statement = statement;
        self.environment = environment;
        Ok(())
    }

    /// Reduces the program until it is [done](Machine::is_done()).
    ///
    /// Every intermediate state is logged at debug level. Note that programs that loop forever
    /// make this function never return.
    ///
    /// # Errors
    /// This function errors if any of the reduction steps fails.
    pub fn run(&mut self) -> Result<(), Error> {
        while !self.is_done() {
            debug!("{}, {}", self.statement, self.environment);
            self.step()?;
        }
        debug!("{}, {}", self.statement, self.environment);
        Ok(())
    }

    /// Reduces the program until it is done, collecting all states on the way.
    ///
    /// # Returns
    /// Every (program, environment)-pair the machine went through, starting with the current one
    /// and ending with the final one.
    ///
    /// # Errors
    /// This function errors if any of the reduction steps fails.
    pub fn trace(&mut self) -> Result<Vec<(Node, Environment)>, Error> {
        let mut states: Vec<(Node, Environment)> = vec![(self.statement.clone(), self.environment.clone())];
        while !self.is_done() {
            self.step()?;
            states.push((self.statement.clone(), self.environment.clone()));
        }
        Ok(states)
    }
}





/***** TESTS *****/
