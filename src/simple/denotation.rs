//  DENOTATION.rs
//    by Lut99
//
//  Created:
//    10 Jun 2025, 11:26:50
//  Last edited:
//    17 Jun 2025, 16:52:09
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the denotational semantics of SIMPLE, which give a
//!   [`Node`] its meaning by translating it to a Rust closure.
//!
//!   Unlike the [big-step semantics](Node::evaluate()), the tree is walked
//!   only once. Running the resulting [`Denotation`] (as often as you
//!   like) no longer looks at the [`Node`]s at all.
//

use std::fmt::{Debug, Formatter, Result as FResult};

use super::{add, multiply, Environment, Error, Evaluation, Node, Value};


/***** AUXILLARY *****/
/// The meaning of an expression: a function from environments to values.
pub type ExpressionDenotation = Box<dyn Fn(&Environment) -> Result<Value, Error>>;

/// The meaning of a statement: a function from environments to new environments.
pub type StatementDenotation = Box<dyn Fn(Environment) -> Result<Environment, Error>>;





/***** LIBRARY *****/
/// The meaning of a [`Node`], as computed by [`Node::denote()`].
pub enum Denotation {
    /// An expression's meaning.
    Expression(ExpressionDenotation),
    /// A statement's meaning.
    Statement(StatementDenotation),
}
impl Denotation {
    /// Runs the denotation in the given environment.
    ///
    /// # Arguments
    /// - `env`: The [`Environment`] to run in.
    ///
    /// # Returns
    /// The same [`Evaluation`] that [`Node::evaluate()`] would give.
    ///
    /// # Errors
    /// This function errors if the program uses unbound variables, mixes up types or overflows.
    #[inline]
    pub fn call(&self, env: Environment) -> Result<Evaluation, Error> {
        match self {
            Self::Expression(f) => f(&env).map(Evaluation::Value),
            Self::Statement(f) => f(env).map(Evaluation::Environment),
        }
    }
}
impl Debug for Denotation {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Expression(_) => write!(f, "Denotation::Expression(..)"),
            Self::Statement(_) => write!(f, "Denotation::Statement(..)"),
        }
    }
}



impl Node {
    /// Translates this node to a closure that computes what it means.
    ///
    /// # Returns
    /// A [`Denotation::Expression`] for expressions, or a [`Denotation::Statement`] for
    /// statements.
    ///
    /// # Errors
    /// This function errors if a statement is nested where an expression should be, or the
    /// other way around.
    #[inline]
    pub fn denote(&self) -> Result<Denotation, Error> {
        if self.is_expression() { self.denote_expression().map(Denotation::Expression) } else { self.denote_statement().map(Denotation::Statement) }
    }

    /// Translates this node to a closure that computes its value.
    ///
    /// # Errors
    /// This function errors if this node (or a node in it that should be an expression) is a
    /// statement.
    pub fn denote_expression(&self) -> Result<ExpressionDenotation, Error> {
        match self {
            Self::Number(n) => {
                let n: i64 = *n;
                Ok(Box::new(move |_: &Environment| Ok(Value::Number(n))))
            },
            Self::Boolean(b) => {
                let b: bool = *b;
                Ok(Box::new(move |_: &Environment| Ok(Value::Boolean(b))))
            },
            Self::Variable(name) => {
                let name: String = name.clone();
                Ok(Box::new(move |env: &Environment| env.get(&name).copied().ok_or_else(|| Error::UnboundVariable { name: name.clone() })))
            },
            Self::Add(left, right) => {
                let (left, right) = (left.denote_expression()?, right.denote_expression()?);
                Ok(Box::new(move |env: &Environment| add(left(env)?.as_number()?, right(env)?.as_number()?).map(Value::Number)))
            },
            Self::Multiply(left, right) => {
                let (left, right) = (left.denote_expression()?, right.denote_expression()?);
                Ok(Box::new(move |env: &Environment| multiply(left(env)?.as_number()?, right(env)?.as_number()?).map(Value::Number)))
            },
            Self::LessThan(left, right) => {
                let (left, right) = (left.denote_expression()?, right.denote_expression()?);
                Ok(Box::new(move |env: &Environment| Ok(Value::Boolean(left(env)?.as_number()? < right(env)?.as_number()?))))
            },

            Self::Assign(_, _) | Self::If(_, _, _) | Self::Sequence(_, _) | Self::While(_, _) | Self::DoNothing => {
                Err(Error::NotAnExpression { node: self.clone() })
            },
        }
    }

    /// Translates this node to a closure that runs it.
    ///
    /// # Errors
    /// This function errors if this node (or a node in it that should be a statement) is an
    /// expression, or the other way around.
    pub fn denote_statement(&self) -> Result<StatementDenotation, Error> {
        match self {
            Self::Assign(name, expression) => {
                let name: String = name.clone();
                let expression = expression.denote_expression()?;
                Ok(Box::new(move |env: Environment| {
                    let value: Value = expression(&env)?;
                    Ok(env.with(name.clone(), value))
                }))
            },
            Self::If(condition, consequence, alternative) => {
                let condition = condition.denote_expression()?;
                let (consequence, alternative) = (consequence.denote_statement()?, alternative.denote_statement()?);
                Ok(Box::new(move |env: Environment| if condition(&env)?.as_boolean()? { consequence(env) } else { alternative(env) }))
            },
            Self::Sequence(first, second) => {
                let (first, second) = (first.denote_statement()?, second.denote_statement()?);
                Ok(Box::new(move |env: Environment| second(first(env)?)))
            },
            Self::While(condition, body) => {
                let (condition, body) = (condition.denote_expression()?, body.denote_statement()?);
                Ok(Box::new(move |mut env: Environment| {
                    while condition(&env)?.as_boolean()? {
                        env = body(env)?;
                    }
                    Ok(env)
                }))
            },
            Self::DoNothing => Ok(Box::new(|env: Environment| Ok(env))),

            Self::Number(_) | Self::Boolean(_) | Self::Variable(_) | Self::Add(_, _) | Self::Multiply(_, _) | Self::LessThan(_, _) => {
                Err(Error::NotAStatement { node: self.clone() })
            },
        }
    }
}





/***** TESTS *****/
