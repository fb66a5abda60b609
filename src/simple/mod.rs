//  MOD.rs
//    by Lut99
//
//  Created:
//    09 Jun 2025, 10:11:45
//  Last edited:
//    18 Jun 2025, 11:02:37
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements SIMPLE, a tiny imperative language with numbers, booleans,
//!   variables, assignments, conditionals and loops.
//!
//!   Programs are trees of [`Node`]s, and they are given meaning in three
//!   ways:
//!   - [_Small-step_](Node::reduce()) semantics, which rewrite a program one tiny step at a
//!     time (see the [`Machine`]);
//!   - [_Big-step_](Node::evaluate()) semantics, which compute the outcome of a whole node at
//!     once; and
//!   - [_Denotational_](Node::denote()) semantics, which translate a node to a Rust closure.
//!
//!   # Syntax
//!   ```plain
//!   x = 1; while (x < 5) { x = x * 3 }
//!   ```
//

// Nested modules
pub mod denotation;
#[cfg(feature = "lexer")]
pub mod lexer;
pub mod machine;
#[cfg(feature = "parser")]
pub mod parser;

// Imports
use std::collections::BTreeMap;
use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

#[cfg(feature = "macros")]
pub use computation_macros::simple;
pub use denotation::Denotation;
use enum_debug::EnumDebug;
pub use machine::{run, Machine};

use crate::log::trace;


/***** HELPER MACROS *****/
/// Implements a constructor for a binary operator [`Node`].
macro_rules! binary_constructor_impl {
    ($variant:ident) => {
        paste::paste! {
            #[doc = concat!("Creates a [`Node::", stringify!($variant), "`].\n\n# Arguments\n- `left`: The left-hand side expression.\n- `right`: The right-hand side expression.\n\n# Returns\nA new [`Node`].")]
            #[inline]
            pub fn [<$variant:snake>](left: Node, right: Node) -> Self { Self::$variant(Box::new(left), Box::new(right)) }
        }
    };
}





/***** ERRORS *****/
/// Defines errors that occur when running SIMPLE programs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A statement was given where an expression was expected.
    NotAnExpression { node: Node },
    /// An expression was given where a statement was expected.
    NotAStatement { node: Node },
    /// Tried to reduce something that is done already.
    Irreducible { node: Node },
    /// Arithmetic went out of bounds.
    Overflow { op: &'static str, left: i64, right: i64 },
    /// A value had the wrong type.
    TypeMismatch { expected: &'static str, got: Node },
    /// A variable was used before it was assigned.
    UnboundVariable { name: String },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        use Error::*;
        match self {
            NotAnExpression { node } => write!(f, "Expected an expression, found statement '{node}'"),
            NotAStatement { node } => write!(f, "Expected a statement, found expression '{node}'"),
            Irreducible { node } => write!(f, "Cannot reduce '{node}' any further"),
            Overflow { op, left, right } => write!(f, "Overflow when computing {left} {op} {right}"),
            TypeMismatch { expected, got } => write!(f, "Expected a {expected}, got '{got}'"),
            UnboundVariable { name } => write!(f, "Variable '{name}' is used before it is assigned"),
        }
    }
}
impl error::Error for Error {}





/***** AUXILLARY *****/
/// The values that SIMPLE expressions compute.
#[derive(Clone, Copy, Debug, EnumDebug, Eq, Hash, PartialEq)]
pub enum Value {
    /// An integer.
    Number(i64),
    /// A truth value.
    Boolean(bool),
}
impl Value {
    /// Returns the [`Node`] that represents this value.
    #[inline]
    pub fn to_node(self) -> Node {
        match self {
            Self::Number(n) => Node::Number(n),
            Self::Boolean(b) => Node::Boolean(b),
        }
    }

    /// Returns this value as a number.
    ///
    /// # Errors
    /// This function errors if this is not a [`Value::Number`].
    #[inline]
    pub fn as_number(&self) -> Result<i64, Error> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Boolean(_) => Err(Error::TypeMismatch { expected: "number", got: self.to_node() }),
        }
    }

    /// Returns this value as a boolean.
    ///
    /// # Errors
    /// This function errors if this is not a [`Value::Boolean`].
    #[inline]
    pub fn as_boolean(&self) -> Result<bool, Error> {
        match self {
            Self::Boolean(b) => Ok(*b),
            Self::Number(_) => Err(Error::TypeMismatch { expected: "boolean", got: self.to_node() }),
        }
    }
}
impl Display for Value {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}
impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self { Self::Number(value) }
}
impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self { Self::Boolean(value) }
}



/// Maps variable names to their [`Value`]s.
///
/// Environments are never changed by running a program. Instead, every assignment produces a new
/// one.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Environment {
    /// The variables, ordered by name.
    vars: BTreeMap<String, Value>,
}
impl Environment {
    /// Creates a new, empty environment.
    #[inline]
    pub const fn new() -> Self { Self { vars: BTreeMap::new() } }

    /// Returns the value of a variable, if it is bound.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> { self.vars.get(name) }

    /// Returns an environment that is like this one, except that `name` is bound to `value`.
    ///
    /// # Arguments
    /// - `name`: The variable to (re)bind.
    /// - `value`: The value to bind it to.
    ///
    /// # Returns
    /// A new Environment.
    #[inline]
    pub fn with(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut vars: BTreeMap<String, Value> = self.vars.clone();
        vars.insert(name.into(), value.into());
        Self { vars }
    }

    /// Iterates over the variables in this environment, ordered by name.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> { self.vars.iter().map(|(name, value)| (name.as_str(), value)) }

    /// Returns the number of bound variables.
    #[inline]
    pub fn len(&self) -> usize { self.vars.len() }

    /// Returns whether no variables are bound.
    #[inline]
    pub fn is_empty(&self) -> bool { self.vars.is_empty() }
}
impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        write!(f, "{{")?;
        for (i, (name, value)) in self.vars.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}
impl<S: Into<String>, V: Into<Value>> FromIterator<(S, V)> for Environment {
    #[inline]
    fn from_iter<T: IntoIterator<Item = (S, V)>>(iter: T) -> Self {
        Self { vars: iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect() }
    }
}
impl<const LEN: usize, S: Into<String>, V: Into<Value>> From<[(S, V); LEN]> for Environment {
    #[inline]
    fn from(value: [(S, V); LEN]) -> Self { value.into_iter().collect() }
}



/// What a [`Node`] [evaluates](Node::evaluate()) to.
#[derive(Clone, Debug, EnumDebug, Eq, PartialEq)]
pub enum Evaluation {
    /// Expressions evaluate to a value.
    Value(Value),
    /// Statements evaluate to a new environment.
    Environment(Environment),
}





/***** LIBRARY *****/
/// A node in a SIMPLE program.
///
/// The first six variants are _expressions_, which compute a [`Value`]. The others are
/// _statements_, which change the [`Environment`].
#[derive(Clone, Debug, EnumDebug, Eq, Hash, PartialEq)]
pub enum Node {
    /// A number literal.
    Number(i64),
    /// A boolean literal.
    Boolean(bool),
    /// Refers to the value of a variable.
    Variable(String),
    /// Adds two numbers.
    Add(Box<Node>, Box<Node>),
    /// Multiplies two numbers.
    Multiply(Box<Node>, Box<Node>),
    /// Checks if the left number is smaller than the right one.
    LessThan(Box<Node>, Box<Node>),

    /// Binds the value of an expression to a variable.
    Assign(String, Box<Node>),
    /// Runs one of two statements depending on a condition.
    If(Box<Node>, Box<Node>, Box<Node>),
    /// Runs one statement after another.
    Sequence(Box<Node>, Box<Node>),
    /// Runs a statement as long as a condition holds.
    While(Box<Node>, Box<Node>),
    /// Does nothing at all.
    DoNothing,
}

// Constructors
impl Node {
    /// Creates a [`Node::Number`].
    #[inline]
    pub const fn number(value: i64) -> Self { Self::Number(value) }

    /// Creates a [`Node::Boolean`].
    #[inline]
    pub const fn boolean(value: bool) -> Self { Self::Boolean(value) }

    /// Creates a [`Node::Variable`].
    #[inline]
    pub fn variable(name: impl Into<String>) -> Self { Self::Variable(name.into()) }

    binary_constructor_impl!(Add);
    binary_constructor_impl!(Multiply);
    binary_constructor_impl!(LessThan);

    /// Creates a [`Node::Assign`].
    #[inline]
    pub fn assign(name: impl Into<String>, expression: Node) -> Self { Self::Assign(name.into(), Box::new(expression)) }

    /// Creates a [`Node::If`].
    ///
    /// # Arguments
    /// - `condition`: The expression that decides which statement to run.
    /// - `consequence`: The statement to run if `condition` is true.
    /// - `alternative`: The statement to run if `condition` is false.
    ///
    /// # Returns
    /// A new [`Node`].
    #[inline]
    pub fn if_else(condition: Node, consequence: Node, alternative: Node) -> Self {
        Self::If(Box::new(condition), Box::new(consequence), Box::new(alternative))
    }

    /// Creates a [`Node::Sequence`].
    #[inline]
    pub fn sequence(first: Node, second: Node) -> Self { Self::Sequence(Box::new(first), Box::new(second)) }

    /// Creates a [`Node::While`].
    #[inline]
    pub fn while_loop(condition: Node, body: Node) -> Self { Self::While(Box::new(condition), Box::new(body)) }

    /// Creates a [`Node::DoNothing`].
    #[inline]
    pub const fn do_nothing() -> Self { Self::DoNothing }
}

// Classification
impl Node {
    /// Returns whether this node is an expression (as opposed to a statement).
    #[inline]
    pub const fn is_expression(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Boolean(_) | Self::Variable(_) | Self::Add(_, _) | Self::Multiply(_, _) | Self::LessThan(_, _))
    }

    /// Returns whether this node can be [reduced](Node::reduce()) any further.
    ///
    /// Only values and [`Node::DoNothing`] are irreducible.
    #[inline]
    pub const fn is_reducible(&self) -> bool { !matches!(self, Self::Number(_) | Self::Boolean(_) | Self::DoNothing) }

    /// Returns the [`Value`] of this node, if it is one.
    #[inline]
    pub const fn as_value(&self) -> Option<Value> {
        match self {
            Self::Number(n) => Some(Value::Number(*n)),
            Self::Boolean(b) => Some(Value::Boolean(*b)),
            _ => None,
        }
    }

    /// Returns the [`Value`] of a node that is done reducing.
    ///
    /// # Errors
    /// This function errors if this node is not a value.
    #[inline]
    fn expect_value(&self) -> Result<Value, Error> {
        match self.as_value() {
            Some(value) => Ok(value),
            None => Err(Error::NotAnExpression { node: self.clone() }),
        }
    }
}

// Big-step semantics
impl Node {
    /// Evaluates this node all at once.
    ///
    /// # Arguments
    /// - `env`: The [`Environment`] to evaluate in.
    ///
    /// # Returns
    /// An [`Evaluation::Value`] for expressions, or an [`Evaluation::Environment`] for
    /// statements.
    ///
    /// # Errors
    /// This function errors if the program uses unbound variables, mixes up types or overflows.
    #[inline]
    pub fn evaluate(&self, env: &Environment) -> Result<Evaluation, Error> {
        if self.is_expression() {
            self.evaluate_expression(env).map(Evaluation::Value)
        } else {
            self.evaluate_statement(env.clone()).map(Evaluation::Environment)
        }
    }

    /// Evaluates this node as an expression.
    ///
    /// # Arguments
    /// - `env`: The [`Environment`] to evaluate in.
    ///
    /// # Returns
    /// The [`Value`] it computes.
    ///
    /// # Errors
    /// This function errors if this node is a statement, or if [evaluating](Node::evaluate()) it
    /// fails.
    pub fn evaluate_expression(&self, env: &Environment) -> Result<Value, Error> {
        match self {
            Self::Number(n) => Ok(Value::Number(*n)),
            Self::Boolean(b) => Ok(Value::Boolean(*b)),
            Self::Variable(name) => env.get(name).copied().ok_or_else(|| Error::UnboundVariable { name: name.clone() }),
            Self::Add(left, right) => {
                add(left.evaluate_expression(env)?.as_number()?, right.evaluate_expression(env)?.as_number()?).map(Value::Number)
            },
            Self::Multiply(left, right) => {
                multiply(left.evaluate_expression(env)?.as_number()?, right.evaluate_expression(env)?.as_number()?).map(Value::Number)
            },
            Self::LessThan(left, right) => {
                Ok(Value::Boolean(left.evaluate_expression(env)?.as_number()? < right.evaluate_expression(env)?.as_number()?))
            },

            Self::Assign(_, _) | Self::If(_, _, _) | Self::Sequence(_, _) | Self::While(_, _) | Self::DoNothing => {
                Err(Error::NotAnExpression { node: self.clone() })
            },
        }
    }

    /// Evaluates this node as a statement.
    ///
    /// Note that loops that never end make this function never end too.
    ///
    /// # Arguments
    /// - `env`: The [`Environment`] to evaluate in.
    ///
    /// # Returns
    /// The new [`Environment`] after running the statement.
    ///
    /// # Errors
    /// This function errors if this node is an expression, or if [evaluating](Node::evaluate())
    /// it fails.
    pub fn evaluate_statement(&self, env: Environment) -> Result<Environment, Error> {
        match self {
            Self::Assign(name, expression) => {
                let value: Value = expression.evaluate_expression(&env)?;
                Ok(env.with(name.clone(), value))
            },
            Self::If(condition, consequence, alternative) => {
                if condition.evaluate_expression(&env)?.as_boolean()? {
                    consequence.evaluate_statement(env)
                } else {
                    alternative.evaluate_statement(env)
                }
            },
            Self::Sequence(first, second) => second.evaluate_statement(first.evaluate_statement(env)?),
            Self::While(condition, body) => {
                if condition.evaluate_expression(&env)?.as_boolean()? {
                    self.evaluate_statement(body.evaluate_statement(env)?)
                } else {
                    Ok(env)
                }
            },
            Self::DoNothing => Ok(env),

            Self::Number(_) | Self::Boolean(_) | Self::Variable(_) | Self::Add(_, _) | Self::Multiply(_, _) | Self::LessThan(_, _) => {
                Err(Error::NotAStatement { node: self.clone() })
            },
        }
    }
}

// Small-step semantics
impl Node {
    /// Reduces this node by one step.
    ///
    /// # Arguments
    /// - `env`: The [`Environment`] to reduce in.
    ///
    /// # Returns
    /// A tuple of the reduced node and the environment after the step. Reducing an expression
    /// never changes the environment.
    ///
    /// # Errors
    /// This function errors if this node is [irreducible](Node::is_reducible()), or if the step
    /// uses unbound variables, mixes up types or overflows.
    #[inline]
    pub fn reduce(&self, env: Environment) -> Result<(Node, Environment), Error> {
        if self.is_expression() {
            let node: Node = self.reduce_expression(&env)?;
            Ok((node, env))
        } else {
            self.reduce_statement(env)
        }
    }

    /// Reduces this node by one step as an expression.
    ///
    /// The left-most reducible child is reduced first.
    ///
    /// # Arguments
    /// - `env`: The [`Environment`] to reduce in.
    ///
    /// # Returns
    /// The reduced node.
    ///
    /// # Errors
    /// This function errors if this node is a statement, or if [reducing](Node::reduce()) it
    /// fails.
    pub fn reduce_expression(&self, env: &Environment) -> Result<Node, Error> {
        trace!("Reducing expression {} '{}'", self.variant(), self);
        match self {
            Self::Number(_) | Self::Boolean(_) => Err(Error::Irreducible { node: self.clone() }),
            Self::Variable(name) => env.get(name).map(|value| value.to_node()).ok_or_else(|| Error::UnboundVariable { name: name.clone() }),
            Self::Add(left, right) => reduce_binary(env, left, right, Node::add, |l, r| add(l.as_number()?, r.as_number()?).map(Node::Number)),
            Self::Multiply(left, right) => {
                reduce_binary(env, left, right, Node::multiply, |l, r| multiply(l.as_number()?, r.as_number()?).map(Node::Number))
            },
            Self::LessThan(left, right) => reduce_binary(env, left, right, Node::less_than, |l, r| Ok(Node::Boolean(l.as_number()? < r.as_number()?))),

            Self::Assign(_, _) | Self::If(_, _, _) | Self::Sequence(_, _) | Self::While(_, _) | Self::DoNothing => {
                Err(Error::NotAnExpression { node: self.clone() })
            },
        }
    }

    /// Reduces this node by one step as a statement.
    ///
    /// # Arguments
    /// - `env`: The [`Environment`] to reduce in.
    ///
    /// # Returns
    /// A tuple of the reduced statement and the environment after the step.
    ///
    /// # Errors
    /// This function errors if this node is an expression, or if [reducing](Node::reduce()) it
    /// fails.
    pub fn reduce_statement(&self, env: Environment) -> Result<(Node, Environment), Error> {
        trace!("Reducing statement {} '{}'", self.variant(), self);
        match self {
            Self::Assign(name, expression) => {
                if expression.is_reducible() {
                    let expression: Node = expression.reduce_expression(&env)?;
                    Ok((Self::assign(name.clone(), expression), env))
                } else {
                    let value: Value = expression.expect_value()?;
                    Ok((Self::DoNothing, env.with(name.clone(), value)))
                }
            },
            Self::If(condition, consequence, alternative) => {
                if condition.is_reducible() {
                    let condition: Node = condition.reduce_expression(&env)?;
                    Ok((Self::If(Box::new(condition), consequence.clone(), alternative.clone()), env))
                } else if condition.expect_value()?.as_boolean()? {
                    Ok(((**consequence).clone(), env))
                } else {
                    Ok(((**alternative).clone(), env))
                }
            },
            Self::Sequence(first, second) => {
                if let Self::DoNothing = **first {
                    Ok(((**second).clone(), env))
                } else {
                    let (first, env): (Node, Environment) = first.reduce_statement(env)?;
                    Ok((Self::Sequence(Box::new(first), second.clone()), env))
                }
            },
            Self::While(condition, body) => {
                Ok((Self::if_else((**condition).clone(), Self::sequence((**body).clone(), self.clone()), Self::DoNothing), env))
            },
            Self::DoNothing => Err(Error::Irreducible { node: self.clone() }),

            Self::Number(_) | Self::Boolean(_) | Self::Variable(_) | Self::Add(_, _) | Self::Multiply(_, _) | Self::LessThan(_, _) => {
                Err(Error::NotAStatement { node: self.clone() })
            },
        }
    }
}

// Rendering
impl Node {
    /// Returns how tightly this node binds when rendered.
    ///
    /// Higher binds tighter. Only expressions ever need parenthesis.
    #[inline]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::LessThan(_, _) => 0,
            Self::Add(_, _) => 1,
            Self::Multiply(_, _) => 2,
            _ => 3,
        }
    }

    /// Renders a binary operator with its children parenthesized where needed.
    ///
    /// Operators nest to the right, so the left child needs parenthesis already if it binds
    /// equally tight.
    fn fmt_binary(&self, f: &mut Formatter<'_>, left: &Node, op: &str, right: &Node) -> FResult {
        if left.precedence() <= self.precedence() {
            write!(f, "({left})")?;
        } else {
            write!(f, "{left}")?;
        }
        write!(f, " {op} ")?;
        if right.precedence() < self.precedence() { write!(f, "({right})") } else { write!(f, "{right}") }
    }
}
/// Renders a node in SIMPLE's concrete syntax.
///
/// Expressions get just enough parenthesis to parse back to the same tree. Statements cannot be
/// grouped in SIMPLE, so a left-nested [`Node::Sequence`] renders the same as the right-nested one.
/// Both run their statements in the same order.
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Add(left, right) => self.fmt_binary(f, left, "+", right),
            Self::Multiply(left, right) => self.fmt_binary(f, left, "*", right),
            Self::LessThan(left, right) => self.fmt_binary(f, left, "<", right),

            Self::Assign(name, expression) => write!(f, "{name} = {expression}"),
            Self::If(condition, consequence, alternative) => write!(f, "if ({condition}) {{ {consequence} }} else {{ {alternative} }}"),
            Self::Sequence(first, second) => write!(f, "{first}; {second}"),
            Self::While(condition, body) => write!(f, "while ({condition}) {{ {body} }}"),
            Self::DoNothing => write!(f, "do-nothing"),
        }
    }
}
impl From<Value> for Node {
    #[inline]
    fn from(value: Value) -> Self { value.to_node() }
}





/***** HELPER FUNCTIONS *****/
/// Adds two numbers, failing on overflow.
#[inline]
pub(crate) fn add(left: i64, right: i64) -> Result<i64, Error> { left.checked_add(right).ok_or(Error::Overflow { op: "+", left, right }) }

/// Multiplies two numbers, failing on overflow.
#[inline]
pub(crate) fn multiply(left: i64, right: i64) -> Result<i64, Error> { left.checked_mul(right).ok_or(Error::Overflow { op: "*", left, right }) }

/// Reduces a binary operator by one step.
///
/// # Arguments
/// - `env`: The [`Environment`] to reduce in.
/// - `left`: The left child.
/// - `right`: The right child.
/// - `rebuild`: Builds the operator again from (partially) reduced children.
/// - `compute`: Computes the result once both children are values.
///
/// # Returns
/// The reduced node.
///
/// # Errors
/// This function errors if reducing a child fails, or if `compute` does.
fn reduce_binary(
    env: &Environment,
    left: &Node,
    right: &Node,
    rebuild: fn(Node, Node) -> Node,
    compute: impl FnOnce(Value, Value) -> Result<Node, Error>,
) -> Result<Node, Error> {
    if left.is_reducible() {
        Ok(rebuild(left.reduce_expression(env)?, right.clone()))
    } else if right.is_reducible() {
        Ok(rebuild(left.clone(), right.reduce_expression(env)?))
    } else {
        compute(left.expect_value()?, right.expect_value()?)
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_node_render() {
        assert_eq!(Node::add(Node::variable("x"), Node::number(1)).to_string(), "x + 1");
        assert_eq!(Node::multiply(Node::add(Node::number(1), Node::number(2)), Node::number(3)).to_string(), "(1 + 2) * 3");
        assert_eq!(Node::add(Node::number(1), Node::multiply(Node::number(2), Node::number(3))).to_string(), "1 + 2 * 3");
        assert_eq!(Node::add(Node::add(Node::number(1), Node::number(2)), Node::number(3)).to_string(), "(1 + 2) + 3");
        assert_eq!(Node::add(Node::number(1), Node::add(Node::number(2), Node::number(3))).to_string(), "1 + 2 + 3");
        assert_eq!(
            Node::while_loop(
                Node::less_than(Node::variable("x"), Node::number(5)),
                Node::assign("x", Node::multiply(Node::variable("x"), Node::number(3)))
            )
            .to_string(),
            "while (x < 5) { x = x * 3 }"
        );
        assert_eq!(
            Node::sequence(
                Node::if_else(Node::variable("x"), Node::assign("y", Node::number(1)), Node::do_nothing()),
                Node::assign("z", Node::boolean(true))
            )
            .to_string(),
            "if (x) { y = 1 } else { do-nothing }; z = true"
        );

        // Sequences flatten
        let (a, b, c) = (Node::assign("a", Node::number(1)), Node::assign("b", Node::number(2)), Node::assign("c", Node::number(3)));
        let left = Node::sequence(Node::sequence(a.clone(), b.clone()), c.clone());
        let right = Node::sequence(a, Node::sequence(b, c));
        assert_eq!(left.to_string(), "a = 1; b = 2; c = 3");
        assert_eq!(left.to_string(), right.to_string());
        assert_eq!(left.evaluate(&Environment::new()), right.evaluate(&Environment::new()));
        assert_eq!(Environment::from([("y", Value::Number(3)), ("x", Value::Boolean(true))]).to_string(), "{x: true, y: 3}");
    }

    #[test]
    fn test_node_reducible() {
        assert!(!Node::number(1).is_reducible());
        assert!(!Node::boolean(false).is_reducible());
        assert!(!Node::do_nothing().is_reducible());
        assert!(Node::variable("x").is_reducible());
        assert!(Node::add(Node::number(1), Node::number(2)).is_reducible());
        assert!(Node::assign("x", Node::number(2)).is_reducible());
    }

    #[test]
    fn test_reduce_expression() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let env = Environment::from([("x", Value::Number(3)), ("y", Value::Number(4))]);
        let mut node = Node::add(Node::multiply(Node::number(1), Node::number(2)), Node::multiply(Node::variable("x"), Node::variable("y")));
        let mut trace: Vec<String> = vec![node.to_string()];
        while node.is_reducible() {
            node = node.reduce_expression(&env).unwrap();
            trace.push(node.to_string());
        }
        assert_eq!(trace, ["1 * 2 + x * y", "2 + x * y", "2 + 3 * y", "2 + 3 * 4", "2 + 12", "14"]);

        assert_eq!(Node::number(1).reduce_expression(&env), Err(Error::Irreducible { node: Node::number(1) }));
        assert_eq!(Node::variable("z").reduce_expression(&env), Err(Error::UnboundVariable { name: "z".into() }));
        assert_eq!(
            Node::add(Node::boolean(true), Node::number(1)).reduce_expression(&env),
            Err(Error::TypeMismatch { expected: "number", got: Node::boolean(true) })
        );
        assert_eq!(
            Node::less_than(Node::number(5), Node::add(Node::number(2), Node::number(2))).reduce_expression(&env),
            Ok(Node::less_than(Node::number(5), Node::number(4)))
        );
    }

    #[test]
    fn test_reduce_statement() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let env = Environment::from([("x", Value::Number(2))]);
        let node = Node::assign("x", Node::add(Node::variable("x"), Node::number(1)));
        let (node, env) = node.reduce(env).unwrap();
        assert_eq!(node.to_string(), "x = 2 + 1");
        let (node, env) = node.reduce(env).unwrap();
        assert_eq!(node.to_string(), "x = 3");
        let (node, env) = node.reduce(env).unwrap();
        assert_eq!(node, Node::DoNothing);
        assert_eq!(env, Environment::from([("x", Value::Number(3))]));
        assert_eq!(node.reduce(env.clone()), Err(Error::Irreducible { node: Node::DoNothing }));

        // Loops unfold into conditionals
        let node = Node::while_loop(Node::less_than(Node::variable("x"), Node::number(5)), Node::assign("x", Node::number(5)));
        let (unfolded, _) = node.reduce(env.clone()).unwrap();
        assert_eq!(unfolded, Node::if_else(Node::less_than(Node::variable("x"), Node::number(5)), Node::sequence(Node::assign("x", Node::number(5)), node), Node::do_nothing()));

        // Conditionals must get booleans
        let node = Node::if_else(Node::number(1), Node::do_nothing(), Node::do_nothing());
        assert_eq!(node.reduce(env), Err(Error::TypeMismatch { expected: "boolean", got: Node::number(1) }));
    }

    #[test]
    fn test_evaluate() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let env = Environment::from([("x", Value::Number(2))]);
        assert_eq!(Node::number(23).evaluate(&env), Ok(Evaluation::Value(Value::Number(23))));
        assert_eq!(Node::variable("x").evaluate(&env), Ok(Evaluation::Value(Value::Number(2))));
        assert_eq!(
            Node::less_than(Node::add(Node::variable("x"), Node::number(2)), Node::variable("x")).evaluate(&env),
            Ok(Evaluation::Value(Value::Boolean(false)))
        );

        let program = Node::sequence(
            Node::assign("x", Node::add(Node::number(1), Node::number(1))),
            Node::assign("y", Node::add(Node::variable("x"), Node::number(3))),
        );
        assert_eq!(program.evaluate(&Environment::new()), Ok(Evaluation::Environment(Environment::from([("x", Value::Number(2)), ("y", Value::Number(5))]))));

        let program = Node::while_loop(
            Node::less_than(Node::variable("x"), Node::number(5)),
            Node::assign("x", Node::multiply(Node::variable("x"), Node::number(3))),
        );
        assert_eq!(program.evaluate_statement(Environment::from([("x", Value::Number(1))])), Ok(Environment::from([("x", Value::Number(9))])));
    }

    #[test]
    fn test_evaluate_errors() {
        let env = Environment::new();
        assert_eq!(Node::variable("x").evaluate(&env), Err(Error::UnboundVariable { name: "x".into() }));
        assert_eq!(Node::do_nothing().evaluate_expression(&env), Err(Error::NotAnExpression { node: Node::do_nothing() }));
        assert_eq!(Node::number(1).evaluate_statement(env.clone()), Err(Error::NotAStatement { node: Node::number(1) }));
        assert_eq!(
            Node::multiply(Node::number(i64::MAX), Node::number(2)).evaluate(&env),
            Err(Error::Overflow { op: "*", left: i64::MAX, right: 2 })
        );
    }
}
