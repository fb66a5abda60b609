//  LIB.rs
//    by Lut99
//
//  Created:
//    02 Jun 2025, 10:05:17
//  Last edited:
//    18 Jun 2025, 16:40:09
//  Auto updated?
//    Yes
//
//  Description:
//!   A family of rulebook-driven abstract machines: finite automata,
//!   regular expressions compiled to them, pushdown automata, Turing
//!   machines and an interpreter, lexer and parser for the toy language
//!   SIMPLE.
//!
//!   Every machine follows the same recipe. There is a [`Rule`](rules::Rule), an immutable
//!   [rulebook](rules::DeterministicRulebook) of them, a configuration that is replaced wholesale
//!   on every step and a [`Design`](rules::Design) that manufactures fresh machines whenever an
//!   input has to be checked.
//

// Declare modules
pub mod fa;
mod log;
pub mod pattern;
pub mod pda;
pub mod rules;
#[cfg(feature = "simple")]
pub mod simple;
#[cfg(test)]
mod tests;
pub mod tm;
