//  LIB.rs
//    by Lut99
//
//  Created:
//    13 Jun 2025, 09:58:40
//  Last edited:
//    18 Jun 2025, 10:41:12
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the `simple!{}`-macro for the `computation`-crate.
//

// Modules
mod simple;

// Imports
use proc_macro::TokenStream;
use syn::parse::Parser as _;


/***** LIBRARY *****/
/// Writes a SIMPLE program inline, and builds its `Node`-tree.
///
/// # Example
/// ```ignore
/// use computation::simple::{simple, Node};
///
/// let program: Node = simple! {
///     x = 1;
///     while (x < 5) { x = x * 3 }
/// };
/// ```
///
/// Use `#![crate = path]` as the first line to point to the `computation`-crate by another path,
/// or `#![crate]` from within the crate itself.
#[proc_macro]
pub fn simple(input: TokenStream) -> TokenStream {
    match simple::simple.parse2(input.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
