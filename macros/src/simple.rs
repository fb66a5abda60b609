//  SIMPLE.rs
//    by Lut99
//
//  Created:
//    13 Jun 2025, 10:02:17
//  Last edited:
//    18 Jun 2025, 10:40:55
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the [`simple!()`]-macro, which parses SIMPLE from Rust
//!   tokens and generates the code that builds the matching `Node`-tree.
//!
//!   The grammar is the same as that of the pushdown parser, except that
//!   `do-nothing` is split into three Rust tokens. Like there, binary
//!   operators and sequences nest to the right.
//

use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{quote, quote_spanned, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::spanned::Spanned as _;
use syn::{braced, parenthesized, Attribute, Error, Expr, Ident, LitBool, LitInt, Meta, Token};


/***** AUXILLARY *****/
/// The path to the `computation`-crate in the generated code.
struct CratePath(TokenStream2);
impl Default for CratePath {
    #[inline]
    fn default() -> Self { Self(quote! { ::computation }) }
}
impl Parse for CratePath {
    /// Parses an optional `#![crate]` or `#![crate = path]` inner attribute.
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut res = Self::default();
        for attr in input.call(Attribute::parse_inner)? {
            if !attr.path().is_ident("crate") {
                return Err(Error::new(attr.path().span(), "Unknown attribute (only 'crate' is supported)"));
            }
            match attr.meta {
                // `#![crate]` means we're in the crate itself
                Meta::Path(_) => res = Self(quote! { crate }),
                Meta::NameValue(nv) => match nv.value {
                    Expr::Path(path) => res = Self(path.path.into_token_stream()),
                    value => return Err(Error::new(value.span(), "Expected a path to the 'computation'-crate")),
                },
                Meta::List(list) => return Err(Error::new(list.span(), "Expected either '#![crate]' or '#![crate = <path>]'")),
            }
        }
        Ok(res)
    }
}
impl ToTokens for CratePath {
    #[inline]
    fn to_tokens(&self, tokens: &mut TokenStream2) { self.0.to_tokens(tokens) }
}





/***** AST *****/
/// A statement, or a sequence of them.
enum Statement {
    Assign(Ident, Expression),
    If(Span, Expression, Box<Statement>, Box<Statement>),
    While(Span, Expression, Box<Statement>),
    DoNothing(Span),
    Sequence(Box<Statement>, Box<Statement>),
    /// A program may also be just an expression.
    Expression(Expression),
}
impl Statement {
    /// Parses a `;`-separated list of statements.
    ///
    /// An empty list is [`Statement::DoNothing`].
    fn parse_sequence(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Ok(Self::DoNothing(input.span()));
        }
        let first: Self = Self::parse_single(input)?;
        if input.parse::<Option<Token![;]>>()?.is_some() && !input.is_empty() {
            Ok(Self::Sequence(Box::new(first), Box::new(Self::parse_sequence(input)?)))
        } else if input.is_empty() {
            Ok(first)
        } else {
            Err(input.error("Expected ';' or the end of the block"))
        }
    }

    /// Parses a statement that is not a sequence.
    fn parse_single(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Token![if]) {
            let if_token: Token![if] = input.parse()?;
            let condition: Expression = parse_condition(input)?;
            let consequence: Self = parse_block(input)?;
            input.parse::<Token![else]>()?;
            let alternative: Self = parse_block(input)?;
            Ok(Self::If(if_token.span, condition, Box::new(consequence), Box::new(alternative)))
        } else if input.peek(Token![while]) {
            let while_token: Token![while] = input.parse()?;
            let condition: Expression = parse_condition(input)?;
            let body: Self = parse_block(input)?;
            Ok(Self::While(while_token.span, condition, Box::new(body)))
        } else if input.peek(Token![do]) {
            // do-nothing
            let do_token: Token![do] = input.parse()?;
            input.parse::<Token![-]>()?;
            let nothing: Ident = input.parse()?;
            if nothing != "nothing" {
                return Err(Error::new(nothing.span(), "Expected 'nothing' (as in 'do-nothing')"));
            }
            Ok(Self::DoNothing(do_token.span))
        } else if input.peek(Ident) && input.peek2(Token![=]) {
            let name: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            Ok(Self::Assign(name, input.parse()?))
        } else {
            Ok(Self::Expression(input.parse()?))
        }
    }
}
impl Statement {
    /// Generates the code that builds this statement's `Node`.
    ///
    /// # Arguments
    /// - `krate`: The path to the `computation`-crate.
    ///
    /// # Returns
    /// A [`TokenStream2`] with an expression of type `Node`.
    fn generate(&self, krate: &CratePath) -> TokenStream2 {
        match self {
            Self::Assign(name, expression) => {
                let value: String = name.to_string();
                let expression: TokenStream2 = expression.generate(krate);
                quote_spanned! { name.span() => #krate::simple::Node::assign(#value, #expression) }
            },
            Self::If(span, condition, consequence, alternative) => {
                let (condition, consequence, alternative) = (condition.generate(krate), consequence.generate(krate), alternative.generate(krate));
                quote_spanned! { *span => #krate::simple::Node::if_else(#condition, #consequence, #alternative) }
            },
            Self::While(span, condition, body) => {
                let (condition, body) = (condition.generate(krate), body.generate(krate));
                quote_spanned! { *span => #krate::simple::Node::while_loop(#condition, #body) }
            },
            Self::DoNothing(span) => quote_spanned! { *span => #krate::simple::Node::do_nothing() },
            Self::Sequence(first, second) => {
                let (first, second) = (first.generate(krate), second.generate(krate));
                quote! { #krate::simple::Node::sequence(#first, #second) }
            },
            Self::Expression(expression) => expression.generate(krate),
        }
    }
}



/// An expression.
enum Expression {
    Number(LitInt),
    Boolean(LitBool),
    Variable(Ident),
    Add(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    LessThan(Box<Expression>, Box<Expression>),
}
impl Expression {
    /// Parses an `add` or anything binding tighter.
    fn parse_add(input: ParseStream) -> syn::Result<Self> {
        let left: Self = Self::parse_multiply(input)?;
        if input.parse::<Option<Token![+]>>()?.is_some() { Ok(Self::Add(Box::new(left), Box::new(Self::parse_add(input)?))) } else { Ok(left) }
    }

    /// Parses a `multiply` or anything binding tighter.
    fn parse_multiply(input: ParseStream) -> syn::Result<Self> {
        let left: Self = Self::parse_term(input)?;
        if input.parse::<Option<Token![*]>>()?.is_some() {
            Ok(Self::Multiply(Box::new(left), Box::new(Self::parse_multiply(input)?)))
        } else {
            Ok(left)
        }
    }

    /// Parses a literal, a variable or a parenthesized expression.
    fn parse_term(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitInt) {
            let lit: LitInt = input.parse()?;
            // Check it fits before the generated code does
            lit.base10_parse::<i64>()?;
            Ok(Self::Number(lit))
        } else if input.peek(LitBool) {
            Ok(Self::Boolean(input.parse()?))
        } else if input.peek(Ident) {
            Ok(Self::Variable(input.parse()?))
        } else if input.peek(syn::token::Paren) {
            let content;
            parenthesized!(content in input);
            let inner: Self = content.parse()?;
            if !content.is_empty() {
                return Err(content.error("Expected ')'"));
            }
            Ok(inner)
        } else {
            Err(input.error("Expected a number, a boolean, a variable or a parenthesized expression"))
        }
    }
}
impl Parse for Expression {
    /// Parses a `less-than` or anything binding tighter.
    #[inline]
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let left: Self = Self::parse_add(input)?;
        if input.parse::<Option<Token![<]>>()?.is_some() { Ok(Self::LessThan(Box::new(left), Box::new(input.parse()?))) } else { Ok(left) }
    }
}
impl Expression {
    /// Generates the code that builds this expression's `Node`.
    ///
    /// # Arguments
    /// - `krate`: The path to the `computation`-crate.
    ///
    /// # Returns
    /// A [`TokenStream2`] with an expression of type `Node`.
    fn generate(&self, krate: &CratePath) -> TokenStream2 {
        let binary = |op: &str, left: &Self, right: &Self| -> TokenStream2 {
            let op: Ident = Ident::new(op, Span::call_site());
            let (left, right) = (left.generate(krate), right.generate(krate));
            quote! { #krate::simple::Node::#op(#left, #right) }
        };
        match self {
            // Already checked when parsing
            Self::Number(lit) => {
                let value: i64 = lit.base10_parse().unwrap_or_default();
                quote_spanned! { lit.span() => #krate::simple::Node::number(#value) }
            },
            Self::Boolean(lit) => quote_spanned! { lit.span => #krate::simple::Node::boolean(#lit) },
            Self::Variable(name) => {
                let value: String = name.to_string();
                quote_spanned! { name.span() => #krate::simple::Node::variable(#value) }
            },
            Self::Add(left, right) => binary("add", left, right),
            Self::Multiply(left, right) => binary("multiply", left, right),
            Self::LessThan(left, right) => binary("less_than", left, right),
        }
    }
}



/// Parses a parenthesized expression.
fn parse_condition(input: ParseStream) -> syn::Result<Expression> {
    let content;
    parenthesized!(content in input);
    let condition: Expression = content.parse()?;
    if !content.is_empty() {
        return Err(content.error("Expected ')'"));
    }
    Ok(condition)
}

/// Parses a curly-bracketed sequence of statements.
fn parse_block(input: ParseStream) -> syn::Result<Statement> {
    let content;
    braced!(content in input);
    Statement::parse_sequence(&content)
}





/***** LIBRARY *****/
/// Implements the `simple!()`-macro.
///
/// # Arguments
/// - `input`: The input tokens to parse, as a [`ParseStream`].
///
/// # Returns
/// A [`TokenStream2`] with an expression that builds the program's `Node`.
///
/// # Errors
/// This function errors if the input is not valid SIMPLE.
pub fn simple(input: ParseStream) -> Result<TokenStream2, Error> {
    let krate: CratePath = input.parse()?;
    let program: Statement = Statement::parse_sequence(input)?;
    Ok(program.generate(&krate))
}
