//! Procedural macros for `ristretto-logic`
//!
//! Provides [`expr!`](macro@expr), which parses boolean-expression syntax at
//! compile time and emits the corresponding `BoolExpr` method calls.

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream, Result};
use syn::{parse_macro_input, Ident, Token};

/// Parsed expression shape
enum Node {
    /// An identifier already bound to a `BoolExpr` in scope
    Binding(Ident),
    /// A string literal naming a variable
    Named(syn::LitStr),
    /// `0` or `1`
    Constant(bool),
    Not(Box<Node>),
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
}

impl Node {
    /// Emit method-call code; the `and`/`or`/`not` methods take references
    /// and clone internally, so the macro never moves user bindings.
    fn emit(&self) -> proc_macro2::TokenStream {
        match self {
            Node::Binding(ident) => quote!(#ident),
            Node::Named(lit) => quote!(BoolExpr::variable(#lit)),
            Node::Constant(value) => quote!(BoolExpr::constant(#value)),
            Node::Not(inner) => {
                let inner = inner.emit();
                quote!((&(#inner)).not())
            }
            Node::And(left, right) => {
                let (left, right) = (left.emit(), right.emit());
                quote!((&(#left)).and(&(#right)))
            }
            Node::Or(left, right) => {
                let (left, right) = (left.emit(), right.emit());
                quote!((&(#left)).or(&(#right)))
            }
        }
    }
}

struct ExprInput(Node);

impl Parse for ExprInput {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(ExprInput(disjunction(input)?))
    }
}

// Precedence, weakest first: + | then * & then ! ~.

fn disjunction(input: ParseStream) -> Result<Node> {
    let mut node = conjunction(input)?;
    loop {
        if input.peek(Token![+]) {
            input.parse::<Token![+]>()?;
        } else if input.peek(Token![|]) {
            input.parse::<Token![|]>()?;
        } else {
            return Ok(node);
        }
        node = Node::Or(Box::new(node), Box::new(conjunction(input)?));
    }
}

fn conjunction(input: ParseStream) -> Result<Node> {
    let mut node = negation(input)?;
    loop {
        if input.peek(Token![*]) {
            input.parse::<Token![*]>()?;
        } else if input.peek(Token![&]) {
            input.parse::<Token![&]>()?;
        } else {
            return Ok(node);
        }
        node = Node::And(Box::new(node), Box::new(negation(input)?));
    }
}

fn negation(input: ParseStream) -> Result<Node> {
    if input.peek(Token![!]) {
        input.parse::<Token![!]>()?;
        return Ok(Node::Not(Box::new(negation(input)?)));
    }
    if input.peek(Token![~]) {
        input.parse::<Token![~]>()?;
        return Ok(Node::Not(Box::new(negation(input)?)));
    }
    atom(input)
}

fn atom(input: ParseStream) -> Result<Node> {
    if input.peek(syn::token::Paren) {
        let inner;
        syn::parenthesized!(inner in input);
        return disjunction(&inner);
    }
    if input.peek(syn::LitStr) {
        return Ok(Node::Named(input.parse()?));
    }
    if input.peek(syn::LitInt) {
        let lit: syn::LitInt = input.parse()?;
        return match lit.base10_parse::<u8>()? {
            0 => Ok(Node::Constant(false)),
            1 => Ok(Node::Constant(true)),
            _ => Err(syn::Error::new(
                lit.span(),
                "boolean constants are 0 and 1",
            )),
        };
    }
    Ok(Node::Binding(input.parse::<Ident>()?))
}

/// Build a `BoolExpr` with ordinary boolean syntax
///
/// Atoms are existing `BoolExpr` bindings, `"quoted"` variable names, or the
/// constants `0` and `1`. Operators: `*`/`&` for AND, `+`/`|` for OR,
/// `!`/`~` for NOT, with the usual precedence and parentheses.
///
/// ```ignore
/// use ristretto_logic::{expr, BoolExpr};
///
/// let a = BoolExpr::variable("a");
/// let b = BoolExpr::variable("b");
/// let xor = expr!(a * !b + !a * b);
/// let named = expr!("x" * ("y" + "z"));
/// ```
#[proc_macro]
pub fn expr(input: TokenStream) -> TokenStream {
    let ExprInput(node) = parse_macro_input!(input as ExprInput);
    TokenStream::from(node.emit())
}
