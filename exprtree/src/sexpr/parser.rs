//! Parser for the textual form of expressions using chumsky.
//!
//! Grammar:
//! - An atom is a run of one or more characters among ASCII letters, digits and
//!   `_ ! % & / = ? + * < > @ . , ' -`.
//! - An operator is one or more expressions between parentheses. `()` is rejected and `(a)`
//!   is an operator with the single child `a`.
//! - Whitespace separates expressions; `;` starts a comment running to the end of the line.
//!
//! Two stages: a lexer turning characters into tokens, then a token parser building a small
//! owned tree, which is finally interned bottom-up into the factory.

use std::fmt;

use chumsky::prelude::*;
use smallvec::SmallVec;

use crate::{
    error::{ExprError, ExprResult},
    expr::{ExprRef, ExpressionFactory},
};

type Spanned<T> = (T, SimpleSpan);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Token {
    LParen,
    RParen,
    Symbol(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Symbol(s) => write!(f, "{s}"),
        }
    }
}

/// Characters allowed in atom symbols.
pub fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '_' | '!' | '%' | '&' | '/' | '=' | '?' | '+' | '*' | '<' | '>' | '@' | '.' | ',' | '\'' | '-'
        )
}

// ---------------- Lexer ----------------

fn lexer<'a>() -> impl Parser<'a, &'a str, Vec<Spanned<Token>>, extra::Err<Rich<'a, char>>> {
    let symbol = any()
        .filter(|c: &char| is_symbol_char(*c))
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| Token::Symbol(s.to_string()))
        .labelled("symbol");

    let punct = choice((just('(').to(Token::LParen), just(')').to(Token::RParen)));

    let token = choice((punct, symbol));

    // Comments are single-line starting with ';'
    let comment = just(';')
        .then(any().and_is(just('\n').not()).repeated())
        .padded()
        .to(());

    token
        .map_with(|tok, e| (tok, e.span()))
        .padded_by(comment.clone().repeated())
        .padded()
        .repeated()
        .collect::<Vec<_>>()
        .padded_by(comment.repeated())
        .padded()
        .then_ignore(end())
}

// ---------------- Token parser ----------------

#[derive(Debug, Clone)]
enum Sexpr {
    Symbol(String),
    List(Vec<Sexpr>),
}

fn sexpr_parser<'a>() -> impl Parser<'a, &'a [Token], Sexpr, extra::Err<Rich<'a, Token>>> + Clone {
    recursive(|sexpr| {
        let symbol = select! { Token::Symbol(s) => Sexpr::Symbol(s) }.labelled("atom");

        let list = sexpr
            .repeated()
            .at_least(1)
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map(Sexpr::List)
            .labelled("operator");

        choice((symbol, list))
    })
}

fn lex(src: &str) -> Result<Vec<Token>, Vec<String>> {
    let (tokens, lex_errs) = lexer().parse(src).into_output_errors();
    let errors: Vec<String> = lex_errs.into_iter().map(|e| format!("lexing error: {e}")).collect();
    match tokens {
        Some(tokens) if errors.is_empty() => Ok(tokens.into_iter().map(|(tok, _span)| tok).collect()),
        _ => Err(errors),
    }
}

fn parse_tokens<'t, O>(
    tokens: &'t [Token],
    parser: impl Parser<'t, &'t [Token], O, extra::Err<Rich<'t, Token>>>,
) -> Result<O, Vec<String>> {
    let (output, parse_errs) = parser.then_ignore(end()).parse(tokens).into_output_errors();
    let errors: Vec<String> = parse_errs.into_iter().map(|e| format!("parse error: {e}")).collect();
    match output {
        Some(output) if errors.is_empty() => Ok(output),
        _ => Err(errors),
    }
}

/// Intern a parsed tree bottom-up without recursing on the call stack.
fn build(factory: &ExpressionFactory, sexpr: &Sexpr) -> ExprResult<ExprRef> {
    let items = match sexpr {
        Sexpr::Symbol(symbol) => return factory.make_atom(symbol.as_str()),
        Sexpr::List(items) => items,
    };

    let mut stack: Vec<(std::slice::Iter<'_, Sexpr>, SmallVec<[ExprRef; 4]>)> = vec![(items.iter(), SmallVec::new())];
    loop {
        let Some((pending, built)) = stack.last_mut() else {
            return Err(ExprError::ConstructionPrecondition("empty operator".to_string()));
        };
        match pending.next() {
            Some(Sexpr::Symbol(symbol)) => built.push(factory.make_atom(symbol.as_str())?),
            Some(Sexpr::List(items)) => stack.push((items.iter(), SmallVec::new())),
            None => {
                let Some((_, children)) = stack.pop() else {
                    continue;
                };
                let node = factory.make_operator(children)?;
                match stack.last_mut() {
                    Some((_, parent)) => parent.push(node),
                    None => return Ok(node),
                }
            }
        }
    }
}

// ---------------- Public API ----------------

/// Parse one expression and intern it into `factory`.
///
/// Example
/// ```
/// use exprtree::{ExpressionFactory, parse};
/// let factory = ExpressionFactory::new();
/// let e = parse(&factory, "(f x ; the argument\n y)").unwrap();
/// assert_eq!(e.to_string(), "(f x y)");
/// assert_eq!(e.arity(), 3);
/// ```
pub fn parse(factory: &ExpressionFactory, src: &str) -> ExprResult<ExprRef> {
    let tokens = lex(src).map_err(ExprError::Parse)?;
    let sexpr = parse_tokens(&tokens, sexpr_parser()).map_err(ExprError::Parse)?;
    build(factory, &sexpr)
}

/// Parse a whitespace-separated sequence of expressions (possibly empty).
pub fn parse_many(factory: &ExpressionFactory, src: &str) -> ExprResult<Vec<ExprRef>> {
    let tokens = lex(src).map_err(ExprError::Parse)?;
    let sexprs = parse_tokens(&tokens, sexpr_parser().repeated().collect::<Vec<_>>()).map_err(ExprError::Parse)?;
    sexprs.iter().map(|sexpr| build(factory, sexpr)).collect()
}

impl ExpressionFactory {
    /// See [`parse`].
    #[inline]
    pub fn parse(&self, src: &str) -> ExprResult<ExprRef> {
        parse(self, src)
    }
}
