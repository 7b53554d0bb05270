//! The raw reader: a character-level parse of source text into a shallow,
//! whitespace-delimited tree, ahead of mixfix resolution.
//!
//! `Raw` also carries the two variants the mixfix grammar in [`crate::mixfix`]
//! builds on top of a parsed `Raw` tree (`AppR`, `OpR`) — they never appear in
//! the output of [`parse_raw`] itself, only in the intermediate trees that
//! [`crate::mixfix::parse_exp`] consumes.

use crate::combinator::{choice, many, many1, satisfy, Parser};
use crate::error::RawError;
use std::fmt;

/// Whether an application argument is implicit (`{e}`) or explicit (`e`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hiding {
    Hidden,
    NotHidden,
}

/// A single application argument, tagged with its hiding.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg<T> {
    pub hiding: Hiding,
    pub value: T,
}

impl<T> Arg<T> {
    pub fn new(hiding: Hiding, value: T) -> Self {
        Arg { hiding, value }
    }
}

/// The shallow pre-mixfix tree produced by [`parse_raw`], plus the two
/// resolved-application variants the mixfix grammar builds while folding a
/// `RawApp`'s children (`AppR`, `OpR`; see `spec.md` §3.1).
#[derive(Debug, Clone, PartialEq)]
pub enum Raw {
    /// An identifier token.
    Name(String),
    /// An integer literal.
    Lit(i64),
    /// A parenthesized sub-tree.
    Paren(Box<Raw>),
    /// A brace-delimited sub-tree, marking a hidden argument.
    Braces(Box<Raw>),
    /// An unresolved application spine from whitespace juxtaposition.
    /// Always has at least two children — a single child collapses to
    /// that child instead of being wrapped.
    RawApp(Vec<Raw>),
    /// An already-resolved application of `r` to an argument.
    AppR(Box<Raw>, Arg<Box<Raw>>),
    /// An already-resolved mixfix application: the ordered identifier
    /// fragments naming the operator, and the arguments occupying the
    /// holes and the operand positions contributed by fixity.
    OpR(Vec<String>, Vec<Raw>),
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raw::Name(s) => write!(f, "{s}"),
            Raw::Lit(n) => write!(f, "{n}"),
            Raw::Paren(r) => write!(f, "({r})"),
            Raw::Braces(r) => write!(f, "{{{r}}}"),
            Raw::RawApp(rs) => {
                let parts: Vec<String> = rs.iter().map(|r| r.to_string()).collect();
                write!(f, "{}", parts.join(" "))
            }
            Raw::AppR(r, arg) => match arg.hiding {
                Hiding::Hidden => write!(f, "{r} {{{}}}", arg.value),
                Hiding::NotHidden => write!(f, "{r} {}", arg.value),
            },
            Raw::OpR(parts, args) => {
                let mut args = args.iter();
                let mut out = String::new();
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(part);
                    if let Some(arg) = args.next() {
                        out.push(' ');
                        out.push_str(&arg.to_string());
                    }
                }
                write!(f, "{out}")
            }
        }
    }
}

fn is_bracket(c: char) -> bool {
    matches!(c, '(' | ')' | '{' | '}')
}

fn ident_char(c: char) -> bool {
    !c.is_whitespace() && !is_bracket(c)
}

fn char_tok(expected: char) -> Parser<char, char> {
    satisfy(move |c: &char| *c == expected)
}

fn ws0() -> Parser<char, ()> {
    many(satisfy(|c: &char| c.is_whitespace())).map(|_| ())
}

fn ws1() -> Parser<char, ()> {
    many1(satisfy(|c: &char| c.is_whitespace())).map(|_| ())
}

/// `idStart idChar*`
fn name() -> Parser<char, Raw> {
    satisfy(|c: &char| ident_char(*c) && !c.is_ascii_digit()).bind(|first: char| {
        many(satisfy(|c: &char| ident_char(*c))).map(move |rest: Vec<char>| {
            let mut s = String::with_capacity(rest.len() + 1);
            s.push(first);
            s.extend(rest);
            Raw::Name(s)
        })
    })
}

/// `DIGIT+`, parsed as a decimal integer literal.
fn lit() -> Parser<char, Raw> {
    many1(satisfy(|c: &char| c.is_ascii_digit())).bind(|digits: Vec<char>| {
        let text: String = digits.into_iter().collect();
        match text.parse::<i64>() {
            Ok(n) => crate::combinator::succeed(Raw::Lit(n)),
            Err(_) => crate::combinator::fail(),
        }
    })
}

/// `p1 := '(' p0 ')' | '{' p0 '}' | DIGIT+ | idStart idChar*`
fn p1() -> Parser<char, Raw> {
    let paren = char_tok('(')
        .bind(|_| ws0())
        .bind(|_| p0())
        .bind(|r| ws0().map(move |_| r.clone()))
        .bind(|r| char_tok(')').map(move |_| Raw::Paren(Box::new(r.clone()))));
    let braces = char_tok('{')
        .bind(|_| ws0())
        .bind(|_| p0())
        .bind(|r| ws0().map(move |_| r.clone()))
        .bind(|r| char_tok('}').map(move |_| Raw::Braces(Box::new(r.clone()))));
    choice(vec![paren, braces, lit(), name()])
}

/// `p0 := p1 (WS+ p1)*`, collapsing a single child to itself.
fn p0() -> Parser<char, Raw> {
    Parser::new(|input: &[char]| p1().bind(rest_p0).run(input))
}

fn rest_p0(first: Raw) -> Parser<char, Raw> {
    many(ws1().bind(move |_| p1())).map(move |mut rest: Vec<Raw>| {
        if rest.is_empty() {
            first.clone()
        } else {
            let mut all = vec![first.clone()];
            all.append(&mut rest);
            Raw::RawApp(all)
        }
    })
}

/// Parses source text into a [`Raw`] tree (`spec.md` §4.2).
///
/// Returns `Err(RawError::NoParse)` when the grammar admits no parse of the
/// whole input, or `Err(RawError::Ambiguous(_))` in the (for this grammar,
/// unreachable) case of more than one whole-input parse — the check is kept
/// as a defensive invariant rather than assumed away.
pub fn parse_raw(input: &str) -> Result<Raw, RawError> {
    let chars: Vec<char> = input.chars().collect();
    let trimmed = ws0().bind(|_| p0()).bind(|r| ws0().map(move |_| r.clone()));
    let results = crate::combinator::parse_all(&trimmed, &chars);
    match results.len() {
        0 => Err(RawError::NoParse),
        1 => Ok(results.into_iter().next().expect("checked len == 1")),
        _ => Err(RawError::Ambiguous(results)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_bare_identifier() {
        assert_eq!(parse_raw("x").unwrap(), Raw::Name("x".to_string()));
    }

    #[test]
    fn parses_a_literal() {
        assert_eq!(parse_raw("42").unwrap(), Raw::Lit(42));
    }

    #[test]
    fn juxtaposition_becomes_raw_app() {
        assert_eq!(
            parse_raw("f x y").unwrap(),
            Raw::RawApp(vec![
                Raw::Name("f".to_string()),
                Raw::Name("x".to_string()),
                Raw::Name("y".to_string()),
            ])
        );
    }

    #[test]
    fn single_child_app_collapses() {
        assert_eq!(parse_raw("  x  ").unwrap(), Raw::Name("x".to_string()));
    }

    #[test]
    fn parens_wrap_without_collapsing() {
        assert_eq!(
            parse_raw("(x)").unwrap(),
            Raw::Paren(Box::new(Raw::Name("x".to_string())))
        );
    }

    #[test]
    fn braces_mark_a_hidden_group() {
        assert_eq!(
            parse_raw("{x y}").unwrap(),
            Raw::Braces(Box::new(Raw::RawApp(vec![
                Raw::Name("x".to_string()),
                Raw::Name("y".to_string()),
            ])))
        );
    }

    #[test]
    fn operator_names_are_ordinary_identifiers() {
        assert_eq!(
            parse_raw("x + y").unwrap(),
            Raw::RawApp(vec![
                Raw::Name("x".to_string()),
                Raw::Name("+".to_string()),
                Raw::Name("y".to_string()),
            ])
        );
    }

    #[test]
    fn empty_input_has_no_parse() {
        assert_eq!(parse_raw("   ").unwrap_err(), RawError::NoParse);
    }

    #[test]
    fn unbalanced_parens_have_no_parse() {
        assert_eq!(parse_raw("(x").unwrap_err(), RawError::NoParse);
    }
}
