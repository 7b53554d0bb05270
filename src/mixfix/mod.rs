//! The mixfix expression parser: grammar-level combinators over a `Raw`
//! token stream, and the `Exp` tree they ultimately resolve to.
//!
//! This is the ~55% of the system `spec.md` §2 calls out as the hard part:
//! mixfix templates, precedence layering, associativity, application and
//! hidden arguments, all reconciled through the nondeterministic kernel in
//! [`crate::combinator`].

mod display;
mod driver;

pub use driver::parse_exp;

use crate::combinator::{choice, chainl1, chainr1, many, satisfy, succeed, Combine, Parser};
use crate::error::MixfixError;
use crate::raw::{Arg, Hiding, Raw};
use std::collections::HashSet;
use std::rc::Rc;

/// The token-stream parser C runs over: `Raw` children of a `RawApp`.
pub type RawParser = Parser<Raw, Raw>;

/// A single precedence level: given the parser for the next-higher level,
/// produces a parser for its own level (`spec.md` §3.3).
pub type Level = Rc<dyn Fn(RawParser) -> RawParser>;

/// The fully-resolved expression tree `parse_exp` produces (`spec.md` §3.2).
#[derive(Debug, Clone, PartialEq)]
pub enum Exp {
    /// A resolved identifier.
    Id(String),
    /// An integer literal.
    Lit(i64),
    /// Function application, possibly hidden.
    App(Box<Exp>, Arg<Box<Exp>>),
    /// A fully-resolved mixfix application.
    Op(Vec<String>, Vec<Exp>),
}

/// A mixfix operator template: the ordered identifier fragments naming an
/// operator, e.g. `["if", "then", "else"]`.
///
/// Constructing one with zero fragments is the one grammar-construction
/// error `spec.md` §7 names; it is reported through [`MixfixError`] from
/// this constructor rather than a panic, matching the spec's framing of it
/// as a parse-time error rather than a type-level one.
#[derive(Clone)]
pub struct OpTemplate {
    parts: Rc<Vec<String>>,
}

impl OpTemplate {
    pub fn new(parts: impl Into<Vec<String>>) -> Result<Self, MixfixError> {
        let parts = parts.into();
        if parts.is_empty() {
            return Err(MixfixError::EmptyOperator);
        }
        Ok(OpTemplate { parts: Rc::new(parts) })
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

/// `op(parts)`: convenience alias for [`OpTemplate::new`] (`spec.md` §6.1).
pub fn op(parts: impl Into<Vec<String>>) -> Result<OpTemplate, MixfixError> {
    OpTemplate::new(parts)
}

fn name_tok(name: Rc<str>) -> RawParser {
    satisfy(move |t: &Raw| matches!(t, Raw::Name(s) if s.as_str() == &*name))
}

/// `opP(hole, parts)`: consumes `parts[0..]` in order, running `hole` in
/// each of the `n - 1` internal gaps between consecutive fragments. Yields
/// `OpR(parts, inner_args)` with `|inner_args| = n - 1`.
///
/// Callers below always pass the grammar's fixpoint (`top`), never the
/// next-higher-level parser, as `hole`: a fragment's internal gap — the
/// `_` inside `if _ then _`, or the bracketed content of `[ _ ]` — can be
/// any expression in the whole grammar, not just one bound by this level's
/// own precedence.
pub fn op_parser(tpl: &OpTemplate, hole: RawParser) -> RawParser {
    let parts: Vec<Rc<str>> = tpl.parts.iter().map(|s| Rc::from(s.as_str())).collect();
    let mut seq: Parser<Raw, Vec<Raw>> = name_tok(parts[0].clone()).map(|_| Vec::new());
    for part in parts.into_iter().skip(1) {
        let hole = hole.clone();
        seq = seq.bind(move |acc: Vec<Raw>| {
            let part = part.clone();
            hole.clone().bind(move |h: Raw| {
                let mut acc = acc.clone();
                acc.push(h);
                let part = part.clone();
                name_tok(part).map(move |_| acc.clone())
            })
        });
    }
    let parts_out = tpl.parts.clone();
    seq.map(move |args: Vec<Raw>| Raw::OpR((*parts_out).clone(), args))
}

fn as_op_fields(r: Raw) -> (Vec<String>, Vec<Raw>) {
    match r {
        Raw::OpR(parts, args) => (parts, args),
        other => unreachable!("op_parser only ever produces OpR, got {other:?}"),
    }
}

/// `prefix(opP, top)`: zero or more prefix occurrences followed by an
/// operand, right-folding: `op1 op2 ... opk e` -> `op1(op2(...(opk e)))`.
/// Each application extends that operator's internal args by appending
/// `e`. The trailing operand `e` is the one true outer position, bound to
/// the next-higher level `p`; any internal gaps in a multi-fragment
/// template (e.g. the `_` in `if _ then`) resolve through `top` instead.
pub fn prefix(templates: Vec<OpTemplate>, top: RawParser) -> Level {
    Rc::new(move |p: RawParser| {
        let opp = choice(templates.iter().map(|t| op_parser(t, top.clone())).collect());
        let operand = p;
        many(opp).bind(move |ops: Vec<Raw>| {
            operand.clone().map(move |e: Raw| {
                ops.iter().rev().cloned().fold(e, |acc, op| {
                    let (parts, mut args) = as_op_fields(op);
                    args.push(acc);
                    Raw::OpR(parts, args)
                })
            })
        })
    })
}

/// `postfix(opP, top)`: mirror of [`prefix`], left-folding: `e op1 op2
/// ...` -> `(((e op1) op2) ...)`. Each application prepends `e` to
/// internal args. The leading operand `e` is bound to `p`; internal gaps
/// resolve through `top`.
pub fn postfix(templates: Vec<OpTemplate>, top: RawParser) -> Level {
    Rc::new(move |p: RawParser| {
        let opp = choice(templates.iter().map(|t| op_parser(t, top.clone())).collect());
        p.clone().bind(move |e: Raw| {
            many(opp.clone()).map(move |ops: Vec<Raw>| {
                ops.iter().cloned().fold(e.clone(), |acc, op| {
                    let (parts, args) = as_op_fields(op);
                    let mut prepended = vec![acc];
                    prepended.extend(args);
                    Raw::OpR(parts, prepended)
                })
            })
        })
    })
}

fn combiner(opr: Raw) -> Combine<Raw> {
    Rc::new(move |x: Raw, y: Raw| {
        let (parts, internal) = as_op_fields(opr.clone());
        let mut args = vec![x];
        args.extend(internal);
        args.push(y);
        Raw::OpR(parts, args)
    })
}

/// `infixl(opP, top)`: left-associative binary via [`chainl1`]. The two
/// operands are bound to `p`; any internal gaps in the template resolve
/// through `top`.
pub fn infixl(templates: Vec<OpTemplate>, top: RawParser) -> Level {
    Rc::new(move |p: RawParser| {
        let opp = choice(templates.iter().map(|t| op_parser(t, top.clone())).collect());
        let combine_p: Parser<Raw, Combine<Raw>> = opp.map(combiner);
        chainl1(p, combine_p)
    })
}

/// `infixr(opP, top)`: right-associative variant via [`chainr1`].
pub fn infixr(templates: Vec<OpTemplate>, top: RawParser) -> Level {
    Rc::new(move |p: RawParser| {
        let opp = choice(templates.iter().map(|t| op_parser(t, top.clone())).collect());
        let combine_p: Parser<Raw, Combine<Raw>> = opp.map(combiner);
        chainr1(p, combine_p)
    })
}

/// `nonfix(opP, top)`: the operator template tried first, falling back to
/// `p`. Produces a closed `OpR` with no outer operand slots — brackets
/// like `[ _ ]` are the canonical example, and the bracketed content is an
/// internal gap, so it resolves through `top` rather than `p`.
pub fn nonfix(templates: Vec<OpTemplate>, top: RawParser) -> Level {
    Rc::new(move |p: RawParser| {
        let opp = choice(templates.iter().map(|t| op_parser(t, top.clone())).collect());
        opp.alt(&p)
    })
}

/// Matches a `Name` whose text is in `idents`, returned as-is.
pub fn ident(idents: Rc<HashSet<String>>) -> RawParser {
    satisfy(move |t: &Raw| matches!(t, Raw::Name(s) if idents.contains(s)))
}

/// Matches any non-`Name` token (literal, paren, brace) verbatim.
pub fn atom_other() -> RawParser {
    satisfy(|t: &Raw| !matches!(t, Raw::Name(_)))
}

/// The terminal level: an identifier from `idents`, or any other atom.
pub fn atom(idents: Rc<HashSet<String>>) -> RawParser {
    ident(idents).alt(&atom_other())
}

/// Recursively resolves `Raw::Paren` wrappers encountered at an application
/// head or argument position by re-running the whole grammar (`top`) over
/// the parenthesized contents — see `DESIGN.md`, "app and the role of
/// top", for why this is the one place that needs it. `Braces` is left
/// untouched; only `app` may consume it, as a hidden argument.
fn unwrap_parens(top: &RawParser, r: Raw) -> Vec<Raw> {
    match r {
        Raw::Paren(inner) => match *inner {
            Raw::RawApp(rs) => crate::combinator::parse_all(top, &rs)
                .into_iter()
                .flat_map(|r2| unwrap_parens(top, r2))
                .collect(),
            other => unwrap_parens(top, other),
        },
        other => vec![other],
    }
}

fn paren_aware(top: RawParser, inner: RawParser) -> RawParser {
    inner.bind(move |r: Raw| {
        let alts: Vec<RawParser> = unwrap_parens(&top, r).into_iter().map(succeed).collect();
        choice(alts)
    })
}

/// `app(top)`: juxtaposition application. Parses one atom (the head), then
/// zero or more argument atoms, left-folding into `AppR`. An argument whose
/// root is `Braces` is hidden; every other argument is not. `top` is the
/// overall fixpoint parser, threaded in here (and only here) so that a
/// parenthesized head or argument can recurse back into the entire grammar
/// instead of staying an opaque token until the driver walks it later.
pub fn app(top: RawParser) -> Level {
    Rc::new(move |p: RawParser| {
        let atom_src = paren_aware(top.clone(), p);
        let head_src = atom_src.clone();
        head_src.bind(move |head: Raw| {
            many(atom_src.clone()).map(move |args: Vec<Raw>| {
                args.into_iter().fold(head.clone(), |acc, a| match a {
                    Raw::Braces(inner) => {
                        Raw::AppR(Box::new(acc), Arg::new(Hiding::Hidden, inner))
                    }
                    other => {
                        Raw::AppR(Box::new(acc), Arg::new(Hiding::NotHidden, Box::new(other)))
                    }
                })
            })
        })
    })
}

/// Builds the fixpoint parser `P = L0(L1(...Lk-1(P)))` from a precedence-
/// ordered list of levels (lowest precedence first), per `spec.md` §4.3.
///
/// `build` receives the not-yet-finished fixpoint reference so that any
/// level needing it (currently only [`app`]) can close over it while the
/// level list is being assembled. The reference is tied off, via a
/// one-shot `RefCell`, once every level has been folded together.
pub fn recursive(build: impl FnOnce(RawParser) -> Vec<Level>) -> RawParser {
    use std::cell::RefCell;

    let cell: Rc<RefCell<Option<RawParser>>> = Rc::new(RefCell::new(None));
    let cell_ref = cell.clone();
    let top = Parser::new(move |input: &[Raw]| {
        cell_ref
            .borrow()
            .as_ref()
            .expect("recursive grammar parser used before construction finished")
            .run(input)
    });

    let levels = build(top.clone());
    #[cfg(feature = "trace")]
    log::trace!("recursive: assembling {} precedence levels", levels.len());

    let mut p = top.clone();
    for level in levels.into_iter().rev() {
        p = level(p);
    }
    *cell.borrow_mut() = Some(p.clone());
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::parse_raw;

    fn idents(names: &[&str]) -> Rc<HashSet<String>> {
        Rc::new(names.iter().map(|s| s.to_string()).collect())
    }

    fn bracket_grammar() -> RawParser {
        let bracket = op(vec!["[".to_string(), "]".to_string()]).unwrap();
        recursive(move |top| {
            let names = idents(&["x", "y"]);
            vec![
                app(top.clone()),
                nonfix(vec![bracket.clone()], top.clone()),
                Rc::new(move |_p: RawParser| atom(names.clone())),
            ]
        })
    }

    #[test]
    fn a_multi_token_bracket_body_resolves_through_the_whole_grammar() {
        let plus = op(vec!["+".to_string()]).unwrap();
        let bracket = op(vec!["[".to_string(), "]".to_string()]).unwrap();
        let grammar = recursive(move |top| {
            let names = idents(&["x", "y"]);
            vec![
                infixl(vec![plus.clone()], top.clone()),
                app(top.clone()),
                nonfix(vec![bracket.clone()], top.clone()),
                Rc::new(move |_p: RawParser| atom(names.clone())),
            ]
        });
        let raw = parse_raw("[ x + y ]").unwrap();
        let rs = match raw {
            Raw::RawApp(rs) => rs,
            other => panic!("expected RawApp, got {other:?}"),
        };
        let results = crate::combinator::parse_all(&grammar, &rs);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn closed_operator_stands_alone() {
        let grammar = bracket_grammar();
        let raw = parse_raw("[ x ]").unwrap();
        let rs = match raw {
            Raw::RawApp(rs) => rs,
            other => panic!("expected RawApp, got {other:?}"),
        };
        let results = crate::combinator::parse_all(&grammar, &rs);
        assert_eq!(results.len(), 1);
        match &results[0] {
            Raw::OpR(parts, args) => {
                assert_eq!(parts, &vec!["[".to_string(), "]".to_string()]);
                assert_eq!(args, &vec![Raw::Name("x".to_string())]);
            }
            other => panic!("expected OpR, got {other:?}"),
        }
    }

    #[test]
    fn closed_operator_as_an_argument_is_an_application() {
        let grammar = bracket_grammar();
        let names = idents(&["x", "y"]);
        let _ = names;
        let raw = parse_raw("x [ y ]").unwrap();
        let rs = match raw {
            Raw::RawApp(rs) => rs,
            other => panic!("expected RawApp, got {other:?}"),
        };
        let results = crate::combinator::parse_all(&grammar, &rs);
        assert_eq!(results.len(), 1);
        match &results[0] {
            Raw::AppR(head, arg) => {
                assert_eq!(**head, Raw::Name("x".to_string()));
                assert_eq!(arg.hiding, Hiding::NotHidden);
                match &*arg.value {
                    Raw::OpR(parts, args) => {
                        assert_eq!(parts, &vec!["[".to_string(), "]".to_string()]);
                        assert_eq!(args, &vec![Raw::Name("y".to_string())]);
                    }
                    other => panic!("expected OpR argument, got {other:?}"),
                }
            }
            other => panic!("expected AppR, got {other:?}"),
        }
    }

    #[test]
    fn empty_operator_template_is_rejected() {
        assert_eq!(op(Vec::<String>::new()).unwrap_err(), MixfixError::EmptyOperator);
    }
}
