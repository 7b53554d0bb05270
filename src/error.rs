//! Error types.
//!
//! Both the raw reader and the mixfix driver surface one of three kinds of
//! failure: malformed input, no parse, or ambiguous parse (`spec.md` §7).
//! There is never a partial tree on failure. Following the teacher's own
//! practice, these are hand-written enums with manual `Display`/`Error`
//! impls rather than a derive-macro crate — the error surface here is small
//! and fixed by `spec.md` §6.2, so a derive buys nothing a few lines of
//! `match` don't already give us.

use crate::mixfix::Exp;
use crate::raw::Raw;
use std::fmt;

/// Failure from [`crate::raw::parse_raw`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawError {
    /// No sequence of tokens in the grammar of `spec.md` §4.2 accounts for
    /// the whole input.
    NoParse,
    /// More than one whole-input parse. Preserved as a defensive invariant:
    /// for this grammar it should be unreachable.
    Ambiguous(Vec<Raw>),
}

impl fmt::Display for RawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawError::NoParse => write!(f, "parseRaw: no parse"),
            RawError::Ambiguous(candidates) => {
                write!(f, "parseRaw: ambiguous parse: ")?;
                let rendered: Vec<String> = candidates.iter().map(|r| r.to_string()).collect();
                write!(f, "{}", rendered.join(", "))
            }
        }
    }
}

impl std::error::Error for RawError {}

/// Failure from [`crate::mixfix::parse_exp`] or from grammar construction
/// (`spec.md` §6.2).
#[derive(Debug, Clone, PartialEq)]
pub enum MixfixError {
    /// A `RawApp` admits no parse under the supplied grammar.
    NoParse,
    /// A `RawApp` admits more than one whole-input parse; carries every
    /// candidate so the caller can show the user how to disambiguate.
    Ambiguous(Vec<Exp>),
    /// A `Braces` group appeared outside an application's hidden-argument
    /// position.
    BadHiddenApp,
    /// An operator template was constructed with zero identifier
    /// fragments. `spec.md` §7 treats this as a parse-time error, not a
    /// construction-time panic, so it rides this same error type.
    EmptyOperator,
}

impl fmt::Display for MixfixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MixfixError::NoParse => write!(f, "no parse"),
            MixfixError::Ambiguous(candidates) => {
                write!(f, "ambiguous parse: ")?;
                let rendered: Vec<String> = candidates.iter().map(|e| e.to_string()).collect();
                write!(f, "{}", rendered.join(", "))
            }
            MixfixError::BadHiddenApp => write!(f, "bad hidden app"),
            MixfixError::EmptyOperator => write!(f, "empty mixfix operator"),
        }
    }
}

impl std::error::Error for MixfixError {}
