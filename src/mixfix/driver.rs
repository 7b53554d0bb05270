//! The driver: walks a [`Raw`] tree produced by [`crate::raw::parse_raw`]
//! and a user grammar's fixpoint parser, resolving it to an [`Exp`]
//! (`spec.md` §4.3.3).

use super::Exp;
use crate::combinator::parse_all;
use crate::error::MixfixError;
use crate::raw::{Arg, Raw};

use super::RawParser;

/// Resolves a `Raw` tree into an `Exp`, under the grammar `top`.
///
/// `RawApp` is the one case that can branch: its children are re-parsed
/// under `top`, and however many whole-input parses result determines
/// whether this returns `Ok`, `Err(NoParse)`, or `Err(Ambiguous(_))`. Every
/// other variant is a direct structural translation.
pub fn parse_exp(top: &RawParser, r: Raw) -> Result<Exp, MixfixError> {
    match r {
        Raw::Name(s) => Ok(Exp::Id(s)),
        Raw::Lit(n) => Ok(Exp::Lit(n)),
        Raw::Paren(inner) => parse_exp(top, *inner),
        Raw::Braces(_) => Err(MixfixError::BadHiddenApp),
        Raw::RawApp(rs) => {
            let candidates = parse_all(top, &rs);
            match candidates.len() {
                0 => Err(MixfixError::NoParse),
                1 => parse_exp(top, candidates.into_iter().next().expect("len == 1")),
                n => {
                    #[cfg(feature = "trace")]
                    log::trace!("parse_exp: {n} candidate parses for one application spine");
                    let mut exps = Vec::with_capacity(n);
                    for candidate in candidates {
                        exps.push(parse_exp(top, candidate)?);
                    }
                    Err(MixfixError::Ambiguous(exps))
                }
            }
        }
        Raw::AppR(head, arg) => {
            let head = parse_exp(top, *head)?;
            let value = parse_exp(top, *arg.value)?;
            Ok(Exp::App(Box::new(head), Arg::new(arg.hiding, Box::new(value))))
        }
        Raw::OpR(parts, args) => {
            let args = args
                .into_iter()
                .map(|a| parse_exp(top, a))
                .collect::<Result<Vec<Exp>, MixfixError>>()?;
            Ok(Exp::Op(parts, args))
        }
    }
}
