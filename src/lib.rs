//! # mixfix, an ambiguity-aware expression parser
//!
//! `mixfix` parses source text against a user-supplied operator grammar —
//! precedence levels of prefix, postfix, infix, and closed ("nonfix")
//! mixfix templates like `if _ then _ else _` — and resolves it to an
//! expression tree.
//!
//! Where most parser combinator libraries commit to the first successful
//! alternative, the kernel here ([`combinator`]) returns *every* successful
//! parse. An ambiguous grammar, or an ambiguous sentence in an unambiguous
//! grammar, surfaces as [`error::MixfixError::Ambiguous`] carrying every
//! candidate, rather than silently picking one.
//!
//! ## Example
//!
//! ```rust
//! use mixfix::grammar::arithmetic;
//! use mixfix::raw::parse_raw;
//! use mixfix::mixfix::parse_exp;
//!
//! let idents = ["x", "y", "z"].iter().map(|s| s.to_string());
//! let top = arithmetic(idents);
//!
//! let raw = parse_raw("x + y * z").unwrap();
//! let exp = parse_exp(&top, raw).unwrap();
//! assert_eq!(exp.to_string(), "x + y * z");
//! ```
//!
//! ## Parsing is two stages
//!
//! 1. [`raw::parse_raw`] reads source text character by character into a
//!    shallow [`raw::Raw`] tree: names, literals, parens, braces, and
//!    whitespace-delimited application spines. It knows nothing about
//!    operators — `x + y` and `f x y` parse identically, as three
//!    juxtaposed names.
//! 2. [`mixfix::parse_exp`] walks that tree against a grammar built from
//!    [`mixfix`]'s level combinators (`prefix`, `postfix`, `infixl`,
//!    `infixr`, `nonfix`, `app`), resolving juxtaposition into either
//!    ordinary application or a recognized mixfix template.
//!
//! Both stages share the nondeterministic kernel in [`combinator`]; the raw
//! reader instantiates it over `char`, the mixfix stage over [`raw::Raw`].
//!
//! ## Cargo features
//!
//! - `std` (default): reserved for `std`-gated behavior in optional
//!   dependencies (today, just `log`'s own `std` feature). Present so a
//!   downstream crate composing with `mixfix` can gate on it the
//!   conventional way; `mixfix` itself always links `std`.
//! - `trace`: logs grammar construction and ambiguity detection through
//!   the [`log`] crate, at `trace` level. Off by default — a user building
//!   a large grammar pays nothing for it unless asked.
#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![allow(clippy::let_and_return)]
#![allow(clippy::needless_continue)]

pub mod combinator;
pub mod error;
pub mod grammar;
pub mod mixfix;
pub mod raw;

/// Re-exports of the names most programs need: the two parse entry points,
/// the trees they produce, and the grammar-construction combinators.
pub mod prelude {
    pub use crate::combinator::{Parser, parse_all};
    pub use crate::error::{MixfixError, RawError};
    pub use crate::mixfix::{
        app, atom, infixl, infixr, nonfix, op, parse_exp, postfix, prefix, recursive, Exp,
        OpTemplate,
    };
    pub use crate::raw::{parse_raw, Arg, Hiding, Raw};
}
