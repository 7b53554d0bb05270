//! Canonical rendering of a resolved [`Exp`] back to surface syntax
//! (`spec.md` §4.3.4), used by error reporting to show ambiguous
//! candidates and by tests to check round-tripping.
//!
//! `Op(parts, args)` alone cannot tell prefix from postfix when
//! `args.len() == parts.len()`: both shapes have one more argument than
//! there are gaps between fragments, and `Op` stores no fixity tag. This
//! renders that boundary case in prefix shape — fragments first, trailing
//! operand last. A postfix operator that happens to land on this boundary
//! therefore does not round-trip through `Display`; see `DESIGN.md`.
//!
//! Rendering threads an `outer` precedence context down through the tree,
//! per §4.3.4: `Op` parenthesizes itself whenever `outer > 0`, unless it's
//! closed (strictly more fragments than arguments — a bracketed or
//! otherwise self-delimiting template never needs outer parens); `App`
//! parenthesizes itself only when `outer > 1`. A non-hidden application
//! argument is rendered at `outer = 2` (the one context that forces even
//! another `App` to parenthesize); every other recursive position is
//! rendered at `outer = 1`; a hidden argument's contents, already
//! delimited by `{}`, are rendered at `outer = 0`.

use super::Exp;
use crate::raw::Hiding;
use std::fmt;

impl Exp {
    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, outer: u8) -> fmt::Result {
        match self {
            Exp::Id(s) => write!(f, "{s}"),
            Exp::Lit(n) => write!(f, "{n}"),
            Exp::App(head, arg) => {
                let render = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
                    head.fmt_prec(f, 1)?;
                    write!(f, " ")?;
                    match arg.hiding {
                        Hiding::Hidden => {
                            write!(f, "{{")?;
                            arg.value.fmt_prec(f, 0)?;
                            write!(f, "}}")
                        }
                        Hiding::NotHidden => arg.value.fmt_prec(f, 2),
                    }
                };
                if outer > 1 {
                    write!(f, "(")?;
                    render(f)?;
                    write!(f, ")")
                } else {
                    render(f)
                }
            }
            Exp::Op(parts, args) => {
                let closed = parts.len() > args.len();
                let render = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
                    let mut args = args.iter();
                    let fragment_first = parts.len() >= args.len();
                    if fragment_first {
                        let mut first = true;
                        for part in parts {
                            if !first {
                                write!(f, " ")?;
                            }
                            write!(f, "{part}")?;
                            first = false;
                            if let Some(arg) = args.next() {
                                write!(f, " ")?;
                                arg.fmt_prec(f, 1)?;
                            }
                        }
                        for arg in args {
                            write!(f, " ")?;
                            arg.fmt_prec(f, 1)?;
                        }
                    } else {
                        // n < m: an infix shape, the leading operand comes
                        // before the first fragment.
                        if let Some(arg) = args.next() {
                            arg.fmt_prec(f, 1)?;
                        }
                        for part in parts {
                            write!(f, " {part}")?;
                            if let Some(arg) = args.next() {
                                write!(f, " ")?;
                                arg.fmt_prec(f, 1)?;
                            }
                        }
                    }
                    Ok(())
                };
                if outer > 0 && !closed {
                    write!(f, "(")?;
                    render(f)?;
                    write!(f, ")")
                } else {
                    render(f)
                }
            }
        }
    }
}

impl fmt::Display for Exp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}
