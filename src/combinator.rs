//! A nondeterministic parser combinator kernel.
//!
//! Unlike a conventional PEG-style combinator, [`Parser::run`] returns *every*
//! successful parse of a prefix of the input, not just the first. The mixfix
//! driver in [`crate::mixfix`] relies on this: it is how ambiguity in a user
//! grammar is *detected* rather than silently resolved by whichever
//! alternative happened to be tried first.
//!
//! A `Parser<T, R>` is a boxed function from a token slice to a set of
//! `(result, tokens consumed)` pairs; an empty set is failure. The kernel is
//! instantiated twice in this crate: once over `char` for [`crate::raw`], once
//! over [`crate::raw::Raw`] for [`crate::mixfix`].

use std::rc::Rc;

/// A nondeterministic parser over a slice of `T`, producing `R`.
///
/// Cloning a `Parser` is cheap (an `Rc` bump); this is what lets grammar
/// levels be built once and reused across every call site that needs them.
pub struct Parser<T, R>(Rc<dyn Fn(&[T]) -> Vec<(R, usize)>>);

impl<T, R> Clone for Parser<T, R> {
    fn clone(&self) -> Self {
        Parser(self.0.clone())
    }
}

impl<T: 'static, R: 'static> Parser<T, R> {
    /// Builds a parser directly from its underlying run function.
    pub fn new(f: impl Fn(&[T]) -> Vec<(R, usize)> + 'static) -> Self {
        Parser(Rc::new(f))
    }

    /// Runs the parser, returning every `(result, tokens consumed)` pair.
    pub fn run(&self, input: &[T]) -> Vec<(R, usize)> {
        (self.0)(input)
    }
}

impl<T: 'static, R: Clone + 'static> Parser<T, R> {
    /// `bind(p, f)`: run `p`, then run `f(x)` on the remainder for every
    /// `(x, consumed)` `p` produced, unioning all the results.
    pub fn bind<R2: Clone + 'static>(
        &self,
        f: impl Fn(R) -> Parser<T, R2> + 'static,
    ) -> Parser<T, R2> {
        let this = self.clone();
        Parser::new(move |input: &[T]| {
            let mut out = Vec::new();
            for (r, consumed) in this.run(input) {
                let rest = &input[consumed..];
                for (r2, consumed2) in f(r).run(rest) {
                    out.push((r2, consumed + consumed2));
                }
            }
            out
        })
    }

    /// Maps every result of a successful parse, consuming the same input.
    pub fn map<R2: Clone + 'static>(&self, f: impl Fn(R) -> R2 + 'static) -> Parser<T, R2> {
        self.bind(move |r| succeed(f(r)))
    }

    /// `alt(p, q)`: the union of `p`'s and `q`'s results on the same input.
    /// Symmetric — preserves ambiguity rather than preferring either side.
    pub fn alt(&self, other: &Parser<T, R>) -> Parser<T, R> {
        let a = self.clone();
        let b = other.clone();
        Parser::new(move |input: &[T]| {
            let mut out = a.run(input);
            out.extend(b.run(input));
            out
        })
    }
}

/// `return(x)`: succeeds with `x`, consuming nothing.
pub fn succeed<T: 'static, R: Clone + 'static>(value: R) -> Parser<T, R> {
    Parser::new(move |_input: &[T]| vec![(value.clone(), 0)])
}

/// `fail`: the parser that never succeeds.
pub fn fail<T: 'static, R: 'static>() -> Parser<T, R> {
    Parser::new(|_input: &[T]| Vec::new())
}

/// `sat(pred)`: consumes exactly one token if `pred` holds for it.
pub fn satisfy<T: Clone + 'static>(pred: impl Fn(&T) -> bool + 'static) -> Parser<T, T> {
    Parser::new(move |input: &[T]| match input.first() {
        Some(t) if pred(t) => vec![(t.clone(), 1)],
        _ => Vec::new(),
    })
}

/// `choice(ps)`: n-ary [`Parser::alt`].
pub fn choice<T: 'static, R: Clone + 'static>(ps: Vec<Parser<T, R>>) -> Parser<T, R> {
    ps.into_iter().fold(fail(), |acc, p| acc.alt(&p))
}

/// Zero-or-more repetitions of `p`, returning *every* number of repetitions
/// as a separate alternative (not just the greedy maximum) — associativity
/// resolution in [`crate::mixfix`] depends on seeing every prefix.
///
/// The mutual recursion with [`many1`] is deferred behind a closure so that
/// constructing `many(p)` does not itself recurse infinitely; the recursive
/// call only happens once the parser is actually run on input.
pub fn many<T: 'static, R: Clone + 'static>(p: Parser<T, R>) -> Parser<T, Vec<R>> {
    let inner = p.clone();
    let lazy_many1 = Parser::new(move |input: &[T]| many1(inner.clone()).run(input));
    lazy_many1.alt(&succeed(Vec::new()))
}

/// One-or-more repetitions of `p`, same all-prefixes semantics as [`many`].
pub fn many1<T: 'static, R: Clone + 'static>(p: Parser<T, R>) -> Parser<T, Vec<R>> {
    p.clone().bind(move |x: R| {
        let p2 = p.clone();
        many(p2).bind(move |xs: Vec<R>| {
            let mut v = Vec::with_capacity(xs.len() + 1);
            v.push(x.clone());
            v.extend(xs);
            succeed(v)
        })
    })
}

/// A combining function produced by an operator-fragment parser, used by
/// [`chainl1`] and [`chainr1`] to fold a chain of operands into one result.
pub type Combine<R> = Rc<dyn Fn(R, R) -> R>;

/// Parses `p (opP p)*`, left-associating: `p1 op p2 op p3` folds as
/// `(p1 op p2) op p3`.
pub fn chainl1<T: 'static, R: Clone + 'static>(
    p: Parser<T, R>,
    opp: Parser<T, Combine<R>>,
) -> Parser<T, R> {
    fn rest<T: 'static, R: Clone + 'static>(
        p: Parser<T, R>,
        opp: Parser<T, Combine<R>>,
        acc: R,
    ) -> Parser<T, R> {
        let p2 = p.clone();
        let opp2 = opp.clone();
        let acc2 = acc.clone();
        let cont = opp.bind(move |combine| {
            let p3 = p2.clone();
            let opp3 = opp2.clone();
            let acc3 = acc2.clone();
            p3.clone().bind(move |y| rest(p3.clone(), opp3.clone(), combine(acc3.clone(), y)))
        });
        cont.alt(&succeed(acc))
    }
    p.clone().bind(move |first| rest(p.clone(), opp.clone(), first))
}

/// Parses `p (opP p)*`, right-associating: `p1 op p2 op p3` folds as
/// `p1 op (p2 op p3)`.
///
/// Recurses into itself only inside a `bind` closure, so constructing
/// `chainr1(p, opp)` does not eagerly recurse the way a direct call would.
pub fn chainr1<T: 'static, R: Clone + 'static>(
    p: Parser<T, R>,
    opp: Parser<T, Combine<R>>,
) -> Parser<T, R> {
    p.clone().bind(move |first: R| {
        let p2 = p.clone();
        let opp2 = opp.clone();
        let first2 = first.clone();
        let has_more = opp.clone().bind(move |combine: Combine<R>| {
            let combine = combine.clone();
            let first3 = first2.clone();
            chainr1(p2.clone(), opp2.clone()).map(move |rest| combine(first3.clone(), rest))
        });
        has_more.alt(&succeed(first))
    })
}

/// `parse(p, input)`: runs `p` and keeps only the results that consumed the
/// *entire* input — the driver only ever cares about whole-input parses.
pub fn parse_all<T: 'static, R: Clone + 'static>(p: &Parser<T, R>, input: &[T]) -> Vec<R> {
    p.run(input)
        .into_iter()
        .filter(|(_, consumed)| *consumed == input.len())
        .map(|(r, _)| r)
        .collect()
}
