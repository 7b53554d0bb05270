//! A ready-made grammar, built from the combinators in [`crate::mixfix`],
//! matching the worked example in `spec.md` §6.3. Not required by the core
//! parser — useful as a realistic starting point and as the grammar the
//! `arithmetic` demo and the end-to-end scenario tests run against.

use crate::mixfix::{app, atom, infixl, nonfix, op, postfix, prefix, recursive, Level, RawParser};
use std::collections::HashSet;
use std::rc::Rc;

/// Builds the sample arithmetic-with-conditionals grammar from `spec.md`
/// §6.3: `if _ then _`, `if _ then _ else _`, left-associative `+`/`-`,
/// unary `-`, left-associative `*`/`/`, postfix `!`, application, a closed
/// `[ _ ]` bracket, and atoms drawn from `idents`.
///
/// Levels are listed lowest precedence first; `recursive` folds them from
/// the bottom (`atom`) up, so the first entry here binds loosest. Every
/// level is handed the grammar's own fixpoint (`top`), not just the next
/// level down, so a template's internal gaps — the bracketed content of
/// `[ _ ]`, the branches of `if _ then _ else _` — can themselves be any
/// expression the whole grammar admits, not only what the next-higher
/// level alone would parse.
pub fn arithmetic(idents: impl IntoIterator<Item = String>) -> RawParser {
    let idents: Rc<HashSet<String>> = Rc::new(idents.into_iter().collect());

    let if_then = op(["if".to_string(), "then".to_string()]).expect("nonempty template");
    let if_then_else =
        op(["if".to_string(), "then".to_string(), "else".to_string()]).expect("nonempty template");
    let plus = op(["+".to_string()]).expect("nonempty template");
    let minus = op(["-".to_string()]).expect("nonempty template");
    let unary_minus = op(["-".to_string()]).expect("nonempty template");
    let times = op(["*".to_string()]).expect("nonempty template");
    let divide = op(["/".to_string()]).expect("nonempty template");
    let bang = op(["!".to_string()]).expect("nonempty template");
    let brackets = op(["[".to_string(), "]".to_string()]).expect("nonempty template");

    recursive(move |top| {
        let levels: Vec<Level> = vec![
            prefix(vec![if_then.clone()], top.clone()),
            prefix(vec![if_then_else.clone()], top.clone()),
            infixl(vec![plus.clone(), minus.clone()], top.clone()),
            prefix(vec![unary_minus.clone()], top.clone()),
            infixl(vec![times.clone(), divide.clone()], top.clone()),
            postfix(vec![bang.clone()], top.clone()),
            app(top.clone()),
            nonfix(vec![brackets.clone()], top.clone()),
            Rc::new({
                let idents = idents.clone();
                move |_p: RawParser| atom(idents.clone())
            }),
        ];
        levels
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::parse_all;
    use crate::raw::{parse_raw, Raw};

    fn default_idents() -> Vec<String> {
        ["x", "y", "z", "f"].iter().map(|s| s.to_string()).collect()
    }

    fn run(input: &str) -> Vec<Raw> {
        let grammar = arithmetic(default_idents());
        let raw = parse_raw(input).unwrap();
        match raw {
            Raw::RawApp(rs) => parse_all(&grammar, &rs),
            single => parse_all(&grammar, &[single]),
        }
    }

    #[test]
    fn precedence_binds_times_tighter_than_plus() {
        let results = run("x + y * z");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn postfix_bang_and_app_compose() {
        let results = run("- x !");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn if_then_else_resolves_uniquely() {
        let results = run("if x then y else z");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn closed_brackets_as_an_argument() {
        let results = run("f x [ x + y ] z");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn a_dangling_operator_has_no_full_parse() {
        let results = run("x + y -");
        assert!(results.is_empty());
    }

    #[test]
    fn division_uses_the_ordinary_slash() {
        let results = run("x / y");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn a_multi_term_bracket_body_resolves() {
        let results = run("[ x + y ]");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn a_nested_conditional_resolves_in_the_else_branch() {
        let results = run("if x then if y then z else x else y");
        assert_eq!(results.len(), 1);
    }
}
