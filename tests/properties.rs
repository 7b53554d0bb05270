//! Property checks over the raw reader and the sample arithmetic grammar.

use mixfix::grammar::arithmetic;
use mixfix::mixfix::{parse_exp, Exp};
use mixfix::raw::parse_raw;
use proptest::prelude::*;

fn idents() -> Vec<String> {
    ["x", "y", "z"].iter().map(|s| s.to_string()).collect()
}

fn ident_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["x".prop_map(String::from), "y".prop_map(String::from), "z".prop_map(String::from)]
}

fn plus_chain_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(ident_strategy(), 1..6)
}

proptest! {
    /// A chain of identifiers joined by `+` always resolves to exactly one
    /// `Exp`, and it's a fully left-leaning tree: the outermost node's
    /// first argument is never a bare identifier unless the whole chain
    /// was length 2.
    #[test]
    fn plus_chains_are_left_associative(names in plus_chain_strategy()) {
        let source = names.join(" + ");
        let top = arithmetic(idents());
        let raw = parse_raw(&source).unwrap();
        let exp = parse_exp(&top, raw).unwrap();

        if names.len() == 1 {
            prop_assert_eq!(exp, Exp::Id(names[0].clone()));
        } else {
            match exp {
                Exp::Op(parts, args) => {
                    prop_assert_eq!(parts, vec!["+".to_string()]);
                    prop_assert_eq!(args.len(), 2);
                    let last_arg_is_leaf = matches!(args[1], Exp::Id(_));
                    prop_assert!(last_arg_is_leaf);
                }
                other => prop_assert!(false, "expected Op, got {other:?}"),
            }
        }
    }

    /// Parenthesizing an identifier never changes what it resolves to.
    #[test]
    fn parens_around_an_identifier_are_transparent(name in ident_strategy()) {
        let top = arithmetic(idents());
        let bare = parse_exp(&top, parse_raw(&name).unwrap()).unwrap();
        let parenthesized = parse_exp(&top, parse_raw(&format!("({name})")).unwrap()).unwrap();
        prop_assert_eq!(bare, parenthesized);
    }

    /// The raw reader's output for a chain of juxtaposed identifiers is
    /// insensitive to how much whitespace separates them.
    #[test]
    fn raw_reading_ignores_whitespace_width(names in prop::collection::vec(ident_strategy(), 2..5), pad in 1usize..4) {
        let tight = names.join(" ");
        let padded = names.join(&" ".repeat(pad));
        prop_assert_eq!(parse_raw(&tight).unwrap(), parse_raw(&padded).unwrap());
    }
}
