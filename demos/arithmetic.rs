//! Reads an expression from the command line, parses it against the sample
//! arithmetic grammar, and prints the resolved tree (or the parse error).
//!
//! ```sh
//! cargo run --example arithmetic -- 'if x then y * z else - z !'
//! ```

use mixfix::grammar::arithmetic;
use mixfix::mixfix::parse_exp;
use mixfix::raw::parse_raw;

fn main() {
    env_logger::init();

    let source = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if source.is_empty() {
        eprintln!("usage: arithmetic <expression>");
        std::process::exit(2);
    }

    let idents = ["x", "y", "z", "f"].iter().map(|s| s.to_string());
    let top = arithmetic(idents);

    let raw = match parse_raw(&source) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    match parse_exp(&top, raw) {
        Ok(exp) => println!("{exp}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
