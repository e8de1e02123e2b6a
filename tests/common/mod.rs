#![allow(dead_code)]

use stmt_params::{Error, Params, Vars, VarsResolver};

/// Variables every test line is resolved against.
pub fn test_vars() -> Vars {
    [("foo", "bar"), ("型示", "yes")].into_iter().collect()
}

/// Split `input` against [`test_vars`], backtick execution disabled.
pub fn split(input: &str) -> Result<Vec<String>, Error> {
    let vars = test_vars();
    Params::new(input).all(&mut VarsResolver::new(&vars))
}

/// Split `input` and assert it produces `expected`.
pub fn assert_tokens(input: &str, expected: &[&str]) {
    let tokens = split(input).unwrap_or_else(|e| panic!("{input:?}: unexpected error: {e}"));
    assert_eq!(tokens, expected, "input: {input:?}");
}
