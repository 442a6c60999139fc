mod env;
mod evaluator;
mod object;
pub mod prelude;

use crate::reader;

pub use self::env::{Env, SharedEnv};
pub use self::evaluator::{Error, Evaluator, Result, Signal, DEFAULT_MAX_CALL_DEPTH};
pub use self::object::{Builtin, BuiltinFn, Function, HashKey, HashPairs, Object, FALSE, NULL, TRUE};
pub use self::prelude::Builtins;

/// eval reads `input` and, if it parses cleanly, evaluates it in `env` with the
/// standard builtins. Any syntax error means nothing is evaluated.
pub fn eval(input: &str, env: &SharedEnv) -> std::result::Result<Object, Vec<reader::Error>> {
    let (program, errors) = reader::read(input);
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Evaluator::new().eval(&program, env))
}
