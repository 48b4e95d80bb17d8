//! Script persistence: `load(path)` and `save(path)`.

use std::fs::File;
use std::io::Write;

use sks_runtime::{
    invalid_operands, Environment, EvalResult, Exception, ExceptionKind, Stack,
};

use crate::interp::eval_script;

/// `load(path)`: read the file in one shot and run it as a script
/// against the current state.
pub(crate) fn load(stack: &mut Stack, env: &mut Environment, path: &str) -> EvalResult {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(Exception::new(ExceptionKind::FileNotFound))
        }
        Err(_) => return Err(Exception::new(ExceptionKind::IoError)),
    };
    eval_script(stack, env, &content)
}

/// `save(path)`: write every stack value in canonical source form,
/// bottom first, separated by single spaces. Inner stacks have no
/// canonical form and are rejected before the file is touched.
pub(crate) fn save(stack: &mut Stack, _env: &mut Environment, path: &str) -> EvalResult {
    let mut literals = Vec::with_capacity(stack.len());
    for value in stack.values() {
        let Some(literal) = value.literal() else {
            return Err(invalid_operands());
        };
        literals.push(literal);
    }
    let Ok(mut file) = File::create(path) else {
        return Err(Exception::new(ExceptionKind::FileNotCreatable));
    };
    file.write_all(literals.join(" ").as_bytes())
        .map_err(|_| Exception::new(ExceptionKind::IoError))
}
