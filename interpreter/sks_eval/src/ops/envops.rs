//! Environment operators: `define(name)`, `delete(name)`, `isdef(name)`.

use sks_runtime::{Environment, EvalResult, Exception, ExceptionKind, Stack, Value};

use super::pop_instruction;

/// `define(name)`: take ownership of the Instruction on top and store
/// it under `name`. The name must be a spellable word: non-empty and
/// free of reserved bytes.
pub(crate) fn define(stack: &mut Stack, env: &mut Environment, name: &str) -> EvalResult {
    if name.is_empty() || name.bytes().any(sks_lexer::is_reserved) {
        return Err(Exception::new(ExceptionKind::InvalidNameDefine));
    }
    let body = pop_instruction(stack)?;
    env.set(name, body);
    Ok(())
}

/// `delete(name)`: forget a definition; silent when it never existed.
pub(crate) fn delete(_stack: &mut Stack, env: &mut Environment, name: &str) -> EvalResult {
    env.remove(name);
    Ok(())
}

/// `isdef(name)`: push whether `name` is currently defined.
pub(crate) fn is_defined(stack: &mut Stack, env: &mut Environment, name: &str) -> EvalResult {
    let defined = env.contains(name);
    stack.push(Value::Bool(defined));
    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn define_takes_the_instruction() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        st.push(Value::Instruction("dup *".to_string()));
        define(&mut st, &mut env, "sq").unwrap();
        assert!(st.is_empty());
        assert_eq!(env.get("sq"), Some("dup *"));
    }

    #[test]
    fn define_rejects_reserved_bytes() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        st.push(Value::Instruction("1".to_string()));
        for bad in ["a b", "a[", "x\"y", ""] {
            let exc = define(&mut st, &mut env, bad).unwrap_err();
            assert_eq!(exc.kind, ExceptionKind::InvalidNameDefine);
        }
        // The instruction operand is still there.
        assert_eq!(st.len(), 1);
    }

    #[test]
    fn define_requires_an_instruction() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        st.push(Value::Int(1));
        assert_eq!(
            define(&mut st, &mut env, "w").unwrap_err().kind,
            ExceptionKind::InvalidOperands
        );
    }

    #[test]
    fn delete_is_silent_on_missing_words() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        delete(&mut st, &mut env, "ghost").unwrap();
    }

    #[test]
    fn isdef_reports_presence() {
        let mut env = Environment::new();
        env.set("w", "1");
        let mut st = Stack::new();
        is_defined(&mut st, &mut env, "w").unwrap();
        is_defined(&mut st, &mut env, "x").unwrap();
        assert_eq!(st.values(), &[Value::Bool(true), Value::Bool(false)]);
    }
}
