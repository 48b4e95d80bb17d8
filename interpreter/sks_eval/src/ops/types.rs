//! Type reflection: `none`, `type` and the type-constant words.

use sks_runtime::{stack_underflow, Environment, EvalResult, Stack, Value, ValueKind};

pub(crate) fn none(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    stack.push(Value::None);
    Ok(())
}

/// Push the reified kind of the top value without consuming it.
pub(crate) fn type_of(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    let Some(top) = stack.peek(0) else {
        return Err(stack_underflow());
    };
    let kind = top.kind();
    stack.push(Value::Type(kind));
    Ok(())
}

macro_rules! type_constant {
    ($name:ident, $kind:ident) => {
        pub(crate) fn $name(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
            stack.push(Value::Type(ValueKind::$kind));
            Ok(())
        }
    };
}

type_constant!(instr_type, Instruction);
type_constant!(int_type, Int);
type_constant!(float_type, Float);
type_constant!(bool_type, Bool);
type_constant!(str_type, Str);
type_constant!(type_type, Type);
type_constant!(none_type, None);
type_constant!(stack_type, Stack);

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn type_of_peeks() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        st.push(Value::Float(1.0));
        type_of(&mut st, &mut env).unwrap();
        assert_eq!(
            st.values(),
            &[Value::Float(1.0), Value::Type(ValueKind::Float)]
        );
    }

    #[test]
    fn type_of_empty_underflows() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        assert!(type_of(&mut st, &mut env).is_err());
    }
}
