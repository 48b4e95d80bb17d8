//! Boolean operators, comparisons and equality.

use sks_runtime::{
    invalid_operands, stack_underflow, Environment, EvalResult, Stack, Value,
};

use super::need;

pub(crate) fn lit_true(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    stack.push(Value::Bool(true));
    Ok(())
}

pub(crate) fn lit_false(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    stack.push(Value::Bool(false));
    Ok(())
}

pub(crate) fn not(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    match stack.peek_mut(0) {
        None => Err(stack_underflow()),
        Some(Value::Bool(b)) => {
            *b = !*b;
            Ok(())
        }
        Some(_) => Err(invalid_operands()),
    }
}

fn connective(stack: &mut Stack, f: fn(bool, bool) -> bool) -> EvalResult {
    need(stack, 2)?;
    let (Some(Value::Bool(a)), Some(Value::Bool(b))) = (stack.peek(1), stack.peek(0)) else {
        return Err(invalid_operands());
    };
    let result = Value::Bool(f(*a, *b));
    stack.pop();
    stack.pop();
    stack.push(result);
    Ok(())
}

pub(crate) fn and(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    connective(stack, |a, b| a & b)
}

pub(crate) fn or(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    connective(stack, |a, b| a | b)
}

pub(crate) fn xor(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    connective(stack, |a, b| a ^ b)
}

/// Numeric comparison over Integer/Floating with widening.
fn comparison(stack: &mut Stack, f: fn(f64, f64) -> bool) -> EvalResult {
    need(stack, 2)?;
    #[allow(clippy::cast_precision_loss)]
    let as_f64 = |v: &Value| match v {
        Value::Int(n) => Some(*n as f64),
        Value::Float(x) => Some(*x),
        _ => None,
    };
    let (Some(b), Some(a)) = (
        stack.peek(0).and_then(as_f64),
        stack.peek(1).and_then(as_f64),
    ) else {
        return Err(invalid_operands());
    };
    let result = Value::Bool(f(a, b));
    stack.pop();
    stack.pop();
    stack.push(result);
    Ok(())
}

pub(crate) fn greater(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    comparison(stack, |a, b| a > b)
}

pub(crate) fn greater_eq(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    comparison(stack, |a, b| a >= b)
}

pub(crate) fn lower(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    comparison(stack, |a, b| a < b)
}

pub(crate) fn lower_eq(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    comparison(stack, |a, b| a <= b)
}

/// `==` consumes both operands; cross-kind comparisons are false
/// rather than errors, so equality can never fail on kinds.
pub(crate) fn equal(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    need(stack, 2)?;
    let Some(b) = stack.pop() else {
        return Err(stack_underflow());
    };
    let Some(a) = stack.pop() else {
        return Err(stack_underflow());
    };
    stack.push(Value::Bool(a.loose_eq(&b)));
    Ok(())
}

pub(crate) fn not_equal(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    need(stack, 2)?;
    let Some(b) = stack.pop() else {
        return Err(stack_underflow());
    };
    let Some(a) = stack.pop() else {
        return Err(stack_underflow());
    };
    stack.push(Value::Bool(!a.loose_eq(&b)));
    Ok(())
}
