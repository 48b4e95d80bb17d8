//! Arithmetic and transcendental operators.
//!
//! Numeric operators widen Integer to Floating when the other operand
//! is Floating; Integer arithmetic wraps. Division, `pow` and the
//! transcendental wrappers always produce Floating, matching the host
//! math library they wrap.

use sks_runtime::{invalid_operands, stack_underflow, value_error, Environment, EvalResult, Stack, Value};

use super::need;

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(x) => x,
        }
    }

    #[inline]
    fn is_zero(self) -> bool {
        match self {
            Num::Int(n) => n == 0,
            Num::Float(x) => x == 0.0,
        }
    }
}

fn peek_num(stack: &Stack, depth: usize) -> EvalResult<Num> {
    match stack.peek(depth) {
        None => Err(stack_underflow()),
        Some(Value::Int(n)) => Ok(Num::Int(*n)),
        Some(Value::Float(x)) => Ok(Num::Float(*x)),
        Some(_) => Err(invalid_operands()),
    }
}

/// Both operands of a binary numeric operator, first operand first.
fn peek_num2(stack: &Stack) -> EvalResult<(Num, Num)> {
    need(stack, 2)?;
    let second = peek_num(stack, 0)?;
    let first = peek_num(stack, 1)?;
    Ok((first, second))
}

fn replace2(stack: &mut Stack, value: Value) {
    stack.pop();
    stack.pop();
    stack.push(value);
}

fn replace1(stack: &mut Stack, value: Value) {
    stack.pop();
    stack.push(value);
}

pub(crate) fn add(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    let (a, b) = peek_num2(stack)?;
    let result = match (a, b) {
        (Num::Int(x), Num::Int(y)) => Value::Int(x.wrapping_add(y)),
        _ => Value::Float(a.as_f64() + b.as_f64()),
    };
    replace2(stack, result);
    Ok(())
}

pub(crate) fn sub(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    let (a, b) = peek_num2(stack)?;
    let result = match (a, b) {
        (Num::Int(x), Num::Int(y)) => Value::Int(x.wrapping_sub(y)),
        _ => Value::Float(a.as_f64() - b.as_f64()),
    };
    replace2(stack, result);
    Ok(())
}

pub(crate) fn mul(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    let (a, b) = peek_num2(stack)?;
    let result = match (a, b) {
        (Num::Int(x), Num::Int(y)) => Value::Int(x.wrapping_mul(y)),
        _ => Value::Float(a.as_f64() * b.as_f64()),
    };
    replace2(stack, result);
    Ok(())
}

/// Division always produces Floating; a zero divisor of either kind
/// raises `ValueError`.
pub(crate) fn div(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    let (a, b) = peek_num2(stack)?;
    if b.is_zero() {
        return Err(value_error());
    }
    replace2(stack, Value::Float(a.as_f64() / b.as_f64()));
    Ok(())
}

/// Remainder over Integers only.
pub(crate) fn modulo(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    need(stack, 2)?;
    let (Some(Value::Int(a)), Some(Value::Int(b))) = (stack.peek(1), stack.peek(0)) else {
        return Err(invalid_operands());
    };
    if *b == 0 {
        return Err(value_error());
    }
    let result = Value::Int(a.wrapping_rem(*b));
    replace2(stack, result);
    Ok(())
}

pub(crate) fn pow(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    let (a, b) = peek_num2(stack)?;
    replace2(stack, Value::Float(a.as_f64().powf(b.as_f64())));
    Ok(())
}

/// Square root; zero raises `ValueError`.
pub(crate) fn sqrt(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    need(stack, 1)?;
    let x = peek_num(stack, 0)?;
    if x.is_zero() {
        return Err(value_error());
    }
    replace1(stack, Value::Float(x.as_f64().sqrt()));
    Ok(())
}

/// Truncate Floating to Integer; Integer passes through.
pub(crate) fn int(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    match stack.peek(0) {
        None => Err(stack_underflow()),
        Some(Value::Int(_)) => Ok(()),
        Some(Value::Float(x)) => {
            #[allow(clippy::cast_possible_truncation)]
            let n = *x as i64;
            replace1(stack, Value::Int(n));
            Ok(())
        }
        Some(_) => Err(invalid_operands()),
    }
}

/// `--`: arithmetic negation.
pub(crate) fn negate(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    match stack.peek(0) {
        None => Err(stack_underflow()),
        Some(Value::Int(n)) => {
            let v = Value::Int(n.wrapping_neg());
            replace1(stack, v);
            Ok(())
        }
        Some(Value::Float(x)) => {
            let v = Value::Float(-x);
            replace1(stack, v);
            Ok(())
        }
        Some(_) => Err(invalid_operands()),
    }
}

/// `!`: factorial of a non-negative Integer. A negative operand or an
/// overflowing result raises `ValueError`.
pub(crate) fn factorial(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    match stack.peek(0) {
        None => Err(stack_underflow()),
        Some(Value::Int(n)) => {
            let n = *n;
            if n < 0 {
                return Err(value_error());
            }
            let Some(result) = (1..=n).try_fold(1i64, i64::checked_mul) else {
                return Err(value_error());
            };
            replace1(stack, Value::Int(result));
            Ok(())
        }
        Some(_) => Err(invalid_operands()),
    }
}

/// Shared shape of the unary Floating wrappers: Integer widens, the
/// result is Floating.
fn unary_float(stack: &mut Stack, f: fn(f64) -> f64) -> EvalResult {
    need(stack, 1)?;
    let x = peek_num(stack, 0)?;
    replace1(stack, Value::Float(f(x.as_f64())));
    Ok(())
}

/// Gamma function via the Lanczos approximation (g = 7, 9 terms).
fn lanczos_gamma(x: f64) -> f64 {
    use std::f64::consts::PI;
    const G: f64 = 7.0;
    const COEF: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    if x < 0.5 {
        // Reflection for the left half-plane.
        PI / ((PI * x).sin() * lanczos_gamma(1.0 - x))
    } else {
        let x = x - 1.0;
        let t = x + G + 0.5;
        let mut acc = COEF[0];
        for (i, &c) in COEF.iter().enumerate().skip(1) {
            #[allow(clippy::cast_precision_loss)]
            let den = x + i as f64;
            acc += c / den;
        }
        (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * acc
    }
}

pub(crate) fn gamma(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, lanczos_gamma)
}

pub(crate) fn exp(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::exp)
}

pub(crate) fn log(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::ln)
}

pub(crate) fn log2(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::log2)
}

pub(crate) fn log10(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::log10)
}

pub(crate) fn sin(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::sin)
}

pub(crate) fn cos(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::cos)
}

pub(crate) fn tan(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::tan)
}

pub(crate) fn arcsin(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::asin)
}

pub(crate) fn arccos(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::acos)
}

pub(crate) fn arctan(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::atan)
}

pub(crate) fn sinh(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::sinh)
}

pub(crate) fn cosh(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::cosh)
}

pub(crate) fn tanh(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::tanh)
}

pub(crate) fn arcsinh(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::asinh)
}

pub(crate) fn arccosh(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::acosh)
}

pub(crate) fn arctanh(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    unary_float(stack, f64::atanh)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use sks_runtime::ExceptionKind;

    fn stack_of(values: Vec<Value>) -> Stack {
        let mut st = Stack::new();
        for v in values {
            st.push(v);
        }
        st
    }

    #[test]
    fn int_addition_stays_integer() {
        let mut env = Environment::new();
        let mut st = stack_of(vec![Value::Int(1), Value::Int(2)]);
        add(&mut st, &mut env).unwrap();
        assert_eq!(st.values(), &[Value::Int(3)]);
    }

    #[test]
    fn mixed_addition_widens() {
        let mut env = Environment::new();
        let mut st = stack_of(vec![Value::Int(1), Value::Float(2.0)]);
        add(&mut st, &mut env).unwrap();
        assert_eq!(st.values(), &[Value::Float(3.0)]);
    }

    #[test]
    fn division_is_always_floating() {
        let mut env = Environment::new();
        let mut st = stack_of(vec![Value::Int(7), Value::Int(2)]);
        div(&mut st, &mut env).unwrap();
        assert_eq!(st.values(), &[Value::Float(3.5)]);
    }

    #[test]
    fn division_by_zero_preserves_operands() {
        let mut env = Environment::new();
        let mut st = stack_of(vec![Value::Int(1), Value::Int(0)]);
        let exc = div(&mut st, &mut env).unwrap_err();
        assert_eq!(exc.kind, ExceptionKind::ValueError);
        assert_eq!(st.values(), &[Value::Int(1), Value::Int(0)]);
    }

    #[test]
    fn invalid_operand_preserves_stack() {
        let mut env = Environment::new();
        let mut st = stack_of(vec![Value::Int(1), Value::Bool(true)]);
        let exc = add(&mut st, &mut env).unwrap_err();
        assert_eq!(exc.kind, ExceptionKind::InvalidOperands);
        assert_eq!(st.values(), &[Value::Int(1), Value::Bool(true)]);
    }

    #[test]
    fn underflow_checked_before_operand_kinds() {
        let mut env = Environment::new();
        let mut st = stack_of(vec![Value::Bool(true)]);
        let exc = add(&mut st, &mut env).unwrap_err();
        assert_eq!(exc.kind, ExceptionKind::StackUnderflow);
    }

    #[test]
    fn factorial_of_five() {
        let mut env = Environment::new();
        let mut st = stack_of(vec![Value::Int(5)]);
        factorial(&mut st, &mut env).unwrap();
        assert_eq!(st.values(), &[Value::Int(120)]);
    }

    #[test]
    fn factorial_of_negative_is_value_error() {
        let mut env = Environment::new();
        let mut st = stack_of(vec![Value::Int(-1)]);
        assert_eq!(
            factorial(&mut st, &mut env).unwrap_err().kind,
            ExceptionKind::ValueError
        );
        assert_eq!(st.values(), &[Value::Int(-1)]);
    }

    #[test]
    fn factorial_overflow_is_value_error() {
        let mut env = Environment::new();
        let mut st = stack_of(vec![Value::Int(21)]);
        assert_eq!(
            factorial(&mut st, &mut env).unwrap_err().kind,
            ExceptionKind::ValueError
        );
    }

    #[test]
    fn sqrt_of_zero_is_value_error() {
        let mut env = Environment::new();
        let mut st = stack_of(vec![Value::Int(0)]);
        assert_eq!(
            sqrt(&mut st, &mut env).unwrap_err().kind,
            ExceptionKind::ValueError
        );
    }

    #[test]
    fn gamma_matches_factorial_on_integers() {
        let mut env = Environment::new();
        let mut st = stack_of(vec![Value::Int(5)]);
        gamma(&mut st, &mut env).unwrap();
        let Some(Value::Float(x)) = st.peek(0) else {
            panic!("expected float");
        };
        assert!((x - 24.0).abs() < 1e-9, "gamma(5) ~ 24, got {x}");
    }

    #[test]
    fn int_truncates_floating() {
        let mut env = Environment::new();
        let mut st = stack_of(vec![Value::Float(-2.9)]);
        int(&mut st, &mut env).unwrap();
        assert_eq!(st.values(), &[Value::Int(-2)]);
    }
}
