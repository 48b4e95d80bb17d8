//! Builtin operator tables and shared operand helpers.
//!
//! The three tables are closed name sets resolved with `match`; the
//! dispatcher consults them in plain → numbered → environment order.
//!
//! Every operator checks stack depth first and raises `StackUnderflow`
//! before touching the stack; operand kinds are validated through
//! `peek` before anything is popped, so a failed call leaves the stack
//! exactly as it found it.

mod control;
mod envops;
mod fileio;
mod inner;
mod logic;
mod math;
mod stackops;
mod text;
mod types;

use sks_runtime::{invalid_operands, stack_underflow, Environment, EvalResult, Stack, Value};

/// A plain operator: `dup`, `+`, `apply`, ...
pub(crate) type Op = fn(&mut Stack, &mut Environment) -> EvalResult;
/// A bracketed operator: `times(3)`, `define(sq)`, ...
pub(crate) type BrOp = fn(&mut Stack, &mut Environment, &str) -> EvalResult;
/// A numbered operator: `dup3`, `pinject2`, ...
pub(crate) type NumOp = fn(&mut Stack, &mut Environment, usize) -> EvalResult;

/// Plain operator table.
pub(crate) fn builtin(name: &str) -> Option<Op> {
    Some(match name {
        // arithmetic
        "+" => math::add,
        "-" => math::sub,
        "*" => math::mul,
        "/" => math::div,
        "%" => math::modulo,
        "pow" => math::pow,
        "sqrt" => math::sqrt,
        "int" => math::int,
        "--" => math::negate,
        "!" => math::factorial,
        "gamma" => math::gamma,
        "exp" => math::exp,
        "log" => math::log,
        "log2" => math::log2,
        "log10" => math::log10,
        // trigonometric and hyperbolic
        "sin" => math::sin,
        "cos" => math::cos,
        "tan" => math::tan,
        "arcsin" => math::arcsin,
        "arccos" => math::arccos,
        "arctan" => math::arctan,
        "sinh" => math::sinh,
        "cosh" => math::cosh,
        "tanh" => math::tanh,
        "arcsinh" => math::arcsinh,
        "arccosh" => math::arccosh,
        "arctanh" => math::arctanh,
        // boolean
        "true" => logic::lit_true,
        "false" => logic::lit_false,
        "not" => logic::not,
        "and" => logic::and,
        "or" => logic::or,
        "xor" => logic::xor,
        // comparison
        "==" => logic::equal,
        "!=" => logic::not_equal,
        "<" => logic::lower,
        "<=" => logic::lower_eq,
        ">" => logic::greater,
        ">=" => logic::greater_eq,
        // stack surgery
        "dup" => stackops::dup,
        "swap" => stackops::swap,
        "drop" => stackops::drop_top,
        "size" => stackops::size,
        "empty" => stackops::empty,
        "clear" => stackops::clear,
        "roll" => stackops::roll,
        "top" => stackops::top,
        "compress" => stackops::compress,
        "dip" => control::dip,
        "apply" => control::apply,
        "quote" => text::quote,
        "compose" => text::compose,
        "split" => text::split,
        // inner stacks
        "stack" => inner::new_stack,
        "push" => inner::push,
        "pop" => inner::pop,
        "inject" => inner::inject,
        // control
        "if" => control::if_op,
        "loop" => control::loop_op,
        "try" => control::try_op,
        "times" => control::times,
        "exit" => control::exit,
        "nop" => control::nop,
        "print" => control::print,
        "printall" => control::print_all,
        // types
        "none" => types::none,
        "type" => types::type_of,
        "INSTR" => types::instr_type,
        "INT" => types::int_type,
        "FLOAT" => types::float_type,
        "BOOL" => types::bool_type,
        "STR" => types::str_type,
        "TYPE" => types::type_type,
        "NONE" => types::none_type,
        "STACK" => types::stack_type,
        _ => return None,
    })
}

/// Bracketed operator table.
pub(crate) fn bracketed(head: &str) -> Option<BrOp> {
    Some(match head {
        "load" => fileio::load,
        "save" => fileio::save,
        "if" => control::if_cond,
        "loop" => control::loop_cond,
        "times" => control::times_expr,
        "compose" => text::compose_delim,
        "split" => text::split_delim,
        "dup" => stackops::dup_expr,
        "swap" => stackops::swap_expr,
        "dig" => stackops::dig_expr,
        "define" => envops::define,
        "delete" => envops::delete,
        "isdef" => envops::is_defined,
        "inject" => inner::inject_expr,
        "pinject" => inner::pinject_expr,
        _ => return None,
    })
}

/// Numbered operator table.
pub(crate) fn numbered(head: &str) -> Option<NumOp> {
    Some(match head {
        "dup" => stackops::dup_at,
        "swap" => stackops::swap_at,
        "dig" => stackops::dig_at,
        "inject" => inner::inject_at,
        "pinject" => inner::pinject_at,
        _ => return None,
    })
}

// ─── Operand helpers ────────────────────────────────────────────────

/// Depth check; raises `StackUnderflow` without touching the stack.
#[inline]
pub(crate) fn need(stack: &Stack, n: usize) -> EvalResult {
    if stack.len() < n {
        return Err(stack_underflow());
    }
    Ok(())
}

/// Pop the Instruction on top. The kind is checked before popping.
pub(crate) fn pop_instruction(stack: &mut Stack) -> EvalResult<String> {
    match stack.peek(0) {
        None => Err(stack_underflow()),
        Some(Value::Instruction(_)) => {
            let Some(Value::Instruction(body)) = stack.pop() else {
                unreachable!("peek just saw an instruction");
            };
            Ok(body)
        }
        Some(_) => Err(invalid_operands()),
    }
}

/// Pop the Integer on top.
pub(crate) fn pop_int(stack: &mut Stack) -> EvalResult<i64> {
    match stack.peek(0) {
        None => Err(stack_underflow()),
        Some(Value::Int(n)) => {
            let n = *n;
            stack.pop();
            Ok(n)
        }
        Some(_) => Err(invalid_operands()),
    }
}

/// Pop the Boolean on top.
pub(crate) fn pop_bool(stack: &mut Stack) -> EvalResult<bool> {
    match stack.peek(0) {
        None => Err(stack_underflow()),
        Some(Value::Bool(b)) => {
            let b = *b;
            stack.pop();
            Ok(b)
        }
        Some(_) => Err(invalid_operands()),
    }
}

/// Convert a popped Integer into a stack depth; negatives underflow
/// just like depths past the bottom.
#[inline]
pub(crate) fn depth_arg(n: i64) -> EvalResult<usize> {
    usize::try_from(n).map_err(|_| stack_underflow())
}
