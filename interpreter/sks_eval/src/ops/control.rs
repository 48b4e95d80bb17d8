//! Control flow: branching, loops, `try`, `apply`, `dip` and the small
//! odds and ends (`exit`, `nop`, printing).

use sks_runtime::{
    invalid_operands, Environment, EvalResult, Exception, ExceptionKind, Stack, Value,
};

use super::{need, pop_bool, pop_instruction, pop_int};
use crate::interp::eval_script;

/// `if`: pops the false branch, the true branch, and a Boolean beneath
/// them, then runs the chosen branch.
pub(crate) fn if_op(stack: &mut Stack, env: &mut Environment) -> EvalResult {
    need(stack, 3)?;
    let branches_ok = matches!(stack.peek(0), Some(Value::Instruction(_)))
        && matches!(stack.peek(1), Some(Value::Instruction(_)))
        && matches!(stack.peek(2), Some(Value::Bool(_)));
    if !branches_ok {
        return Err(invalid_operands());
    }
    let on_false = pop_instruction(stack)?;
    let on_true = pop_instruction(stack)?;
    let cond = pop_bool(stack)?;
    eval_script(stack, env, if cond { &on_true } else { &on_false })
}

/// `if(cond)`: the branches come off the stack, the condition from the
/// evaluated argument.
pub(crate) fn if_cond(stack: &mut Stack, env: &mut Environment, arg: &str) -> EvalResult {
    need(stack, 2)?;
    let branches_ok = matches!(stack.peek(0), Some(Value::Instruction(_)))
        && matches!(stack.peek(1), Some(Value::Instruction(_)));
    if !branches_ok {
        return Err(invalid_operands());
    }
    let on_false = pop_instruction(stack)?;
    let on_true = pop_instruction(stack)?;
    eval_script(stack, env, arg)?;
    let cond = pop_bool(stack)?;
    eval_script(stack, env, if cond { &on_true } else { &on_false })
}

/// `loop`: run the body repeatedly; every iteration must leave a
/// Boolean on top, consumed as the continue flag.
pub(crate) fn loop_op(stack: &mut Stack, env: &mut Environment) -> EvalResult {
    let body = pop_instruction(stack)?;
    loop {
        eval_script(stack, env, &body)?;
        if !pop_bool(stack)? {
            return Ok(());
        }
    }
}

/// `loop(cond)`: evaluate the condition first, run the body while it
/// leaves true.
pub(crate) fn loop_cond(stack: &mut Stack, env: &mut Environment, arg: &str) -> EvalResult {
    let body = pop_instruction(stack)?;
    loop {
        eval_script(stack, env, arg)?;
        if !pop_bool(stack)? {
            return Ok(());
        }
        eval_script(stack, env, &body)?;
    }
}

/// `times`: pops the Instruction, then the Integer count beneath it.
pub(crate) fn times(stack: &mut Stack, env: &mut Environment) -> EvalResult {
    need(stack, 2)?;
    let operands_ok = matches!(stack.peek(0), Some(Value::Instruction(_)))
        && matches!(stack.peek(1), Some(Value::Int(_)));
    if !operands_ok {
        return Err(invalid_operands());
    }
    let body = pop_instruction(stack)?;
    let count = pop_int(stack)?;
    run_times(stack, env, &body, count)
}

/// `times(n-expr)`: pops the Instruction, evaluates the count.
pub(crate) fn times_expr(stack: &mut Stack, env: &mut Environment, arg: &str) -> EvalResult {
    let body = pop_instruction(stack)?;
    eval_script(stack, env, arg)?;
    let count = pop_int(stack)?;
    run_times(stack, env, &body, count)
}

fn run_times(stack: &mut Stack, env: &mut Environment, body: &str, count: i64) -> EvalResult {
    for _ in 0..count.max(0) {
        eval_script(stack, env, body)?;
    }
    Ok(())
}

/// `try`: run the instruction, mapping success to `true` and any
/// exception (including `exit`) to `false`.
pub(crate) fn try_op(stack: &mut Stack, env: &mut Environment) -> EvalResult {
    let body = pop_instruction(stack)?;
    let outcome = eval_script(stack, env, &body).is_ok();
    stack.push(Value::Bool(outcome));
    Ok(())
}

/// `apply`: execute the instruction on top.
pub(crate) fn apply(stack: &mut Stack, env: &mut Environment) -> EvalResult {
    let body = pop_instruction(stack)?;
    eval_script(stack, env, &body)
}

/// `dip`: tuck the value under the instruction away, run the
/// instruction, put the value back. The value is restored on failure
/// paths too.
pub(crate) fn dip(stack: &mut Stack, env: &mut Environment) -> EvalResult {
    need(stack, 2)?;
    let body = pop_instruction(stack)?;
    let Some(saved) = stack.pop() else {
        unreachable!("depth checked above");
    };
    let result = eval_script(stack, env, &body);
    stack.push(saved);
    result
}

pub(crate) fn exit(_stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    Err(Exception::new(ExceptionKind::ProgramExit))
}

pub(crate) fn nop(_stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    Ok(())
}

/// Print the top value; a no-op on an empty stack.
pub(crate) fn print(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    if let Some(top) = stack.peek(0) {
        println!("{top}");
    }
    Ok(())
}

/// Print the whole stack, bottom first.
pub(crate) fn print_all(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    for value in stack.values() {
        println!("{value}");
    }
    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn instr(body: &str) -> Value {
        Value::Instruction(body.to_string())
    }

    #[test]
    fn if_takes_false_branch() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        st.push(Value::Bool(false));
        st.push(instr("1"));
        st.push(instr("2"));
        if_op(&mut st, &mut env).unwrap();
        assert_eq!(st.values(), &[Value::Int(2)]);
    }

    #[test]
    fn if_with_wrong_condition_kind_preserves_stack() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        st.push(Value::Int(9));
        st.push(instr("1"));
        st.push(instr("2"));
        assert_eq!(
            if_op(&mut st, &mut env).unwrap_err().kind,
            ExceptionKind::InvalidOperands
        );
        assert_eq!(st.len(), 3);
    }

    #[test]
    fn loop_consumes_the_continue_flag() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        // Push a counter; the body increments until it reaches 3.
        st.push(Value::Int(0));
        st.push(instr("1 + dup 3 <"));
        loop_op(&mut st, &mut env).unwrap();
        assert_eq!(st.values(), &[Value::Int(3)]);
    }

    #[test]
    fn times_runs_the_body_count_times() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        st.push(Value::Int(0));
        st.push(Value::Int(3));
        st.push(instr("1 +"));
        times(&mut st, &mut env).unwrap();
        assert_eq!(st.values(), &[Value::Int(3)]);
    }

    #[test]
    fn times_with_negative_count_is_a_no_op() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        st.push(Value::Int(-2));
        st.push(instr("nop"));
        times(&mut st, &mut env).unwrap();
        assert!(st.is_empty());
    }

    #[test]
    fn try_catches_and_reports() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        st.push(instr("1 0 /"));
        try_op(&mut st, &mut env).unwrap();
        assert_eq!(
            st.values(),
            &[Value::Int(1), Value::Int(0), Value::Bool(false)]
        );
    }

    #[test]
    fn try_maps_exit_to_false() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        st.push(instr("exit"));
        try_op(&mut st, &mut env).unwrap();
        assert_eq!(st.values(), &[Value::Bool(false)]);
    }

    #[test]
    fn dip_restores_the_saved_value() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        st.push(Value::Int(1));
        st.push(Value::Int(10));
        st.push(instr("2 +"));
        dip(&mut st, &mut env).unwrap();
        assert_eq!(st.values(), &[Value::Int(3), Value::Int(10)]);
    }

    #[test]
    fn dip_restores_on_failure_too() {
        let mut env = Environment::new();
        let mut st = Stack::new();
        st.push(Value::Int(10));
        st.push(instr("1 0 /"));
        assert!(dip(&mut st, &mut env).is_err());
        assert_eq!(st.values().last(), Some(&Value::Int(10)));
    }
}
