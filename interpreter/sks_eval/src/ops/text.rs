//! Quoting, composition and splitting of instructions and strings.

use sks_lexer::Lexer;
use sks_runtime::{
    invalid_operands, stack_underflow, Environment, EvalResult, Exception, Stack, Value,
};

use super::need;
use crate::interp::{eval_script, lex_exception};

/// `quote`: replace the top value with an Instruction whose body is the
/// value's canonical source form, so that applying it reproduces the
/// value. Inner stacks have no quoted form.
pub(crate) fn quote(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    let Some(top) = stack.peek(0) else {
        return Err(stack_underflow());
    };
    let Some(literal) = top.literal() else {
        return Err(invalid_operands());
    };
    stack.pop();
    stack.push(Value::Instruction(literal));
    Ok(())
}

/// `compose`: concatenate two Instructions with a single-space
/// separator, or two Strings with none.
pub(crate) fn compose(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    need(stack, 2)?;
    let joined = match (stack.peek(1), stack.peek(0)) {
        (Some(Value::Instruction(a)), Some(Value::Instruction(b))) => {
            Value::Instruction(format!("{a} {b}"))
        }
        (Some(Value::Str(a)), Some(Value::Str(b))) => Value::Str(format!("{a}{b}")),
        _ => return Err(invalid_operands()),
    };
    stack.pop();
    stack.pop();
    stack.push(joined);
    Ok(())
}

/// `compose(delim-expr)`: evaluate the expression to leave a delimiter
/// String on top, then join the two Strings beneath it around the
/// delimiter.
pub(crate) fn compose_delim(stack: &mut Stack, env: &mut Environment, arg: &str) -> EvalResult {
    eval_script(stack, env, arg)?;
    need(stack, 3)?;
    let (Some(Value::Str(delim)), Some(Value::Str(b)), Some(Value::Str(a))) =
        (stack.peek(0), stack.peek(1), stack.peek(2))
    else {
        return Err(invalid_operands());
    };
    let joined = Value::Str(format!("{a}{delim}{b}"));
    stack.pop();
    stack.pop();
    stack.pop();
    stack.push(joined);
    Ok(())
}

/// `split`: fan the top value out.
///
/// - Instruction: re-lex the body at top level, push each fragment as a
///   fresh Instruction.
/// - String: split on whitespace, push each piece as a String.
/// - Inner stack: unpack its elements onto this stack.
pub(crate) fn split(stack: &mut Stack, _env: &mut Environment) -> EvalResult {
    match stack.peek(0) {
        None => Err(stack_underflow()),
        Some(Value::Instruction(_)) => {
            let Some(Value::Instruction(body)) = stack.pop() else {
                unreachable!("peek just saw an instruction");
            };
            push_fragments(stack, &body)
        }
        Some(Value::Str(_)) => {
            let Some(Value::Str(text)) = stack.pop() else {
                unreachable!("peek just saw a string");
            };
            for piece in text.split_whitespace() {
                stack.push(Value::Str(piece.to_string()));
            }
            Ok(())
        }
        Some(Value::Stack(_)) => {
            let Some(Value::Stack(mut inner)) = stack.pop() else {
                unreachable!("peek just saw an inner stack");
            };
            for value in inner.drain_all() {
                stack.push(value);
            }
            Ok(())
        }
        Some(_) => Err(invalid_operands()),
    }
}

fn push_fragments(stack: &mut Stack, body: &str) -> EvalResult {
    let mut lexer = Lexer::new(body);
    loop {
        match lexer.next_token() {
            Ok(None) => return Ok(()),
            Ok(Some(token)) => stack.push(Value::Instruction(token.text.to_string())),
            Err(err) => return Err(Exception::new(lex_exception(err.kind))),
        }
    }
}

/// `split(delim-expr)`: evaluate the expression to leave `(string,
/// delimiter)` on the stack, then split the string on any byte of the
/// delimiter, skipping empty pieces.
pub(crate) fn split_delim(stack: &mut Stack, env: &mut Environment, arg: &str) -> EvalResult {
    eval_script(stack, env, arg)?;
    need(stack, 2)?;
    let (Some(Value::Str(_)), Some(Value::Str(_))) = (stack.peek(0), stack.peek(1)) else {
        return Err(invalid_operands());
    };
    let Some(Value::Str(delim)) = stack.pop() else {
        unreachable!("peek just saw a string");
    };
    let Some(Value::Str(text)) = stack.pop() else {
        unreachable!("peek just saw a string");
    };
    for piece in text
        .split(|c: char| delim.contains(c))
        .filter(|piece| !piece.is_empty())
    {
        stack.push(Value::Str(piece.to_string()));
    }
    Ok(())
}
