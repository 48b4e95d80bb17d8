//! Token dispatch and the recursive evaluator loop.

use sks_lexer::{LexErrorKind, Lexer, Token, TokenKind};
use sks_runtime::{
    invalid_instruction, Environment, EvalResult, Exception, ExceptionKind, Stack, Value,
};

use crate::ops;
use crate::stack::ensure_sufficient_stack;
use crate::state::ProgramState;

/// Run a script against the program state.
///
/// This is the single entry point: the REPL, `load(path)` and every
/// recursive form (`apply`, user words, inner-stack bodies, ...) all
/// come through here or through [`eval_script`].
pub fn execute(state: &mut ProgramState, src: &str) -> EvalResult {
    eval_script(&mut state.stack, &mut state.env, src)
}

/// Evaluate `src` against an explicit stack and environment.
///
/// One call is one nesting depth: when a token fails, its full source
/// text is recorded on the exception before it travels further up.
/// Every recursive form re-enters through here, so this is the one
/// place that guards the native call stack against deep nesting.
pub(crate) fn eval_script(stack: &mut Stack, env: &mut Environment, src: &str) -> EvalResult {
    ensure_sufficient_stack(|| eval_inner(stack, env, src))
}

fn eval_inner(stack: &mut Stack, env: &mut Environment, src: &str) -> EvalResult {
    let mut lexer = Lexer::new(src);
    loop {
        match lexer.next_token() {
            Ok(None) => return Ok(()),
            Ok(Some(token)) => {
                eval_token(stack, env, &token).map_err(|exc| exc.with_frame(token.text))?;
            }
            Err(err) => return Err(Exception::new(lex_exception(err.kind))),
        }
    }
}

pub(crate) fn lex_exception(kind: LexErrorKind) -> ExceptionKind {
    match kind {
        LexErrorKind::SquaredParenthesis => ExceptionKind::SquaredParenthesis,
        LexErrorKind::RoundParenthesis => ExceptionKind::RoundParenthesis,
        LexErrorKind::CurlyParenthesis => ExceptionKind::CurlyParenthesis,
        LexErrorKind::StringQuoting => ExceptionKind::StringQuoting,
    }
}

/// Resolve and run one token.
///
/// Resolution order for a plain word: builtin table, then the numbered
/// table on the digit-suffix split, then the environment. A bracketed
/// call tries the bracketed table, then the environment with the full
/// token text. Anything unresolved is an invalid instruction.
fn eval_token(stack: &mut Stack, env: &mut Environment, token: &Token<'_>) -> EvalResult {
    match token.kind {
        TokenKind::Int(n) => {
            stack.push(Value::Int(n));
            Ok(())
        }
        TokenKind::Float(x) => {
            stack.push(Value::Float(x));
            Ok(())
        }
        TokenKind::Str(body) => {
            stack.push(Value::Str(body.to_string()));
            Ok(())
        }
        TokenKind::Instruction(body) => {
            stack.push(Value::Instruction(body.to_string()));
            Ok(())
        }
        TokenKind::InnerStack(body) => {
            let mut child = Stack::new();
            eval_script(&mut child, env, body)?;
            stack.push(Value::Stack(Box::new(child)));
            Ok(())
        }
        TokenKind::Bracketed { head, arg } => {
            if let Some(op) = ops::bracketed(head) {
                return op(stack, env, arg);
            }
            run_user_word(stack, env, token.text)
        }
        TokenKind::Word { numbered } => {
            if let Some(op) = ops::builtin(token.text) {
                return op(stack, env);
            }
            if let Some((head, n)) = numbered {
                if let Some(op) = ops::numbered(head) {
                    return op(stack, env, n);
                }
            }
            run_user_word(stack, env, token.text)
        }
    }
}

fn run_user_word(stack: &mut Stack, env: &mut Environment, word: &str) -> EvalResult {
    // The stored script may redefine or delete the word under
    // execution, so it runs from its own copy of the text.
    let Some(body) = env.get(word).map(str::to_string) else {
        return Err(invalid_instruction());
    };
    eval_script(stack, env, &body)
}
