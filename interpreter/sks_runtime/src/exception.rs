//! The unwind carrier.
//!
//! A failure unwinds as an ordinary `Err`: the exception records the
//! failure kind and accumulates one source fragment per nesting depth
//! as it travels up, while transient buffers are released by `Drop` on
//! every exit path, so nothing leaks however deep the failure.

use std::fmt;

use thiserror::Error;

/// Evaluation result; the unit default fits the many operators that
/// only mutate state.
pub type EvalResult<T = ()> = Result<T, Exception>;

/// Exception kinds. The names are the interface; the REPL prints the
/// message of the kind that escaped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ExceptionKind {
    #[error("Program exit")]
    ProgramExit,
    #[error("Invalid character")]
    InvalidChar,
    #[error("Invalid instruction")]
    InvalidInstruction,
    #[error("Stack underflow")]
    StackUnderflow,
    #[error("Value error")]
    ValueError,
    #[error("Invalid operands")]
    InvalidOperands,
    #[error("Error while allocating memory")]
    ProgramPanic,
    #[error("I/O error")]
    IoError,
    #[error("File not found")]
    FileNotFound,
    #[error("File not creatable")]
    FileNotCreatable,
    #[error("Round parenthesis mismatch")]
    RoundParenthesis,
    #[error("Squared parenthesis mismatch")]
    SquaredParenthesis,
    #[error("Curly parenthesis mismatch")]
    CurlyParenthesis,
    #[error("String quoting mismatch")]
    StringQuoting,
    #[error("Parallel injection failed")]
    Inject,
    #[error("Invalid name in define")]
    InvalidNameDefine,
}

/// A raised exception travelling up the evaluator.
#[derive(Clone, Debug, PartialEq)]
pub struct Exception {
    pub kind: ExceptionKind,
    /// Source fragments, innermost nesting depth first. Each evaluator
    /// frame pushes the fragment it was executing when the exception
    /// passed through.
    backtrace: Vec<String>,
    /// Per-task exceptions attached by the parallel injector.
    pub tasks: Vec<Exception>,
}

impl Exception {
    pub fn new(kind: ExceptionKind) -> Self {
        Exception {
            kind,
            backtrace: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Aggregate parallel task failures.
    pub fn inject(tasks: Vec<Exception>) -> Self {
        Exception {
            kind: ExceptionKind::Inject,
            backtrace: Vec::new(),
            tasks,
        }
    }

    /// Record the fragment the current frame was executing.
    #[must_use]
    pub fn with_frame(mut self, fragment: &str) -> Self {
        self.backtrace.push(fragment.to_string());
        self
    }

    /// Fragments, innermost first.
    pub fn backtrace(&self) -> &[String] {
        &self.backtrace
    }
}

impl fmt::Display for Exception {
    /// Diagnostic layout: the kind's message, the outermost fragment,
    /// then each nested fragment one tab deeper than the previous.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        let mut depth = 0;
        for fragment in self.backtrace.iter().rev() {
            if depth == 0 {
                write!(f, ", not executed: {fragment}")?;
            } else {
                write!(f, "\n{}{fragment}", "\t".repeat(depth))?;
            }
            depth += 1;
        }
        for (i, task) in self.tasks.iter().enumerate() {
            write!(f, "\n  task {i}: {task}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Exception {}

#[cold]
pub fn stack_underflow() -> Exception {
    Exception::new(ExceptionKind::StackUnderflow)
}

#[cold]
pub fn invalid_operands() -> Exception {
    Exception::new(ExceptionKind::InvalidOperands)
}

#[cold]
pub fn invalid_instruction() -> Exception {
    Exception::new(ExceptionKind::InvalidInstruction)
}

#[cold]
pub fn value_error() -> Exception {
    Exception::new(ExceptionKind::ValueError)
}
