//! Low-level tokenizer for stack-script.
//!
//! A script is a whitespace-separated stream of tokens over byte-oriented
//! ASCII source. The lexer is a single forward pass that tracks bracket
//! depth, so a quoted instruction `[dup *]`, a string `"a b"`, an inner
//! stack `{1 2 3}` or a bracketed operator call `times(2 3 +)` each come
//! out as one token regardless of the whitespace inside them.
//!
//! This crate is standalone: it knows nothing about values, stacks or the
//! evaluator, and reports mismatched delimiters through its own
//! [`LexError`] type.

mod lexer;
mod token;

pub use lexer::{LexError, LexErrorKind, Lexer};
pub use token::{Token, TokenKind};

/// Bytes that terminate an unquoted word and may not appear in one.
///
/// Whitespace plus the six delimiter bytes. `\0` is treated as a
/// separator so that C-style buffers lex cleanly.
pub const RESERVED: &[u8] = b" \t\r\n\0[]{}()\"";

/// Returns `true` for the separator bytes (space, tab, CR, LF, NUL).
#[inline]
pub fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | b'\0')
}

/// Returns `true` if `byte` may not appear in an unquoted word.
#[inline]
pub fn is_reserved(byte: u8) -> bool {
    is_separator(byte) || matches!(byte, b'[' | b']' | b'{' | b'}' | b'(' | b')' | b'"')
}
