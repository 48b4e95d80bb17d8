//! The `sscript` shell: flag parsing and the read-eval-print loop.

mod cli;
mod repl;

pub use cli::{parse_args, print_usage, Options};
pub use repl::{load_file, repl};
