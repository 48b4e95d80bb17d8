//! The interactive shell.

use std::io::{BufRead, Write};

use sks_eval::{execute, ExceptionKind, ProgramState};
use tracing::debug;

/// Load a script file into the state before the shell starts.
///
/// Failures print the diagnostic and report `Err` so the caller can
/// abort startup, matching the shell's behavior for preload libraries.
pub fn load_file(state: &mut ProgramState, path: &str) -> Result<(), ()> {
    debug!(path, "loading script before the shell starts");
    match execute(state, &format!("load({path})")) {
        Ok(()) => Ok(()),
        Err(exc) => {
            eprintln!("{exc}");
            Err(())
        }
    }
}

/// Run the read-eval-print loop until `exit` or end of input.
///
/// Every input line runs against the shared state; `ProgramExit`
/// breaks the loop, any other exception prints its diagnostic and the
/// loop continues with the state as the failure left it. After each
/// input the top `print_depth` values are echoed, deepest first.
pub fn repl(state: &mut ProgramState, print_depth: usize) {
    println!("STACK_SCRIPT");
    println!("-------------------------------------------");
    let stdin = std::io::stdin();
    let mut input = String::new();
    loop {
        print!(">");
        let _ = std::io::stdout().flush();
        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        match execute(state, &input) {
            Ok(()) => {}
            Err(exc) if exc.kind == ExceptionKind::ProgramExit => break,
            Err(exc) => println!("{exc}"),
        }
        let shown = print_depth.min(state.stack.len());
        let from = state.stack.len() - shown;
        for value in &state.stack.values()[from..] {
            println!("{value}");
        }
    }
    debug!("shell finished");
}
