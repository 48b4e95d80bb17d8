//! `sscript` entry point.

use sks_eval::ProgramState;
use sscript::{load_file, parse_args, print_usage, repl};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(bad) => {
            eprintln!("unexpected argument: {bad}");
            print_usage();
            std::process::exit(1);
        }
    };
    if options.show_usage {
        print_usage();
        return;
    }

    let mut state = ProgramState::new();
    let mut preloads: Vec<&str> = Vec::new();
    if options.load_math {
        preloads.push("math.sksp");
    }
    if options.load_stackops {
        preloads.push("stackop.sksp");
    }
    if let Some(file) = options.file.as_deref() {
        preloads.push(file);
    }
    for path in preloads {
        if load_file(&mut state, path).is_err() {
            std::process::exit(1);
        }
    }

    repl(&mut state, options.print_depth);
}
