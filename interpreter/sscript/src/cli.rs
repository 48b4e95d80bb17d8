//! Command-line argument handling.
//!
//! A single flag cluster is accepted as the first argument (`-v`,
//! `-sv2m`, ...), optionally followed by a file to load before the
//! shell starts. Order inside the cluster does not matter.

/// Parsed command-line options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// How many stack values to echo after each input (0 = none).
    pub print_depth: usize,
    /// Load `math.sksp` before the shell starts.
    pub load_math: bool,
    /// Load `stackop.sksp` before the shell starts.
    pub load_stackops: bool,
    /// Print usage and exit.
    pub show_usage: bool,
    /// File to load before the shell starts.
    pub file: Option<String>,
}

/// Parse the argument list (without the program name).
///
/// Returns `Err` with the offending argument on a malformed cluster or
/// extra positional arguments.
pub fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let Some(first) = args.first() else {
        return Ok(options);
    };

    if let Some(cluster) = first.strip_prefix('-') {
        parse_cluster(cluster, &mut options).map_err(|()| first.clone())?;
        match args.len() {
            1 => {}
            2 => options.file = Some(args[1].clone()),
            _ => return Err(args[2].clone()),
        }
    } else {
        if args.len() > 1 {
            return Err(args[1].clone());
        }
        options.file = Some(first.clone());
    }
    Ok(options)
}

fn parse_cluster(cluster: &str, options: &mut Options) -> Result<(), ()> {
    let mut chars = cluster.chars().peekable();
    while let Some(flag) = chars.next() {
        match flag {
            'v' => {
                let mut depth = 0usize;
                let mut saw_digit = false;
                while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                    chars.next();
                    saw_digit = true;
                    depth = depth.saturating_mul(10).saturating_add(digit as usize);
                }
                options.print_depth = if saw_digit { depth } else { 1 };
            }
            'h' => options.show_usage = true,
            'm' => options.load_math = true,
            's' => options.load_stackops = true,
            _ => return Err(()),
        }
    }
    Ok(())
}

pub fn print_usage() {
    println!();
    println!("Usage:");
    println!("\tsscript [-options] [file to load before the shell starts]");
    println!();
    println!("options must be one cluster: -v, -sv2m, -sv, ... (the order doesn't matter)");
    println!("options available:");
    println!("\t-v\t\tprint the last element of the stack after every input");
    println!("\t-v<size>\tprint the last <size> elements of the stack after every input");
    println!("\t-h\t\tprint this message");
    println!("\t-m\t\tload the math library before the shell starts");
    println!("\t-s\t\tload the stack operations library before the shell starts");
    println!();
}
