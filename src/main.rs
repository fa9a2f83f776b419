use std::fs;

use clap::Parser;
use opal::{analyze, evaluate};

/// opal is an interpreter for a small imperative object language with
/// optional static analysis.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells opal to read a file instead of an inline script.
    #[arg(short, long)]
    file: bool,

    /// Analyze the script against the built-in environment and report type
    /// errors without executing it.
    #[arg(short, long)]
    check: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let result = if args.check {
        analyze(&script).map(|_| ())
    } else {
        evaluate(&script).map(|_| ())
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
