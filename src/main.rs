//! CLI that splits statement lines into tokens, substituting variables.

use std::fs;
use std::io;
use std::process::ExitCode;

use stmt_params::{Params, Vars, VarsResolver, ident};
use tracing_subscriber::EnvFilter;

fn usage() -> ExitCode {
    eprintln!("Usage: stmt-params [options] [files...]");
    eprintln!();
    eprintln!("Splits each input line into tokens and prints them tab-separated.");
    eprintln!("Reads stdin when no files are given.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v, --set NAME=VALUE  Define a variable");
    eprintln!("      --exec            Run `backtick` spans as shell commands");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  echo \"select :'who'\" | stmt-params -v who=alice");
    eprintln!("  stmt-params --exec script.sql");
    ExitCode::from(2)
}

/// Splits every line of `content`, returning true if any line failed.
fn split_lines(name: &str, content: &str, resolver: &mut VarsResolver<'_>) -> bool {
    let mut had_error = false;
    for (idx, line) in content.lines().enumerate() {
        match Params::new(line).all(resolver) {
            Ok(tokens) => println!("{}", tokens.join("\t")),
            Err(e) => {
                eprintln!("{name}:{}: {e}", idx + 1);
                had_error = true;
            }
        }
    }
    had_error
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut vars = Vars::new();
    let mut exec = false;
    let mut files = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return usage(),
            "--exec" => exec = true,
            "-v" | "--set" => {
                let Some(assignment) = args.next() else {
                    eprintln!("Error: {arg} expects NAME=VALUE");
                    return ExitCode::from(2);
                };
                let Some((name, value)) = assignment.split_once('=') else {
                    eprintln!("Error: expected NAME=VALUE, got: {assignment}");
                    return ExitCode::from(2);
                };
                if !ident::is_ident(name) {
                    eprintln!("Error: invalid variable name: {name}");
                    return ExitCode::from(2);
                }
                vars.set(name, value);
            }
            _ => files.push(arg),
        }
    }

    let mut resolver = VarsResolver::new(&vars).exec(exec);
    let mut had_error = false;

    if files.is_empty() {
        match io::read_to_string(io::stdin()) {
            Ok(content) => had_error |= split_lines("<stdin>", &content, &mut resolver),
            Err(e) => {
                eprintln!("<stdin>: {e}");
                had_error = true;
            }
        }
    }

    for path in &files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };
        had_error |= split_lines(path, &content, &mut resolver);
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
