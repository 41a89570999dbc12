//! `weslc`: link WESL shaders into one WGSL file.

use std::io::IsTerminal;

use wesl_diagnostic::emitter::{ColorMode, TerminalEmitter};
use weslc::commands::{check_package, explain_error, link_package, CommandError, Report};
use weslc::init_tracing;
use weslc::options::{parse_link_options, LinkOptions};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = &args[1];
    match command.as_str() {
        "link" => {
            let options = options_or_exit("link", &args[2..]);
            let report = run(|emitter| link_package(&options, emitter));
            std::process::exit(i32::from(report.is_none()));
        }
        "check" => {
            let options = options_or_exit("check", &args[2..]);
            match run(|emitter| check_package(&options, emitter)) {
                Some(report) if !report.has_errors() => {
                    eprintln!("OK: {}", options.root.display());
                }
                _ => std::process::exit(1),
            }
        }
        "explain" | "--explain" => {
            let Some(code) = args.get(2) else {
                eprintln!("Usage: weslc explain <ERROR_CODE>");
                eprintln!("Example: weslc explain E2001");
                std::process::exit(1);
            };
            if let Some(text) = explain_error(code) {
                println!("{text}");
            } else {
                eprintln!("Unknown error code: {code}");
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("weslc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Parse command options, printing usage on failure.
fn options_or_exit(command: &str, args: &[String]) -> LinkOptions {
    match parse_link_options(args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("Usage: weslc {command} <root.wesl> [options]");
            std::process::exit(1);
        }
    }
}

/// Run a command against a stderr emitter. `None` on a fatal error.
fn run(
    command: impl FnOnce(&mut TerminalEmitter<std::io::Stderr>) -> Result<Report, CommandError>,
) -> Option<Report> {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, is_tty);
    match command(&mut emitter) {
        Ok(report) => Some(report),
        Err(error) => {
            eprintln!("error: {error}");
            None
        }
    }
}

fn print_usage() {
    println!("weslc: link WESL shader modules into one WGSL file");
    println!();
    println!("Usage: weslc <command> [options]");
    println!();
    println!("Commands:");
    println!("  link <root.wesl>     Link and write WGSL (stdout unless -o)");
    println!("  check <root.wesl>    Report diagnostics without writing output");
    println!("  explain <code>       Explain an error code (e.g., E2001)");
    println!("  help                 Show this help message");
    println!();
    println!("Options:");
    println!("  --base <dir>            Package directory (default: the root's directory)");
    println!("  --lib <name>=<dir>      Register the modules in <dir> as <name>::...");
    println!("  -o, --output <file>     Output file");
    println!("  --source-map <file>     Write the source map as JSON");
    println!("  --param <NAME>=<VALUE>  Value for ext.NAME");
    println!("  --cond <NAME>[=<bool>]  Set an @if condition (default: true)");
}
