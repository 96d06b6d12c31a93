//! RPAL CSE interpreter CLI.

use rpalc::{compile, init_tracing, run_tree_text, standardize_text, stdout_handler, Options};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => {
            let mut options = Options::default();
            let mut file_path = None;

            for arg in args.iter().skip(2) {
                if arg == "--strict" {
                    options.strict = true;
                } else if arg == "--trace" {
                    options.trace = true;
                } else if let Some(limit) = arg.strip_prefix("--steps=") {
                    let Ok(limit) = limit.parse() else {
                        eprintln!("error: --steps expects a positive integer, got `{limit}`");
                        std::process::exit(1);
                    };
                    options.step_limit = limit;
                } else if !arg.starts_with('-') && file_path.is_none() {
                    file_path = Some(arg.as_str());
                } else {
                    eprintln!("error: unknown option `{arg}`");
                    std::process::exit(1);
                }
            }

            let Some(path) = file_path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: rpalc run <file> [--strict] [--steps=N] [--trace]");
                std::process::exit(1);
            };

            init_tracing(options.trace);
            let text = read_file(path);
            match run_tree_text(&text, &options, stdout_handler()) {
                Ok(outcome) => println!("{}", outcome.value),
                Err(e) => fail(&e),
            }
        }
        "st" => {
            let path = file_argument(&args, "st");
            init_tracing(false);
            match standardize_text(&read_file(path)) {
                Ok(tree) => print!("{tree}"),
                Err(e) => fail(&e),
            }
        }
        "deltas" => {
            let path = file_argument(&args, "deltas");
            init_tracing(false);
            match compile(&read_file(path)) {
                Ok(deltas) => print!("{deltas}"),
                Err(e) => fail(&e),
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("rpalc {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            eprintln!("error: unknown command `{other}`");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn file_argument<'a>(args: &'a [String], command: &str) -> &'a str {
    match args.get(2) {
        Some(path) => path,
        None => {
            eprintln!("Usage: rpalc {command} <file>");
            std::process::exit(1);
        }
    }
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot read `{path}`: {e}");
            std::process::exit(1);
        }
    }
}

fn fail(error: &rpalc::Error) -> ! {
    eprintln!("error: {error}");
    std::process::exit(1);
}

fn print_usage() {
    println!("rpalc - RPAL CSE machine");
    println!();
    println!("Usage: rpalc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>      Standardize, flatten and execute a tree");
    println!("  st <file>       Print the standardized tree");
    println!("  deltas <file>   Print the generated control structures");
    println!("  help            Show this message");
    println!("  version         Show version");
    println!();
    println!("Run options:");
    println!("  --strict        Unbound identifiers are errors");
    println!("  --steps=N       Step limit (default {})", rpalc::DEFAULT_STEP_LIMIT);
    println!("  --trace         Log every machine step (see also RPAL_LOG)");
    println!();
    println!("Input is the dot-indented tree format: one node per line, depth");
    println!("given by the number of leading dots.");
}
