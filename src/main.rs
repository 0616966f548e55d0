// minicc: compiles `int main(){ return <literal>; }` to an executable

use std::path::PathBuf;
use std::process::ExitCode;

use minicc::codegen::Target;
use minicc::diagnostic;
use minicc::driver::{self, CompileOptions};

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [options] <file.c>", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -S                  Write assembly only, do not assemble or link");
    eprintln!("  -o <path>           Output file or directory");
    eprintln!("  --target=<arch>     x86_64 (default) or x86");
    eprintln!("  --keep-going        Report every lexical error, not just the first");
    eprintln!("  --dump-tokens       Write the token listing to <file.c>.lex");
    eprintln!("  --dump-tree         Write the syntax tree to <file.c>.ast");
    eprintln!("  --dump-dot          Write a Graphviz graph of the tree to <file.c>.dot");
    eprintln!("  -h, --help          Show this message");
    eprintln!();
    eprintln!("The assembler/linker is taken from $CC, falling back to cc.");
}

/// Parse command-line arguments into options and the input path.
fn parse_args(args: &[String]) -> Result<(CompileOptions, PathBuf), String> {
    let mut options = CompileOptions::default();
    let mut input = None;
    let mut rest = args.iter();

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-S" => options.assemble_only = true,
            "-o" => {
                let path = rest.next().ok_or("Option '-o' needs a path")?;
                options.output = Some(PathBuf::from(path));
            }
            "--keep-going" => options.keep_going = true,
            "--dump-tokens" => options.dump_tokens = true,
            "--dump-tree" => options.dump_tree = true,
            "--dump-dot" => options.dump_dot = true,
            flag if flag.starts_with("--target=") => {
                let name = &flag["--target=".len()..];
                options.target = name.parse::<Target>().map_err(|e| e.to_string())?;
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("Unknown option '{}'", flag));
            }
            path => {
                if input.is_some() {
                    return Err("Only one input file is supported".to_string());
                }
                input = Some(PathBuf::from(path));
            }
        }
    }

    let input = input.ok_or("No input file provided")?;
    Ok((options, input))
}

fn main() -> ExitCode {
    driver::init_logging();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("minicc");

    if args.iter().skip(1).any(|a| a == "-h" || a == "--help") {
        print_usage(program_name);
        return ExitCode::SUCCESS;
    }

    let (options, input) = match parse_args(&args[1.min(args.len())..]) {
        Ok(parsed) => parsed,
        Err(message) => {
            diagnostic::report("error", &message);
            eprintln!();
            print_usage(program_name);
            return ExitCode::from(2);
        }
    };

    match driver::compile_file(&input, &options) {
        Ok(outcome) => {
            match outcome.executable {
                Some(executable) => eprintln!("Built {}", executable.display()),
                None => eprintln!("Wrote {}", outcome.assembly.display()),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            diagnostic::report("error", &err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let (options, input) =
            parse_args(&args(&["-S", "--target=x86", "-o", "out.s", "prog.c"])).unwrap();
        assert!(options.assemble_only);
        assert_eq!(options.target, Target::X86);
        assert_eq!(options.output, Some(PathBuf::from("out.s")));
        assert_eq!(input, PathBuf::from("prog.c"));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["prog.c", "-o"])).is_err());
        assert!(parse_args(&args(&["--target=arm", "prog.c"])).is_err());
        assert!(parse_args(&args(&["--fast", "prog.c"])).is_err());
        assert!(parse_args(&args(&["a.c", "b.c"])).is_err());
    }
}
