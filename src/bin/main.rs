use slate::{interpreter::Interpreter, parser::Parser, scanner::Scanner};
use std::{
    env,
    io::{self, Write},
};

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        2 => run_file(args[1].as_str(), false, &mut stdout, &mut stderr),
        3 if args[1] == "--tokens" => run_file(args[2].as_str(), true, &mut stdout, &mut stderr),
        _ => {
            writeln!(stderr, "Usage: slate [--tokens] <script>")?;
            std::process::exit(64);
        }
    }
}

fn run_file(
    path: &str,
    show_tokens: bool,
    out: &mut io::Stdout,
    err_out: &mut io::Stderr,
) -> io::Result<()> {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            writeln!(err_out, "Could not read {}: {}", path, e)?;
            std::process::exit(66);
        }
    };
    run(source.as_str(), show_tokens, out, err_out)
}

fn run<Out: Write, ErrOut: Write>(
    source: &str,
    show_tokens: bool,
    out: &mut Out,
    err_out: &mut ErrOut,
) -> io::Result<()> {
    let tokens = Scanner::new(source).scan_tokens();
    if show_tokens {
        for token in tokens.iter() {
            writeln!(out, "{:?} : {}", token.kind, token.lexeme)?;
        }
    }

    let mut parser = Parser::new(tokens.into_iter());
    let (statements, errors): (Vec<_>, Vec<_>) =
        parser.parse().into_iter().partition(Result::is_ok);

    let errors: Vec<_> = errors.into_iter().map(Result::unwrap_err).collect();
    if !errors.is_empty() {
        for e in errors.iter() {
            writeln!(err_out, "{}", e)?;
        }
        std::process::exit(65);
    }

    let statements: Vec<_> = statements.into_iter().map(Result::unwrap).collect();
    let mut interpreter = Interpreter::new(out);
    match interpreter.interpret(&statements) {
        Err(e) => {
            writeln!(err_out, "{}", e)?;
            std::process::exit(70)
        }
        Ok(()) => Ok(()),
    }
}
