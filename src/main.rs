use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use ruspal::cse;
use ruspal::lexer;
use ruspal::parser::{parse, ParseState};
use ruspal::standardize::standardize;

/// An RPAL interpreter built on a CSE machine.
#[derive(Parser)]
#[command(name = "ruspal", version)]
struct Args {
    /// Program file to run
    file: PathBuf,

    /// Print the abstract syntax tree and exit
    #[arg(long)]
    ast: bool,

    /// Print the standardized tree and exit
    #[arg(long)]
    st: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read '{}'", args.file.display()))?;

    let tokens = lexer::tokenize(&source)?;
    let mut state = ParseState::new(tokens);
    let program = parse(&mut state)?;

    if args.ast {
        print!("{}", program.pretty());
        return Ok(());
    }

    let standardized = standardize(program)?;

    if args.st {
        print!("{}", standardized.pretty());
        return Ok(());
    }

    cse::evaluate(&standardized)?;
    Ok(())
}
