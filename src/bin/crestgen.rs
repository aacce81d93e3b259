//! Route compiler: turns a route file into Rust dispatch source.
//!
//! ```text
//! crestgen routes.txt -o src/routes_gen.rs
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crest::routing::{codegen, compile_source};

#[derive(Parser, Debug)]
#[command(name = "crestgen")]
#[command(about = "Compile a crest route file into a Rust matcher", long_about = None)]
struct Cli {
    /// Route file, one `handler /path` per line
    input: PathBuf,

    /// Write the generated source here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only validate the route file; print the accepted routes
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let automaton =
        compile_source(&source).with_context(|| format!("{}", cli.input.display()))?;

    if cli.check {
        for (path, handler) in automaton.routes() {
            println!("{handler}\t{path}");
        }
        return Ok(());
    }

    let generated = codegen::render(&automaton);
    match cli.output {
        Some(path) => std::fs::write(&path, generated)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{generated}"),
    }

    Ok(())
}
