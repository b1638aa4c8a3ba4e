mod app;
mod args;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;

fn main() -> Result<()> {
    // Configure logging
    env_logger::init();

    let args = Args::parse();
    let output = app::run(&args)?;

    match &args.out {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => println!("{output}"),
    }

    Ok(())
}
