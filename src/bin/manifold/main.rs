//! Manifold CLI - manifest merge-unit resolution for a build target graph

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::Session;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("manifold=debug")
    } else {
        EnvFilter::new("manifold=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let session = Session::new(&cli)?;

    // Execute command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &session),
        Commands::Deps(args) => commands::deps::execute(args, &session),
        Commands::Rdeps(args) => commands::rdeps::execute(args, &session),
        Commands::Check => commands::check::execute(&session),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
