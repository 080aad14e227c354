//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use manifold::TargetRef;

/// Manifold - resolve the manifest merge unit of android_manifest rules
#[derive(Parser)]
#[command(name = "manifold")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to Rules.toml (searched upward from the current directory by default)
    #[arg(long, global = true, env = "MANIFOLD_RULES")]
    pub rules: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the manifest fragments of one or more manifest targets
    Resolve(ResolveArgs),

    /// Show the resource-bearing dependencies of a target
    Deps(DepsArgs),

    /// Show the targets that depend on a target
    Rdeps(RdepsArgs),

    /// Validate the rules file and resolve every manifest target
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Targets to resolve, e.g. //app:manifest
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub targets: Vec<TargetRef>,

    /// Resolve every android_manifest target
    #[arg(long)]
    pub all: bool,

    /// Print artifact definitions as JSON
    #[arg(long)]
    pub json: bool,

    /// Write one definition file per target into this directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct DepsArgs {
    /// Target whose direct dependencies are filtered
    pub target: TargetRef,
}

#[derive(Args)]
pub struct RdepsArgs {
    /// Target to look up
    pub target: TargetRef,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
