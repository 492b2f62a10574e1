//! halgen CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use commands::{ConfigCommand, ProxyCommand, SkeletonCommand, SpecCommand};
use halgen::GeneratorConfig;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "halgen")]
#[command(version)]
#[command(about = "Generate proxy classes and RPC services for hardware abstraction layers", long_about = None)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file to use instead of ./halgen.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a proxy class or service wrapper
    ///
    /// Examples:
    ///   halgen proxy Stage __init__ getValue 'setValue(v)' reset
    ///   halgen proxy --from stage.toml --flavor qt
    ///   halgen proxy --from stage.toml --flavor service --service-port 6000 -o src/
    Proxy(ProxyCommand),
    /// Print the property and method descriptors of a class
    Spec(SpecCommand),
    /// Print a bare class skeleton with one stub per member
    Skeleton(SkeletonCommand),
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    halgen::observability::init(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => {
            ensure!(path.is_file(), "Configuration file not found: {}", path.display());
            GeneratorConfig::load_from(path)
        }
        None => GeneratorConfig::load(),
    }
    .context("Failed to load configuration")?;

    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Proxy(cmd) => cmd.execute(config, &mut stdout),
        Commands::Spec(cmd) => cmd.execute(config, &mut stdout),
        Commands::Skeleton(cmd) => cmd.execute(&mut stdout),
        Commands::Config => ConfigCommand::execute(&config, &mut stdout),
    }
}
