mod commands;
mod discovery;
mod exit_code;
mod report;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dalint")]
#[command(about = "Structural checker for guided-interview YAML documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check interview files and report structural errors
    Check {
        /// Files or directories to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Additional directory names to skip during discovery
        #[arg(long = "ignore-dir", value_name = "NAME")]
        ignore_dirs: Vec<String>,

        /// Do not skip the default ignore set (.git, node_modules, ...)
        #[arg(long)]
        no_default_ignores: bool,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable output with a summary line
    Human,
    /// JSON output for tooling
    Json,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Check {
            paths,
            format,
            ignore_dirs,
            no_default_ignores,
        } => commands::check::run(&paths, format, &ignore_dirs, no_default_ignores),
    };

    match result {
        Ok(code) => code.exit(),
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code::ExitCode::IoError.exit();
        }
    }
}

/// Initialize tracing/logging based on the RUST_LOG env var.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}
