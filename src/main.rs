//! cmt - CLI entry point.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cmt::commit::COMMIT_MESSAGE_HEADER;
use cmt::{OllamaRunner, Spinner, generate_commit_message, resolve_model};

/// Environment variable holding a tracing filter directive.
const LOG_ENV_VAR: &str = "CMT_LOG";

/// Generate conventional commit messages using AI.
#[derive(Parser, Debug)]
#[command(name = "cmt")]
#[command(about = "Generate conventional commit messages using AI")]
#[command(
    long_about = "cmt generates conventional commit messages from staged Git changes using AI models.\n\n\
                  It analyzes your staged changes and generates a commit message following the \
                  Conventional Commits specification."
)]
#[command(version)]
struct Cli {
    /// Config file (default is $HOME/.cmt.yaml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Model to use (overrides the config file)
    #[arg(long, value_parser = parse_model)]
    model: Option<String>,

    /// Show debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Step 1: Resolve model from flag, config file, or default
    let resolved = resolve_model(cli.model.as_deref(), cli.config.as_deref())?;
    if let Some(path) = &resolved.created_config {
        println!("Created default config file: {}", path.display());
    }

    // Step 2: Preflight, diff, and completion
    let repo_dir = std::env::current_dir()
        .map_err(|e| anyhow!("Failed to read current directory: {}", e))?;
    let runner = OllamaRunner::new();
    let mut spinner = Spinner::new();

    let message =
        generate_commit_message(&repo_dir, &resolved.model, &runner, &mut spinner).await?;

    // Step 3: Print the suggested command
    println!();
    println!("{}", COMMIT_MESSAGE_HEADER);
    println!("{}", message);

    Ok(())
}

/// Model names are trimmed; a blank name is a usage error.
fn parse_model(s: &str) -> Result<String, String> {
    let model = s.trim();
    if model.is_empty() {
        return Err("model name must not be empty".to_string());
    }
    Ok(model.to_string())
}

/// Log to stderr, filtered by `CMT_LOG` or `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "cmt=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
