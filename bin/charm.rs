//! `charm` is the primary CLI binary.

use charm_tools::handlers;
use charm_tools::{CharmError, CharmResult, Cli, Command};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn main() {
    // Logging stays off unless RUST_LOG is set.
    init_tracing();

    if let Err(e) = run() {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print an error with formatting based on its kind.
fn print_error(e: &CharmError) {
    println!();
    match e {
        CharmError::NotACharm(path) => {
            println!("  {} Not a charm", "error".bright_red().bold());
            println!();
            println!("    {}: {}", "Path".dimmed(), path.display());
        }
        CharmError::DirectoryNotFound(path) => {
            println!("  {} Directory not found", "error".bright_red().bold());
            println!();
            println!("    {}: {}", "Searched".dimmed(), path.display());
            println!();
            println!(
                "    {}: Set {} or pass a directory",
                "hint".bright_blue().bold(),
                "CHARM_HOME".bright_white()
            );
        }
        _ => {
            let msg = e.to_string();
            match msg.split_once(": ") {
                Some((prefix, rest)) if prefix.ends_with("error") => {
                    println!(
                        "  {} {}",
                        format!("error[{}]", prefix.to_lowercase().replace(" error", ""))
                            .bright_red()
                            .bold(),
                        rest.dimmed()
                    );
                }
                _ => println!("  {} {}", "error".bright_red().bold(), msg),
            }
        }
    }
    println!();
}

/// Initialize tracing. Only enables logging when RUST_LOG is set.
fn init_tracing() {
    let rust_log_set = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_some();

    if !rust_log_set {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> CharmResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Proof {
            charm,
            strict,
            json,
            quiet,
        } => handlers::proof_charm(charm, strict, json, quiet),
        Command::List { dir, json } => handlers::list_charms(dir, json),
    }
}
