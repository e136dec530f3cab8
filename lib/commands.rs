//! CLI command definitions.

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const PROOF_EXAMPLES: &str = "\
Examples:
  charm proof                       Proof the charm in the current directory
  charm proof ./mysql               Proof a charm at a path
  charm proof mysql                 Proof a charm under $CHARM_HOME
  charm proof --strict              Fail on warnings too
  charm proof --json                JSON output for CI/CD
  charm proof -q                    Errors only";

const LIST_EXAMPLES: &str = "\
Examples:
  charm list                        List checked-out charms under $CHARM_HOME
  charm list ~/charms/precise       List checked-out charms in a directory
  charm list --json                 JSON output";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Charm tools - Proof charm packages.
#[derive(Debug, Parser)]
#[command(name = "charm", author, version, styles = styles())]
#[command(about = "Static checks for charm packages")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a charm for structural and content problems.
    #[command(after_help = PROOF_EXAMPLES)]
    Proof {
        /// Charm directory or name under $CHARM_HOME (defaults to current directory).
        charm: Option<String>,

        /// Treat warnings as errors.
        #[arg(long)]
        strict: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Show only errors.
        #[arg(short, long)]
        quiet: bool,
    },

    /// List charms checked out locally.
    #[command(after_help = LIST_EXAMPLES)]
    List {
        /// Directory to search (defaults to $CHARM_HOME).
        dir: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Help output palette.
pub fn styles() -> Styles {
    let bold = |color| Style::new().bold().fg_color(Some(Color::Ansi(color)));

    Styles::styled()
        .header(bold(AnsiColor::Magenta))
        .usage(bold(AnsiColor::Green))
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
        .error(bold(AnsiColor::Red))
        .invalid(bold(AnsiColor::Yellow))
        .valid(bold(AnsiColor::Green))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
