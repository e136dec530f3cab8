//! Charm proof command handler.

use crate::error::{CharmError, CharmResult};
use crate::proof::{Severity, ValidationResult, proof};
use colored::{ColoredString, Colorize};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Proof a charm and exit non-zero if it fails.
pub fn proof_charm(
    charm: Option<String>,
    strict: bool,
    json_output: bool,
    quiet: bool,
) -> CharmResult<()> {
    let charm = match charm {
        Some(charm) => charm,
        None => std::env::current_dir()?.display().to_string(),
    };

    let result = proof(&charm);

    if json_output {
        output_json(&result, &charm)?;
    } else if quiet {
        output_quiet(&result);
    } else {
        output_full(&result, strict, &charm);
    }

    check_exit_status(&result, strict)
}

/// Output the result as JSON.
fn output_json(result: &ValidationResult, charm: &str) -> CharmResult<()> {
    let output = serde_json::json!({
        "charm": charm,
        "valid": result.is_valid(),
        "strict_valid": result.is_strict_valid(),
        "exit_code": result.exit_code(),
        "diagnostics": result.diagnostics,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).map_err(CharmError::from)?
    );
    Ok(())
}

/// Output only errors and worse.
fn output_quiet(result: &ValidationResult) {
    for diag in result
        .diagnostics
        .iter()
        .filter(|d| d.severity >= Severity::Err)
    {
        println!("{}: {}", label(diag.severity), diag.message);
    }
}

/// Output every diagnostic with a summary line.
fn output_full(result: &ValidationResult, strict: bool, charm: &str) {
    println!("  Proofing {}\n", charm.bold());

    for diag in &result.diagnostics {
        println!("  {}: {}", label(diag.severity), diag.message);
    }
    if !result.diagnostics.is_empty() {
        println!();
    }

    let errors = result.count(Severity::Err) + result.count(Severity::Crit);
    let warnings = result.count(Severity::Warn);

    if result.is_fatal() {
        println!("  {} charm could not be proofed", "✗".bright_red());
    } else if errors > 0 || (strict && warnings > 0) {
        let mut parts = Vec::new();
        if errors > 0 {
            parts.push(plural(errors, "error"));
        }
        if warnings > 0 {
            parts.push(plural(warnings, "warning"));
        }
        let suffix = if strict && errors == 0 {
            " (strict mode)"
        } else {
            ""
        };
        println!("  {} {}{}", "✗".bright_red(), parts.join(", "), suffix);
    } else if warnings > 0 {
        println!(
            "  {} valid ({})",
            "✓".bright_green(),
            plural(warnings, "warning")
        );
    } else {
        println!("  {} valid", "✓".bright_green());
    }
}

fn label(severity: Severity) -> ColoredString {
    let text = severity.label();
    match severity {
        Severity::Info => text.bright_blue(),
        Severity::Warn => text.bright_yellow().bold(),
        Severity::Err => text.bright_red().bold(),
        Severity::Crit => text.red().bold().reversed(),
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Exit with the proof's exit code when it fails.
fn check_exit_status(result: &ValidationResult, strict: bool) -> CharmResult<()> {
    let code = result.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    if strict && !result.is_strict_valid() {
        std::process::exit(1);
    }
    Ok(())
}
